pub mod anthropic;
pub mod fallback;
pub mod http;
pub mod openai_compat;
pub mod types;

pub use fallback::*;
pub use http::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Provider returned error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Provider returned no content")]
    EmptyContent,

    #[error("All LLM providers failed: {}", failures.join("; "))]
    AllProvidersExhausted { failures: Vec<String> },
}

impl LlmError {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::AllProvidersExhausted { .. })
    }
}

/// Cap on error bodies carried in `LlmError::Status`.
pub(crate) const MAX_ERROR_BODY_CHARS: usize = 300;

pub(crate) fn truncate_body(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
