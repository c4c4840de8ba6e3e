pub mod keywords;
pub mod context;
pub mod prompt;
pub mod llm;
pub mod validation;
pub mod emr; // Independent of the validation chain
pub mod orchestrator;


pub use orchestrator::*;

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::DatabaseError;
use llm::LlmError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("LLM client error: {0}")]
    Llm(LlmError),

    #[error("Validation service unavailable: {}", failures.join("; "))]
    ServiceUnavailable { failures: Vec<String> },
}

impl PipelineError {
    /// True when every provider failed; callers map this to HTTP 503.
    pub fn is_service_unavailable(&self) -> bool {
        matches!(self, Self::ServiceUnavailable { .. })
    }
}

impl From<LlmError> for PipelineError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::AllProvidersExhausted { failures } => Self::ServiceUnavailable { failures },
            other => Self::Llm(other),
        }
    }
}
