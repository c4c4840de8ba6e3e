use serde::{Deserialize, Serialize};

use super::LlmError;

/// Token counts as reported by a provider. Absent when the provider omits them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Build from optional parts; `None` when the provider reported nothing.
    pub fn from_parts(
        prompt: Option<u32>,
        completion: Option<u32>,
        total: Option<u32>,
    ) -> Option<Self> {
        if prompt.is_none() && completion.is_none() && total.is_none() {
            return None;
        }
        let prompt_tokens = prompt.unwrap_or(0);
        let completion_tokens = completion.unwrap_or(0);
        Some(Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: total.unwrap_or(prompt_tokens.saturating_add(completion_tokens)),
        })
    }
}

/// One successful provider call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmResponse {
    pub provider: String,
    pub model: String,
    pub content: String,
    pub usage: Option<TokenUsage>,
    pub latency_ms: u64,
}

/// Provider envelope after decoding, before timing is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub content: String,
    pub model: Option<String>,
    pub usage: Option<TokenUsage>,
}

/// A single model backend (allows mocking).
pub trait LlmProvider: Send + Sync {
    /// Stable provider name for logs and usage records.
    fn name(&self) -> &str;

    /// Send one prompt. No retries: any failure is returned to the caller.
    fn complete(&self, system: &str, prompt: &str) -> Result<LlmResponse, LlmError>;
}
