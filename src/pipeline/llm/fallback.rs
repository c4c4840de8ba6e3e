//! Ordered provider fallback.
//!
//! Providers are tried strictly in sequence, each exactly once. The first
//! success ends the call; when every provider fails the caller gets a single
//! `AllProvidersExhausted` carrying one line per failed attempt.

use crate::config::LlmConfig;

use super::http::HttpProvider;
use super::types::{LlmProvider, LlmResponse};
use super::LlmError;

pub struct FallbackChain {
    providers: Vec<Box<dyn LlmProvider>>,
}

impl FallbackChain {
    pub fn new(providers: Vec<Box<dyn LlmProvider>>) -> Self {
        Self { providers }
    }

    /// One `HttpProvider` per configured provider, in configuration order.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let providers = config
            .providers
            .iter()
            .map(|settings| {
                HttpProvider::new(settings.clone()).map(|p| Box::new(p) as Box<dyn LlmProvider>)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(providers))
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn complete(&self, system: &str, prompt: &str) -> Result<LlmResponse, LlmError> {
        let mut failures = Vec::with_capacity(self.providers.len());

        for (position, provider) in self.providers.iter().enumerate() {
            match provider.complete(system, prompt) {
                Ok(response) => {
                    tracing::info!(
                        provider = %provider.name(),
                        model = %response.model,
                        position,
                        latency_ms = response.latency_ms,
                        total_tokens = response.usage.map(|u| u.total_tokens),
                        "LLM provider succeeded"
                    );
                    return Ok(response);
                }
                Err(e) => {
                    tracing::warn!(
                        provider = %provider.name(),
                        position,
                        error = %e,
                        "LLM provider failed, trying next"
                    );
                    failures.push(format!("{}: {e}", provider.name()));
                }
            }
        }

        tracing::error!(attempts = failures.len(), "All LLM providers exhausted");
        Err(LlmError::AllProvidersExhausted { failures })
    }
}
