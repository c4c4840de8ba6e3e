use std::time::{Duration, Instant};

use crate::config::{ProviderKind, ProviderSettings};

use super::types::{Completion, LlmProvider, LlmResponse};
use super::{anthropic, openai_compat, truncate_body, LlmError};

/// Blocking HTTP client for one configured provider.
pub struct HttpProvider {
    settings: ProviderSettings,
    client: reqwest::blocking::Client,
}

impl HttpProvider {
    /// Build a client whose every request is bounded by the provider timeout.
    pub fn new(settings: ProviderSettings) -> Result<Self, LlmError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| LlmError::HttpClient(e.to_string()))?;

        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    fn send(&self, system: &str, prompt: &str) -> Result<Completion, LlmError> {
        let s = &self.settings;
        let request = match s.kind {
            ProviderKind::Anthropic => self
                .client
                .post(&s.endpoint)
                .header("x-api-key", &s.api_key)
                .header("anthropic-version", anthropic::ANTHROPIC_VERSION)
                .json(&anthropic::request_body(&s.model, s.max_tokens, system, prompt)),
            ProviderKind::Grok | ProviderKind::OpenAi => self
                .client
                .post(&s.endpoint)
                .bearer_auth(&s.api_key)
                .json(&openai_compat::request_body(&s.model, s.max_tokens, system, prompt)),
        };

        let response = request.send().map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout(s.timeout_secs)
            } else {
                LlmError::HttpClient(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response.text().map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout(s.timeout_secs)
            } else {
                LlmError::HttpClient(e.to_string())
            }
        })?;

        if !status.is_success() {
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        match s.kind {
            ProviderKind::Anthropic => anthropic::parse_response(&body),
            ProviderKind::Grok | ProviderKind::OpenAi => openai_compat::parse_response(&body),
        }
    }
}

impl LlmProvider for HttpProvider {
    fn name(&self) -> &str {
        self.settings.kind.as_str()
    }

    fn complete(&self, system: &str, prompt: &str) -> Result<LlmResponse, LlmError> {
        let started = Instant::now();
        let completion = self.send(system, prompt)?;
        let latency_ms = started.elapsed().as_millis() as u64;

        if completion.content.trim().is_empty() {
            return Err(LlmError::EmptyContent);
        }

        Ok(LlmResponse {
            provider: self.name().to_string(),
            model: completion
                .model
                .unwrap_or_else(|| self.settings.model.clone()),
            content: completion.content,
            usage: completion.usage,
            latency_ms,
        })
    }
}
