//! Application constants and environment-derived LLM provider configuration.
//!
//! The provider chain order is fixed here: Anthropic first, Grok second,
//! OpenAI third. A provider whose API key is absent is left out of the chain;
//! a chain with no providers at all is a configuration error.

use serde::Serialize;
use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "clinical-intake";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default per-call provider timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default completion budget sent to every provider.
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "clinical_intake=info,warn"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No LLM provider has credentials configured")]
    NoProvidersConfigured,

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Provider families. Grok and OpenAI share the chat-completions envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Anthropic,
    Grok,
    OpenAi,
}

impl ProviderKind {
    /// Fixed fallback order.
    pub const CHAIN_ORDER: [ProviderKind; 3] =
        [ProviderKind::Anthropic, ProviderKind::Grok, ProviderKind::OpenAi];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::Grok => "grok",
            Self::OpenAi => "openai",
        }
    }

    fn env_prefix(&self) -> &'static str {
        match self {
            Self::Anthropic => "CLAUDE",
            Self::Grok => "GROK",
            Self::OpenAi => "GPT",
        }
    }

    fn api_key_var(&self) -> &'static str {
        match self {
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::Grok => "GROK_API_KEY",
            Self::OpenAi => "OPENAI_API_KEY",
        }
    }

    fn default_model(&self) -> &'static str {
        match self {
            Self::Anthropic => "claude-3-7-sonnet-20250219",
            Self::Grok => "grok-3-latest",
            Self::OpenAi => "gpt-4-turbo",
        }
    }

    fn default_endpoint(&self) -> &'static str {
        match self {
            Self::Anthropic => "https://api.anthropic.com/v1/messages",
            Self::Grok => "https://api.x.ai/v1/chat/completions",
            Self::OpenAi => "https://api.openai.com/v1/chat/completions",
        }
    }
}

/// Everything needed to call one provider.
#[derive(Clone)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    pub model: String,
    pub api_key: String,
    pub endpoint: String,
    pub timeout_secs: u64,
    pub max_tokens: u32,
}

// Keep API keys out of debug output and logs.
impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("kind", &self.kind)
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}

/// Ordered provider chain configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub providers: Vec<ProviderSettings>,
}

impl LlmConfig {
    /// Read the chain from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the chain from an arbitrary key lookup (tests pass a map).
    ///
    /// Recognised keys per provider: `<KEY_VAR>`, `<PREFIX>_MODEL_NAME`,
    /// `<PREFIX>_ENDPOINT`, `<PREFIX>_TIMEOUT_SECS`. Shared:
    /// `LLM_TIMEOUT_SECS`, `LLM_MAX_TOKENS`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let shared_timeout = match get("LLM_TIMEOUT_SECS") {
            Some(v) => parse_number::<u64>("LLM_TIMEOUT_SECS", &v)?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        let max_tokens = match get("LLM_MAX_TOKENS") {
            Some(v) => parse_number::<u32>("LLM_MAX_TOKENS", &v)?,
            None => DEFAULT_MAX_TOKENS,
        };

        let mut providers = Vec::new();
        for kind in ProviderKind::CHAIN_ORDER {
            let Some(api_key) = get(kind.api_key_var()) else {
                tracing::info!(
                    provider = kind.as_str(),
                    "No API key configured, provider left out of fallback chain"
                );
                continue;
            };

            let prefix = kind.env_prefix();
            let timeout_key = format!("{prefix}_TIMEOUT_SECS");
            let timeout_secs = match get(&timeout_key) {
                Some(v) => parse_number::<u64>(&timeout_key, &v)?,
                None => shared_timeout,
            };

            providers.push(ProviderSettings {
                kind,
                model: get(&format!("{prefix}_MODEL_NAME"))
                    .unwrap_or_else(|| kind.default_model().to_string()),
                api_key,
                endpoint: get(&format!("{prefix}_ENDPOINT"))
                    .unwrap_or_else(|| kind.default_endpoint().to_string()),
                timeout_secs,
                max_tokens,
            });
        }

        if providers.is_empty() {
            return Err(ConfigError::NoProvidersConfigured);
        }

        Ok(Self { providers })
    }
}

/// Characters of raw model output kept in a fallback result's reasoning.
pub const DEFAULT_EXCERPT_CHARS: usize = 500;

/// Heuristics used when a model response cannot be parsed and codes are
/// scraped from the raw text instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizerPolicy {
    /// Leading digits that mark a 5-digit token as a likely imaging procedure
    /// code (radiology CPT codes are 7xxxx). Empty accepts every 5-digit token.
    pub procedure_leading_digits: Vec<char>,
    pub excerpt_chars: usize,
}

impl Default for NormalizerPolicy {
    fn default() -> Self {
        Self {
            procedure_leading_digits: vec!['7'],
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
        }
    }
}

impl NormalizerPolicy {
    /// Read overrides from `NORMALIZER_PROCEDURE_DIGITS` (e.g. `"7"`, `"37"`)
    /// and `NORMALIZER_EXCERPT_CHARS`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut policy = Self::default();

        if let Some(digits) = lookup("NORMALIZER_PROCEDURE_DIGITS") {
            let digits = digits.trim();
            if !digits.chars().all(|c| c.is_ascii_digit()) {
                return Err(ConfigError::InvalidValue {
                    key: "NORMALIZER_PROCEDURE_DIGITS".to_string(),
                    value: digits.to_string(),
                });
            }
            policy.procedure_leading_digits = digits.chars().collect();
        }
        if let Some(v) = lookup("NORMALIZER_EXCERPT_CHARS").filter(|v| !v.trim().is_empty()) {
            policy.excerpt_chars = parse_number("NORMALIZER_EXCERPT_CHARS", v.trim())?;
        }

        Ok(policy)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Whether a 5-digit token scraped from raw text counts as a procedure code.
    pub fn accepts_procedure_code(&self, code: &str) -> bool {
        match code.chars().next() {
            Some(first) => {
                self.procedure_leading_digits.is_empty()
                    || self.procedure_leading_digits.contains(&first)
            }
            None => false,
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse::<T>().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn chain_follows_fixed_order() {
        let config = LlmConfig::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-openai"),
            ("ANTHROPIC_API_KEY", "sk-ant"),
            ("GROK_API_KEY", "xai-key"),
        ]))
        .unwrap();

        let kinds: Vec<_> = config.providers.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![ProviderKind::Anthropic, ProviderKind::Grok, ProviderKind::OpenAi]
        );
    }

    #[test]
    fn provider_without_key_is_skipped() {
        let config = LlmConfig::from_lookup(lookup_from(&[("GROK_API_KEY", "xai-key")])).unwrap();
        assert_eq!(config.providers.len(), 1);
        assert_eq!(config.providers[0].kind, ProviderKind::Grok);
        assert_eq!(config.providers[0].endpoint, "https://api.x.ai/v1/chat/completions");
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let result = LlmConfig::from_lookup(lookup_from(&[("ANTHROPIC_API_KEY", "   ")]));
        assert!(matches!(result, Err(ConfigError::NoProvidersConfigured)));
    }

    #[test]
    fn no_keys_is_configuration_error() {
        let result = LlmConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(ConfigError::NoProvidersConfigured)));
    }

    #[test]
    fn defaults_applied() {
        let config = LlmConfig::from_lookup(lookup_from(&[("ANTHROPIC_API_KEY", "k")])).unwrap();
        let p = &config.providers[0];
        assert_eq!(p.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(p.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(p.model, "claude-3-7-sonnet-20250219");
    }

    #[test]
    fn per_provider_timeout_overrides_shared() {
        let config = LlmConfig::from_lookup(lookup_from(&[
            ("ANTHROPIC_API_KEY", "k"),
            ("OPENAI_API_KEY", "k2"),
            ("LLM_TIMEOUT_SECS", "20"),
            ("GPT_TIMEOUT_SECS", "45"),
            ("GPT_MODEL_NAME", "gpt-4o"),
        ]))
        .unwrap();
        assert_eq!(config.providers[0].timeout_secs, 20);
        assert_eq!(config.providers[1].timeout_secs, 45);
        assert_eq!(config.providers[1].model, "gpt-4o");
    }

    #[test]
    fn invalid_number_is_rejected() {
        let result = LlmConfig::from_lookup(lookup_from(&[
            ("ANTHROPIC_API_KEY", "k"),
            ("LLM_MAX_TOKENS", "lots"),
        ]));
        match result {
            Err(ConfigError::InvalidValue { key, value }) => {
                assert_eq!(key, "LLM_MAX_TOKENS");
                assert_eq!(value, "lots");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config =
            LlmConfig::from_lookup(lookup_from(&[("ANTHROPIC_API_KEY", "sk-secret-123")])).unwrap();
        let rendered = format!("{:?}", config.providers[0]);
        assert!(!rendered.contains("sk-secret-123"));
        assert!(rendered.contains("anthropic") || rendered.contains("Anthropic"));
    }

    #[test]
    fn normalizer_policy_defaults_to_radiology_digit() {
        let policy = NormalizerPolicy::default();
        assert!(policy.accepts_procedure_code("70450"));
        assert!(!policy.accepts_procedure_code("99213"));
        assert_eq!(policy.excerpt_chars, DEFAULT_EXCERPT_CHARS);
    }

    #[test]
    fn normalizer_policy_overrides() {
        let policy = NormalizerPolicy::from_lookup(lookup_from(&[
            ("NORMALIZER_PROCEDURE_DIGITS", "79"),
            ("NORMALIZER_EXCERPT_CHARS", "120"),
        ]))
        .unwrap();
        assert!(policy.accepts_procedure_code("93000"));
        assert!(!policy.accepts_procedure_code("10060"));
        assert_eq!(policy.excerpt_chars, 120);

        let open = NormalizerPolicy::from_lookup(lookup_from(&[("NORMALIZER_PROCEDURE_DIGITS", "")]))
            .unwrap();
        assert!(open.accepts_procedure_code("10060"));
    }

    #[test]
    fn normalizer_policy_rejects_non_digits() {
        let result =
            NormalizerPolicy::from_lookup(lookup_from(&[("NORMALIZER_PROCEDURE_DIGITS", "7a")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn app_name_is_set() {
        assert_eq!(APP_NAME, "clinical-intake");
        assert!(default_log_filter().contains("clinical_intake"));
    }
}
