//! End-to-end validation of one dictation.
//!
//! sanitize → keywords → categorize → database context → prompt → provider
//! chain → normalize. Only an unavailable database, a configuration problem
//! or an exhausted provider chain produce an error; malformed model output
//! always ends in a result.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::context::build_database_context;
use super::keywords::{categorize_keywords, extract_keywords, CategorizedKeywords};
use super::llm::{FallbackChain, LlmResponse, TokenUsage};
use super::prompt::{construct_prompt, resolve_template, sanitize_dictation, VALIDATION_SYSTEM_PROMPT};
use super::validation::{normalize_response_with_outcome, NormalizationOutcome, ValidationResult};
use super::PipelineError;
use crate::config::{LlmConfig, NormalizerPolicy};
use crate::db::CodeLookup;

/// Usage record for the provider call that produced a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmCallRecord {
    pub provider: String,
    pub model: String,
    pub usage: Option<TokenUsage>,
    pub latency_ms: u64,
}

impl From<&LlmResponse> for LlmCallRecord {
    fn from(response: &LlmResponse) -> Self {
        Self {
            provider: response.provider.clone(),
            model: response.model.clone(),
            usage: response.usage,
            latency_ms: response.latency_ms,
        }
    }
}

/// A validation result plus what the caller needs to log or persist it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRun {
    pub request_id: Uuid,
    pub result: ValidationResult,
    pub keywords: CategorizedKeywords,
    pub llm: LlmCallRecord,
    pub normalization: NormalizationOutcome,
    pub completed_at: DateTime<Utc>,
}

pub struct ValidationPipeline<S: CodeLookup> {
    store: S,
    llm: FallbackChain,
    policy: NormalizerPolicy,
}

impl<S: CodeLookup> ValidationPipeline<S> {
    pub fn new(store: S, llm: FallbackChain, policy: NormalizerPolicy) -> Self {
        Self { store, llm, policy }
    }

    /// Provider chain and normalizer policy from environment variables.
    pub fn from_env(store: S) -> Result<Self, PipelineError> {
        let config = LlmConfig::from_env()?;
        let llm = FallbackChain::from_config(&config)?;
        let policy = NormalizerPolicy::from_env()?;
        Ok(Self::new(store, llm, policy))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate a dictation. `is_override` marks a physician override of an
    /// earlier decision.
    pub fn validate(
        &self,
        dictation: &str,
        is_override: bool,
    ) -> Result<ValidationResult, PipelineError> {
        self.validate_detailed(dictation, is_override)
            .map(|run| run.result)
    }

    pub fn validate_detailed(
        &self,
        dictation: &str,
        is_override: bool,
    ) -> Result<ValidationRun, PipelineError> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("validation", %request_id);
        let _guard = span.enter();
        let started = Instant::now();

        tracing::info!(dictation_len = dictation.len(), is_override, "Validation started");

        let sanitized = sanitize_dictation(dictation);
        let keywords = extract_keywords(&sanitized);
        let categorized = categorize_keywords(&keywords);
        tracing::debug!(
            anatomy = categorized.anatomy_terms.len(),
            modalities = categorized.modalities.len(),
            symptoms = categorized.symptoms.len(),
            codes = categorized.codes.len(),
            "Keywords categorized"
        );

        let context = build_database_context(&self.store, &keywords)?;
        let template = resolve_template(&self.store);
        let prompt = construct_prompt(
            &template.content,
            &context,
            &sanitized,
            template.word_limit,
            is_override,
        );

        let response = self.llm.complete(VALIDATION_SYSTEM_PROMPT, &prompt)?;
        let (result, normalization) = normalize_response_with_outcome(&response.content, &self.policy);

        tracing::info!(
            status = %result.status,
            compliance_score = result.compliance_score,
            provider = %response.provider,
            fallback = normalization.is_fallback(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Validation complete"
        );

        Ok(ValidationRun {
            request_id,
            llm: LlmCallRecord::from(&response),
            result,
            keywords: categorized,
            normalization,
            completed_at: Utc::now(),
        })
    }
}
