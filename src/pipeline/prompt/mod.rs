//! Prompt construction: template resolution, dictation sanitization and
//! placeholder substitution.

pub mod sanitize;
pub mod templates;

pub use sanitize::sanitize_dictation;
pub use templates::*;

use crate::db::CodeLookup;
use crate::models::PromptTemplate;

/// Merge template, context and dictation into the final prompt.
///
/// Each placeholder is replaced at its first occurrence only. A placeholder
/// absent from the template means that content is left out. `dictation` is
/// expected to be sanitized already.
pub fn construct_prompt(
    template: &str,
    context: &str,
    dictation: &str,
    word_limit: Option<u32>,
    is_override: bool,
) -> String {
    let word_limit = word_limit.unwrap_or(DEFAULT_WORD_LIMIT).to_string();

    let mut prompt = template
        .replacen(CONTEXT_PLACEHOLDER, context, 1)
        .replacen(DICTATION_PLACEHOLDER, dictation, 1)
        .replacen(WORD_LIMIT_PLACEHOLDER, &word_limit, 1);

    if is_override {
        prompt.push_str(OVERRIDE_INSTRUCTION);
    }
    prompt
}

/// Active database template, or the built-in one when none is active or the
/// lookup fails.
pub fn resolve_template<S: CodeLookup + ?Sized>(store: &S) -> PromptTemplate {
    match store.active_prompt_template() {
        Ok(Some(template)) => {
            tracing::debug!(template_id = template.id, "Using active prompt template");
            template
        }
        Ok(None) => {
            tracing::info!("No active prompt template, using built-in default");
            built_in_template()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Prompt template lookup failed, using built-in default");
            built_in_template()
        }
    }
}
