//! Partial extraction from model output that could not be parsed or validated.
//!
//! Always produces a `needs_clarification` result. Codes and a score are
//! scraped from the raw text with regexes; the failure cause and an excerpt of
//! the raw text go into `internalReasoning`.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::types::{DiagnosisCode, ProcedureCode, ValidationResult};
use crate::config::NormalizerPolicy;
use crate::models::ValidationStatus;

pub const FALLBACK_FEEDBACK: &str = "The automated validation response could not be fully \
processed. Please review this order manually or add clinical detail and resubmit.";

static SCORE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:compliance[_\s]?score|score)"?\s*[:=]\s*"?(\d{1,2})\b"#).unwrap()
});

static DIAGNOSIS_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][0-9]{2}(?:\.[0-9A-Z]{1,4})?\b").unwrap());

static PROCEDURE_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9]{5}\b").unwrap());

/// Build the fallback result for `raw`, recording `cause`.
pub fn fallback_result(raw: &str, cause: &str, policy: &NormalizerPolicy) -> ValidationResult {
    let compliance_score = scrape_score(raw);
    let suggested_diagnosis_codes = scrape_diagnosis_codes(raw);
    let suggested_procedure_codes = scrape_procedure_codes(raw, policy);

    tracing::debug!(
        diagnosis_codes = suggested_diagnosis_codes.len(),
        procedure_codes = suggested_procedure_codes.len(),
        compliance_score,
        "Scraped partial result from raw model output"
    );

    ValidationResult {
        status: ValidationStatus::NeedsClarification,
        compliance_score,
        feedback: FALLBACK_FEEDBACK.to_string(),
        suggested_diagnosis_codes,
        suggested_procedure_codes,
        internal_reasoning: format!(
            "Response normalization failed: {cause}. Raw response excerpt: {}",
            excerpt(raw, policy.excerpt_chars)
        ),
    }
}

fn scrape_score(raw: &str) -> u8 {
    SCORE_PATTERN
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u8>().ok())
        .map(|score| score.min(9))
        .unwrap_or(0)
}

fn scrape_diagnosis_codes(raw: &str) -> Vec<DiagnosisCode> {
    let mut seen = HashSet::new();
    DIAGNOSIS_CODE_PATTERN
        .find_iter(raw)
        .map(|m| m.as_str().to_string())
        .filter(|code| seen.insert(code.clone()))
        .enumerate()
        .map(|(i, code)| DiagnosisCode {
            code,
            description: String::new(),
            is_primary: i == 0,
        })
        .collect()
}

fn scrape_procedure_codes(raw: &str, policy: &NormalizerPolicy) -> Vec<ProcedureCode> {
    let mut seen = HashSet::new();
    PROCEDURE_CODE_PATTERN
        .find_iter(raw)
        .map(|m| m.as_str().to_string())
        .filter(|code| policy.accepts_procedure_code(code))
        .filter(|code| seen.insert(code.clone()))
        .map(|code| ProcedureCode {
            code,
            description: String::new(),
        })
        .collect()
}

fn excerpt(raw: &str, max_chars: usize) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(max_chars).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrapes_codes_and_score_from_prose() {
        let raw = "I think this is appropriate. complianceScore: 8. Codes R51 and G43.909, \
                   order CPT 70450 or 70551; billing 99213 not relevant. R51 again.";
        let result = fallback_result(raw, "no JSON object", &NormalizerPolicy::default());

        assert_eq!(result.status, ValidationStatus::NeedsClarification);
        assert_eq!(result.compliance_score, 8);
        let dx: Vec<_> = result.suggested_diagnosis_codes.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(dx, vec!["R51", "G43.909"]);
        assert!(result.suggested_diagnosis_codes[0].is_primary);
        let px: Vec<_> = result.suggested_procedure_codes.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(px, vec!["70450", "70551"]);
    }

    #[test]
    fn truncated_json_score_is_scraped() {
        let raw = r#"{"validationStatus": "appropriate", "complianceScore": 7, "feedback": "CT head is"#;
        assert_eq!(fallback_result(raw, "x", &NormalizerPolicy::default()).compliance_score, 7);
    }

    #[test]
    fn score_clamped_and_defaults_to_zero() {
        let policy = NormalizerPolicy::default();
        assert_eq!(fallback_result("score = 42", "x", &policy).compliance_score, 9);
        assert_eq!(fallback_result("nothing useful", "x", &policy).compliance_score, 0);
    }

    #[test]
    fn procedure_digits_follow_policy() {
        let policy = NormalizerPolicy {
            procedure_leading_digits: vec![],
            ..Default::default()
        };
        let result = fallback_result("99213 and 70450", "x", &policy);
        assert_eq!(result.suggested_procedure_codes.len(), 2);
    }

    #[test]
    fn reasoning_records_cause_and_excerpt() {
        let policy = NormalizerPolicy {
            excerpt_chars: 10,
            ..Default::default()
        };
        let result = fallback_result("abcdefghijklmnop\n\nqrst", "JSON parsing error: eof", &policy);
        assert!(result.internal_reasoning.contains("JSON parsing error: eof"));
        assert!(result.internal_reasoning.ends_with("abcdefghij…"));
        assert_eq!(result.feedback, FALLBACK_FEEDBACK);
    }
}
