use serde_json::{Map, Value};

use super::codes::{normalize_diagnosis_codes, normalize_procedure_codes};
use super::extract::extract_json_candidate;
use super::fallback::fallback_result;
use super::fields::*;
use super::types::{NormalizationOutcome, ValidationResult};
use super::NormalizationError;
use crate::config::NormalizerPolicy;
use crate::models::ValidationStatus;

/// Turn raw model text into a `ValidationResult`. Never fails: any parse or
/// validation error produces the fallback result instead.
pub fn normalize_response(raw: &str, policy: &NormalizerPolicy) -> ValidationResult {
    normalize_response_with_outcome(raw, policy).0
}

/// Like `normalize_response`, also reporting whether the fallback was used.
pub fn normalize_response_with_outcome(
    raw: &str,
    policy: &NormalizerPolicy,
) -> (ValidationResult, NormalizationOutcome) {
    match parse_validation_response(raw) {
        Ok(result) => {
            tracing::debug!(status = %result.status, "Model response normalized");
            (result, NormalizationOutcome::Parsed)
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                response_len = raw.len(),
                "Model response unusable, using partial extraction"
            );
            let reason = e.to_string();
            (
                fallback_result(raw, &reason, policy),
                NormalizationOutcome::Fallback { reason },
            )
        }
    }
}

/// Strict path: extract, parse, rename fields, check required fields and the
/// status, then coerce scores and code lists.
pub fn parse_validation_response(raw: &str) -> Result<ValidationResult, NormalizationError> {
    let candidate = extract_json_candidate(raw);
    if candidate.is_empty() {
        return Err(NormalizationError::NoJsonObject);
    }

    let parsed: Value = serde_json::from_str(candidate)
        .map_err(|e| NormalizationError::JsonParsing(e.to_string()))?;
    let Value::Object(object) = parsed else {
        return Err(NormalizationError::NoJsonObject);
    };

    let object = normalize_field_names(object);

    let missing = missing_required_fields(&object);
    if !missing.is_empty() {
        return Err(NormalizationError::MissingFields(missing));
    }

    let status = parse_status(object.get(STATUS_FIELD))?;

    Ok(ValidationResult {
        status,
        compliance_score: parse_score(object.get(SCORE_FIELD)),
        feedback: text_field(&object, FEEDBACK_FIELD),
        suggested_diagnosis_codes: normalize_diagnosis_codes(object.get(DIAGNOSIS_CODES_FIELD)),
        suggested_procedure_codes: normalize_procedure_codes(object.get(PROCEDURE_CODES_FIELD)),
        internal_reasoning: text_field(&object, REASONING_FIELD),
    })
}

fn parse_status(value: Option<&Value>) -> Result<ValidationStatus, NormalizationError> {
    let raw = match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    ValidationStatus::parse_loose(&raw).ok_or(NormalizationError::InvalidStatus(raw))
}

/// Integer 0-9. Accepts numbers and numeric strings (`"7"`, `"7/9"`);
/// fractions round, out-of-range values clamp, anything else is 0.
fn parse_score(value: Option<&Value>) -> u8 {
    let score = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s
            .split('/')
            .next()
            .and_then(|head| head.trim().parse::<f64>().ok()),
        _ => None,
    };
    score
        .filter(|s| s.is_finite())
        .map(|s| s.round().clamp(0.0, 9.0) as u8)
        .unwrap_or(0)
}

fn text_field(object: &Map<String, Value>, field: &str) -> String {
    match object.get(field) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
