use serde_json::{Map, Value};

pub const STATUS_FIELD: &str = "validationStatus";
pub const SCORE_FIELD: &str = "complianceScore";
pub const FEEDBACK_FIELD: &str = "feedback";
pub const DIAGNOSIS_CODES_FIELD: &str = "suggestedICD10Codes";
pub const PROCEDURE_CODES_FIELD: &str = "suggestedCPTCodes";
pub const REASONING_FIELD: &str = "internalReasoning";

/// Fields every parsed response must carry.
pub const REQUIRED_FIELDS: [&str; 5] = [
    STATUS_FIELD,
    SCORE_FIELD,
    FEEDBACK_FIELD,
    DIAGNOSIS_CODES_FIELD,
    PROCEDURE_CODES_FIELD,
];

/// Known key variants, compared after lowercasing and dropping `_`, `-` and
/// spaces, mapped to their canonical field.
const FIELD_SYNONYMS: &[(&str, &str)] = &[
    ("validationstatus", STATUS_FIELD),
    ("status", STATUS_FIELD),
    ("validation", STATUS_FIELD),
    ("compliancescore", SCORE_FIELD),
    ("score", SCORE_FIELD),
    ("appropriatenessscore", SCORE_FIELD),
    ("feedback", FEEDBACK_FIELD),
    ("feedbacktext", FEEDBACK_FIELD),
    ("physicianfeedback", FEEDBACK_FIELD),
    ("suggestedicd10codes", DIAGNOSIS_CODES_FIELD),
    ("suggestedicdcodes", DIAGNOSIS_CODES_FIELD),
    ("suggesteddiagnosiscodes", DIAGNOSIS_CODES_FIELD),
    ("icd10codes", DIAGNOSIS_CODES_FIELD),
    ("icdcodes", DIAGNOSIS_CODES_FIELD),
    ("diagnosiscodes", DIAGNOSIS_CODES_FIELD),
    ("suggestedcptcodes", PROCEDURE_CODES_FIELD),
    ("suggestedprocedurecodes", PROCEDURE_CODES_FIELD),
    ("cptcodes", PROCEDURE_CODES_FIELD),
    ("procedurecodes", PROCEDURE_CODES_FIELD),
    ("internalreasoning", REASONING_FIELD),
    ("reasoning", REASONING_FIELD),
];

fn fold_key(key: &str) -> String {
    key.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Canonical field for a key variant, if it is a known one.
pub fn canonical_field(key: &str) -> Option<&'static str> {
    let folded = fold_key(key);
    FIELD_SYNONYMS
        .iter()
        .find(|(variant, _)| *variant == folded)
        .map(|(_, canonical)| *canonical)
}

/// Rename known variants to canonical names. Keys already canonical win over
/// their variants; among variants, the first in map order wins. Unknown keys
/// pass through unchanged.
pub fn normalize_field_names(object: Map<String, Value>) -> Map<String, Value> {
    let (canonical, others): (Vec<_>, Vec<_>) = object
        .into_iter()
        .partition(|(key, _)| canonical_field(key) == Some(key.as_str()));

    let mut normalized: Map<String, Value> = canonical.into_iter().collect();
    for (key, value) in others {
        let target = canonical_field(&key).map(str::to_string).unwrap_or(key);
        normalized.entry(target).or_insert(value);
    }
    normalized
}

/// Absent, `null`, `false` or a blank string. Zero and empty arrays count as
/// present: a score of 0 and "no suggested codes" are legitimate answers.
/// `complianceScore` ranges over 0-9, so a falsy 0 must not read as missing.
fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Required canonical fields that are missing, in canonical order.
pub fn missing_required_fields(object: &Map<String, Value>) -> Vec<String> {
    REQUIRED_FIELDS
        .iter()
        .filter(|field| is_missing(object.get(**field)))
        .map(|field| field.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn variants_map_to_canonical_names() {
        let normalized = normalize_field_names(object(json!({
            "validation_status": "appropriate",
            "compliance_score": 7,
            "Feedback": "ok",
            "suggested_icd10_codes": [],
            "CPT-codes": [],
            "reasoning": "r"
        })));
        for field in REQUIRED_FIELDS.iter().chain([&REASONING_FIELD]) {
            assert!(normalized.contains_key(*field), "{field}");
        }
        assert_eq!(normalized.len(), 6);
    }

    #[test]
    fn canonical_key_not_overwritten_by_variant() {
        let normalized = normalize_field_names(object(json!({
            "complianceScore": 8,
            "score": 2
        })));
        assert_eq!(normalized[SCORE_FIELD], json!(8));
        assert_eq!(normalized.len(), 1);
    }

    #[test]
    fn unknown_keys_pass_through() {
        let normalized = normalize_field_names(object(json!({"modelVersion": "x", "status": "override"})));
        assert_eq!(normalized["modelVersion"], json!("x"));
        assert_eq!(normalized[STATUS_FIELD], json!("override"));
    }

    #[test]
    fn missing_fields_listed_exactly() {
        let missing = missing_required_fields(&object(json!({
            "validationStatus": "appropriate",
            "complianceScore": 0,
            "feedback": "  ",
            "suggestedICD10Codes": null
        })));
        assert_eq!(missing, vec!["feedback", "suggestedICD10Codes", "suggestedCPTCodes"]);
    }

    #[test]
    fn empty_arrays_count_as_present() {
        let missing = missing_required_fields(&object(json!({
            "validationStatus": "appropriate",
            "complianceScore": 5,
            "feedback": "fine",
            "suggestedICD10Codes": [],
            "suggestedCPTCodes": []
        })));
        assert!(missing.is_empty());
    }
}
