//! Coercion of the two suggested-code lists.
//!
//! Accepted shapes: an array of objects, an array of strings
//! (`"R51 - Headache"`, `"R51: Headache"`, `"R51"`), or one comma-separated
//! string. Anything else yields an empty list.

use std::collections::HashSet;

use serde_json::{Map, Value};

use super::types::{DiagnosisCode, ProcedureCode};

const CODE_KEYS: &[&str] = &[
    "code", "Code", "icd10Code", "icd10_code", "icd10", "cptCode", "cpt_code", "cpt",
];
const DESCRIPTION_KEYS: &[&str] = &["description", "Description", "desc", "name", "display"];
const PRIMARY_KEYS: &[&str] = &["isPrimary", "is_primary", "primary"];

/// Separators between a code and its description in string form.
const DESCRIPTION_SEPARATORS: &[&str] = &[" - ", " – ", " — ", ":"];

#[derive(Debug)]
struct RawCode {
    code: String,
    description: String,
    primary: bool,
}

pub fn normalize_diagnosis_codes(value: Option<&Value>) -> Vec<DiagnosisCode> {
    let raw = dedupe(collect_raw_codes(value));
    let primary_index = raw.iter().position(|c| c.primary).unwrap_or(0);

    raw.into_iter()
        .enumerate()
        .map(|(i, c)| DiagnosisCode {
            code: c.code,
            description: c.description,
            is_primary: i == primary_index,
        })
        .collect()
}

pub fn normalize_procedure_codes(value: Option<&Value>) -> Vec<ProcedureCode> {
    dedupe(collect_raw_codes(value))
        .into_iter()
        .map(|c| ProcedureCode {
            code: c.code,
            description: c.description,
        })
        .collect()
}

fn collect_raw_codes(value: Option<&Value>) -> Vec<RawCode> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(raw_from_item).collect(),
        Some(Value::String(list)) => list
            .split([',', ';'])
            .filter_map(raw_from_str)
            .collect(),
        _ => vec![],
    }
}

fn raw_from_item(item: &Value) -> Option<RawCode> {
    match item {
        Value::Object(fields) => raw_from_object(fields),
        Value::String(s) => raw_from_str(s),
        Value::Number(n) => raw_from_str(&n.to_string()),
        _ => None,
    }
}

fn raw_from_object(fields: &Map<String, Value>) -> Option<RawCode> {
    let code = first_text(fields, CODE_KEYS)?;
    let description = first_text(fields, DESCRIPTION_KEYS).unwrap_or_default();
    let primary = PRIMARY_KEYS
        .iter()
        .find_map(|key| fields.get(*key))
        .is_some_and(is_truthy_flag);

    clean_code(&code).map(|code| RawCode {
        code,
        description: description.trim().to_string(),
        primary,
    })
}

fn raw_from_str(text: &str) -> Option<RawCode> {
    let text = text.trim();
    let (code, description) = DESCRIPTION_SEPARATORS
        .iter()
        .find_map(|sep| text.split_once(sep))
        .unwrap_or((text, ""));

    clean_code(code).map(|code| RawCode {
        code,
        description: description.trim().to_string(),
        primary: false,
    })
}

/// First key holding a string or number, as text.
fn first_text(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match fields.get(*key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn is_truthy_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "1"),
        Value::Number(n) => n.as_i64() == Some(1),
        _ => false,
    }
}

fn clean_code(code: &str) -> Option<String> {
    let code = code.trim().to_uppercase();
    (!code.is_empty()).then_some(code)
}

/// Keep the first occurrence of each code. A later duplicate marked primary
/// passes its flag to the kept entry.
fn dedupe(codes: Vec<RawCode>) -> Vec<RawCode> {
    let mut seen = HashSet::new();
    let mut kept: Vec<RawCode> = Vec::with_capacity(codes.len());

    for code in codes {
        if seen.insert(code.code.clone()) {
            kept.push(code);
        } else if code.primary {
            if let Some(existing) = kept.iter_mut().find(|k| k.code == code.code) {
                existing.primary = true;
            }
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn codes(list: &[DiagnosisCode]) -> Vec<&str> {
        list.iter().map(|c| c.code.as_str()).collect()
    }

    #[test]
    fn array_of_objects() {
        let value = json!([
            {"code": "r51", "description": " Headache "},
            {"code": "G43.909", "description": "Migraine", "isPrimary": true}
        ]);
        let result = normalize_diagnosis_codes(Some(&value));
        assert_eq!(codes(&result), vec!["R51", "G43.909"]);
        assert_eq!(result[0].description, "Headache");
        assert!(!result[0].is_primary);
        assert!(result[1].is_primary);
    }

    #[test]
    fn alternate_object_keys() {
        let value = json!([{"cpt_code": 70450, "desc": "CT head"}]);
        let result = normalize_procedure_codes(Some(&value));
        assert_eq!(result, vec![ProcedureCode { code: "70450".into(), description: "CT head".into() }]);
    }

    #[test]
    fn array_of_strings() {
        let value = json!(["R51 - Headache", "M54.5: Low back pain", "R07.9"]);
        let result = normalize_diagnosis_codes(Some(&value));
        assert_eq!(codes(&result), vec!["R51", "M54.5", "R07.9"]);
        assert_eq!(result[1].description, "Low back pain");
        assert_eq!(result[2].description, "");
    }

    #[test]
    fn comma_separated_string() {
        let value = json!("70450, 70551 - MRI brain,  ");
        let result = normalize_procedure_codes(Some(&value));
        assert_eq!(result.len(), 2);
        assert_eq!(result[1].description, "MRI brain");
    }

    #[test]
    fn unsupported_shapes_yield_empty() {
        for value in [json!(42), json!(true), json!({"code": "R51"}), json!(null)] {
            assert!(normalize_diagnosis_codes(Some(&value)).is_empty(), "{value}");
        }
        assert!(normalize_procedure_codes(None).is_empty());
    }

    #[test]
    fn items_without_code_are_skipped() {
        let value = json!([{"description": "orphan"}, null, ["nested"], {"code": "R51"}]);
        assert_eq!(codes(&normalize_diagnosis_codes(Some(&value))), vec!["R51"]);
    }

    #[test]
    fn dedupes_preserving_first_occurrence() {
        let value = json!(["r51 - Headache", "M54.5", "R51 - Duplicate"]);
        let result = normalize_diagnosis_codes(Some(&value));
        assert_eq!(codes(&result), vec!["R51", "M54.5"]);
        assert_eq!(result[0].description, "Headache");
    }

    #[test]
    fn first_code_primary_when_none_marked() {
        let value = json!(["R51", "M54.5"]);
        let result = normalize_diagnosis_codes(Some(&value));
        assert!(result[0].is_primary);
        assert!(!result[1].is_primary);
    }

    #[test]
    fn at_most_one_primary() {
        let value = json!([
            {"code": "R51", "primary": false},
            {"code": "M54.5", "is_primary": "yes"},
            {"code": "R07.9", "isPrimary": true}
        ]);
        let result = normalize_diagnosis_codes(Some(&value));
        assert_eq!(result.iter().filter(|c| c.is_primary).count(), 1);
        assert!(result[1].is_primary);
    }

    #[test]
    fn duplicate_primary_flag_moves_to_kept_entry() {
        let value = json!([
            {"code": "M54.5"},
            {"code": "R51"},
            {"code": "r51", "isPrimary": true}
        ]);
        let result = normalize_diagnosis_codes(Some(&value));
        assert_eq!(codes(&result), vec!["M54.5", "R51"]);
        assert!(result[1].is_primary);
        assert!(!result[0].is_primary);
    }
}
