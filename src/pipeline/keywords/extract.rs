use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::vocabulary::{ANATOMY_TERMS, MODALITY_TERMS, SYMPTOM_TERMS};

/// Explicit diagnosis codes written in the dictation (R51, M54.5).
static DIAGNOSIS_CODE_IN_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b[a-z][0-9]{2}(?:\.[0-9]{1,2})?\b").unwrap());

/// Explicit 5-digit procedure codes.
static PROCEDURE_CODE_IN_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9]{5}\b").unwrap());

static ANATOMY_PATTERN: LazyLock<Regex> = LazyLock::new(|| vocabulary_regex(ANATOMY_TERMS));
static MODALITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| vocabulary_regex(MODALITY_TERMS));
static SYMPTOM_PATTERN: LazyLock<Regex> = LazyLock::new(|| vocabulary_regex(SYMPTOM_TERMS));

/// Whole-word alternation over a term list, longest terms first so that
/// multi-word phrases win over their prefixes.
fn vocabulary_regex(terms: &[&str]) -> Regex {
    let mut sorted: Vec<&str> = terms.to_vec();
    sorted.sort_by_key(|t| std::cmp::Reverse(t.len()));
    let alternation = sorted
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).unwrap()
}

/// Pull candidate medical terms out of dictation text.
///
/// Vocabulary terms come back lowercase; explicit codes come back uppercase
/// (codes are identifiers). Order follows first appearance in the text and
/// each term appears once.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut found: Vec<(usize, String)> = Vec::new();

    for pattern in [&*ANATOMY_PATTERN, &*MODALITY_PATTERN, &*SYMPTOM_PATTERN] {
        for mat in pattern.find_iter(text) {
            found.push((mat.start(), mat.as_str().to_lowercase()));
        }
    }

    for pattern in [&*DIAGNOSIS_CODE_IN_TEXT, &*PROCEDURE_CODE_IN_TEXT] {
        for mat in pattern.find_iter(text) {
            found.push((mat.start(), mat.as_str().to_uppercase()));
        }
    }

    found.sort_by_key(|(offset, _)| *offset);

    let mut seen = HashSet::new();
    let keywords: Vec<String> = found
        .into_iter()
        .map(|(_, term)| term)
        .filter(|term| seen.insert(term.clone()))
        .collect();

    tracing::debug!(keyword_count = keywords.len(), "Extracted dictation keywords");
    keywords
}
