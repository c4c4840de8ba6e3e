//! Per-field cleanup applied to every extracted candidate. A candidate that
//! fails validation is dropped, leaving the field open for a later pattern.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::Relationship;

/// The 50 states plus DC.
pub const US_STATE_CODES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH",
    "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

static ZIP_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{5}(?:-\d{4})?$").unwrap());

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,}$").unwrap());

/// Label words that end a free-text value captured from a single-line record
/// such as `Ins: BCBS Member #: ABC123`.
static TRAILING_LABELS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\s+(?:member|policy|subscriber|group|grp|id|auth\w*|relationship|rel|dob|date|phone|plan\s+id|effective)\b.*$",
    )
    .unwrap()
});

/// Insurer name variants, tried in order.
static INSURERS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\banthem\b", "Anthem"),
        (
            r"\b(?:bcbs|bc\s*/\s*bs|bc\s+bs|blue\s*cross(?:\s*(?:and|&|/)?\s*blue\s*shield)?|blue\s*shield)\b",
            "Blue Cross Blue Shield",
        ),
        (r"\b(?:uhc|united\s*health\s*care|united\s*healthcare|unitedhealth(?:care)?|united\s+health)\b", "UnitedHealthcare"),
        (r"\baetna\b", "Aetna"),
        (r"\bcigna\b", "Cigna"),
        (r"\bhumana\b", "Humana"),
        (r"\bmedicare\b", "Medicare"),
        (r"\b(?:medicaid|medi-cal)\b", "Medicaid"),
        (r"\bkaiser(?:\s+permanente)?\b", "Kaiser Permanente"),
        (r"\btri-?care\b", "Tricare"),
    ]
    .into_iter()
    .map(|(pattern, name)| (Regex::new(&format!("(?i){pattern}")).unwrap(), name))
    .collect()
});

/// `(NNN) NNN-NNNN` when 10 digits (or 11 with a leading 1) are present;
/// otherwise the trimmed input.
pub fn format_phone(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let national = match digits.len() {
        10 => digits.as_str(),
        11 if digits.starts_with('1') => &digits[1..],
        _ => return Some(raw.to_string()),
    };
    Some(format!(
        "({}) {}-{}",
        &national[..3],
        &national[3..6],
        &national[6..]
    ))
}

pub fn normalize_state(raw: &str) -> Option<String> {
    let state = raw.trim().trim_end_matches('.').to_uppercase();
    US_STATE_CODES.contains(&state.as_str()).then_some(state)
}

pub fn normalize_zip(raw: &str) -> Option<String> {
    let zip = raw.trim();
    ZIP_CODE.is_match(zip).then(|| zip.to_string())
}

pub fn normalize_email(raw: &str) -> Option<String> {
    let email = raw.trim().trim_end_matches('.').to_lowercase();
    EMAIL.is_match(&email).then_some(email)
}

/// Free text with trailing punctuation and label spill-over removed.
pub fn clean_free_text(raw: &str) -> Option<String> {
    let cut = TRAILING_LABELS.replace(raw.trim(), "");
    let cleaned = cut
        .trim()
        .trim_end_matches([',', ';', ':', '-', '#', '|'])
        .trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// Street lines: free text that is not an e-mail address.
pub fn normalize_street(raw: &str) -> Option<String> {
    clean_free_text(raw).filter(|street| !street.contains('@'))
}

/// Known insurer variants map to one display name; others are kept as given.
pub fn canonical_insurer(raw: &str) -> Option<String> {
    let name = clean_free_text(raw)?;
    let canonical = INSURERS
        .iter()
        .find(|(pattern, _)| pattern.is_match(&name))
        .map(|(_, canonical)| canonical.to_string());
    Some(canonical.unwrap_or(name))
}

/// Identifier values (policy, group, authorization) must carry a digit.
pub fn normalize_identifier(raw: &str) -> Option<String> {
    let id = raw.trim().trim_end_matches(['.', ',', ';']).to_uppercase();
    (id.len() >= 2 && id.chars().any(|c| c.is_ascii_digit())).then_some(id)
}

/// Holder names: letters only, title-cased.
pub fn normalize_holder_name(raw: &str) -> Option<String> {
    let name = clean_free_text(raw)?;
    if name.len() < 2 || name.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(title_case(&name))
}

pub fn normalize_relationship(raw: &str) -> Option<Relationship> {
    let word = raw.trim();
    (!word.is_empty()).then(|| Relationship::from_free_text(word))
}

/// Capitalize the first letter of every word (after space, hyphen or
/// apostrophe) and lowercase the rest.
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if at_word_start {
            result.extend(c.to_uppercase());
        } else {
            result.extend(c.to_lowercase());
        }
        at_word_start = matches!(c, ' ' | '-' | '\'');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_formats() {
        assert_eq!(format_phone("(555) 123-4567").as_deref(), Some("(555) 123-4567"));
        assert_eq!(format_phone("555.123.4567").as_deref(), Some("(555) 123-4567"));
        assert_eq!(format_phone("+1 555 123 4567").as_deref(), Some("(555) 123-4567"));
        assert_eq!(format_phone("123-4567").as_deref(), Some("123-4567"));
        assert_eq!(format_phone("  "), None);
    }

    #[test]
    fn state_set_has_51_unique_entries() {
        let mut codes = US_STATE_CODES.to_vec();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 51);
        assert!(US_STATE_CODES.contains(&"DC"));
    }

    #[test]
    fn states_validated() {
        assert_eq!(normalize_state("il").as_deref(), Some("IL"));
        assert_eq!(normalize_state("ZZ"), None);
        assert_eq!(normalize_state("PR"), None);
    }

    #[test]
    fn zips_validated() {
        assert_eq!(normalize_zip("62701").as_deref(), Some("62701"));
        assert_eq!(normalize_zip("62701-1234").as_deref(), Some("62701-1234"));
        assert_eq!(normalize_zip("6270"), None);
        assert_eq!(normalize_zip("62701-12"), None);
    }

    #[test]
    fn insurer_variants_canonicalized() {
        for raw in ["BCBS", "Blue Cross", "BlueCross BlueShield of Illinois", "BC/BS", "blue shield"] {
            assert_eq!(canonical_insurer(raw).as_deref(), Some("Blue Cross Blue Shield"), "{raw}");
        }
        assert_eq!(canonical_insurer("UHC").as_deref(), Some("UnitedHealthcare"));
        assert_eq!(canonical_insurer("United Health Care").as_deref(), Some("UnitedHealthcare"));
        assert_eq!(canonical_insurer("Anthem Blue Cross").as_deref(), Some("Anthem"));
        assert_eq!(canonical_insurer("TRICARE Prime").as_deref(), Some("Tricare"));
        assert_eq!(canonical_insurer("kaiser").as_deref(), Some("Kaiser Permanente"));
        assert_eq!(canonical_insurer("Oscar Health,").as_deref(), Some("Oscar Health"));
    }

    #[test]
    fn free_text_cut_at_next_label() {
        assert_eq!(clean_free_text("BCBS Member").as_deref(), Some("BCBS"));
        assert_eq!(clean_free_text("John Smith Relationship").as_deref(), Some("John Smith"));
        assert_eq!(clean_free_text(" Member "), Some("Member".to_string()));
    }

    #[test]
    fn streets_reject_email_values() {
        assert_eq!(normalize_street("12 Elm St,").as_deref(), Some("12 Elm St"));
        assert_eq!(normalize_street("jane@example.com"), None);
    }

    #[test]
    fn identifiers_need_a_digit() {
        assert_eq!(normalize_identifier("abc123").as_deref(), Some("ABC123"));
        assert_eq!(normalize_identifier("Holder"), None);
        assert_eq!(normalize_identifier("G99.").as_deref(), Some("G99"));
    }

    #[test]
    fn holder_names_title_cased() {
        assert_eq!(normalize_holder_name("JOHN SMITH").as_deref(), Some("John Smith"));
        assert_eq!(normalize_holder_name("mary o'brien-jones").as_deref(), Some("Mary O'Brien-Jones"));
        assert_eq!(normalize_holder_name("12345"), None);
    }

    #[test]
    fn relationships_mapped() {
        assert_eq!(normalize_relationship("Wife"), Some(Relationship::Spouse));
        assert_eq!(normalize_relationship("self"), Some(Relationship::SelfInsured));
        assert_eq!(normalize_relationship("Daughter"), Some(Relationship::Child));
        assert_eq!(normalize_relationship("father"), Some(Relationship::Parent));
        assert_eq!(normalize_relationship("cousin"), Some(Relationship::Other));
        assert_eq!(normalize_relationship(""), None);
    }

    #[test]
    fn emails_lowercased_and_validated() {
        assert_eq!(normalize_email("Jane.Doe@Example.COM").as_deref(), Some("jane.doe@example.com"));
        assert_eq!(normalize_email("not-an-email"), None);
    }
}
