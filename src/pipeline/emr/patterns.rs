//! Declarative field patterns.
//!
//! Each table is an ordered list of regexes. A capture group's name is the
//! field it fills; one pattern may fill several fields at once. Patterns are
//! applied in table order and a field keeps the first valid value it gets.

use std::sync::LazyLock;

use regex::Regex;

use super::normalize::*;
use super::types::{ParsedInsuranceInfo, ParsedPatientInfo};

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
}

pub static PATIENT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        // Address labels must open the line so `Email Address:` never fills the street.
        // Address: 123 Main St, Springfield, IL, 62701
        r"(?im)^\s*(?:(?:patient|home|mailing|street|residential|current|permanent)\s+)?(?:address|addr)\.?\s*[:\-]?\s*(?P<address>\d[^,\n]*?)\s*,\s*(?P<city>[A-Za-z][A-Za-z .'\-]*?)\s*,?\s+(?P<state>[A-Za-z]{2})\.?\s*,?\s*(?P<zip>\d{5}(?:-\d{4})?)\b",
        // Address: 123 Main St (street only)
        r"(?im)^\s*(?:(?:patient|home|mailing|street|residential|current|permanent)\s+)?(?:address|addr)(?:\s+line\s*1)?\.?\s*[:\-]\s*(?P<address>[^,\n]+)",
        // Springfield, IL 62701 on its own line
        r"(?m)^(?P<city>[A-Za-z][A-Za-z .'\-]*?)\s*,\s*(?P<state>[A-Za-z]{2})\.?\s*,?\s*(?P<zip>\d{5}(?:-\d{4})?)\s*$",
        r"(?im)\bcity\s*[:\-]\s*(?P<city>[A-Za-z][A-Za-z .'\-]*[A-Za-z])",
        r"(?im)\bstate\s*[:\-]\s*(?P<state>[A-Za-z]{2})\b",
        r"(?im)\b(?:zip(?:\s*code)?|postal\s+code)\s*[:\-]\s*(?P<zip>\d{5}(?:-\d{4})?)\b",
        r"(?i)\b(?:home\s+|cell\s+|mobile\s+|primary\s+)?(?:phone|tel|telephone|cell|mobile|contact\s+number)\s*(?:#|number|no\.?)?\s*[:\-]?\s*(?P<phone>(?:\+?1[\s.\-]?)?\(?\d{3}\)?[\s.\-]?\d{3}[\s.\-]?\d{4})\b",
        r"(?i)\b(?:e-?mail)(?:\s+address)?\s*[:\-]?\s*(?P<email>[A-Z0-9._%+\-]+@[A-Z0-9.\-]+\.[A-Z]{2,})",
        r"(?i)(?P<email>\b[A-Z0-9._%+\-]+@[A-Z0-9.\-]+\.[A-Z]{2,}\b)",
    ])
});

pub static INSURANCE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?im)\b(?:primary\s+)?(?:insurance(?:\s+(?:company|carrier|provider|name|plan))?|ins|insurer|carrier|payer|payor|health\s+plan|plan\s+name)\s*[:\-]\s*(?P<insurer>[A-Za-z][A-Za-z0-9&.,' /\-]*)",
        r"(?i)\b(?:policy|member|subscriber|insured|insurance)\s*(?:id|number|no\.?|#)?\s*#?\s*[:\-]?\s*(?P<policy>[A-Za-z0-9][A-Za-z0-9\-]{2,})",
        r"(?i)\b(?:group|grp)\s*(?:id|number|no\.?|#)?\s*#?\s*[:\-]?\s*(?P<group>[A-Za-z0-9][A-Za-z0-9\-]{1,})",
        r"(?i)\b(?:prior\s+)?(?:authorization|authorisation|auth|pre-?cert(?:ification)?)\s*(?:id|number|no\.?|code|#)?\s*#?\s*[:\-]?\s*(?P<authorization>[A-Za-z0-9][A-Za-z0-9\-]{3,})",
        r"(?im)\b(?:policy\s*holder|policyholder|subscriber|insured|guarantor)(?:\s+name)?\s*[:\-]\s*(?P<holder>[A-Za-z][A-Za-z .'\-]*[A-Za-z])",
        r"(?i)\b(?:relationship|rel\.?)(?:\s+to\s+(?:patient|insured|subscriber))?\s*[:\-]\s*(?P<relationship>domestic\s+partner|[A-Za-z]+)",
    ])
});

/// A struct whose fields are filled from named capture groups.
pub trait FieldTarget {
    /// Set `group`'s field from `raw` if unset and `raw` is valid.
    fn offer(&mut self, group: &str, raw: &str);
}

impl FieldTarget for ParsedPatientInfo {
    fn offer(&mut self, group: &str, raw: &str) {
        let (slot, normalize): (&mut Option<String>, fn(&str) -> Option<String>) = match group {
            "address" => (&mut self.address, normalize_street),
            "city" => (&mut self.city, clean_free_text),
            "state" => (&mut self.state, normalize_state),
            "zip" => (&mut self.zip_code, normalize_zip),
            "phone" => (&mut self.phone, format_phone),
            "email" => (&mut self.email, normalize_email),
            _ => return,
        };
        if slot.is_none() {
            *slot = normalize(raw);
        }
    }
}

impl FieldTarget for ParsedInsuranceInfo {
    fn offer(&mut self, group: &str, raw: &str) {
        if group == "relationship" {
            if self.policy_holder_relationship.is_none() {
                self.policy_holder_relationship = normalize_relationship(raw);
            }
            return;
        }

        let (slot, normalize): (&mut Option<String>, fn(&str) -> Option<String>) = match group {
            "insurer" => (&mut self.insurer_name, canonical_insurer),
            "policy" => (&mut self.policy_number, normalize_identifier),
            "group" => (&mut self.group_number, normalize_identifier),
            "authorization" => (&mut self.authorization_number, normalize_identifier),
            "holder" => (&mut self.policy_holder_name, normalize_holder_name),
            _ => return,
        };
        if slot.is_none() {
            *slot = normalize(raw);
        }
    }
}

/// Run every pattern over `text`, offering each named capture to `target`.
pub fn apply_patterns<T: FieldTarget>(patterns: &[Regex], text: &str, target: &mut T) {
    for pattern in patterns {
        let groups: Vec<&str> = pattern.capture_names().flatten().collect();
        for caps in pattern.captures_iter(text) {
            for group in &groups {
                if let Some(m) = caps.name(group) {
                    target.offer(group, m.as_str());
                }
            }
        }
    }
}
