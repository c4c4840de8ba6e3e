//! Patient contact and insurance fields from pasted EMR text.
//!
//! Independent of the validation chain: no database, no model calls, no
//! errors. Every field that cannot be found or fails validation stays `None`.

pub mod normalize;
pub mod patterns;
pub mod sections;
pub mod types;

pub use sections::{split_sections, SectionKind};
pub use types::*;

use patterns::{apply_patterns, FieldTarget, INSURANCE_PATTERNS, PATIENT_PATTERNS};
use regex::Regex;
use sections::{section_text, sections_text};

/// Sections whose lines may describe the patient. Emergency contacts,
/// providers and encounter details carry other people's phones and addresses.
const PATIENT_SOURCES: &[SectionKind] = &[SectionKind::Default, SectionKind::Patient];

/// Sections whose lines may describe the patient's coverage.
const INSURANCE_SOURCES: &[SectionKind] = &[
    SectionKind::Default,
    SectionKind::Patient,
    SectionKind::Insurance,
    SectionKind::Encounter,
];

/// Extract patient and insurance details from pasted text.
pub fn extract_emr_info(text: &str) -> EmrExtraction {
    let sections = split_sections(text);

    let patient_info: ParsedPatientInfo = extract_fields(
        &PATIENT_PATTERNS,
        section_text(&sections, SectionKind::Patient).as_deref(),
        sections_text(&sections, PATIENT_SOURCES).as_deref(),
    );
    let insurance_info: ParsedInsuranceInfo = extract_fields(
        &INSURANCE_PATTERNS,
        section_text(&sections, SectionKind::Insurance).as_deref(),
        sections_text(&sections, INSURANCE_SOURCES).as_deref(),
    );

    tracing::info!(
        input_len = text.len(),
        sections = sections.len(),
        patient_fields = patient_info.field_count(),
        insurance_fields = insurance_info.field_count(),
        "EMR text extracted"
    );

    EmrExtraction {
        patient_info,
        insurance_info,
    }
}

/// The field's own section first, then the wider set of eligible sections
/// for whatever is still unset.
fn extract_fields<T: FieldTarget + Default>(
    patterns: &[Regex],
    section: Option<&str>,
    eligible: Option<&str>,
) -> T {
    let mut target = T::default();
    for text in [section, eligible].into_iter().flatten() {
        apply_patterns(patterns, text, &mut target);
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Relationship;

    #[test]
    fn address_and_phone_example() {
        let text = "Address: 123 Main St, Springfield, IL, 62701\nPhone: (555) 123-4567";
        let info = extract_emr_info(text).patient_info;
        assert_eq!(info.address.as_deref(), Some("123 Main St"));
        assert_eq!(info.city.as_deref(), Some("Springfield"));
        assert_eq!(info.state.as_deref(), Some("IL"));
        assert_eq!(info.zip_code.as_deref(), Some("62701"));
        assert_eq!(info.phone.as_deref(), Some("(555) 123-4567"));
    }

    #[test]
    fn compact_insurance_example() {
        let info = extract_emr_info("Ins: BCBS Member #: ABC123 Grp #: G99").insurance_info;
        assert_eq!(info.insurer_name.as_deref(), Some("Blue Cross Blue Shield"));
        assert_eq!(info.policy_number.as_deref(), Some("ABC123"));
        assert_eq!(info.group_number.as_deref(), Some("G99"));
    }

    #[test]
    fn patient_section_preferred_over_other_sections() {
        let text = "EMERGENCY CONTACT\nPhone: 555-000-1111\n\nPATIENT INFORMATION\nPhone: 555 222 3333\nEmail: pat@example.com";
        let info = extract_emr_info(text).patient_info;
        assert_eq!(info.phone.as_deref(), Some("(555) 222-3333"));
        assert_eq!(info.email.as_deref(), Some("pat@example.com"));
    }

    #[test]
    fn preamble_used_when_section_lacks_field() {
        let text = "Phone: (312) 555-0100\nPatient Information\nEmail: pat@example.com\nInsurance\nCarrier: Aetna";
        let extraction = extract_emr_info(text);
        assert_eq!(extraction.patient_info.phone.as_deref(), Some("(312) 555-0100"));
        assert_eq!(extraction.patient_info.email.as_deref(), Some("pat@example.com"));
        assert_eq!(extraction.insurance_info.insurer_name.as_deref(), Some("Aetna"));
    }

    #[test]
    fn emergency_contact_phone_not_taken_as_patient_phone() {
        let text = "Patient Information\nEmail: jane@example.com\nEmergency Contact\nName: Bob Doe\nPhone: (555) 999-0000";
        let info = extract_emr_info(text).patient_info;
        assert_eq!(info.email.as_deref(), Some("jane@example.com"));
        assert_eq!(info.phone, None);
    }

    #[test]
    fn provider_section_does_not_feed_patient_or_insurance() {
        let text = "\
Patient Information
Email: jane@example.com
Referring Physician
Address: 400 Clinic Way, Columbus, OH 43215
Phone: 614-555-0101
Authorization Number: AUTH-7781";
        let extraction = extract_emr_info(text);
        assert_eq!(extraction.patient_info.address, None);
        assert_eq!(extraction.patient_info.city, None);
        assert_eq!(extraction.patient_info.phone, None);
        assert_eq!(extraction.insurance_info.authorization_number, None);
    }

    #[test]
    fn email_address_label_not_taken_as_street() {
        let info = extract_emr_info("Email Address: jane@example.com\nAddress: 12 Elm St").patient_info;
        assert_eq!(info.address.as_deref(), Some("12 Elm St"));
        assert_eq!(info.email.as_deref(), Some("jane@example.com"));
    }

    #[test]
    fn full_referral_note() {
        let text = "\
Referral for outpatient imaging\r\n\
\r\n\
PATIENT DEMOGRAPHICS:\r\n\
Address: 88 Lake Shore Dr, Chicago, IL 60611\r\n\
Home Phone: 1-312-555-0142\r\n\
Email: j.alvarez@example.net\r\n\
\r\n\
INSURANCE INFORMATION:\r\n\
Primary Insurance: Blue Cross Blue Shield of Illinois\r\n\
Member ID: XOF123456789\r\n\
Group #: 00412\r\n\
Subscriber: maria alvarez\r\n\
Relationship to Insured: Spouse\r\n\
Authorization Number: AUTH-55512\r\n";
        let extraction = extract_emr_info(text);

        let patient = &extraction.patient_info;
        assert_eq!(patient.address.as_deref(), Some("88 Lake Shore Dr"));
        assert_eq!(patient.city.as_deref(), Some("Chicago"));
        assert_eq!(patient.state.as_deref(), Some("IL"));
        assert_eq!(patient.zip_code.as_deref(), Some("60611"));
        assert_eq!(patient.phone.as_deref(), Some("(312) 555-0142"));
        assert_eq!(patient.email.as_deref(), Some("j.alvarez@example.net"));

        let insurance = &extraction.insurance_info;
        assert_eq!(insurance.insurer_name.as_deref(), Some("Blue Cross Blue Shield"));
        assert_eq!(insurance.policy_number.as_deref(), Some("XOF123456789"));
        assert_eq!(insurance.group_number.as_deref(), Some("00412"));
        assert_eq!(insurance.policy_holder_name.as_deref(), Some("Maria Alvarez"));
        assert_eq!(insurance.policy_holder_relationship, Some(Relationship::Spouse));
        assert_eq!(insurance.authorization_number.as_deref(), Some("AUTH-55512"));
    }

    #[test]
    fn garbage_input_yields_empty_structs() {
        for text in ["", "   ", "lorem ipsum dolor", "State: ZZ Zip: 12", "\u{0}\u{FEFF}###"] {
            let extraction = extract_emr_info(text);
            assert_eq!(extraction, EmrExtraction::default(), "{text:?}");
        }
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(extract_emr_info("Relationship: self")).unwrap();
        assert_eq!(json["insuranceInfo"]["policyHolderRelationship"], "Self");
        assert!(json["patientInfo"]["zipCode"].is_null());
    }
}
