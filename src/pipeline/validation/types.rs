use serde::{Deserialize, Serialize};

use crate::models::ValidationStatus;

/// A suggested diagnosis code. At most one per result is primary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisCode {
    pub code: String,
    pub description: String,
    #[serde(rename = "isPrimary")]
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcedureCode {
    pub code: String,
    pub description: String,
}

/// Terminal output of the validation pipeline.
///
/// Serialized field names match the ones models are asked to produce, so a
/// serialized result normalizes back to itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    #[serde(rename = "validationStatus")]
    pub status: ValidationStatus,
    #[serde(rename = "complianceScore")]
    pub compliance_score: u8,
    pub feedback: String,
    #[serde(rename = "suggestedICD10Codes")]
    pub suggested_diagnosis_codes: Vec<DiagnosisCode>,
    #[serde(rename = "suggestedCPTCodes")]
    pub suggested_procedure_codes: Vec<ProcedureCode>,
    /// For reviewers only, never shown to the ordering physician.
    #[serde(rename = "internalReasoning")]
    pub internal_reasoning: String,
}

impl ValidationResult {
    pub fn primary_diagnosis(&self) -> Option<&DiagnosisCode> {
        self.suggested_diagnosis_codes.iter().find(|c| c.is_primary)
    }
}

/// How a result was obtained from the raw model text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NormalizationOutcome {
    Parsed,
    Fallback { reason: String },
}

impl NormalizationOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}
