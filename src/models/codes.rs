//! Row shapes read from the medical code database.
//!
//! Each shape carries only what the context formatter renders. Optional
//! columns stay `None` and are skipped at render time.

use serde::{Deserialize, Serialize};

/// ICD-10 diagnosis code row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisCodeRow {
    pub code: String,
    pub description: String,
    pub clinical_notes: Option<String>,
    pub imaging_modalities: Option<String>,
    pub primary_imaging: Option<String>,
}

/// CPT procedure code row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureCodeRow {
    pub code: String,
    pub description: String,
    pub modality: Option<String>,
    pub body_part: Option<String>,
}

/// Diagnosis-to-procedure mapping with its appropriateness score (1-9).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeMappingRow {
    pub icd10_code: String,
    pub icd10_description: Option<String>,
    pub cpt_code: String,
    pub cpt_description: Option<String>,
    pub appropriateness: Option<i64>,
    pub evidence_source: Option<String>,
    pub refined_justification: Option<String>,
}

/// Narrative guidance document keyed by diagnosis code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeDocRow {
    pub icd10_code: String,
    pub icd10_description: Option<String>,
    pub content_preview: String,
}

/// Active prompt template with its response word limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub id: i64,
    pub name: String,
    pub content: String,
    pub word_limit: Option<u32>,
}
