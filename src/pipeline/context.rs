//! Grounding context block assembled from the medical code database.
//!
//! Four independent lookups feed four sections, rendered in fixed order:
//! diagnosis codes, procedure codes, mappings, narrative documents. A failed
//! lookup contributes zero rows; empty sections are omitted entirely.

use crate::db::{CodeLookup, DatabaseError, CODE_LOOKUP_LIMIT, NARRATIVE_LOOKUP_LIMIT};
use crate::models::*;

/// Returned when there are no keywords or no lookup produced a row.
pub const NO_CONTEXT_SENTINEL: &str = "No specific medical context found in the database.";

/// Rows gathered for one dictation.
#[derive(Debug, Clone, Default)]
pub struct ContextRows {
    pub diagnoses: Vec<DiagnosisCodeRow>,
    pub procedures: Vec<ProcedureCodeRow>,
    pub mappings: Vec<CodeMappingRow>,
    pub narratives: Vec<NarrativeDocRow>,
    /// Names of lookups that failed and were treated as empty.
    pub failed_lookups: Vec<&'static str>,
}

impl ContextRows {
    pub fn is_empty(&self) -> bool {
        self.diagnoses.is_empty()
            && self.procedures.is_empty()
            && self.mappings.is_empty()
            && self.narratives.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.diagnoses.len() + self.procedures.len() + self.mappings.len() + self.narratives.len()
    }
}

/// Run all four lookups. Only an unavailable database is an error.
pub fn gather_context_rows<S: CodeLookup + ?Sized>(
    store: &S,
    keywords: &[String],
) -> Result<ContextRows, DatabaseError> {
    let mut rows = ContextRows::default();
    if keywords.is_empty() {
        return Ok(rows);
    }

    store.check_available()?;

    rows.diagnoses = lookup_or_empty(
        "diagnosis_codes",
        store.search_diagnosis_codes(keywords, CODE_LOOKUP_LIMIT),
        &mut rows.failed_lookups,
    );
    rows.procedures = lookup_or_empty(
        "procedure_codes",
        store.search_procedure_codes(keywords, CODE_LOOKUP_LIMIT),
        &mut rows.failed_lookups,
    );
    rows.mappings = lookup_or_empty(
        "mappings",
        store.search_mappings(keywords, CODE_LOOKUP_LIMIT),
        &mut rows.failed_lookups,
    );
    rows.narratives = lookup_or_empty(
        "narrative_docs",
        store.search_narrative_docs(keywords, NARRATIVE_LOOKUP_LIMIT),
        &mut rows.failed_lookups,
    );

    // Row caps hold even if a lookup implementation ignores the limit.
    rows.diagnoses.truncate(CODE_LOOKUP_LIMIT);
    rows.procedures.truncate(CODE_LOOKUP_LIMIT);
    rows.mappings.truncate(CODE_LOOKUP_LIMIT);
    rows.narratives.truncate(NARRATIVE_LOOKUP_LIMIT);

    tracing::info!(
        diagnoses = rows.diagnoses.len(),
        procedures = rows.procedures.len(),
        mappings = rows.mappings.len(),
        narratives = rows.narratives.len(),
        failed_lookups = rows.failed_lookups.len(),
        "Gathered database context"
    );

    Ok(rows)
}

fn lookup_or_empty<T>(
    name: &'static str,
    result: Result<Vec<T>, DatabaseError>,
    failed: &mut Vec<&'static str>,
) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(lookup = name, error = %e, "Context lookup failed, continuing without it");
            failed.push(name);
            Vec::new()
        }
    }
}

/// Look up and format the context block for a keyword list.
pub fn build_database_context<S: CodeLookup + ?Sized>(
    store: &S,
    keywords: &[String],
) -> Result<String, DatabaseError> {
    let rows = gather_context_rows(store, keywords)?;
    Ok(format_context(&rows))
}

/// Render gathered rows. Deterministic and order-preserving.
pub fn format_context(rows: &ContextRows) -> String {
    if rows.is_empty() {
        return NO_CONTEXT_SENTINEL.to_string();
    }

    let mut sections = Vec::new();

    if !rows.diagnoses.is_empty() {
        sections.push(section("RELEVANT ICD-10 CODES", &rows.diagnoses, format_diagnosis));
    }
    if !rows.procedures.is_empty() {
        sections.push(section("RELEVANT CPT CODES", &rows.procedures, format_procedure));
    }
    if !rows.mappings.is_empty() {
        sections.push(section(
            "RELEVANT ICD-10 TO CPT MAPPINGS",
            &rows.mappings,
            format_mapping,
        ));
    }
    if !rows.narratives.is_empty() {
        sections.push(section(
            "ADDITIONAL MEDICAL INFORMATION",
            &rows.narratives,
            format_narrative,
        ));
    }

    sections.join("\n\n")
}

fn section<T>(title: &str, rows: &[T], render: fn(&T) -> String) -> String {
    let body = rows.iter().map(render).collect::<Vec<_>>().join("\n");
    format!("{title}:\n{body}")
}

/// Present and non-blank.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn format_diagnosis(row: &DiagnosisCodeRow) -> String {
    let mut text = format!("- {}: {}", row.code, row.description);
    if let Some(notes) = present(&row.clinical_notes) {
        text.push_str(&format!("\n  Clinical Notes: {notes}"));
    }
    if let Some(modalities) = present(&row.imaging_modalities) {
        text.push_str(&format!("\n  Recommended Imaging: {modalities}"));
    }
    if let Some(primary) = present(&row.primary_imaging) {
        text.push_str(&format!("\n  Primary Imaging: {primary}"));
    }
    text
}

fn format_procedure(row: &ProcedureCodeRow) -> String {
    let details: Vec<String> = [
        present(&row.modality).map(|m| format!("Modality: {m}")),
        present(&row.body_part).map(|b| format!("Body Part: {b}")),
    ]
    .into_iter()
    .flatten()
    .collect();

    if details.is_empty() {
        format!("- {}: {}", row.code, row.description)
    } else {
        format!("- {}: {} ({})", row.code, row.description, details.join(", "))
    }
}

fn format_mapping(row: &CodeMappingRow) -> String {
    let icd = match present(&row.icd10_description) {
        Some(desc) => format!("{} ({desc})", row.icd10_code),
        None => row.icd10_code.clone(),
    };
    let cpt = match present(&row.cpt_description) {
        Some(desc) => format!("{} ({desc})", row.cpt_code),
        None => row.cpt_code.clone(),
    };

    let mut text = format!("- ICD-10: {icd} -> CPT: {cpt}");
    if let Some(score) = row.appropriateness {
        text.push_str(&format!("\n  Appropriateness: {score}/9"));
    }
    if let Some(evidence) = present(&row.evidence_source) {
        text.push_str(&format!("\n  Evidence: {evidence}"));
    }
    if let Some(justification) = present(&row.refined_justification) {
        text.push_str(&format!("\n  Justification: {justification}"));
    }
    text
}

fn format_narrative(row: &NarrativeDocRow) -> String {
    let heading = match present(&row.icd10_description) {
        Some(desc) => format!("- {} ({desc}):", row.icd10_code),
        None => format!("- {}:", row.icd10_code),
    };
    let body = row
        .content_preview
        .lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{heading}\n{body}")
}
