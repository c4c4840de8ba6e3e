use rusqlite::{params_from_iter, Connection};

use super::{keyword_filter, usable_keywords};
use crate::db::DatabaseError;
use crate::models::DiagnosisCodeRow;

/// ICD-10 codes whose code or description contains any keyword.
pub fn search_diagnosis_codes(
    conn: &Connection,
    keywords: &[String],
    limit: usize,
) -> Result<Vec<DiagnosisCodeRow>, DatabaseError> {
    let keywords = usable_keywords(keywords);
    if keywords.is_empty() || limit == 0 {
        return Ok(vec![]);
    }

    let (filter, params) = keyword_filter(&["icd10_code", "description"], &keywords);
    let sql = format!(
        "SELECT icd10_code, description, clinical_notes, imaging_modalities, primary_imaging
         FROM medical_icd10_codes
         WHERE {filter}
         ORDER BY icd10_code
         LIMIT {limit}"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
        Ok(DiagnosisCodeRow {
            code: row.get(0)?,
            description: row.get(1)?,
            clinical_notes: row.get(2)?,
            imaging_modalities: row.get(3)?,
            primary_imaging: row.get(4)?,
        })
    })?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row?);
    }
    Ok(result)
}
