use rusqlite::{params_from_iter, Connection};

use super::{keyword_filter, usable_keywords};
use crate::db::DatabaseError;
use crate::models::CodeMappingRow;

/// Diagnosis-to-procedure mappings touching any keyword, best-scored first.
pub fn search_mappings(
    conn: &Connection,
    keywords: &[String],
    limit: usize,
) -> Result<Vec<CodeMappingRow>, DatabaseError> {
    let keywords = usable_keywords(keywords);
    if keywords.is_empty() || limit == 0 {
        return Ok(vec![]);
    }

    let (filter, params) = keyword_filter(
        &["m.icd10_code", "m.cpt_code", "i.description", "c.description"],
        &keywords,
    );
    let sql = format!(
        "SELECT m.icd10_code, i.description, m.cpt_code, c.description,
                m.appropriateness, m.evidence_source, m.refined_justification
         FROM medical_cpt_icd10_mappings m
         LEFT JOIN medical_icd10_codes i ON i.icd10_code = m.icd10_code
         LEFT JOIN medical_cpt_codes c ON c.cpt_code = m.cpt_code
         WHERE {filter}
         ORDER BY m.appropriateness DESC, m.id
         LIMIT {limit}"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
        Ok(CodeMappingRow {
            icd10_code: row.get(0)?,
            icd10_description: row.get(1)?,
            cpt_code: row.get(2)?,
            cpt_description: row.get(3)?,
            appropriateness: row.get(4)?,
            evidence_source: row.get(5)?,
            refined_justification: row.get(6)?,
        })
    })?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row?);
    }
    Ok(result)
}
