use rusqlite::{params_from_iter, Connection};

use super::{keyword_filter, usable_keywords};
use crate::db::DatabaseError;
use crate::models::NarrativeDocRow;

/// Characters of narrative content carried into the context block.
pub const NARRATIVE_PREVIEW_CHARS: usize = 1000;

/// Narrative documents for diagnosis codes matching any keyword.
pub fn search_narrative_docs(
    conn: &Connection,
    keywords: &[String],
    limit: usize,
) -> Result<Vec<NarrativeDocRow>, DatabaseError> {
    let keywords = usable_keywords(keywords);
    if keywords.is_empty() || limit == 0 {
        return Ok(vec![]);
    }

    let (filter, params) = keyword_filter(&["d.icd10_code", "i.description"], &keywords);
    let sql = format!(
        "SELECT d.icd10_code, i.description, substr(d.content, 1, {NARRATIVE_PREVIEW_CHARS})
         FROM medical_icd10_markdown_docs d
         LEFT JOIN medical_icd10_codes i ON i.icd10_code = d.icd10_code
         WHERE {filter}
         ORDER BY d.icd10_code, d.id
         LIMIT {limit}"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
        Ok(NarrativeDocRow {
            icd10_code: row.get(0)?,
            icd10_description: row.get(1)?,
            content_preview: row.get(2)?,
        })
    })?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row?);
    }
    Ok(result)
}
