use rusqlite::{params_from_iter, Connection};

use super::{keyword_filter, usable_keywords};
use crate::db::DatabaseError;
use crate::models::ProcedureCodeRow;

/// CPT codes whose code, description, modality or body part contains any keyword.
pub fn search_procedure_codes(
    conn: &Connection,
    keywords: &[String],
    limit: usize,
) -> Result<Vec<ProcedureCodeRow>, DatabaseError> {
    let keywords = usable_keywords(keywords);
    if keywords.is_empty() || limit == 0 {
        return Ok(vec![]);
    }

    let (filter, params) = keyword_filter(
        &["cpt_code", "description", "modality", "body_part"],
        &keywords,
    );
    let sql = format!(
        "SELECT cpt_code, description, modality, body_part
         FROM medical_cpt_codes
         WHERE {filter}
         ORDER BY cpt_code
         LIMIT {limit}"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
        Ok(ProcedureCodeRow {
            code: row.get(0)?,
            description: row.get(1)?,
            modality: row.get(2)?,
            body_part: row.get(3)?,
        })
    })?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row?);
    }
    Ok(result)
}
