use rusqlite::{Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::PromptTemplate;

/// The most recent active template of type `default`.
pub fn get_active_prompt_template(
    conn: &Connection,
) -> Result<Option<PromptTemplate>, DatabaseError> {
    let template = conn
        .query_row(
            "SELECT id, name, content_template, word_limit
             FROM prompt_templates
             WHERE template_type = 'default' AND active = 1
             ORDER BY id DESC
             LIMIT 1",
            [],
            |row| {
                Ok(PromptTemplate {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    content: row.get(2)?,
                    word_limit: row
                        .get::<_, Option<i64>>(3)?
                        .and_then(|w| u32::try_from(w).ok())
                        .filter(|w| *w > 0),
                })
            },
        )
        .optional()?;
    Ok(template)
}
