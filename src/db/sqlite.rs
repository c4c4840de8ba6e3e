use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use super::DatabaseError;

const REFERENCE_SCHEMA: &str = include_str!("../../resources/reference_schema.sql");

/// Tables the pipeline reads. All must exist for the database to be usable.
pub const REQUIRED_TABLES: &[&str] = &[
    "medical_icd10_codes",
    "medical_cpt_codes",
    "medical_cpt_icd10_mappings",
    "medical_icd10_markdown_docs",
    "prompt_templates",
];

/// Open the code database read-only. The file must already exist.
pub fn open_database(path: &Path) -> Result<Connection, DatabaseError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| DatabaseError::Unavailable(format!("{}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), "Opened code database (read-only)");
    Ok(conn)
}

/// Open an in-memory database carrying the reference schema (for testing)
pub fn open_memory_database() -> Result<Connection, DatabaseError> {
    let conn = Connection::open_in_memory()?;
    apply_reference_schema(&conn)?;
    Ok(conn)
}

/// Create the reference tables on a writable connection.
pub fn apply_reference_schema(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(REFERENCE_SCHEMA)?;
    Ok(())
}

/// Names of required tables that are absent from the database.
pub fn missing_tables(conn: &Connection) -> Result<Vec<&'static str>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
    let mut missing = Vec::new();
    for table in REQUIRED_TABLES {
        let count: i64 = stmt.query_row([table], |row| row.get(0))?;
        if count == 0 {
            missing.push(*table);
        }
    }
    Ok(missing)
}
