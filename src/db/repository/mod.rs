//! Repository layer: read-only lookups against the medical code tables.
//!
//! Each table gets its own sub-module of free functions over a
//! `&Connection`. `SqliteCodeStore` bundles them behind the `CodeLookup`
//! trait the pipeline consumes.

mod diagnosis;
mod mapping;
mod narrative;
mod procedure;
mod template;

use rusqlite::Connection;

use super::{missing_tables, DatabaseError};
use crate::models::*;

pub use diagnosis::*;
pub use mapping::*;
pub use narrative::*;
pub use procedure::*;
pub use template::*;

/// Row cap for the diagnosis, procedure and mapping lookups.
pub const CODE_LOOKUP_LIMIT: usize = 10;

/// Row cap for the narrative document lookup.
pub const NARRATIVE_LOOKUP_LIMIT: usize = 5;

/// Read-only access to the code database (allows mocking).
///
/// Every search filters by case-insensitive substring match against any of
/// the supplied keywords and returns at most `limit` rows.
pub trait CodeLookup {
    /// Fails when the database cannot serve lookups at all.
    fn check_available(&self) -> Result<(), DatabaseError>;

    fn search_diagnosis_codes(
        &self,
        keywords: &[String],
        limit: usize,
    ) -> Result<Vec<DiagnosisCodeRow>, DatabaseError>;

    fn search_procedure_codes(
        &self,
        keywords: &[String],
        limit: usize,
    ) -> Result<Vec<ProcedureCodeRow>, DatabaseError>;

    fn search_mappings(
        &self,
        keywords: &[String],
        limit: usize,
    ) -> Result<Vec<CodeMappingRow>, DatabaseError>;

    fn search_narrative_docs(
        &self,
        keywords: &[String],
        limit: usize,
    ) -> Result<Vec<NarrativeDocRow>, DatabaseError>;

    /// The active default prompt template, if one is configured.
    fn active_prompt_template(&self) -> Result<Option<PromptTemplate>, DatabaseError>;
}

/// `CodeLookup` over a SQLite connection.
pub struct SqliteCodeStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteCodeStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl CodeLookup for SqliteCodeStore<'_> {
    fn check_available(&self) -> Result<(), DatabaseError> {
        let missing = missing_tables(self.conn)
            .map_err(|e| DatabaseError::Unavailable(e.to_string()))?;
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DatabaseError::Unavailable(format!(
                "missing tables: {}",
                missing.join(", ")
            )))
        }
    }

    fn search_diagnosis_codes(
        &self,
        keywords: &[String],
        limit: usize,
    ) -> Result<Vec<DiagnosisCodeRow>, DatabaseError> {
        search_diagnosis_codes(self.conn, keywords, limit)
    }

    fn search_procedure_codes(
        &self,
        keywords: &[String],
        limit: usize,
    ) -> Result<Vec<ProcedureCodeRow>, DatabaseError> {
        search_procedure_codes(self.conn, keywords, limit)
    }

    fn search_mappings(
        &self,
        keywords: &[String],
        limit: usize,
    ) -> Result<Vec<CodeMappingRow>, DatabaseError> {
        search_mappings(self.conn, keywords, limit)
    }

    fn search_narrative_docs(
        &self,
        keywords: &[String],
        limit: usize,
    ) -> Result<Vec<NarrativeDocRow>, DatabaseError> {
        search_narrative_docs(self.conn, keywords, limit)
    }

    fn active_prompt_template(&self) -> Result<Option<PromptTemplate>, DatabaseError> {
        get_active_prompt_template(self.conn)
    }
}

/// Build `(lower(col) LIKE ? ESCAPE '\' OR ...)` over every column × keyword
/// pair, returning the clause and its positional parameters.
pub(crate) fn keyword_filter(columns: &[&str], keywords: &[String]) -> (String, Vec<String>) {
    let mut conditions = Vec::with_capacity(columns.len() * keywords.len());
    let mut params = Vec::with_capacity(columns.len() * keywords.len());

    for keyword in keywords {
        let pattern = like_pattern(keyword);
        for column in columns {
            conditions.push(format!("lower({column}) LIKE ? ESCAPE '\\'"));
            params.push(pattern.clone());
        }
    }

    (format!("({})", conditions.join(" OR ")), params)
}

/// `%keyword%`, lowercased, with LIKE metacharacters escaped.
fn like_pattern(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len() + 2);
    escaped.push('%');
    for c in keyword.trim().to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Upper bound on keywords per query. Each keyword adds one `OR` term per
/// column, and SQLite rejects expressions nested deeper than 1000.
pub(crate) const MAX_QUERY_KEYWORDS: usize = 100;

/// Keywords worth querying with: trimmed, non-empty, at most
/// `MAX_QUERY_KEYWORDS`.
pub(crate) fn usable_keywords(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .take(MAX_QUERY_KEYWORDS)
        .collect()
}
