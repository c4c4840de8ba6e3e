pub mod sqlite;
pub mod repository;

#[cfg(test)]
pub(crate) mod fixtures;

pub use sqlite::*;
pub use repository::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Code database unavailable: {0}")]
    Unavailable(String),
}
