//! Dictation keyword extraction and bucketing.
//!
//! Extraction is a best-effort filter: extra terms only widen the code
//! database query, missing terms only thin the context block.

pub mod vocabulary;
pub mod extract;
pub mod categorize;

pub use extract::*;
pub use categorize::*;
