pub mod codes;
pub mod extract;
pub mod fallback;
pub mod fields;
pub mod normalize;
pub mod types;

pub use normalize::*;
pub use types::*;

use thiserror::Error;

/// Why a model response could not be used as-is. Never leaves this module
/// as an error: the normalizer turns it into a fallback result.
#[derive(Error, Debug)]
pub enum NormalizationError {
    #[error("No JSON object found in model response")]
    NoJsonObject,

    #[error("JSON parsing error: {0}")]
    JsonParsing(String),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Unrecognized validation status: {0}")]
    InvalidStatus(String),
}
