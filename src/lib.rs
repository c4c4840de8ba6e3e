pub mod config;
pub mod models;
pub mod db;
pub mod pipeline;

use tracing_subscriber::EnvFilter;

pub use config::{LlmConfig, NormalizerPolicy};
pub use db::{open_database, CodeLookup, DatabaseError, SqliteCodeStore};
pub use models::{Relationship, ValidationStatus};
pub use pipeline::emr::{
    extract_emr_info, EmrExtraction, ParsedInsuranceInfo, ParsedPatientInfo,
};
pub use pipeline::llm::{FallbackChain, LlmError, LlmProvider, LlmResponse};
pub use pipeline::validation::{normalize_response, ValidationResult};
pub use pipeline::{PipelineError, ValidationPipeline, ValidationRun};

/// Install the global fmt subscriber. `RUST_LOG` overrides the default filter.
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let result = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();

    if result.is_ok() {
        tracing::info!("{} v{} logging initialised", config::APP_NAME, config::APP_VERSION);
    }
}
