//! Error types for the coaching core.
//!
//! Only the ingestion boundaries fail: compiling a pattern catalog, loading configuration,
//! and parsing a raw inbound line. Classification, detection and aggregation never error.

use thiserror::Error;

/// Result type alias for coaching operations
pub type CoachResult<T> = Result<T, CoachError>;

/// Errors raised while building catalogs, loading config or parsing inbound data
#[derive(Error, Debug)]
pub enum CoachError {
    #[error("Invalid matcher for '{owner}': {source}")]
    InvalidMatcher {
        owner: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid weight {weight} for '{owner}': must be in (0, 1]")]
    InvalidWeight { owner: String, weight: f32 },

    #[error("Archetype '{0}' cannot carry scoring patterns")]
    UnscorableArchetype(String),

    #[error("Catalog file error: {0}")]
    CatalogFile(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Inbound JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
