//! Error types for the resolution core
//!
//! Only structural preconditions are fatal: a document that cannot be read or
//! decoded, or one with no `components.schemas` section at all. Per-schema
//! resolution trouble never surfaces here; it degrades into placeholder nodes
//! and warnings on the IR itself.

use thiserror::Error;

/// Result type for spec loading and resolution
pub type Result<T> = std::result::Result<T, SpecError>;

/// Fatal errors raised before a resolution pass starts
#[derive(Error, Debug)]
pub enum SpecError {
    #[error("spec document has no components.schemas section")]
    MissingSchemas,

    #[error("spec document is not an object at the top level")]
    NotAnObject,

    #[error("unsupported spec format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),
}
