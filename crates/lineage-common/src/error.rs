//! Error types for lineage

use thiserror::Error;

/// Result type alias for lineage operations
pub type Result<T> = std::result::Result<T, LineageError>;

/// Main error type for lineage
#[derive(Error, Debug)]
pub enum LineageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid rank '{0}': expected one of k, p, c, o, f, g, s or a full rank name")]
    InvalidRank(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
