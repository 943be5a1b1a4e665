//! Error types for the lineage CLI
//!
//! [`CliError`] covers failures that stop a whole run. They are user-facing,
//! with a message that says what to fix. [`FetchError`] covers a single failed
//! request to the taxonomy service; those are retried and never stop a run.

use lineage_common::{LineageError, Rank};
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Fatal error for a lineage run
#[derive(Error, Debug)]
pub enum CliError {
    /// The input rank is the only requested output rank
    #[error("The input level '{0}' conflicts with the only output level '{0}'. Remove the conflicting output level or change the input level.")]
    RankConflict(Rank),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input name list is missing
    #[error("Input file not found: '{0}'. Verify the file path exists and you have read permissions.")]
    FileNotFound(String),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// Writing a delimited row failed
    #[error("Failed to write delimited output: {0}")]
    Csv(#[from] csv::Error),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Common(#[from] LineageError),

    /// Generic anyhow error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error comes from invalid configuration rather than I/O
    pub fn is_config(&self) -> bool {
        matches!(self, Self::RankConflict(_) | Self::Config(_))
    }
}

/// A single failed request to the taxonomy service
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP 429 Too Many Requests
    #[error("rate limit exceeded (HTTP 429)")]
    RateLimited,

    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// Any other non-success status
    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },

    /// Connection or protocol failure
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Response body did not have the expected shape
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::RateLimited)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                Self::RateLimited
            } else {
                Self::Status {
                    status: status.as_u16(),
                }
            }
        } else {
            Self::Transport(err)
        }
    }
}
