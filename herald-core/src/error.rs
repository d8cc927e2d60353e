//! Error types for Herald

use thiserror::Error;

/// Result type alias for Herald operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Herald operations
///
/// The assignment policy itself never fails; these cover loading
/// configuration and pull request snapshots.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
