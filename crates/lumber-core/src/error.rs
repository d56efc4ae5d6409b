//! Error types for the logging library.

use thiserror::Error;

/// Errors that can occur outside the gating path.
///
/// Gating itself never fails; these surface from parsing, configuration
/// and from targets reporting that they could not render a record.
#[derive(Debug, Error)]
pub enum LumberError {
    /// A level name or rank did not match any known level.
    #[error("invalid level: {0}")]
    InvalidLevel(String),

    /// Configuration or history could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred while a target was writing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A target refused or failed to render a record.
    #[error("target failed: {0}")]
    Target(String),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, LumberError>;
