//! Error types for the keyscout library.

use thiserror::Error;

/// Main error type for keyscout operations.
///
/// Key analysis itself is total and never fails; errors can only arise at
/// the edges, when building datasets from raw JSON or when validating a
/// custom engine configuration.
#[derive(Debug, Error)]
pub enum KeyscoutError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A raw record could not be turned into a row.
    #[error("ingest error at record {record}: {message}")]
    Ingest { record: usize, message: String },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation error (custom detector patterns).
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Result type alias for keyscout operations.
pub type Result<T> = std::result::Result<T, KeyscoutError>;
