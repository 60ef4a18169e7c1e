//! Error types for Moodlog core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages and exit codes.

use thiserror::Error;

use crate::transfer::TransferError;

/// Result type alias for Moodlog operations.
pub type Result<T> = std::result::Result<T, MoodlogError>;

/// Core error type for Moodlog operations.
#[derive(Debug, Error)]
pub enum MoodlogError {
    /// A record field violates the record invariants
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input (unparseable date, time, mood, sort mode)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Import document rejected as a whole
    #[error("Import error: {0}")]
    Transfer(#[from] TransferError),
}

impl From<std::io::Error> for MoodlogError {
    fn from(err: std::io::Error) -> Self {
        MoodlogError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for MoodlogError {
    fn from(err: serde_json::Error) -> Self {
        MoodlogError::Storage(format!("JSON error: {}", err))
    }
}
