//! Error types for trip storage.

use trip_budget_core::{IdError, TripError};

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A stored key could not be decoded.
    #[error("corrupt key: {0}")]
    CorruptKey(#[from] IdError),
}

impl From<StoreError> for TripError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Database(msg) => Self::Storage(msg),
            StoreError::Serialization(msg) => Self::Serialization(msg),
            StoreError::CorruptKey(e) => Self::Storage(e.to_string()),
        }
    }
}
