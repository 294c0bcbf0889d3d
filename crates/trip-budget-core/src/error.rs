//! Error types for the trip budget tracker.

use crate::ids::IdError;

/// Result type for trip operations.
pub type Result<T> = std::result::Result<T, TripError>;

/// Errors that can occur in trip operations.
///
/// A missing delete target is deliberately absent from this list: deleting an
/// unknown trip is a no-op. Unparseable dates are not errors either, they
/// resolve to a zero-day trip.
#[derive(Debug, thiserror::Error)]
pub enum TripError {
    /// The record store could not be opened for this session.
    #[error("trip store unavailable")]
    StoreUnavailable,

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Invalid identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),
}
