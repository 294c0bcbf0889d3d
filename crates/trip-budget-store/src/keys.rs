//! Key encoding utilities.
//!
//! Trip keys are the big-endian ID, so lexicographic key order is numeric ID
//! order and a reverse scan walks the history newest first.

use trip_budget_core::{IdError, TripId};

/// Create a trip key from a trip ID.
#[must_use]
pub fn trip_key(id: TripId) -> [u8; 8] {
    id.to_bytes()
}

/// Decode a trip ID from a trip key.
///
/// # Errors
///
/// Returns an error if the key is not 8 bytes.
pub fn trip_id_from_key(key: &[u8]) -> Result<TripId, IdError> {
    TripId::from_bytes(key)
}

/// Decode the stored ID counter. A missing counter means an empty store.
///
/// # Errors
///
/// Returns an error if the stored value is not 8 bytes.
pub fn decode_next_id(value: Option<&[u8]>) -> Result<TripId, IdError> {
    value.map_or(Ok(TripId::FIRST), TripId::from_bytes)
}
