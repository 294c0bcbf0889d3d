//! Identifier types for trip records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A trip record identifier.
///
/// Trip IDs are assigned by the store on insert, start at 1 and strictly
/// increase. They are never reused, even after the record is deleted, so
/// ordering by ID is ordering by insertion.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(u64);

impl TripId {
    /// The first identifier handed out by an empty store.
    pub const FIRST: Self = Self(1);

    /// Create a `TripId` from its raw value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Return the raw value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The identifier that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Big-endian bytes, so that byte order matches numeric order.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    /// Create a `TripId` from big-endian bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the slice is not exactly 8 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, IdError> {
        let raw: [u8; 8] = bytes
            .try_into()
            .map_err(|_| IdError::InvalidLength(bytes.len()))?;
        Ok(Self(u64::from_be_bytes(raw)))
    }
}

impl FromStr for TripId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| IdError::InvalidTripId(s.to_string()))
    }
}

impl fmt::Debug for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TripId({})", self.0)
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input is not a non-negative integer.
    #[error("invalid trip id: {0:?}")]
    InvalidTripId(String),

    /// The encoded key has the wrong width.
    #[error("invalid trip id length: expected 8 bytes, got {0}")]
    InvalidLength(usize),
}
