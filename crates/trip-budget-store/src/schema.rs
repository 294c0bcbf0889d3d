//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Trip records, keyed by big-endian `TripId`.
    pub const TRIPS: &str = "trips";

    /// Store bookkeeping (ID counter).
    pub const META: &str = "meta";
}

/// Keys in the `meta` column family.
pub mod meta {
    /// The ID the next inserted trip will receive, big-endian `u64`.
    pub const NEXT_TRIP_ID: &[u8] = b"next_trip_id";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::TRIPS, cf::META]
}
