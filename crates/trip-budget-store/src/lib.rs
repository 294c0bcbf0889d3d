//! Storage layer for trip records.
//!
//! Trips are kept in a single logical collection keyed by a store-assigned,
//! strictly increasing `TripId`. Two backends implement the `Store` trait:
//!
//! - `RocksStore` (feature `rocksdb-backend`, on by default): durable, one
//!   database directory per tracker.
//! - `MemoryStore`: in-process, for tests and builds without `RocksDB`.
//!
//! # Column families
//!
//! - `trips`: `TripRecord` values (CBOR), keyed by big-endian trip ID
//! - `meta`: bookkeeping, currently the next trip ID
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "rocksdb-backend")]
//! # fn main() {
//! use trip_budget_core::TripForm;
//! use trip_budget_store::{RocksStore, Store};
//!
//! let store = RocksStore::open("/tmp/trip-budget-db").unwrap();
//!
//! let draft = TripForm::default().into_draft();
//! let saved = store.save_trip(&draft).unwrap();
//!
//! let history = store.list_trips().unwrap();
//! assert_eq!(history[0].id, saved.record.id);
//! # }
//! # #[cfg(not(feature = "rocksdb-backend"))]
//! # fn main() {}
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod memory;
#[cfg(feature = "rocksdb-backend")]
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
#[cfg(feature = "rocksdb-backend")]
pub use rocks::RocksStore;

use serde::Serialize;
use trip_budget_core::{TripDraft, TripId, TripRecord};

/// Outcome of a deduplicating save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedTrip {
    /// The newly inserted record.
    pub record: TripRecord,
    /// IDs of earlier records for the same trip that were removed.
    pub replaced: Vec<TripId>,
}

/// The storage trait defining all trip operations.
///
/// This trait abstracts the storage layer, allowing for different implementations
/// (e.g., `RocksDB`, in-memory for testing).
pub trait Store: Send + Sync {
    // =========================================================================
    // Record Operations
    // =========================================================================

    /// Insert a trip under a freshly assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn insert_trip(&self, draft: &TripDraft) -> Result<TripRecord>;

    /// Get a trip by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_trip(&self, id: TripId) -> Result<Option<TripRecord>>;

    /// All trips, newest (highest ID) first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_trips(&self) -> Result<Vec<TripRecord>>;

    /// Delete a trip by ID.
    ///
    /// Returns `false` if there was nothing to delete; that is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn delete_trip(&self, id: TripId) -> Result<bool>;

    // =========================================================================
    // Compound Operations
    // =========================================================================

    /// Save a trip, replacing every existing record with the same
    /// (location, start date, end date, budget).
    ///
    /// The removals and the insert are applied together: either all of them
    /// land or none do.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails. Nothing is written
    /// in that case.
    fn save_trip(&self, draft: &TripDraft) -> Result<SavedTrip>;
}
