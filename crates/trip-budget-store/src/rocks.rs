//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatch,
};

use trip_budget_core::{TripDraft, TripId, TripRecord};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf, meta};
use crate::{SavedTrip, Store};

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    /// Serializes writers so ID allocation and dedup scans see a stable view.
    write_lock: Mutex<()>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// Opening an existing database never touches the records already in it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path.as_ref(), cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(path = %path.as_ref().display(), "Trip store opened");

        Ok(Self {
            db: Arc::new(db),
            write_lock: Mutex::new(()),
        })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    fn lock_writes(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| StoreError::Database("write lock poisoned".into()))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Read the ID the next insert will use.
    fn next_id(&self) -> Result<TripId> {
        let cf_meta = self.cf(cf::META)?;
        let value = self
            .db
            .get_cf(&cf_meta, meta::NEXT_TRIP_ID)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(keys::decode_next_id(value.as_deref())?)
    }

    /// Scan every record in the given direction.
    fn scan(&self, mode: IteratorMode<'_>) -> Result<Vec<TripRecord>> {
        let cf_trips = self.cf(cf::TRIPS)?;

        self.db
            .iterator_cf(&cf_trips, mode)
            .map(|item| {
                let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
                Self::deserialize(&value)
            })
            .collect()
    }

    /// Build the record for `draft` and stage it, plus the counter bump, in `batch`.
    fn stage_insert(&self, batch: &mut WriteBatch, draft: &TripDraft) -> Result<TripRecord> {
        let cf_trips = self.cf(cf::TRIPS)?;
        let cf_meta = self.cf(cf::META)?;

        let id = self.next_id()?;
        let record = TripRecord::from_draft(id, draft, Utc::now());
        let value = Self::serialize(&record)?;

        batch.put_cf(&cf_trips, keys::trip_key(id), value);
        batch.put_cf(&cf_meta, meta::NEXT_TRIP_ID, id.next().to_bytes());

        Ok(record)
    }
}

impl Store for RocksStore {
    // =========================================================================
    // Record Operations
    // =========================================================================

    fn insert_trip(&self, draft: &TripDraft) -> Result<TripRecord> {
        let _guard = self.lock_writes()?;

        let mut batch = WriteBatch::default();
        let record = self.stage_insert(&mut batch, draft)?;

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(trip_id = %record.id, location = %record.location, "Trip inserted");

        Ok(record)
    }

    fn get_trip(&self, id: TripId) -> Result<Option<TripRecord>> {
        let cf = self.cf(cf::TRIPS)?;

        self.db
            .get_cf(&cf, keys::trip_key(id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn list_trips(&self) -> Result<Vec<TripRecord>> {
        // Keys are big-endian IDs, so iterating from the end is newest first.
        self.scan(IteratorMode::End)
    }

    fn delete_trip(&self, id: TripId) -> Result<bool> {
        let _guard = self.lock_writes()?;
        let cf = self.cf(cf::TRIPS)?;
        let key = keys::trip_key(id);

        let exists = self
            .db
            .get_pinned_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .is_some();

        if !exists {
            tracing::debug!(trip_id = %id, "Delete skipped, trip not found");
            return Ok(false);
        }

        self.db
            .delete_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(trip_id = %id, "Trip deleted");

        Ok(true)
    }

    // =========================================================================
    // Compound Operations
    // =========================================================================

    fn save_trip(&self, draft: &TripDraft) -> Result<SavedTrip> {
        let _guard = self.lock_writes()?;
        let cf_trips = self.cf(cf::TRIPS)?;

        // Full scan; the history is small enough that an index is not worth it.
        let replaced: Vec<TripId> = self
            .scan(IteratorMode::Start)?
            .into_iter()
            .filter(|existing| draft.matches(existing))
            .map(|existing| existing.id)
            .collect();

        let mut batch = WriteBatch::default();
        for id in &replaced {
            batch.delete_cf(&cf_trips, keys::trip_key(*id));
        }
        let record = self.stage_insert(&mut batch, draft)?;

        // Write atomically
        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(
            trip_id = %record.id,
            replaced = replaced.len(),
            "Trip saved"
        );

        Ok(SavedTrip { record, replaced })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use trip_budget_core::{Expenses, Party};

    fn create_test_store() -> (RocksStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RocksStore::open(dir.path()).unwrap();
        (store, dir)
    }

    fn draft(location: &str, budget_cents: i64) -> TripDraft {
        TripDraft {
            location: location.into(),
            start_date: "2024-03-01".into(),
            end_date: "2024-03-04".into(),
            budget_cents,
            expenses: Expenses {
                food_cents: 1_500,
                stay_cents: 6_000,
                ..Expenses::default()
            },
            currency: "€".into(),
            party: Party {
                total_persons: 2,
                male: 1,
                female: 1,
            },
        }
    }

    #[test]
    fn trip_crud() {
        let (store, _dir) = create_test_store();

        // Create
        let record = store.insert_trip(&draft("Rome", 20_000)).unwrap();
        assert_eq!(record.id, TripId::FIRST);
        assert_eq!(record.total_spent_cents, 7_500);
        assert_eq!(record.days, 4);

        // Read
        let retrieved = store.get_trip(record.id).unwrap().unwrap();
        assert_eq!(retrieved, record);

        // Delete
        assert!(store.delete_trip(record.id).unwrap());
        assert!(store.get_trip(record.id).unwrap().is_none());

        // Deleting again is a no-op
        assert!(!store.delete_trip(record.id).unwrap());
    }

    #[test]
    fn list_is_newest_first() {
        let (store, _dir) = create_test_store();
        for location in ["A", "B", "C"] {
            store.insert_trip(&draft(location, 1_000)).unwrap();
        }

        let locations: Vec<_> = store
            .list_trips()
            .unwrap()
            .into_iter()
            .map(|r| r.location)
            .collect();
        assert_eq!(locations, vec!["C", "B", "A"]);
    }

    #[test]
    fn save_replaces_matching_trips() {
        let (store, _dir) = create_test_store();
        let first = store.insert_trip(&draft("Paris", 50_000)).unwrap();
        let second = store.insert_trip(&draft("Paris", 50_000)).unwrap();
        let other = store.insert_trip(&draft("Paris", 60_000)).unwrap();

        let mut updated = draft("Paris", 50_000);
        updated.expenses.misc_cents = 2_500;
        let saved = store.save_trip(&updated).unwrap();

        assert_eq!(saved.replaced, vec![first.id, second.id]);
        assert!(saved.record.id > other.id);
        assert_eq!(saved.record.total_spent_cents, 10_000);

        let remaining: Vec<TripId> = store.list_trips().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(remaining, vec![saved.record.id, other.id]);
    }

    #[test]
    fn save_without_match_is_plain_insert() {
        let (store, _dir) = create_test_store();
        store.insert_trip(&draft("Berlin", 1_000)).unwrap();

        let saved = store.save_trip(&draft("Vienna", 1_000)).unwrap();
        assert!(saved.replaced.is_empty());
        assert_eq!(store.list_trips().unwrap().len(), 2);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let (store, _dir) = create_test_store();
        let a = store.insert_trip(&draft("A", 1)).unwrap();
        let b = store.insert_trip(&draft("B", 1)).unwrap();
        store.delete_trip(b.id).unwrap();

        let c = store.insert_trip(&draft("C", 1)).unwrap();
        assert!(c.id > b.id);
        assert!(b.id > a.id);
    }

    #[test]
    fn reopen_keeps_records_and_counter() {
        let dir = TempDir::new().unwrap();
        let first_id = {
            let store = RocksStore::open(dir.path()).unwrap();
            store.insert_trip(&draft("Madrid", 3_000)).unwrap().id
        };

        let store = RocksStore::open(dir.path()).unwrap();
        let trips = store.list_trips().unwrap();
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].id, first_id);

        let next = store.insert_trip(&draft("Seville", 3_000)).unwrap();
        assert_eq!(next.id, first_id.next());
    }
}
