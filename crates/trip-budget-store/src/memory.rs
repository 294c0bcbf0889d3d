//! In-memory storage implementation.
//!
//! Same contract as the `RocksDB` store, without durability. Used by tests and
//! by service builds that leave out the `rocksdb-backend` feature.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use trip_budget_core::{TripDraft, TripId, TripRecord};

use crate::error::{Result, StoreError};
use crate::{SavedTrip, Store};

#[derive(Debug)]
struct Inner {
    trips: BTreeMap<TripId, TripRecord>,
    next_id: TripId,
}

impl Inner {
    fn allocate(&mut self, draft: &TripDraft) -> TripRecord {
        let id = self.next_id;
        self.next_id = id.next();
        let record = TripRecord::from_draft(id, draft, Utc::now());
        self.trips.insert(id, record.clone());
        record
    }
}

/// Volatile storage backed by an ordered map.
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                trips: BTreeMap::new(),
                next_id: TripId::FIRST,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Database("memory store lock poisoned".into()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn insert_trip(&self, draft: &TripDraft) -> Result<TripRecord> {
        let record = self.lock()?.allocate(draft);
        tracing::debug!(trip_id = %record.id, location = %record.location, "Trip inserted");
        Ok(record)
    }

    fn get_trip(&self, id: TripId) -> Result<Option<TripRecord>> {
        Ok(self.lock()?.trips.get(&id).cloned())
    }

    fn list_trips(&self) -> Result<Vec<TripRecord>> {
        Ok(self.lock()?.trips.values().rev().cloned().collect())
    }

    fn delete_trip(&self, id: TripId) -> Result<bool> {
        let removed = self.lock()?.trips.remove(&id).is_some();
        tracing::debug!(trip_id = %id, removed, "Trip delete");
        Ok(removed)
    }

    fn save_trip(&self, draft: &TripDraft) -> Result<SavedTrip> {
        let mut inner = self.lock()?;

        let replaced: Vec<TripId> = inner
            .trips
            .values()
            .filter(|existing| draft.matches(existing))
            .map(|existing| existing.id)
            .collect();

        for id in &replaced {
            inner.trips.remove(id);
        }
        let record = inner.allocate(draft);

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
    use trip_budget_core::{Expenses, Party};

    fn draft(location: &str, start: &str, end: &str, budget_cents: i64) -> TripDraft {
        TripDraft {
            location: location.into(),
            start_date: start.into(),
            end_date: end.into(),
            budget_cents,
            expenses: Expenses {
                travel_cents: 800,
                ..Expenses::default()
            },
            currency: "$".into(),
            party: Party::default(),
        }
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let store = MemoryStore::new();
        let a = store.insert_trip(&draft("A", "", "", 0)).unwrap();
        let b = store.insert_trip(&draft("B", "", "", 0)).unwrap();
        assert_eq!(a.id, TripId::FIRST);
        assert_eq!(b.id, TripId::new(2));
    }

    #[test]
    fn dedup_leaves_exactly_one_match() {
        let store = MemoryStore::new();
        let trip = draft("Cairo", "2024-02-01", "2024-02-07", 90_000);
        store.insert_trip(&trip).unwrap();
        store.insert_trip(&trip).unwrap();
        store
            .insert_trip(&draft("Cairo", "2024-02-01", "2024-02-08", 90_000))
            .unwrap();

        let saved = store.save_trip(&trip).unwrap();
        assert_eq!(saved.replaced.len(), 2);

        let key = trip.dedup_key();
        let matching: Vec<_> = store
            .list_trips()
            .unwrap()
            .into_iter()
            .filter(|r| r.dedup_key() == key)
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].id, saved.record.id);
        assert!(saved.replaced.iter().all(|id| store.get_trip(*id).unwrap().is_none()));
    }

    #[test]
    fn delete_missing_is_noop() {
        let store = MemoryStore::new();
        assert!(!store.delete_trip(TripId::new(77)).unwrap());
    }

    #[test]
    fn deleted_trip_never_listed() {
        let store = MemoryStore::new();
        let kept = store.insert_trip(&draft("X", "", "", 1)).unwrap();
        let gone = store.insert_trip(&draft("Y", "", "", 1)).unwrap();
        store.delete_trip(gone.id).unwrap();

        let ids: Vec<_> = store.list_trips().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![kept.id]);
    }
}
