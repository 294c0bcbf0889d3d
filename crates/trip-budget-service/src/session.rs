//! The trip session.
//!
//! One `TripSession` exists per running service. It holds the store handle
//! opened at startup and the cursor over the currently loaded history, and
//! every trip operation goes through it.

use std::sync::Arc;

use serde::Serialize;

use trip_budget_core::{
    BudgetSummary, HistoryPager, Page, Result, ScrollPosition, TripDraft, TripError, TripForm,
    TripId, TripRecord,
};
use trip_budget_store::{SavedTrip, Store};

use crate::config::ServiceConfig;

/// Result of submitting the trip form.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    /// Budget outcome, computed from the submitted values.
    pub summary: BudgetSummary,
    /// The stored trip and the records it replaced.
    pub saved: SavedTrip,
    /// First page of the reloaded history.
    pub history: Page,
}

/// Result of deleting a trip.
#[derive(Debug, Clone, Serialize)]
pub struct Deletion {
    /// Whether a record was actually removed.
    pub deleted: bool,
    /// First page of the reloaded history.
    pub history: Page,
}

/// Store handle plus history cursor.
pub struct TripSession {
    /// `None` when the store failed to open. There is no retry.
    store: Option<Arc<dyn Store>>,
    pager: HistoryPager,
    scroll_threshold: f64,
}

impl TripSession {
    /// Create a session over an open store.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, page_size: usize, scroll_threshold: f64) -> Self {
        Self {
            store: Some(store),
            pager: HistoryPager::new(page_size),
            scroll_threshold,
        }
    }

    /// Create a session whose store could not be opened.
    #[must_use]
    pub fn unavailable(page_size: usize, scroll_threshold: f64) -> Self {
        Self {
            store: None,
            pager: HistoryPager::new(page_size),
            scroll_threshold,
        }
    }

    /// Open the configured store. A failure is logged and leaves the session
    /// without a store.
    #[cfg(feature = "rocksdb-backend")]
    #[must_use]
    pub fn open(config: &ServiceConfig) -> Self {
        tracing::info!(path = %config.data_dir, "Opening RocksDB trip store");

        match trip_budget_store::RocksStore::open(&config.data_dir) {
            Ok(store) => Self::new(Arc::new(store), config.page_size, config.scroll_threshold),
            Err(e) => {
                tracing::error!(path = %config.data_dir, error = %e, "Failed to open trip store");
                Self::unavailable(config.page_size, config.scroll_threshold)
            }
        }
    }

    /// Open an in-memory store; this build has no durable backend.
    #[cfg(not(feature = "rocksdb-backend"))]
    #[must_use]
    pub fn open(config: &ServiceConfig) -> Self {
        tracing::warn!("Built without rocksdb-backend - trips will not survive a restart");
        Self::new(
            Arc::new(trip_budget_store::MemoryStore::new()),
            config.page_size,
            config.scroll_threshold,
        )
    }

    /// Whether the store opened.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    fn store(&self) -> Result<&dyn Store> {
        self.store.as_deref().ok_or(TripError::StoreUnavailable)
    }

    /// Handle a form submission: summarize, save with replacement, reload.
    pub fn submit(&mut self, form: TripForm) -> Result<Submission> {
        let draft = form.into_draft();
        let summary = BudgetSummary::for_draft(&draft);
        let saved = self.save_trip(&draft)?;
        let history = self.load_history()?;

        Ok(Submission {
            summary,
            saved,
            history,
        })
    }

    /// Save a trip, replacing earlier records for the same trip.
    pub fn save_trip(&mut self, draft: &TripDraft) -> Result<SavedTrip> {
        let saved = self.store()?.save_trip(draft)?;

        if saved.replaced.is_empty() {
            tracing::info!(trip_id = %saved.record.id, location = %saved.record.location, "Trip saved");
        } else {
            tracing::info!(
                trip_id = %saved.record.id,
                location = %saved.record.location,
                replaced = ?saved.replaced,
                "Trip saved, replacing earlier entries"
            );
        }

        Ok(saved)
    }

    /// Re-read the whole history and return its first page.
    pub fn load_history(&mut self) -> Result<Page> {
        let records = self.store()?.list_trips()?;
        tracing::debug!(total = records.len(), "History loaded");

        self.pager.reload(records);
        Ok(self.pager.next_page())
    }

    /// Next page of the loaded history. Empty once everything was served.
    pub fn next_page(&mut self) -> Page {
        self.pager.next_page()
    }

    /// Next page if the viewer is within the scroll threshold of the end.
    pub fn scroll(&mut self, position: ScrollPosition) -> Option<Page> {
        self.pager.on_scroll(position, self.scroll_threshold)
    }

    /// Delete a trip (missing trips are ignored) and reload the history.
    pub fn delete_trip(&mut self, id: TripId) -> Result<Deletion> {
        let deleted = self.store()?.delete_trip(id)?;
        if deleted {
            tracing::info!(trip_id = %id, "Trip deleted");
        } else {
            tracing::debug!(trip_id = %id, "Trip to delete was already gone");
        }

        let history = self.load_history()?;
        Ok(Deletion { deleted, history })
    }

    /// Look up a single trip.
    pub fn trip(&self, id: TripId) -> Result<Option<TripRecord>> {
        Ok(self.store()?.get_trip(id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trip_budget_core::{BudgetStatus, FormValue, DEFAULT_SCROLL_THRESHOLD};
    use trip_budget_store::MemoryStore;

    fn session() -> TripSession {
        TripSession::new(Arc::new(MemoryStore::new()), 5, DEFAULT_SCROLL_THRESHOLD)
    }

    fn form(location: &str, budget: f64, food: f64, travel: f64) -> TripForm {
        TripForm {
            location: Some(location.into()),
            start_date: Some("2024-01-01".into()),
            end_date: Some("2024-01-03".into()),
            budget: Some(FormValue::Number(budget)),
            food: Some(FormValue::Number(food)),
            travel: Some(FormValue::Number(travel)),
            currency: Some("$".into()),
            ..TripForm::default()
        }
    }

    #[test]
    fn submit_reports_remaining_balance() {
        let mut session = session();
        let submission = session.submit(form("Delhi", 100.0, 40.0, 20.0)).unwrap();

        assert_eq!(submission.summary.total_spent_cents, 6_000);
        assert_eq!(submission.summary.status, BudgetStatus::Remaining(4_000));
        assert_eq!(submission.summary.days, 3);
        assert_eq!(submission.saved.record.total_spent_cents, 6_000);
        assert_eq!(submission.history.items.len(), 1);
    }

    #[test]
    fn resubmitting_same_trip_keeps_one_record() {
        let mut session = session();
        let first = session.submit(form("Delhi", 100.0, 40.0, 20.0)).unwrap();
        let second = session.submit(form("Delhi", 100.0, 10.0, 0.0)).unwrap();

        assert_eq!(second.saved.replaced, vec![first.saved.record.id]);
        assert_eq!(second.history.total, 1);
        assert_eq!(second.history.items[0].total_spent_cents, 1_000);
    }

    #[test]
    fn paging_after_reload_covers_everything() {
        let mut session = session();
        for i in 0..11 {
            session
                .submit(form(&format!("Stop {i}"), 50.0, 1.0, 1.0))
                .unwrap();
        }

        let mut seen: Vec<u64> = session
            .load_history()
            .unwrap()
            .items
            .iter()
            .map(|r| r.id.get())
            .collect();
        loop {
            let page = session.next_page();
            if page.items.is_empty() {
                break;
            }
            seen.extend(page.items.iter().map(|r| r.id.get()));
        }

        assert_eq!(seen, (1..=11).rev().collect::<Vec<_>>());
    }

    #[test]
    fn delete_resets_cursor_and_drops_trip() {
        let mut session = session();
        for i in 0..7 {
            session.submit(form(&format!("T{i}"), 10.0, 0.0, 0.0)).unwrap();
        }
        session.next_page();

        let deletion = session.delete_trip(TripId::new(7)).unwrap();
        assert!(deletion.deleted);
        assert_eq!(deletion.history.number, 0);
        assert_eq!(deletion.history.total, 6);
        assert!(deletion.history.items.iter().all(|r| r.id != TripId::new(7)));

        let again = session.delete_trip(TripId::new(7)).unwrap();
        assert!(!again.deleted);
    }

    #[test]
    fn unavailable_store_fails_store_operations() {
        let mut session = TripSession::unavailable(5, DEFAULT_SCROLL_THRESHOLD);
        assert!(!session.is_available());
        assert!(matches!(
            session.submit(form("Nowhere", 1.0, 0.0, 0.0)),
            Err(TripError::StoreUnavailable)
        ));
        assert!(matches!(
            session.delete_trip(TripId::FIRST),
            Err(TripError::StoreUnavailable)
        ));
        assert!(matches!(
            session.load_history(),
            Err(TripError::StoreUnavailable)
        ));
        assert!(session.next_page().items.is_empty());
    }
}
