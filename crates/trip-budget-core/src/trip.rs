//! Trip types.
//!
//! A `TripDraft` is what the form produces; a `TripRecord` is what the store
//! keeps. Only the store turns one into the other, because only the store can
//! hand out a `TripId`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dates::trip_days;
use crate::TripId;

/// Spending per category, in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expenses {
    /// Food and drink.
    pub food_cents: i64,
    /// Transport to, from and during the trip.
    pub travel_cents: i64,
    /// Accommodation.
    pub stay_cents: i64,
    /// Shopping.
    pub shopping_cents: i64,
    /// Everything else.
    pub misc_cents: i64,
}

impl Expenses {
    /// Sum of all five categories. Saturates rather than wrapping.
    #[must_use]
    pub const fn total_cents(&self) -> i64 {
        self.food_cents
            .saturating_add(self.travel_cents)
            .saturating_add(self.stay_cents)
            .saturating_add(self.shopping_cents)
            .saturating_add(self.misc_cents)
    }
}

/// Who went on the trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Total number of travellers.
    pub total_persons: u32,
    /// Number of male travellers.
    pub male: u32,
    /// Number of female travellers.
    pub female: u32,
}

/// The fields that identify "the same trip" for replace-on-save.
///
/// The budget is compared after rounding to whole cents, so `100.001` and
/// `100.004` are the same budget here even though the raw inputs differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    /// Trip location.
    pub location: String,
    /// Start date as submitted.
    pub start_date: String,
    /// End date as submitted.
    pub end_date: String,
    /// Budget in cents.
    pub budget_cents: i64,
}

/// A trip as submitted, before the store has accepted it.
///
/// There is no identifier and no total here: the store assigns the former and
/// the latter is always derived from `expenses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripDraft {
    /// Trip location.
    pub location: String,
    /// First day of the trip (`YYYY-MM-DD`).
    pub start_date: String,
    /// Last day of the trip (`YYYY-MM-DD`).
    pub end_date: String,
    /// Planned budget in cents.
    pub budget_cents: i64,
    /// Actual spending.
    pub expenses: Expenses,
    /// Currency code or symbol, used only for display.
    pub currency: String,
    /// Party composition.
    pub party: Party,
}

impl TripDraft {
    /// The deduplication tuple for this draft.
    #[must_use]
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            location: self.location.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            budget_cents: self.budget_cents,
        }
    }

    /// Inclusive day count, as it will be stored on the record.
    #[must_use]
    pub fn days(&self) -> i64 {
        trip_days(&self.start_date, &self.end_date).max(0)
    }

    /// Whether a stored record describes the same trip as this draft.
    #[must_use]
    pub fn matches(&self, record: &TripRecord) -> bool {
        self.location == record.location
            && self.start_date == record.start_date
            && self.end_date == record.end_date
            && self.budget_cents == record.budget_cents
    }
}

/// A persisted trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRecord {
    /// Store-assigned identifier.
    pub id: TripId,
    /// Trip location.
    pub location: String,
    /// First day of the trip.
    pub start_date: String,
    /// Last day of the trip.
    pub end_date: String,
    /// Planned budget in cents.
    pub budget_cents: i64,
    /// Actual spending.
    pub expenses: Expenses,
    /// Currency code or symbol.
    pub currency: String,
    /// Party composition.
    pub party: Party,
    /// Sum of `expenses` at the time the record was built.
    pub total_spent_cents: i64,
    /// Inclusive trip length in days, never negative.
    pub days: i64,
    /// When the record was created.
    pub recorded_at: DateTime<Utc>,
}

impl TripRecord {
    /// Build a record from a draft. Only stores should call this.
    #[must_use]
    pub fn from_draft(id: TripId, draft: &TripDraft, recorded_at: DateTime<Utc>) -> Self {
        Self {
            id,
            location: draft.location.clone(),
            start_date: draft.start_date.clone(),
            end_date: draft.end_date.clone(),
            budget_cents: draft.budget_cents,
            expenses: draft.expenses,
            currency: draft.currency.clone(),
            party: draft.party,
            total_spent_cents: draft.expenses.total_cents(),
            days: draft.days(),
            recorded_at,
        }
    }

    /// The deduplication tuple for this record.
    #[must_use]
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            location: self.location.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            budget_cents: self.budget_cents,
        }
    }

    /// Budget minus spending. Negative when over budget.
    #[must_use]
    pub const fn balance_cents(&self) -> i64 {
        self.budget_cents.saturating_sub(self.total_spent_cents)
    }
}
