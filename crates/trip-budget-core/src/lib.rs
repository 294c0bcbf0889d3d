//! Core types and utilities for the trip budget tracker.
//!
//! This crate provides the foundational types shared by the store and the service:
//!
//! - **Identifiers**: `TripId`
//! - **Trips**: `TripDraft`, `TripRecord`, `Expenses`, `Party`, `DedupKey`
//! - **Input**: `TripForm`, `FormValue`
//! - **Calculations**: `trip_days`, `BudgetSummary`
//! - **History**: `HistoryPager`, `Page`, `ScrollPosition`
//!
//! # Amounts
//!
//! All money is stored as `i64` minor units (cents) so that the total spent is
//! always the exact sum of its categories. Conversion to a decimal string only
//! happens for display.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod dates;
pub mod error;
pub mod form;
pub mod history;
pub mod ids;
pub mod summary;
pub mod trip;

pub use dates::trip_days;
pub use error::{Result, TripError};
pub use form::{FormValue, TripForm, MAX_AMOUNT_CENTS};
pub use history::{HistoryPager, Page, ScrollPosition, DEFAULT_PAGE_SIZE, DEFAULT_SCROLL_THRESHOLD};
pub use ids::{IdError, TripId};
pub use summary::{format_cents, BudgetStatus, BudgetSummary};
pub use trip::{DedupKey, Expenses, Party, TripDraft, TripRecord};
