//! Trip budget HTTP API.
//!
//! This crate is the application controller for the trip budget tracker. It
//! owns the single `TripSession` (store handle plus history cursor) and exposes
//! it over a small JSON API:
//!
//! - Trip submission with budget summary and replace-on-save
//! - Trip details and deletion
//! - Paged, newest-first history with a scroll trigger
//!
//! Rendering, the location search widget and any other UI live in the client.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Session handlers are sync under the lock

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod session;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use session::{Deletion, Submission, TripSession};
pub use state::AppState;
