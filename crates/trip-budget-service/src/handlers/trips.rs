//! Trip submission, lookup and deletion handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use trip_budget_core::{BudgetSummary, Page, TripError, TripForm, TripId, TripRecord};

use crate::error::ApiError;
use crate::session::Deletion;
use crate::state::AppState;

/// Response to a trip submission.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    /// The stored trip.
    pub trip: TripRecord,
    /// IDs of earlier entries for the same trip that were removed.
    pub replaced: Vec<TripId>,
    /// Budget outcome.
    pub summary: BudgetSummary,
    /// The summary as display text.
    pub summary_text: String,
    /// First page of the refreshed history.
    pub history: Page,
}

fn parse_trip_id(raw: &str) -> Result<TripId, ApiError> {
    let id = raw.parse::<TripId>().map_err(TripError::from)?;
    Ok(id)
}

/// Submit the trip form.
pub async fn submit_trip(
    State(state): State<Arc<AppState>>,
    Json(form): Json<TripForm>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let submission = state.session.lock().await.submit(form)?;

    Ok(Json(SubmitResponse {
        summary_text: submission.summary.to_string(),
        trip: submission.saved.record,
        replaced: submission.saved.replaced,
        summary: submission.summary,
        history: submission.history,
    }))
}

/// Get a single trip with all its details.
pub async fn get_trip(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<TripRecord>, ApiError> {
    let id = parse_trip_id(&raw_id)?;

    let trip = state
        .session
        .lock()
        .await
        .trip(id)?
        .ok_or_else(|| ApiError::NotFound(format!("trip not found: {id}")))?;

    Ok(Json(trip))
}

/// Delete a trip. Unknown IDs are not an error.
pub async fn delete_trip(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Deletion>, ApiError> {
    let id = parse_trip_id(&raw_id)?;
    let deletion = state.session.lock().await.delete_trip(id)?;

    Ok(Json(deletion))
}
