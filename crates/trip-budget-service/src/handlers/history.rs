//! History paging handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use trip_budget_core::{Page, ScrollPosition};

use crate::error::ApiError;
use crate::state::AppState;

/// Response to a scroll report.
#[derive(Debug, Serialize)]
pub struct ScrollResponse {
    /// Whether the position crossed the threshold with more pages left.
    pub triggered: bool,
    /// The next page, when triggered.
    pub page: Option<Page>,
}

/// Reload the history from the store and return its first page.
pub async fn load_history(State(state): State<Arc<AppState>>) -> Result<Json<Page>, ApiError> {
    let page = state.session.lock().await.load_history()?;
    Ok(Json(page))
}

/// Next page of the loaded history.
pub async fn next_page(State(state): State<Arc<AppState>>) -> Json<Page> {
    Json(state.session.lock().await.next_page())
}

/// Report the viewer's scroll position; returns the next page when close to the end.
pub async fn scroll(
    State(state): State<Arc<AppState>>,
    Json(position): Json<ScrollPosition>,
) -> Json<ScrollResponse> {
    let page = state.session.lock().await.scroll(position);

    Json(ScrollResponse {
        triggered: page.is_some(),
        page,
    })
}
