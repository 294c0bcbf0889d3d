//! Health check handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
    /// Whether the trip store opened.
    pub store_available: bool,
}

/// Health check endpoint.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let store_available = state.session.lock().await.is_available();

    Json(HealthResponse {
        status: if store_available { "ok" } else { "degraded" }.to_string(),
        service: "trip-budget".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store_available,
    })
}
