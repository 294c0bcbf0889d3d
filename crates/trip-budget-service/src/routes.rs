//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{health, history, trips};
use crate::state::AppState;

/// Maximum concurrent requests for API endpoints. They queue on the session
/// lock anyway; this only bounds how many can wait.
const API_MAX_CONCURRENT_REQUESTS: usize = 16;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// - `GET /health` - Health check
///
/// ## Trips
/// - `POST /v1/trips` - Submit the trip form
/// - `GET /v1/trips/:id` - Trip details
/// - `DELETE /v1/trips/:id` - Delete a trip
///
/// ## History
/// - `GET /v1/history` - Reload and return the first page
/// - `GET /v1/history/next` - Next page
/// - `POST /v1/history/scroll` - Report scroll position
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    let api_routes = Router::new()
        // Trips
        .route("/trips", post(trips::submit_trip))
        .route("/trips/:id", get(trips::get_trip).delete(trips::delete_trip))
        // History
        .route("/history", get(history::load_history))
        .route("/history/next", get(history::next_page))
        .route("/history/scroll", post(history::scroll))
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        .route("/health", get(health::health))
        .nest("/v1", api_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
