//! Trip Budget Service - local HTTP API for the trip budget tracker.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trip_budget_service::{create_router, AppState, ServiceConfig, TripSession};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,trip_budget=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Trip Budget Service");

    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        data_dir = %config.data_dir,
        page_size = config.page_size,
        scroll_threshold = config.scroll_threshold,
        "Service configuration loaded"
    );

    // The store is opened once; if that fails the service still starts and
    // reports the store as unavailable.
    let mut session = TripSession::open(&config);
    match session.load_history() {
        Ok(page) => tracing::info!(trips = page.total, "History loaded"),
        Err(e) => tracing::warn!(error = %e, "History not loaded"),
    }

    let state = AppState::new(session, config.clone());
    let app = create_router(state);

    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
