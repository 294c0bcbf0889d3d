//! Application state.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::ServiceConfig;
use crate::session::TripSession;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The one session. Requests take turns on it, like events on a UI thread.
    pub session: Arc<Mutex<TripSession>>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(session: TripSession, config: ServiceConfig) -> Self {
        if !session.is_available() {
            tracing::warn!("Trip store unavailable - trip requests will fail for this session");
        }

        Self {
            session: Arc::new(Mutex::new(session)),
            config,
        }
    }
}
