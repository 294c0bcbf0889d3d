//! Common test utilities for trip budget integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use trip_budget_service::{create_router, AppState, ServiceConfig, TripSession};
use trip_budget_store::MemoryStore;

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Temporary directory for an on-disk store (kept alive for test duration).
    pub _temp_dir: Option<TempDir>,
}

impl TestHarness {
    /// Create a new test harness with a fresh in-memory store.
    pub fn new() -> Self {
        let config = test_config("unused");
        let session = TripSession::new(
            Arc::new(MemoryStore::new()),
            config.page_size,
            config.scroll_threshold,
        );
        Self::with_session(session, config, None)
    }

    /// Create a harness whose store failed to open.
    pub fn unavailable() -> Self {
        let config = test_config("unused");
        let session = TripSession::unavailable(config.page_size, config.scroll_threshold);
        Self::with_session(session, config, None)
    }

    /// Create a harness backed by `RocksDB` in a temporary directory.
    #[cfg(feature = "rocksdb-backend")]
    pub fn rocks() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config = test_config(&temp_dir.path().to_string_lossy());
        let session = TripSession::open(&config);
        assert!(session.is_available(), "RocksDB store should open");
        Self::with_session(session, config, Some(temp_dir))
    }

    fn with_session(session: TripSession, config: ServiceConfig, temp_dir: Option<TempDir>) -> Self {
        let state = AppState::new(session, config);
        let router: Router = create_router(state);
        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            _temp_dir: temp_dir,
        }
    }

    /// Submit a trip and return the response body.
    pub async fn submit(&self, body: Value) -> Value {
        let response = self.server.post("/v1/trips").json(&body).await;
        response.assert_status_ok();
        response.json()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

fn test_config(data_dir: &str) -> ServiceConfig {
    ServiceConfig {
        listen_addr: "127.0.0.1:0".into(),
        data_dir: data_dir.into(),
        page_size: 5,
        scroll_threshold: 200.0,
        cors_origins: vec!["*".into()],
        max_body_bytes: 64 * 1024,
        request_timeout_seconds: 30,
    }
}

/// A trip form body for the given location and budget.
pub fn trip_form(location: &str, budget: f64) -> Value {
    json!({
        "location": location,
        "start_date": "2024-01-01",
        "end_date": "2024-01-03",
        "budget": budget,
        "food": 40,
        "travel": "20",
        "currency": "$",
        "total_persons": 2,
        "male": 1,
        "female": 1
    })
}

/// Trip IDs on a page, in order.
pub fn page_ids(page: &Value) -> Vec<u64> {
    page["items"]
        .as_array()
        .expect("page items")
        .iter()
        .map(|item| item["id"].as_u64().expect("trip id"))
        .collect()
}
