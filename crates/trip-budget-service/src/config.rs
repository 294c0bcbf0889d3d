//! Service configuration.

use trip_budget_core::{DEFAULT_PAGE_SIZE, DEFAULT_SCROLL_THRESHOLD};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "127.0.0.1:8080").
    pub listen_addr: String,

    /// Path to the `RocksDB` data directory (default: "./data/trip-budget").
    pub data_dir: String,

    /// Trips per history page (default: 5).
    pub page_size: usize,

    /// Distance from the bottom of the list that triggers the next page (default: 200).
    pub scroll_threshold: f64,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Missing or unparseable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            data_dir: std::env::var("DATA_DIR").unwrap_or(defaults.data_dir),
            page_size: env_parse("PAGE_SIZE")
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.page_size),
            scroll_threshold: env_parse("SCROLL_THRESHOLD")
                .filter(|t: &f64| t.is_finite() && *t >= 0.0)
                .unwrap_or(defaults.scroll_threshold),
            cors_origins: std::env::var("CORS_ORIGINS").map_or(defaults.cors_origins, |s| {
                s.split(',').map(|s| s.trim().to_string()).collect()
            }),
            max_body_bytes: env_parse("MAX_BODY_BYTES").unwrap_or(defaults.max_body_bytes),
            request_timeout_seconds: env_parse("REQUEST_TIMEOUT_SECONDS")
                .unwrap_or(defaults.request_timeout_seconds),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        tracing::warn!(var = name, value = %raw, "Ignoring invalid configuration value");
    }
    parsed
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".into(),
            data_dir: "./data/trip-budget".into(),
            page_size: DEFAULT_PAGE_SIZE,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            cors_origins: vec!["*".into()],
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 30,
        }
    }
}
