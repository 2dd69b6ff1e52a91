//! Backend locations, test accounts and the historical query window

use std::env;

use chrono::{DateTime, Duration};

/// Reference exchange API.
pub const HYPERLIQUID_URL: &str = "https://api.hyperliquid.xyz";
/// Reimplementation under test.
pub const AMBIENT_URL: &str = "https://embindexer.net/ember/api/dev/v1";

/// Each backend has its own test account, so user-scoped requests differ
/// only in this identifier.
pub const HYPERLIQUID_TEST_ADDRESS: &str = "0x0f6410E884F115166f82E3FFB5840BAdc20619e1";
pub const AMBIENT_TEST_ADDRESS: &str = "5CcaDcVkVusXtPndVX8Hi4Wi68iw2hE6r6xcRmZ5NirK";

/// End of the window used by time-ranged requests, in epoch milliseconds.
pub const WINDOW_END_MS: i64 = 1758546945000;

pub const DEFAULT_COIN: &str = "BTC";

/// Configuration shared by every scenario
#[derive(Debug, Clone)]
pub struct Config {
    pub reference_url: String,
    pub candidate_url: String,
    pub reference_user: String,
    pub candidate_user: String,
    /// Epoch milliseconds.
    pub window_end_ms: i64,
    pub window: Duration,
    pub coin: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference_url: HYPERLIQUID_URL.to_string(),
            candidate_url: AMBIENT_URL.to_string(),
            reference_user: HYPERLIQUID_TEST_ADDRESS.to_string(),
            candidate_user: AMBIENT_TEST_ADDRESS.to_string(),
            window_end_ms: WINDOW_END_MS,
            window: Duration::days(1),
            coin: DEFAULT_COIN.to_string(),
        }
    }
}

impl Config {
    /// Defaults, with the backend URLs and test addresses overridable from
    /// the environment.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            reference_url: env::var("HYPERLIQUID_URL").unwrap_or(defaults.reference_url),
            candidate_url: env::var("AMBIENT_URL").unwrap_or(defaults.candidate_url),
            reference_user: env::var("HYPERLIQUID_TEST_ADDRESS")
                .unwrap_or(defaults.reference_user),
            candidate_user: env::var("AMBIENT_TEST_ADDRESS").unwrap_or(defaults.candidate_user),
            ..defaults
        }
    }

    pub fn window_start_ms(&self) -> i64 {
        self.window_end_ms - self.window.num_milliseconds()
    }

    /// Human readable window, e.g. `2025-09-21T13:15:45+00:00 .. 2025-09-22T13:15:45+00:00`.
    pub fn describe_window(&self) -> String {
        let render = |ms: i64| {
            DateTime::from_timestamp_millis(ms)
                .map(|ts| ts.to_rfc3339())
                .unwrap_or_else(|| format!("{ms}ms"))
        };
        format!(
            "{} .. {}",
            render(self.window_start_ms()),
            render(self.window_end_ms)
        )
    }
}
