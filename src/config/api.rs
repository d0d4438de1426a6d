//! Remote service connection settings.

use serde::Deserialize;
use std::time::Duration;

use super::duration;

/// Base URL used when neither the file nor the environment provides one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP settings for the trading service API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout.
    #[serde(default = "default_timeout", with = "duration")]
    pub timeout: Duration,
    /// Extra attempts for GET requests that fail at the transport level.
    #[serde(default = "default_retries")]
    pub retries: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            retries: default_retries(),
        }
    }
}

impl ApiConfig {
    /// Longest one GET can take: every attempt timing out, plus one second of slack.
    /// Saturates instead of overflowing on extreme settings.
    pub fn round_trip_budget(&self) -> Duration {
        self.timeout
            .checked_mul(self.retries.saturating_add(1))
            .unwrap_or(Duration::MAX)
            .saturating_add(Duration::from_secs(1))
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn default_retries() -> u32 {
    1
}
