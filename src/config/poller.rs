//! Status polling configuration.

use serde::Deserialize;
use std::time::Duration;

use super::duration;

/// Interval used by the status poller when none is configured.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10_000);

/// Settings for the periodic status/activity refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct PollerConfig {
    /// Time between regular polls.
    #[serde(default = "default_interval", with = "duration")]
    pub interval: Duration,
    /// Number of activity entries requested per poll.
    #[serde(default = "default_activity_limit")]
    pub activity_limit: u32,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            activity_limit: default_activity_limit(),
        }
    }
}

fn default_interval() -> Duration {
    DEFAULT_POLL_INTERVAL
}

fn default_activity_limit() -> u32 {
    50
}
