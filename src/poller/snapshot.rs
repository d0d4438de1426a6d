//! The latest status and activity as seen by the poller.

use chrono::{DateTime, Utc};

use crate::domain::{ActivityLogEntry, BotStatus, StatusResponse};
use crate::gateway::{GatewayError, Result};

/// StatusSnapshot pairs the last good status with the last good activity log.
///
/// Each half keeps its own success timestamp and last error. A failed fetch
/// records the error but never clears data that was already shown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusSnapshot {
    pub status: Option<StatusResponse>,
    pub status_updated_at: Option<DateTime<Utc>>,
    pub status_error: Option<GatewayError>,
    pub activity: Vec<ActivityLogEntry>,
    pub activity_updated_at: Option<DateTime<Utc>>,
    pub activity_error: Option<GatewayError>,
}

impl StatusSnapshot {
    /// Remote bot status from the last successful poll.
    pub fn bot_status(&self) -> Option<BotStatus> {
        self.status.as_ref().map(|s| s.bot_status)
    }

    /// Returns true if either half failed on its most recent fetch.
    pub fn has_errors(&self) -> bool {
        self.status_error.is_some() || self.activity_error.is_some()
    }

    /// Applies a status fetch result. Returns false if it failed.
    pub(crate) fn record_status(&mut self, result: Result<StatusResponse>, at: DateTime<Utc>) -> bool {
        match result {
            Ok(status) => {
                self.status = Some(status);
                self.status_updated_at = Some(at);
                self.status_error = None;
                true
            }
            Err(e) => {
                self.status_error = Some(e);
                false
            }
        }
    }

    /// Applies an activity fetch result. Returns false if it failed.
    pub(crate) fn record_activity(
        &mut self,
        result: Result<Vec<ActivityLogEntry>>,
        at: DateTime<Utc>,
    ) -> bool {
        match result {
            Ok(activity) => {
                self.activity = activity;
                self.activity_updated_at = Some(at);
                self.activity_error = None;
                true
            }
            Err(e) => {
                self.activity_error = Some(e);
                false
            }
        }
    }
}
