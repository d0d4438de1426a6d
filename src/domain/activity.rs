//! Activity log entries from `GET /bot/activity`.

use chrono::{DateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Category of an activity entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Scan,
    Trade,
    Info,
    Error,
    /// Any category this client does not know about.
    #[serde(other)]
    Other,
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityKind::Scan => write!(f, "scan"),
            ActivityKind::Trade => write!(f, "trade"),
            ActivityKind::Info => write!(f, "info"),
            ActivityKind::Error => write!(f, "error"),
            ActivityKind::Other => write!(f, "other"),
        }
    }
}

/// A single line of the remote activity log, in server order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    /// Timestamp exactly as sent by the service.
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub message: String,
}

impl ActivityLogEntry {
    /// Wall-clock time of the entry.
    ///
    /// Accepts the service's "HH:MM:SS" format as well as RFC 3339.
    pub fn time(&self) -> Option<NaiveTime> {
        let raw = self.timestamp.trim();
        NaiveTime::parse_from_str(raw, "%H:%M:%S")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.time()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(timestamp: &str) -> ActivityLogEntry {
        ActivityLogEntry {
            timestamp: timestamp.to_string(),
            kind: ActivityKind::Info,
            message: "hello".to_string(),
        }
    }

    #[test]
    fn test_parse_log_preserves_order() {
        let json = r#"[
            {"timestamp": "12:00:05", "type": "trade", "message": "Bot started in paper trading mode"},
            {"timestamp": "12:00:01", "type": "scan", "message": "Scanning full-set arbitrage..."},
            {"timestamp": "12:00:00", "type": "heartbeat", "message": "tick"}
        ]"#;

        let log: Vec<ActivityLogEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(log.len(), 3);
        assert_eq!(log[0].kind, ActivityKind::Trade);
        assert_eq!(log[1].kind, ActivityKind::Scan);
        assert_eq!(log[2].kind, ActivityKind::Other);
    }

    #[test]
    fn test_time_clock_format() {
        assert_eq!(entry("09:30:15").time(), NaiveTime::from_hms_opt(9, 30, 15));
    }

    #[test]
    fn test_time_rfc3339() {
        assert_eq!(
            entry("2026-10-18T21:04:00+00:00").time(),
            NaiveTime::from_hms_opt(21, 4, 0)
        );
    }

    #[test]
    fn test_time_unparseable() {
        assert_eq!(entry("yesterday").time(), None);
    }
}
