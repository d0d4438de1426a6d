//! Bot status as reported by `GET /bot/status`.

use serde::{Deserialize, Serialize};

use super::PortfolioSummary;

/// BotStatus mirrors the remote bot's lifecycle state. Never computed locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotStatus {
    Stopped,
    Scanning,
    Running,
}

impl BotStatus {
    /// Returns true when the remote bot is doing work (running or mid-scan).
    pub fn is_active(self) -> bool {
        matches!(self, BotStatus::Running | BotStatus::Scanning)
    }
}

impl std::fmt::Display for BotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotStatus::Stopped => write!(f, "stopped"),
            BotStatus::Scanning => write!(f, "scanning"),
            BotStatus::Running => write!(f, "running"),
        }
    }
}

/// Response body of `GET /bot/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub bot_status: BotStatus,
    /// Trading mode, "paper" unless the service says otherwise.
    #[serde(default = "default_mode")]
    pub mode: String,
    pub portfolio: PortfolioSummary,
    #[serde(default)]
    pub active_strategies: Vec<String>,
    #[serde(default)]
    pub uptime_seconds: f64,
}

fn default_mode() -> String {
    "paper".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_states() {
        assert!(BotStatus::Running.is_active());
        assert!(BotStatus::Scanning.is_active());
        assert!(!BotStatus::Stopped.is_active());
    }

    #[test]
    fn test_parse_status_response() {
        let json = r#"{
            "bot_status": "scanning",
            "mode": "paper",
            "portfolio": {
                "total_value": 1050.5,
                "cash_balance": 800.0,
                "positions_value": 250.5,
                "total_pnl": 50.5,
                "total_return_pct": 5.05,
                "realized_pnl": 20.0,
                "unrealized_pnl": 30.5,
                "num_open_positions": 3,
                "total_trades": 12
            },
            "active_strategies": ["fullset", "endgame"],
            "uptime_seconds": 125.0
        }"#;

        let status: StatusResponse = serde_json::from_str(json).unwrap();
        assert_eq!(status.bot_status, BotStatus::Scanning);
        assert_eq!(status.portfolio.total_value, 1050.5);
        assert_eq!(status.portfolio.num_open_positions, 3);
        assert_eq!(status.active_strategies, vec!["fullset", "endgame"]);
    }

    #[test]
    fn test_unknown_status_rejected() {
        let result: Result<BotStatus, _> = serde_json::from_str(r#""paused""#);
        assert!(result.is_err());
    }
}
