//! Portfolio figures. Displayed as received, never recomputed.

use serde::{Deserialize, Serialize};

/// Portfolio summary embedded in the status response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub cash_balance: f64,
    pub positions_value: f64,
    pub total_pnl: f64,
    pub total_return_pct: f64,
    pub realized_pnl: f64,
    pub unrealized_pnl: f64,
    pub num_open_positions: u32,
    pub total_trades: u64,
}

/// An open paper position from `GET /portfolio/positions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub market_id: String,
    pub token_id: String,
    pub question: String,
    pub outcome: String,
    pub side: String,
    pub entry_price: f64,
    pub quantity: f64,
    pub entry_value: f64,
    pub current_price: f64,
    pub current_value: f64,
    pub unrealized_pnl: f64,
}
