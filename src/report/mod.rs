//! Plain-text rendering of what the console shows.

use std::fmt::Write;

use crate::chart::SeriesPoint;
use crate::domain::{BotSettings, CommandReply, Opportunity, Position, StrategyType};
use crate::format::{
    NOT_AVAILABLE, format_currency, format_liquidity, format_percent, format_signed_currency,
    format_uptime, risk_label,
};
use crate::poller::StatusSnapshot;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Renders bot status, portfolio and the newest `activity_rows` log lines.
pub fn render_status(snapshot: &StatusSnapshot, activity_rows: usize) -> String {
    let mut out = String::new();

    match &snapshot.status {
        Some(status) => {
            let p = &status.portfolio;
            let _ = writeln!(
                out,
                "Bot: {} ({} mode, up {})",
                status.bot_status,
                status.mode,
                format_uptime(status.uptime_seconds)
            );
            let _ = writeln!(
                out,
                "Total value: {} | Cash: {} | Positions: {}",
                format_currency(p.total_value),
                format_currency(p.cash_balance),
                format_currency(p.positions_value)
            );
            let _ = writeln!(
                out,
                "P&L: {} ({}) | Realized: {} | Unrealized: {}",
                format_signed_currency(p.total_pnl),
                format_percent(Some(p.total_return_pct)),
                format_signed_currency(p.realized_pnl),
                format_signed_currency(p.unrealized_pnl)
            );
            let _ = writeln!(
                out,
                "Open positions: {} | Trades: {}",
                p.num_open_positions, p.total_trades
            );
            if !status.active_strategies.is_empty() {
                let _ = writeln!(out, "Strategies: {}", status.active_strategies.join(", "));
            }
        }
        None => {
            let _ = writeln!(out, "Bot: {}", NOT_AVAILABLE);
        }
    }

    if let Some(e) = &snapshot.status_error {
        let _ = writeln!(out, "! status unavailable: {}", e);
    }

    let _ = writeln!(out, "Activity:");
    if snapshot.activity.is_empty() {
        let _ = writeln!(out, "  (no activity)");
    }
    for entry in snapshot.activity.iter().take(activity_rows) {
        let _ = writeln!(out, "  {} [{}] {}", entry.timestamp, entry.kind, entry.message);
    }
    if let Some(e) = &snapshot.activity_error {
        let _ = writeln!(out, "! activity unavailable: {}", e);
    }

    out
}

/// Renders opportunities in the given order, one line each.
pub fn render_opportunities(strategy: StrategyType, opportunities: &[Opportunity]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} opportunities:", strategy.label());

    if opportunities.is_empty() {
        let _ = writeln!(out, "  (none)");
        return out;
    }

    for (i, opp) in opportunities.iter().enumerate() {
        let days = opp
            .days_until_resolution
            .map(|d| format!(" | {:.0}d", d))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  {}. {} | return {} | liquidity {}{}",
            i + 1,
            opp.name,
            format_percent(opp.display_return()),
            format_liquidity(opp.liquidity),
            days
        );
    }
    out
}

pub fn render_positions(positions: &[Position]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Positions:");
    if positions.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for pos in positions {
        let _ = writeln!(
            out,
            "  {} {} x{:.2} @ {:.3} -> {:.3} | {} ({})",
            pos.side,
            pos.outcome,
            pos.quantity,
            pos.entry_price,
            pos.current_price,
            format_signed_currency(pos.unrealized_pnl),
            pos.question
        );
    }
    out
}

pub fn render_settings(settings: &BotSettings) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Risk appetite: {:.2} ({})",
        settings.risk_appetite,
        risk_label(settings.risk_appetite)
    );
    let _ = writeln!(out, "Max capital: {}", format_currency(settings.max_capital));
    for strategy in StrategyType::ALL {
        let mark = if settings.strategies_enabled.get(strategy) { "x" } else { " " };
        let _ = writeln!(out, "  [{}] {}", mark, strategy.label());
    }
    out
}

pub fn render_command(reply: &CommandReply) -> String {
    match (reply.status, &reply.preset) {
        (Some(status), Some(preset)) => format!("{} (reported {}, preset {})", reply.message, status, preset),
        (Some(status), None) => format!("{} (reported {})", reply.message, status),
        _ => reply.message.clone(),
    }
}

/// Renders a value series as a one-line sparkline.
///
/// The series is synthetic, so the line says so.
pub fn render_series(series: &[SeriesPoint]) -> String {
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return String::new();
    };

    let min = series.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
    let max = series.iter().map(|p| p.value).fold(f64::NEG_INFINITY, f64::max);

    let spark: String = series
        .iter()
        .map(|p| spark_char(p.value, min, max))
        .collect();

    format!(
        "{} {} {} {} (approximation, not history)",
        first.label,
        spark,
        last.label,
        format_currency(last.value)
    )
}

fn spark_char(value: f64, min: f64, max: f64) -> char {
    let span = max - min;
    if !span.is_finite() || span <= 0.0 {
        return SPARK_LEVELS[SPARK_LEVELS.len() / 2];
    }
    let top = (SPARK_LEVELS.len() - 1) as f64;
    let level = ((value - min) / span * top).round().clamp(0.0, top) as usize;
    SPARK_LEVELS[level]
}
