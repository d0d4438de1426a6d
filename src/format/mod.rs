//! Display formatting for domain values.
//!
//! Every function here is total: any input, including NaN or infinity,
//! produces a string.

/// Shown when a value is missing or not a finite number.
pub const NOT_AVAILABLE: &str = "N/A";

/// Formats a USD amount as "$1,234.56" / "-$1,234.56".
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }

    let fixed = format!("{:.2}", round_to(value.abs(), 2));
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let negative = value < 0.0 && fixed != "0.00";

    format!(
        "{}${}.{}",
        if negative { "-" } else { "" },
        add_thousand_separators(whole),
        cents
    )
}

/// Formats a P&L figure, prefixing non-negative values with "+".
pub fn format_signed_currency(value: f64) -> String {
    if value >= 0.0 {
        format!("+{}", format_currency(value))
    } else {
        format_currency(value)
    }
}

/// Formats a percentage with one decimal, or "N/A" when absent.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.1}%", round_to(v, 1)),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Formats liquidity as whole dollars below $1000, otherwise thousands with one decimal.
pub fn format_liquidity(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    if value < 1000.0 {
        format!("${:.0}", round_to(value, 0))
    } else {
        format!("${:.1}K", round_to(value / 1000.0, 1))
    }
}

/// Maps a risk appetite in [0, 1] to its band name.
///
/// Bands are half-open: exactly 0.33 is "Balanced", exactly 0.66 is "Aggressive".
pub fn risk_label(risk: f64) -> &'static str {
    if risk < 0.33 {
        "Conservative"
    } else if risk < 0.66 {
        "Balanced"
    } else {
        "Aggressive"
    }
}

/// Formats bot uptime in seconds as "45s", "2m 5s", "1h 2m" or "1d 1h".
pub fn format_uptime(seconds: f64) -> String {
    let secs = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };

    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}

/// Rounds half away from zero at `decimals` places.
///
/// `format!` precision alone rounds exact ties to even ("2.5" -> "2").
fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Inserts "," between groups of three digits.
fn add_thousand_separators(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
