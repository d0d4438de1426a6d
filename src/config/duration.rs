//! Serde helper for human-readable durations: "500ms", "10s", "1m30s", "2h".

use serde::{Deserialize, Deserializer};
use std::time::Duration;

pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_duration(&text).map_err(serde::de::Error::custom)
}

/// Parses one or more `<number><unit>` segments and sums them.
///
/// A bare number is seconds. An empty string is zero.
pub(crate) fn parse_duration(s: &str) -> Result<Duration, String> {
    let mut rest = s.trim();
    let mut total = Duration::ZERO;

    while !rest.is_empty() {
        let num_len = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(rest.len());
        if num_len == 0 {
            return Err(format!("expected a number in duration {:?}", s));
        }
        let (number, tail) = rest.split_at(num_len);
        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);

        let value: f64 = number
            .parse()
            .map_err(|_| format!("invalid duration number: {}", number))?;
        let seconds_per_unit = match unit.trim() {
            "ms" => 0.001,
            "s" | "" => 1.0,
            "m" => 60.0,
            "h" => 3600.0,
            other => return Err(format!("unknown duration unit: {}", other)),
        };

        let segment = Duration::try_from_secs_f64(value * seconds_per_unit)
            .map_err(|_| format!("duration out of range: {}", s))?;
        total = total
            .checked_add(segment)
            .ok_or_else(|| format!("duration out of range: {}", s))?;
        rest = tail.trim_start();
    }

    Ok(total)
}
