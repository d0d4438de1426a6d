//! Placeholder value history for charts.
//!
//! Used only when the service supplies no historical series. The output is
//! a visual approximation: it must never be treated as real history or fed
//! into any financial calculation.

use rand::Rng;

/// Number of points in a default series (one per hour of a day).
pub const DEFAULT_POINTS: usize = 24;

/// Maximum size of a single step, in currency units.
pub const AMPLITUDE: f64 = 10.0;

/// First point as a fraction of the current value.
const SEED_RATIO: f64 = 0.95;

/// Centre of the random step; below 0.5 so the walk drifts upward.
const DRIFT_CENTER: f64 = 0.45;

/// One labelled chart point.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    /// Synthetic hour-of-day tag, "00:00" to "23:00".
    pub label: String,
    pub value: f64,
}

/// Generates `points` values ending exactly at `current_value`.
///
/// The walk starts at 95% of the current value and moves by
/// `(draw - 0.45) * AMPLITUDE` per step, rounded to cents. The last point is
/// then replaced by `current_value` unchanged.
pub fn generate<R: Rng>(current_value: f64, points: usize, rng: &mut R) -> Vec<SeriesPoint> {
    let mut series = Vec::with_capacity(points);
    if points == 0 {
        return series;
    }

    let mut value = round_cents(current_value * SEED_RATIO);
    series.push(SeriesPoint {
        label: hour_label(0),
        value,
    });

    for i in 1..points {
        let draw: f64 = rng.gen_range(0.0..1.0);
        value = round_cents(value + (draw - DRIFT_CENTER) * AMPLITUDE);
        series.push(SeriesPoint {
            label: hour_label(i),
            value,
        });
    }

    if let Some(last) = series.last_mut() {
        last.value = current_value;
    }
    series
}

/// Generates a default-length series using the thread-local entropy source.
pub fn generate_default(current_value: f64) -> Vec<SeriesPoint> {
    generate(current_value, DEFAULT_POINTS, &mut rand::thread_rng())
}

fn hour_label(index: usize) -> String {
    format!("{:02}:00", index % 24)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
