//! Projection of the last seven days into comparable bar heights.

use crate::analytics::DayEntry;

/// Bars are scaled against at least this many minutes so a quiet week
/// does not draw full-height bars.
pub const CHART_FLOOR_MINUTES: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: String,
    pub minutes: u64,
    pub ratio: f64,
    pub is_today: bool,
}

pub fn scale_max(minutes: &[u64]) -> u64 {
    minutes
        .iter()
        .copied()
        .max()
        .unwrap_or(0)
        .max(CHART_FLOOR_MINUTES)
}

/// `days` is oldest first and ends today.
pub fn project(days: &[DayEntry]) -> Vec<ChartBar> {
    let minutes: Vec<u64> = days.iter().map(|d| d.record.minutes()).collect();
    let max = scale_max(&minutes) as f64;

    days.iter()
        .zip(&minutes)
        .enumerate()
        .map(|(i, (day, &m))| ChartBar {
            label: day.date.format("%a").to_string(),
            minutes: m,
            ratio: m as f64 / max,
            is_today: i + 1 == days.len(),
        })
        .collect()
}
