//! Helpers to convert analysis results into display strings for the egui renderer.

use crate::eda::{ColumnProfile, ColumnSummary, CorrelationMatrix};

/// Headers of the describe table.
pub const SUMMARY_HEADERS: [&str; 9] = [
    "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max",
];

/// Headers of the per-column profile table.
pub const PROFILE_HEADERS: [&str; 4] = ["column", "dtype", "missing", "distinct"];

/// Format a statistic with up to four significant decimals, `NaN` when undefined.
pub fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(value) if value.is_finite() => {
            let text = format!("{value:.4}");
            let text = text.trim_end_matches('0').trim_end_matches('.');
            if text == "-0" {
                "0".to_string()
            } else {
                text.to_string()
            }
        }
        _ => "NaN".to_string(),
    }
}

/// One row of the describe table.
pub fn summary_row(summary: &ColumnSummary) -> Vec<String> {
    vec![
        summary.name.clone(),
        summary.count.to_string(),
        format_stat(summary.mean),
        format_stat(summary.std),
        format_stat(summary.min),
        format_stat(summary.q1),
        format_stat(summary.median),
        format_stat(summary.q3),
        format_stat(summary.max),
    ]
}

pub fn profile_row(profile: &ColumnProfile) -> Vec<String> {
    vec![
        profile.name.clone(),
        profile.dtype.label().to_string(),
        profile.missing.to_string(),
        profile.distinct.to_string(),
    ]
}

/// Heatmap annotation; blank for undefined coefficients.
pub fn correlation_label(matrix: &CorrelationMatrix, row: usize, col: usize) -> String {
    matrix
        .get(row, col)
        .map(|value| format!("{value:.2}"))
        .unwrap_or_default()
}

/// Short axis tick label; small values keep at least two significant digits.
pub fn axis_label(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 10_000.0 {
        format!("{:.0}k", value / 1000.0)
    } else if magnitude >= 100.0 || value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        let decimals = (1 - magnitude.log10().floor() as i32).clamp(1, 8) as usize;
        let text = format!("{value:.decimals$}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
