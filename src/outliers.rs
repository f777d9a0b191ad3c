//! Outlier Detection
//!
//! Tukey fences: a value is atypical when it lies strictly outside
//! `[Q1 - 1.5 * IQR, Q3 + 1.5 * IQR]`. Flagged values are reported, never
//! removed from the metrics they were derived from.

use serde::Serialize;
use tracing::debug;

use crate::metrics::Metrics;

/// Fence multiplier applied to the interquartile range
pub const TUKEY_K: f64 = 1.5;

/// Values flagged outside the Tukey fences
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierReport {
    /// Q1 - 1.5 * IQR
    pub lower_fence: f64,
    /// Q3 + 1.5 * IQR
    pub upper_fence: f64,
    /// Ascending, without duplicates
    pub values: Vec<f64>,
}

impl OutlierReport {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether `value` falls strictly outside the fences
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower_fence || value > self.upper_fence
    }
}

/// Flag values outside the fences derived from `metrics`.
///
/// `values` is the raw sample in discrete mode or the class marks in
/// grouped mode.
///
/// # Examples
///
/// ```
/// use statboard::metrics::discrete_metrics;
/// use statboard::outliers::detect_outliers;
///
/// let sample = [10.0, 12.0, 11.0, 13.0, 12.0, 11.0, 90.0];
/// let metrics = discrete_metrics(&sample).unwrap();
/// let report = detect_outliers(&metrics, &sample);
/// assert_eq!(report.values, vec![90.0]);
/// ```
pub fn detect_outliers(metrics: &Metrics, values: &[f64]) -> OutlierReport {
    let lower_fence = metrics.q1 - TUKEY_K * metrics.iqr;
    let upper_fence = metrics.q3 + TUKEY_K * metrics.iqr;

    let mut report = OutlierReport {
        lower_fence,
        upper_fence,
        values: Vec::new(),
    };

    let mut flagged: Vec<f64> = values
        .iter()
        .copied()
        .filter(|&v| report.is_outlier(v))
        .collect();
    flagged.sort_by(f64::total_cmp);
    flagged.dedup();

    debug!(lower_fence, upper_fence, flagged = flagged.len(), "applied tukey fences");
    report.values = flagged;
    report
}
