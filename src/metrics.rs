//! Descriptive metrics for raw samples and grouped interval tables.
//!
//! Both paths produce the same [`Metrics`] shape. The discrete path works
//! on the raw values; the grouped path only sees interval bounds and
//! frequencies and so relies on interpolation within intervals.

use serde::Serialize;
use tracing::debug;

use crate::binning::IntervalRow;
use crate::error::StatsError;
use crate::stats::Stats;

/// Summary metrics of one sample.
///
/// Serializes with the fixed key set
/// `n, minimo, maximo, Q1, Q3, media, mediana, moda, varianza, desviacion,
/// coef_variacion, rango, rango_intercuartilico`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub n: usize,
    #[serde(rename = "minimo")]
    pub min: f64,
    #[serde(rename = "maximo")]
    pub max: f64,
    #[serde(rename = "Q1")]
    pub q1: f64,
    #[serde(rename = "Q3")]
    pub q3: f64,
    #[serde(rename = "media")]
    pub mean: f64,
    #[serde(rename = "mediana")]
    pub median: f64,
    /// Every value tied for the highest frequency, ascending.
    #[serde(rename = "moda")]
    pub mode: Vec<f64>,
    /// Sample variance (n - 1 denominator)
    #[serde(rename = "varianza")]
    pub variance: f64,
    #[serde(rename = "desviacion")]
    pub std_dev: f64,
    /// Coefficient of variation in percent, 0 when the mean is 0
    #[serde(rename = "coef_variacion")]
    pub coef_variation: f64,
    #[serde(rename = "rango")]
    pub range: f64,
    #[serde(rename = "rango_intercuartilico")]
    pub iqr: f64,
}

/// Metric keys in serialization order.
pub const METRIC_KEYS: [&str; 13] = [
    "n",
    "minimo",
    "maximo",
    "Q1",
    "Q3",
    "media",
    "mediana",
    "moda",
    "varianza",
    "desviacion",
    "coef_variacion",
    "rango",
    "rango_intercuartilico",
];

fn coefficient_of_variation(std_dev: f64, mean: f64) -> f64 {
    if mean == 0.0 {
        0.0
    } else {
        std_dev / mean * 100.0
    }
}

/// Metrics computed directly from raw values.
pub fn discrete_metrics(sample: &[f64]) -> Result<Metrics, StatsError> {
    let stats = Stats::new(sample.to_vec())?;
    Ok(discrete_metrics_from_stats(&stats))
}

/// Same as [`discrete_metrics`], reusing an already sorted sample.
pub fn discrete_metrics_from_stats(stats: &Stats) -> Metrics {
    let runs = stats.runs();
    let top = runs.iter().map(|&(_, count)| count).max().unwrap_or(0);
    let mode = runs
        .iter()
        .filter(|&&(_, count)| count == top)
        .map(|&(value, _)| value)
        .collect();

    let q1 = stats.quantile(0.25);
    let q3 = stats.quantile(0.75);

    Metrics {
        n: stats.n,
        min: stats.min(),
        max: stats.max(),
        q1,
        q3,
        mean: stats.mean,
        median: stats.quantile(0.5),
        mode,
        variance: stats.variance,
        std_dev: stats.std_dev,
        coef_variation: coefficient_of_variation(stats.std_dev, stats.mean),
        range: stats.max() - stats.min(),
        iqr: q3 - q1,
    }
}

/// Interpolated quantile over grouped data.
///
/// Finds the first interval whose cumulative frequency reaches `n * p` and
/// interpolates linearly inside it.
pub fn grouped_quantile(rows: &[IntervalRow], p: f64) -> Result<f64, StatsError> {
    let last = rows.last().ok_or(StatsError::EmptyTable)?;
    let target = last.cumulative_absolute as f64 * p;

    let mut previous = 0;
    for row in rows {
        if row.cumulative_absolute as f64 >= target {
            if row.absolute_frequency == 0 {
                return Ok(row.lower_bound);
            }
            let offset = (target - previous as f64) / row.absolute_frequency as f64;
            return Ok(row.lower_bound + offset * row.amplitude());
        }
        previous = row.cumulative_absolute;
    }
    Ok(last.upper_bound)
}

/// Interpolated mode of the modal interval (first one on ties).
///
/// Falls back to the modal class mark on a flat table, either because both
/// neighbours match the modal frequency or because every interval does.
pub fn grouped_mode(rows: &[IntervalRow]) -> Result<f64, StatsError> {
    let top = rows
        .iter()
        .map(|r| r.absolute_frequency)
        .max()
        .ok_or(StatsError::EmptyTable)?;
    let index = rows
        .iter()
        .position(|r| r.absolute_frequency == top)
        .ok_or(StatsError::EmptyTable)?;
    let modal = &rows[index];

    let before = index.checked_sub(1).map_or(0, |i| rows[i].absolute_frequency);
    let after = rows.get(index + 1).map_or(0, |r| r.absolute_frequency);
    let d1 = modal.absolute_frequency as f64 - before as f64;
    let d2 = modal.absolute_frequency as f64 - after as f64;

    let uniform = rows.iter().all(|r| r.absolute_frequency == top);
    if uniform || d1 + d2 == 0.0 {
        return Ok(modal.class_mark);
    }
    Ok(modal.lower_bound + d1 / (d1 + d2) * modal.amplitude())
}

/// Metrics computed from an interval table, using class marks as values.
pub fn grouped_metrics(rows: &[IntervalRow]) -> Result<Metrics, StatsError> {
    let (first, last) = match (rows.first(), rows.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(StatsError::EmptyTable),
    };

    let n: usize = rows.iter().map(|r| r.absolute_frequency).sum();
    if n == 0 {
        return Err(StatsError::EmptySample);
    }
    let total = n as f64;

    let mean = rows
        .iter()
        .map(|r| r.absolute_frequency as f64 * r.class_mark)
        .sum::<f64>()
        / total;
    let variance = if n > 1 {
        rows.iter()
            .map(|r| r.absolute_frequency as f64 * (r.class_mark - mean).powi(2))
            .sum::<f64>()
            / (total - 1.0)
    } else {
        0.0
    };
    let std_dev = variance.sqrt();

    let q1 = grouped_quantile(rows, 0.25)?;
    let median = grouped_quantile(rows, 0.5)?;
    let q3 = grouped_quantile(rows, 0.75)?;
    let mode = grouped_mode(rows)?;

    debug!(n, intervals = rows.len(), mean, median, "computed grouped metrics");

    Ok(Metrics {
        n,
        min: first.lower_bound,
        max: last.upper_bound,
        q1,
        q3,
        mean,
        median,
        mode: vec![mode],
        variance,
        std_dev,
        coef_variation: coefficient_of_variation(std_dev, mean),
        range: last.upper_bound - first.lower_bound,
        iqr: q3 - q1,
    })
}
