//! Discrete frequency tables: one class per distinct value.

use serde::Serialize;
use tracing::debug;

use crate::error::StatsError;
use crate::stats::Stats;

/// Decimal places kept for relative, percentage and cumulative-relative columns.
pub const FREQUENCY_PRECISION: i32 = 4;

/// One row of a discrete frequency table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyRow {
    /// The distinct value (x_i)
    pub value: f64,
    /// f_i
    pub absolute_frequency: usize,
    /// h_i = f_i / n
    pub relative_frequency: f64,
    /// p_i = h_i * 100
    pub percentage: f64,
    /// F_i
    pub cumulative_absolute: usize,
    /// H_i
    pub cumulative_relative: f64,
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Relative-frequency columns derived from a running count.
///
/// Cumulative relative frequency is accumulated unrounded and only rounded
/// on output, so the last row lands on 1.0.
pub(crate) struct FrequencyColumns {
    n: f64,
    cumulative_absolute: usize,
    cumulative_relative: f64,
}

impl FrequencyColumns {
    pub(crate) fn new(n: usize) -> Self {
        FrequencyColumns {
            n: n as f64,
            cumulative_absolute: 0,
            cumulative_relative: 0.0,
        }
    }

    /// Push one class count, returning `(h_i, p_i, F_i, H_i)`.
    pub(crate) fn push(&mut self, count: usize) -> (f64, f64, usize, f64) {
        let relative = count as f64 / self.n;
        self.cumulative_absolute += count;
        self.cumulative_relative += relative;

        (
            round_to(relative, FREQUENCY_PRECISION),
            round_to(relative * 100.0, FREQUENCY_PRECISION),
            self.cumulative_absolute,
            round_to(self.cumulative_relative, FREQUENCY_PRECISION),
        )
    }
}

/// Build the discrete frequency table of a sample.
///
/// Rows are sorted ascending by value, one per distinct value.
pub fn frequency_table(sample: &[f64]) -> Result<Vec<FrequencyRow>, StatsError> {
    let stats = Stats::new(sample.to_vec())?;
    Ok(frequency_table_from_stats(&stats))
}

/// Same as [`frequency_table`], reusing an already sorted sample.
pub fn frequency_table_from_stats(stats: &Stats) -> Vec<FrequencyRow> {
    let mut columns = FrequencyColumns::new(stats.n);
    let rows: Vec<FrequencyRow> = stats
        .runs()
        .into_iter()
        .map(|(value, count)| {
            let (relative, percentage, cumulative_absolute, cumulative_relative) =
                columns.push(count);
            FrequencyRow {
                value,
                absolute_frequency: count,
                relative_frequency: relative,
                percentage,
                cumulative_absolute,
                cumulative_relative,
            }
        })
        .collect();

    debug!(n = stats.n, classes = rows.len(), "built frequency table");
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.123456, 4), 0.1235);
        assert_eq!(round_to(1.0 / 3.0, 4), 0.3333);
        assert_eq!(round_to(2.0, 4), 2.0);
    }

    #[test]
    fn test_frequency_table_empty() {
        assert_eq!(frequency_table(&[]).unwrap_err(), StatsError::EmptySample);
    }

    #[test]
    fn test_frequency_table_columns() {
        let rows = frequency_table(&[2.0, 1.0, 2.0, 3.0, 2.0, 1.0]).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].value, 1.0);
        assert_eq!(rows[0].absolute_frequency, 2);
        assert_eq!(rows[0].relative_frequency, 0.3333);
        assert_eq!(rows[0].percentage, 33.3333);
        assert_eq!(rows[0].cumulative_absolute, 2);

        assert_eq!(rows[1].value, 2.0);
        assert_eq!(rows[1].absolute_frequency, 3);
        assert_eq!(rows[1].relative_frequency, 0.5);
        assert_eq!(rows[1].percentage, 50.0);
        assert_eq!(rows[1].cumulative_absolute, 5);
        assert_eq!(rows[1].cumulative_relative, 0.8333);

        assert_eq!(rows[2].cumulative_absolute, 6);
        assert_eq!(rows[2].cumulative_relative, 1.0);
    }

    #[test]
    fn test_frequency_table_totals() {
        let sample: Vec<f64> = (0..100).map(|i| ((i * 7) % 13) as f64).collect();
        let rows = frequency_table(&sample).unwrap();

        let total: usize = rows.iter().map(|r| r.absolute_frequency).sum();
        assert_eq!(total, 100);
        assert_eq!(rows.last().unwrap().cumulative_absolute, 100);
        assert!((rows.last().unwrap().cumulative_relative - 1.0).abs() < 1e-4);
        assert!(rows.windows(2).all(|w| w[0].value < w[1].value));
        assert!(rows.iter().all(|r| r.absolute_frequency >= 1));
    }

    #[test]
    fn test_frequency_table_single_value() {
        let rows = frequency_table(&[4.5, 4.5, 4.5]).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].absolute_frequency, 3);
        assert_eq!(rows[0].relative_frequency, 1.0);
        assert_eq!(rows[0].percentage, 100.0);
        assert_eq!(rows[0].cumulative_relative, 1.0);
    }
}
