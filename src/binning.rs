//! Equal-width interval binning for grouped analysis.
//!
//! The sample range `[min, max]` is split into `k` contiguous half-open
//! intervals `[L_i, L_s)`. The last interval is closed at the top so the
//! sample maximum always lands in it. Every boundary is computed as
//! `min + i * amplitude` rather than by repeated addition, so neighbouring
//! intervals share exactly the same boundary value.
//!
//! # Examples
//!
//! ```
//! use statboard::binning::{interval_table, BinningRule};
//!
//! let sample = [10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 24.0, 26.0, 28.0];
//! let rows = interval_table(&sample, BinningRule::Explicit(3)).unwrap();
//!
//! assert_eq!(rows.len(), 3);
//! assert_eq!(rows[0].lower_bound, 10.0);
//! assert_eq!(rows[0].upper_bound, 16.0);
//! assert_eq!(rows[2].cumulative_absolute, 10);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::error::StatsError;
use crate::frequency::FrequencyColumns;
use crate::stats::Stats;

/// Upper bound on the number of intervals any rule may produce.
pub const MAX_BINS: usize = 10_000;

/// Rule used to choose the number of intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinningRule {
    /// k = ceil(sqrt(n))
    SquareRoot,
    /// k = ceil(log2(n) + 1)
    Sturges,
    /// width = 3.49 * s * n^(-1/3), k = ceil(range / width)
    Scott,
    /// Caller-supplied k
    Explicit(usize),
}

impl BinningRule {
    /// Number of bins this rule selects for the given sample.
    ///
    /// Computed rules are clamped to [`MAX_BINS`]; an explicit count above it
    /// is rejected.
    pub fn bin_count(&self, stats: &Stats) -> Result<usize, StatsError> {
        let n = stats.n as f64;
        let k = match *self {
            BinningRule::SquareRoot => n.sqrt().ceil() as usize,
            BinningRule::Sturges => (n.log2() + 1.0).ceil() as usize,
            BinningRule::Scott => {
                let width = 3.49 * stats.std_dev * n.powf(-1.0 / 3.0);
                let range = stats.max() - stats.min();
                // Zero spread gives no usable width; one bin holds everything.
                if width > 0.0 && range > 0.0 {
                    (range / width).ceil() as usize
                } else {
                    1
                }
            }
            BinningRule::Explicit(k) => {
                if !(1..=MAX_BINS).contains(&k) {
                    return Err(StatsError::InvalidBinCount(k.to_string()));
                }
                k
            }
        };
        Ok(k.clamp(1, MAX_BINS))
    }
}

impl fmt::Display for BinningRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinningRule::SquareRoot => f.write_str("sqrt"),
            BinningRule::Sturges => f.write_str("sturges"),
            BinningRule::Scott => f.write_str("scott"),
            BinningRule::Explicit(k) => write!(f, "{k}"),
        }
    }
}

impl FromStr for BinningRule {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "sqrt" | "square-root" => return Ok(BinningRule::SquareRoot),
            "sturges" => return Ok(BinningRule::Sturges),
            "scott" => return Ok(BinningRule::Scott),
            _ => {}
        }

        if let Ok(k) = trimmed.parse::<usize>() {
            if !(1..=MAX_BINS).contains(&k) {
                return Err(StatsError::InvalidBinCount(trimmed.to_string()));
            }
            return Ok(BinningRule::Explicit(k));
        }

        // Numeric but not a positive integer (e.g. "2.5", "-3")
        if trimmed.parse::<f64>().is_ok() {
            return Err(StatsError::InvalidBinCount(trimmed.to_string()));
        }
        Err(StatsError::UnknownBinningRule(trimmed.to_string()))
    }
}

/// One interval of a grouped frequency table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalRow {
    /// L_i, inclusive
    pub lower_bound: f64,
    /// L_s, exclusive except for the last interval
    pub upper_bound: f64,
    /// Midpoint of the interval
    pub class_mark: f64,
    pub absolute_frequency: usize,
    pub relative_frequency: f64,
    pub percentage: f64,
    pub cumulative_absolute: usize,
    pub cumulative_relative: f64,
}

impl IntervalRow {
    pub fn amplitude(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }
}

/// Bin a sample into intervals chosen by `rule`.
pub fn interval_table(sample: &[f64], rule: BinningRule) -> Result<Vec<IntervalRow>, StatsError> {
    let stats = Stats::new(sample.to_vec())?;
    interval_table_from_stats(&stats, rule)
}

/// Same as [`interval_table`], reusing an already sorted sample.
pub fn interval_table_from_stats(
    stats: &Stats,
    rule: BinningRule,
) -> Result<Vec<IntervalRow>, StatsError> {
    let k = rule.bin_count(stats)?;
    let min = stats.min();
    let max = stats.max();

    // A constant sample has no range; fall back to unit-width intervals.
    let amplitude = if max > min { (max - min) / k as f64 } else { 1.0 };
    if !amplitude.is_finite() {
        return Err(StatsError::RangeOverflow { min, max });
    }
    debug!(%rule, k, min, max, amplitude, "binning sample");

    let boundary = |i: usize| min + i as f64 * amplitude;

    let mut columns = FrequencyColumns::new(stats.n);
    let mut consumed = 0;
    let mut rows = Vec::new();

    for i in 0..k {
        let lower_bound = boundary(i);
        let last = i + 1 == k;
        let upper_bound = if last {
            boundary(k).max(max)
        } else {
            boundary(i + 1)
        };

        // Data is sorted, so each interval is a contiguous run.
        let end = if last {
            stats.n
        } else {
            stats.data.partition_point(|&x| x < upper_bound)
        };
        let count = end - consumed;
        consumed = end;

        let (relative, percentage, cumulative_absolute, cumulative_relative) = columns.push(count);
        rows.push(IntervalRow {
            lower_bound,
            upper_bound,
            class_mark: (lower_bound + upper_bound) / 2.0,
            absolute_frequency: count,
            relative_frequency: relative,
            percentage,
            cumulative_absolute,
            cumulative_relative,
        });
    }

    Ok(rows)
}
