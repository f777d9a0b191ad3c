//! End-to-end pipeline: sample -> table -> metrics -> outliers.

use serde::Serialize;
use tracing::info;

use crate::binning::{BinningRule, IntervalRow, interval_table_from_stats};
use crate::error::StatsError;
use crate::frequency::{FrequencyRow, frequency_table_from_stats};
use crate::metrics::{Metrics, discrete_metrics_from_stats, grouped_metrics};
use crate::outliers::{OutlierReport, detect_outliers};
use crate::stats::Stats;

/// How the sample is classified before summarizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "rule", rename_all = "snake_case")]
pub enum AnalysisMode {
    /// Every distinct value is its own class
    Discrete,
    /// Values are grouped into intervals chosen by the rule
    Grouped(BinningRule),
}

/// Frequency table of either mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum FrequencyTable {
    Discrete(Vec<FrequencyRow>),
    Grouped(Vec<IntervalRow>),
}

impl FrequencyTable {
    pub fn len(&self) -> usize {
        match self {
            FrequencyTable::Discrete(rows) => rows.len(),
            FrequencyTable::Grouped(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Class value (or class mark) with its absolute frequency, per row.
    pub fn classes(&self) -> Vec<(f64, usize)> {
        match self {
            FrequencyTable::Discrete(rows) => rows
                .iter()
                .map(|r| (r.value, r.absolute_frequency))
                .collect(),
            FrequencyTable::Grouped(rows) => rows
                .iter()
                .map(|r| (r.class_mark, r.absolute_frequency))
                .collect(),
        }
    }
}

/// Everything the presentation layer needs for one sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub mode: AnalysisMode,
    pub table: FrequencyTable,
    pub metrics: Metrics,
    pub outliers: OutlierReport,
}

/// Run the full pipeline over `sample`.
///
/// An empty sample yields [`StatsError::EmptySample`] and no partial result.
pub fn analyze(sample: &[f64], mode: AnalysisMode) -> Result<Analysis, StatsError> {
    let stats = Stats::new(sample.to_vec())?;

    let analysis = match mode {
        AnalysisMode::Discrete => {
            let rows = frequency_table_from_stats(&stats);
            let metrics = discrete_metrics_from_stats(&stats);
            let outliers = detect_outliers(&metrics, &stats.data);
            Analysis {
                mode,
                table: FrequencyTable::Discrete(rows),
                metrics,
                outliers,
            }
        }
        AnalysisMode::Grouped(rule) => {
            let rows = interval_table_from_stats(&stats, rule)?;
            let metrics = grouped_metrics(&rows)?;
            // Empty intervals hold no observations to flag.
            let marks: Vec<f64> = rows
                .iter()
                .filter(|r| r.absolute_frequency > 0)
                .map(|r| r.class_mark)
                .collect();
            let outliers = detect_outliers(&metrics, &marks);
            Analysis {
                mode,
                table: FrequencyTable::Grouped(rows),
                metrics,
                outliers,
            }
        }
    };

    info!(
        n = analysis.metrics.n,
        classes = analysis.table.len(),
        outliers = analysis.outliers.values.len(),
        "analysis complete"
    );
    Ok(analysis)
}
