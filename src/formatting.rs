use std::fmt::Write;

use crate::analysis::{Analysis, FrequencyTable};
use crate::binning::IntervalRow;
use crate::frequency::FrequencyRow;
use crate::metrics::Metrics;
use crate::outliers::OutlierReport;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned text tables
    #[value(name = "table")]
    Table,
    /// Pretty-printed JSON of the whole analysis
    #[value(name = "json")]
    Json,
}

/// Fixed-point number formatting with a configurable number of decimals
#[derive(Clone, Copy, Debug)]
pub struct Format {
    pub precision: usize,
}

impl Default for Format {
    fn default() -> Self {
        Format { precision: 2 }
    }
}

impl Format {
    pub fn format(&self, value: f64) -> String {
        format!("{:.*}", self.precision, value)
    }

    /// Integers print without decimals, everything else at `precision`
    pub fn format_value(&self, value: f64) -> String {
        if value.fract() == 0.0 && value.abs() < 1e15 {
            format!("{}", value as i64)
        } else {
            self.format(value)
        }
    }

    pub fn format_list(&self, values: &[f64]) -> String {
        values
            .iter()
            .map(|&v| self.format_value(v))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Right-align every column to its widest cell
fn render_columns(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut push_line = |cells: Vec<&str>| {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:>w$}", cell, w = w))
            .collect();
        let _ = writeln!(out, "{}", line.join("  "));
    };

    push_line(header.to_vec());
    for row in rows {
        push_line(row.iter().map(String::as_str).collect());
    }
    out
}

pub fn render_frequency_table(rows: &[FrequencyRow], format: Format) -> String {
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                format.format_value(r.value),
                r.absolute_frequency.to_string(),
                format.format(r.relative_frequency),
                format!("{}%", format.format(r.percentage)),
                r.cumulative_absolute.to_string(),
                format.format(r.cumulative_relative),
            ]
        })
        .collect();
    render_columns(&["x_i", "f_i", "h_i", "p_i", "F_i", "H_i"], &body)
}

pub fn render_interval_table(rows: &[IntervalRow], format: Format) -> String {
    let last = rows.len().saturating_sub(1);
    let body: Vec<Vec<String>> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let close = if i == last { ']' } else { ')' };
            vec![
                format!(
                    "[{}, {}{}",
                    format.format(r.lower_bound),
                    format.format(r.upper_bound),
                    close
                ),
                format.format(r.class_mark),
                r.absolute_frequency.to_string(),
                format.format(r.relative_frequency),
                format!("{}%", format.format(r.percentage)),
                r.cumulative_absolute.to_string(),
                format.format(r.cumulative_relative),
            ]
        })
        .collect();
    render_columns(&["[L_i, L_s)", "mc", "f_i", "h_i", "p_i", "F_i", "H_i"], &body)
}

/// Two-column summary: central tendency on the left, spread on the right
pub fn render_metrics(metrics: &Metrics, format: Format) -> String {
    let left_items = [
        ("n", metrics.n.to_string()),
        ("mean", format.format(metrics.mean)),
        ("median", format.format(metrics.median)),
        ("mode", format.format_list(&metrics.mode)),
        ("std dev", format.format(metrics.std_dev)),
        ("variance", format.format(metrics.variance)),
        ("cv", format!("{}%", format.format(metrics.coef_variation))),
    ];

    let right_items = [
        ("min", format.format(metrics.min)),
        ("Q1", format.format(metrics.q1)),
        ("Q3", format.format(metrics.q3)),
        ("max", format.format(metrics.max)),
        ("range", format.format(metrics.range)),
        ("IQR", format.format(metrics.iqr)),
    ];

    let max_rows = left_items.len().max(right_items.len());
    let mut out = String::new();

    for i in 0..max_rows {
        if let Some((label, value)) = left_items.get(i) {
            let _ = write!(out, "{:>8}  {:<20}", label, value);
        } else {
            let _ = write!(out, "{:30}", "");
        }

        if let Some((label, value)) = right_items.get(i) {
            let _ = writeln!(out, "{:>8}  {}", label, value);
        } else {
            let _ = writeln!(out);
        }
    }
    // Trailing padding from the left column is noise
    out.lines()
        .map(str::trim_end)
        .fold(String::new(), |mut acc, line| {
            acc.push_str(line);
            acc.push('\n');
            acc
        })
}

pub fn render_outliers(report: &OutlierReport, format: Format) -> String {
    let values = if report.is_empty() {
        "none".to_string()
    } else {
        format.format_list(&report.values)
    };
    format!(
        "outliers outside [{}, {}]: {}\n",
        format.format(report.lower_fence),
        format.format(report.upper_fence),
        values
    )
}

/// Full text report of an analysis
pub fn render_analysis(analysis: &Analysis, format: Format) -> String {
    let table = match &analysis.table {
        FrequencyTable::Discrete(rows) => render_frequency_table(rows, format),
        FrequencyTable::Grouped(rows) => render_interval_table(rows, format),
    };
    format!(
        "{}\n{}\n{}",
        table,
        render_metrics(&analysis.metrics, format),
        render_outliers(&analysis.outliers, format)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisMode, analyze};
    use crate::binning::BinningRule;
    use crate::frequency::frequency_table;
    use crate::metrics::discrete_metrics;
    use crate::outliers::detect_outliers;

    #[test]
    fn test_format_float() {
        let format = Format::default();
        assert_eq!(format.format(42.567), "42.57");
        assert_eq!(format.format(0.123), "0.12");
        assert_eq!(Format { precision: 4 }.format(1.0 / 3.0), "0.3333");
    }

    #[test]
    fn test_format_value() {
        let format = Format::default();
        assert_eq!(format.format_value(13.0), "13");
        assert_eq!(format.format_value(-2.0), "-2");
        assert_eq!(format.format_value(2.5), "2.50");
    }

    #[test]
    fn test_format_list() {
        assert_eq!(Format::default().format_list(&[13.0, 14.5]), "13, 14.50");
    }

    #[test]
    fn test_render_frequency_table() {
        let rows = frequency_table(&[1.0, 1.0, 2.0, 3.0]).unwrap();
        let text = render_frequency_table(&rows, Format::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("x_i"));
        assert!(lines[1].contains("50.00%"));
        assert!(lines[3].trim_end().ends_with("1.00"));
        // All lines share the same width
        assert!(lines.iter().all(|l| l.len() == lines[0].len()));
    }

    #[test]
    fn test_render_interval_table_closes_last_interval() {
        let analysis = analyze(
            &[10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 24.0, 26.0, 28.0],
            AnalysisMode::Grouped(BinningRule::Explicit(3)),
        )
        .unwrap();
        let FrequencyTable::Grouped(rows) = &analysis.table else {
            panic!("expected grouped table");
        };
        let text = render_interval_table(rows, Format::default());

        assert!(text.contains("[10.00, 16.00)"));
        assert!(text.contains("[22.00, 28.00]"));
    }

    #[test]
    fn test_render_metrics_two_columns() {
        let metrics = discrete_metrics(&[1.0, 1.0, 2.0, 2.0, 2.0, 3.0]).unwrap();
        let text = render_metrics(&metrics, Format::default());

        assert!(text.lines().next().unwrap().contains("n  6"));
        assert!(text.contains("mean  1.83"));
        assert!(text.contains("mode  2"));
        assert!(text.contains("range  2.00"));
        assert!(text.lines().all(|l| l == l.trim_end()));
    }

    #[test]
    fn test_render_outliers() {
        let sample = [10.0, 12.0, 11.0, 13.0, 12.0, 11.0, 90.0];
        let metrics = discrete_metrics(&sample).unwrap();
        let report = detect_outliers(&metrics, &sample);

        assert_eq!(
            render_outliers(&report, Format::default()),
            "outliers outside [8.75, 14.75]: 90\n"
        );
    }

    #[test]
    fn test_render_no_outliers() {
        let sample = [1.0, 2.0, 3.0];
        let metrics = discrete_metrics(&sample).unwrap();
        let report = detect_outliers(&metrics, &sample);

        assert!(render_outliers(&report, Format::default()).ends_with("none\n"));
    }
}
