//! Frequency tables and descriptive statistics for one-dimensional samples.
//!
//! Two analysis modes are supported:
//!
//! - **Discrete**: every distinct value is its own class
//!   ([`frequency::frequency_table`], [`metrics::discrete_metrics`])
//! - **Grouped**: values are binned into contiguous intervals
//!   ([`binning::interval_table`], [`metrics::grouped_metrics`])
//!
//! Either path ends in Tukey-fence outlier detection
//! ([`outliers::detect_outliers`]). [`analysis::analyze`] runs the whole
//! pipeline and returns a serializable [`analysis::Analysis`].
//!
//! ```
//! use statboard::analysis::{analyze, AnalysisMode};
//!
//! let analysis = analyze(&[1.0, 1.0, 2.0, 2.0, 2.0, 3.0], AnalysisMode::Discrete).unwrap();
//! assert_eq!(analysis.metrics.n, 6);
//! assert_eq!(analysis.metrics.mode, vec![2.0]);
//! ```

pub mod analysis;
pub mod binning;
pub mod error;
pub mod formatting;
pub mod frequency;
pub mod metrics;
pub mod outliers;
pub mod parsing;
pub mod plot;
pub mod stats;

pub use analysis::{Analysis, AnalysisMode, FrequencyTable, analyze};
pub use binning::BinningRule;
pub use error::StatsError;
