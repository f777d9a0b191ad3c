/// Errors raised by the statistics engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    /// The sample has no values; callers should render a no-data state.
    #[error("sample is empty")]
    EmptySample,
    /// A bin count that is not a positive integer.
    #[error("invalid bin count `{0}`: expected a positive integer")]
    InvalidBinCount(String),
    /// A binning rule name that is neither a known rule nor an integer.
    #[error("unknown binning rule `{0}`: expected sqrt, sturges, scott or a positive integer")]
    UnknownBinningRule(String),
    /// The sample range does not fit in an `f64`, so no interval width exists.
    #[error("sample range [{min}, {max}] overflows")]
    RangeOverflow { min: f64, max: f64 },
    /// An interval table with zero rows reached the grouped metrics.
    #[error("interval table has no rows")]
    EmptyTable,
}
