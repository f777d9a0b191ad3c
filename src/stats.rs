use crate::error::StatsError;

/// Pre-computed moments over a sorted, non-empty sample.
/// Data is kept sorted to enable quantile lookups & run-length grouping.
#[derive(Debug, Clone)]
pub struct Stats {
    pub data: Vec<f64>,
    pub n: usize,
    pub sum: f64,
    pub mean: f64,
    /// Sample variance (divides by n - 1), 0 when n <= 1
    pub variance: f64,
    pub std_dev: f64,
}

impl Stats {
    pub fn new(mut data: Vec<f64>) -> Result<Self, StatsError> {
        if data.is_empty() {
            return Err(StatsError::EmptySample);
        }
        data.sort_by(f64::total_cmp);

        let n = data.len();
        let sum: f64 = data.iter().sum();
        let mean = sum / n as f64;

        let variance = if n > 1 {
            data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();

        Ok(Stats {
            data,
            n,
            sum,
            mean,
            variance,
            std_dev,
        })
    }

    pub fn min(&self) -> f64 {
        self.data[0]
    }

    pub fn max(&self) -> f64 {
        self.data[self.n - 1]
    }

    /// Calculate quantile (0.0 = min, 0.5 = median, 1.0 = max)
    pub fn quantile(&self, q: f64) -> f64 {
        if q <= 0.0 {
            return self.min();
        }
        if q >= 1.0 {
            return self.max();
        }

        // Linear interpolation between closest ranks
        let rank = q * (self.n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = rank.ceil() as usize;
        let fraction = rank - lower as f64;

        self.data[lower] * (1.0 - fraction) + self.data[upper] * fraction
    }

    /// Distinct values paired with their occurrence counts, ascending.
    pub fn runs(&self) -> Vec<(f64, usize)> {
        self.data
            .chunk_by(|a, b| a == b)
            .map(|run| (run[0], run.len()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_basic() {
        let stats = Stats::new(vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();

        assert_eq!(stats.n, 5);
        assert_eq!(stats.sum, 15.0);
        assert_eq!(stats.mean, 3.0);
    }

    #[test]
    fn test_stats_sorted() {
        let stats = Stats::new(vec![5.0, 2.0, 4.0, 1.0, 3.0]).unwrap();

        assert_eq!(stats.data, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(stats.min(), 1.0);
        assert_eq!(stats.max(), 5.0);
    }

    #[test]
    fn test_stats_empty() {
        assert_eq!(Stats::new(vec![]).unwrap_err(), StatsError::EmptySample);
    }

    #[test]
    fn test_stats_sample_variance() {
        let stats = Stats::new(vec![2.0, 4.0, 6.0, 8.0, 10.0]).unwrap();

        // Sum of squared deviations = 16 + 4 + 0 + 4 + 16 = 40, divided by n - 1 = 4
        assert_eq!(stats.mean, 6.0);
        assert_eq!(stats.variance, 10.0);
        assert!((stats.std_dev - 10.0_f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_stats_single_value_variance() {
        let stats = Stats::new(vec![7.0]).unwrap();
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_quantile_bounds() {
        let stats = Stats::new(vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();

        assert_eq!(stats.quantile(0.0), 1.0);
        assert_eq!(stats.quantile(1.0), 5.0);
        assert_eq!(stats.quantile(-0.5), 1.0);
        assert_eq!(stats.quantile(1.5), 5.0);
    }

    #[test]
    fn test_quantile_interpolation() {
        let stats = Stats::new(vec![1.0, 2.0, 3.0, 4.0]).unwrap();

        // rank = 0.25 * 3 = 0.75 -> 1.0 * 0.25 + 2.0 * 0.75
        assert!((stats.quantile(0.25) - 1.75).abs() < 1e-10);
        assert_eq!(stats.quantile(0.5), 2.5);
        assert!((stats.quantile(0.75) - 3.25).abs() < 1e-10);
    }

    #[test]
    fn test_quantile_single_value() {
        let stats = Stats::new(vec![42.0]).unwrap();

        assert_eq!(stats.quantile(0.25), 42.0);
        assert_eq!(stats.quantile(0.5), 42.0);
    }

    #[test]
    fn test_runs_groups_duplicates() {
        let stats = Stats::new(vec![3.0, 1.0, 2.0, 1.0, 2.0, 2.0]).unwrap();

        assert_eq!(stats.runs(), vec![(1.0, 2), (2.0, 3), (3.0, 1)]);
    }
}
