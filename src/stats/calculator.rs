//! Statistics Calculator Module
//! Descriptive statistics and correlation for numeric columns.

use crate::data::{AggregationError, DataProcessor};
use polars::prelude::DataFrame;
use rayon::prelude::*;
use serde::Serialize;
use statrs::statistics::{Data, OrderStatistics, Statistics};

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnStats {
    pub column: String,
    pub count: usize,
    pub missing: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub p05: f64,
    pub p95: f64,
}

impl ColumnStats {
    fn empty(column: &str, missing: usize) -> Self {
        Self {
            column: column.to_string(),
            count: 0,
            missing,
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            p05: f64::NAN,
            p95: f64::NAN,
        }
    }
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(column: &str, values: &[f64], missing: usize) -> ColumnStats {
        if values.is_empty() {
            return ColumnStats::empty(column, missing);
        }

        let mean = values.iter().mean();
        // Sample standard deviation; a single value has no spread.
        let std = if values.len() > 1 { values.iter().std_dev() } else { 0.0 };
        let min = Statistics::min(values.iter());
        let max = Statistics::max(values.iter());

        let mut data = Data::new(values.to_vec());
        let median = data.median();
        let p05 = data.quantile(0.05);
        let p95 = data.quantile(0.95);

        ColumnStats {
            column: column.to_string(),
            count: values.len(),
            missing,
            mean,
            median,
            std,
            min,
            max,
            p05,
            p95,
        }
    }

    /// Describe a column of `df`, coercing it to numbers first.
    pub fn describe(df: &DataFrame, column: &str) -> Result<ColumnStats, AggregationError> {
        let cells = DataProcessor::numeric_values(df, column)?;
        let missing = cells.iter().filter(|v| v.is_none()).count();
        let values: Vec<f64> = cells.into_iter().flatten().collect();
        Ok(Self::compute_descriptive_stats(column, &values, missing))
    }

    /// Describe several columns in parallel.
    pub fn describe_all_parallel<S: AsRef<str> + Sync>(
        df: &DataFrame,
        columns: &[S],
    ) -> Result<Vec<ColumnStats>, AggregationError> {
        columns
            .par_iter()
            .map(|column| Self::describe(df, column.as_ref()))
            .collect()
    }

    /// Pearson correlation over rows where both columns are present.
    ///
    /// `None` when fewer than two complete rows exist or either side is constant.
    pub fn correlation(
        df: &DataFrame,
        x: &str,
        y: &str,
    ) -> Result<Option<f64>, AggregationError> {
        let xs = DataProcessor::numeric_values(df, x)?;
        let ys = DataProcessor::numeric_values(df, y)?;
        let (xs, ys): (Vec<f64>, Vec<f64>) = xs
            .into_iter()
            .zip(ys)
            .filter_map(|(a, b)| Some((a?, b?)))
            .unzip();

        if xs.len() < 2 {
            return Ok(None);
        }

        let sx = xs.iter().std_dev();
        let sy = ys.iter().std_dev();
        if sx == 0.0 || sy == 0.0 {
            return Ok(None);
        }

        let cov = xs.iter().covariance(ys.iter());
        Ok(Some(cov / (sx * sy)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn describes_with_missing_cells() {
        let df = df!("x" => [Some(1.0), Some(2.0), None, Some(3.0), Some(4.0)]).unwrap();
        let stats = StatsCalculator::describe(&df, "x").unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.missing, 1);
        assert!((stats.mean - 2.5).abs() < 1e-12);
        assert!((stats.median - 2.5).abs() < 1e-12);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
    }

    #[test]
    fn empty_column_is_nan() {
        let df = df!("x" => [None::<f64>, None]).unwrap();
        let stats = StatsCalculator::describe(&df, "x").unwrap();
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_nan());
    }

    #[test]
    fn perfectly_linear_columns_correlate() {
        let df = df!(
            "x" => [1.0, 2.0, 3.0, 4.0],
            "y" => [2.0, 4.0, 6.0, 8.0],
            "z" => [8.0, 6.0, 4.0, 2.0]
        )
        .unwrap();
        let r = StatsCalculator::correlation(&df, "x", "y").unwrap().unwrap();
        assert!((r - 1.0).abs() < 1e-9);
        let r = StatsCalculator::correlation(&df, "x", "z").unwrap().unwrap();
        assert!((r + 1.0).abs() < 1e-9);
    }

    #[test]
    fn parallel_describe_keeps_column_order() {
        let df = df!("a" => [1.0, 2.0], "b" => [3.0, 5.0]).unwrap();
        let stats = StatsCalculator::describe_all_parallel(&df, &["a", "b"]).unwrap();
        assert_eq!(stats[0].column, "a");
        assert_eq!(stats[1].max, 5.0);
    }
}
