//! Summary tables: grouped (label, value) pairs ready for charting.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// One group of a [`SummaryTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub label: String,
    pub value: f64,
    /// Number of source rows that contributed to `value`.
    pub rows: usize,
}

/// Aggregated output, one row per distinct group label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    pub group_column: String,
    pub value_column: String,
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn new(group_column: impl Into<String>, value_column: impl Into<String>) -> Self {
        Self {
            group_column: group_column.into(),
            value_column: value_column.into(),
            rows: Vec::new(),
        }
    }

    /// Build from explicit pairs, e.g. totals computed outside the aggregator.
    pub fn from_pairs<I, L>(group_column: &str, value_column: &str, pairs: I) -> Self
    where
        I: IntoIterator<Item = (L, f64)>,
        L: Into<String>,
    {
        let rows = pairs
            .into_iter()
            .map(|(label, value)| SummaryRow {
                label: label.into(),
                value,
                rows: 1,
            })
            .collect();
        Self {
            group_column: group_column.to_string(),
            value_column: value_column.to_string(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.label.as_str()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.value).collect()
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.rows.iter().find(|r| r.label == label).map(|r| r.value)
    }

    pub fn total(&self) -> f64 {
        self.rows.iter().map(|r| r.value).sum()
    }

    /// Percentage of the total held by `label`; `None` when the label is
    /// absent or the total is zero.
    pub fn share(&self, label: &str) -> Option<f64> {
        let total = self.total();
        if total == 0.0 {
            return None;
        }
        self.get(label).map(|v| v / total * 100.0)
    }

    /// Two-column frame (`group_column`, `value_column`) in row order.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let labels: Vec<&str> = self.labels();
        DataFrame::new(vec![
            Column::new(self.group_column.as_str().into(), labels),
            Column::new(self.value_column.as_str().into(), self.values()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_and_totals() {
        let summary = SummaryTable::from_pairs("Sentiment", "Count", [("Positive", 30.0), ("Negative", 10.0)]);
        assert_eq!(summary.total(), 40.0);
        assert_eq!(summary.share("Positive"), Some(75.0));
        assert_eq!(summary.share("Neutral"), None);
        assert_eq!(summary.labels(), ["Positive", "Negative"]);
    }

    #[test]
    fn zero_total_has_no_share() {
        let summary = SummaryTable::from_pairs("Sentiment", "Count", [("Positive", 0.0)]);
        assert_eq!(summary.share("Positive"), None);
    }

    #[test]
    fn converts_to_dataframe() {
        let summary = SummaryTable::from_pairs("Category", "Value", [("Flu", 30.0), ("Diabetes", 70.0)]);
        let df = summary.to_dataframe().unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.get_column_names().len(), 2);
        assert_eq!(df.column("Value").unwrap().f64().unwrap().get(1), Some(70.0));
    }
}
