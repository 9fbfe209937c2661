//! Data Processor Module
//! Row-level transformations (explode, bin, filter) applied before grouping.

use crate::data::aggregator::AggregationError;
use crate::data::bins::BinSpec;
use log::debug;
use polars::prelude::*;
use std::collections::BTreeSet;

/// Text form of a cell, or `None` when the cell is missing.
pub fn cell_text(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(s) => Some(s.to_string()),
        AnyValue::StringOwned(s) => Some(s.to_string()),
        AnyValue::Float64(v) if v.is_nan() => None,
        AnyValue::Float32(v) if v.is_nan() => None,
        other => Some(other.to_string().trim_matches('"').to_string()),
    }
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Handles data cleaning and row-expanding transformations.
pub struct DataProcessor;

impl DataProcessor {
    fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, AggregationError> {
        df.column(name)
            .map_err(|_| AggregationError::ColumnNotFound(name.to_string()))
    }

    /// Cell texts of a column, `None` for missing cells.
    pub fn text_values(df: &DataFrame, column: &str) -> Result<Vec<Option<String>>, AggregationError> {
        let series = Self::column(df, column)?;
        (0..series.len())
            .map(|i| -> Result<Option<String>, AggregationError> { Ok(cell_text(series.get(i)?)) })
            .collect()
    }

    /// Numeric view of a column. Unparseable cells and `NaN` are `None`.
    pub fn numeric_values(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>, AggregationError> {
        let series = Self::column(df, column)?;
        let as_f64 = series.cast(&DataType::Float64)?;
        let values = as_f64
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();
        Ok(values)
    }

    /// Distinct non-missing values of a column, sorted.
    pub fn unique_values(df: &DataFrame, column: &str) -> Result<Vec<String>, AggregationError> {
        let unique: BTreeSet<String> = Self::text_values(df, column)?.into_iter().flatten().collect();
        Ok(unique.into_iter().collect())
    }

    /// Names of columns with a numeric dtype.
    pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
        df.get_columns()
            .iter()
            .filter(|col| is_numeric(col.dtype()))
            .map(|col| col.name().to_string())
            .collect()
    }

    /// Names of text columns, the candidates for categorical grouping.
    pub fn text_columns(df: &DataFrame) -> Vec<String> {
        df.get_columns()
            .iter()
            .filter(|col| matches!(col.dtype(), DataType::String | DataType::Categorical(_, _)))
            .map(|col| col.name().to_string())
            .collect()
    }

    fn take_rows(df: &DataFrame, rows: Vec<IdxSize>) -> Result<DataFrame, AggregationError> {
        let idx = IdxCa::from_vec("idx".into(), rows);
        Ok(df.take(&idx)?)
    }

    /// Rows whose `column` text equals `value`.
    pub fn filter_eq(df: &DataFrame, column: &str, value: &str) -> Result<DataFrame, AggregationError> {
        let rows = Self::text_values(df, column)?
            .iter()
            .enumerate()
            .filter(|(_, v)| v.as_deref() == Some(value))
            .map(|(i, _)| i as IdxSize)
            .collect();
        Self::take_rows(df, rows)
    }

    /// Drop rows where any of `columns` is missing (numeric columns also
    /// treat `NaN` as missing).
    pub fn drop_missing<S: AsRef<str>>(df: &DataFrame, columns: &[S]) -> Result<DataFrame, AggregationError> {
        let mut keep = vec![true; df.height()];
        for name in columns {
            let name = name.as_ref();
            let present: Vec<bool> = if is_numeric(Self::column(df, name)?.dtype()) {
                Self::numeric_values(df, name)?.iter().map(Option::is_some).collect()
            } else {
                Self::text_values(df, name)?.iter().map(Option::is_some).collect()
            };
            for (k, p) in keep.iter_mut().zip(present) {
                *k &= p;
            }
        }

        let rows = keep
            .iter()
            .enumerate()
            .filter(|(_, k)| **k)
            .map(|(i, _)| i as IdxSize)
            .collect();
        Self::take_rows(df, rows)
    }

    /// Split a delimited text column into one row per item.
    ///
    /// Items are trimmed and empty items are discarded; a missing cell yields
    /// no rows. Every other column is copied from the source row.
    pub fn explode(df: &DataFrame, column: &str, delimiter: char) -> Result<DataFrame, AggregationError> {
        let mut rows: Vec<IdxSize> = Vec::new();
        let mut items: Vec<String> = Vec::new();

        for (i, cell) in Self::text_values(df, column)?.into_iter().enumerate() {
            let Some(text) = cell else {
                continue;
            };
            for piece in text.split(delimiter).map(str::trim).filter(|p| !p.is_empty()) {
                rows.push(i as IdxSize);
                items.push(piece.to_string());
            }
        }

        debug!(
            "Exploded '{column}' from {} to {} rows",
            df.height(),
            rows.len()
        );

        let mut out = Self::take_rows(df, rows)?;
        out.with_column(Column::new(column.into(), items))?;
        Ok(out)
    }

    /// Add a text column `target` holding the bucket label of each `source` value.
    ///
    /// Missing and out-of-range values get the unclassified label of `spec`.
    pub fn bin(df: &DataFrame, source: &str, target: &str, spec: &BinSpec) -> Result<DataFrame, AggregationError> {
        let labels: Vec<String> = Self::numeric_values(df, source)?
            .into_iter()
            .map(|v| spec.label_for(v).to_string())
            .collect();

        let mut out = df.clone();
        out.with_column(Column::new(target.into(), labels))?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explode_trims_and_counts_items() {
        let df = df!(
            "Name" => ["a", "b", "c"],
            "Types" => [Some("A, B, B"), None, Some("C,,  ,")]
        )
        .unwrap();

        let out = DataProcessor::explode(&df, "Types", ',').unwrap();
        assert_eq!(out.height(), 4);
        let types = DataProcessor::text_values(&out, "Types").unwrap();
        assert_eq!(
            types,
            vec![
                Some("A".to_string()),
                Some("B".to_string()),
                Some("B".to_string()),
                Some("C".to_string())
            ]
        );
        let names = DataProcessor::text_values(&out, "Name").unwrap();
        assert_eq!(names[3].as_deref(), Some("c"));
    }

    #[test]
    fn bin_surfaces_unclassified_values() {
        let df = df!("rate" => [Some(2.9), Some(3.0), Some(4.999), None]).unwrap();
        let out = DataProcessor::bin(&df, "rate", "group", &BinSpec::hospital_rating()).unwrap();
        let groups: Vec<String> = DataProcessor::text_values(&out, "group")
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(groups, ["Below 3.0", "3.0 - 3.9", "4.0 - 5.0", "unclassified"]);
        assert_eq!(df.width(), 1);
    }

    #[test]
    fn filter_and_drop_missing() {
        let df = df!(
            "State" => [Some("Dubai"), Some("Sharjah"), Some("Dubai"), None],
            "x" => [Some(1.0), Some(2.0), None, Some(4.0)]
        )
        .unwrap();

        let dubai = DataProcessor::filter_eq(&df, "State", "Dubai").unwrap();
        assert_eq!(dubai.height(), 2);

        let complete = DataProcessor::drop_missing(&df, &["State", "x"]).unwrap();
        assert_eq!(complete.height(), 2);

        assert_eq!(
            DataProcessor::unique_values(&df, "State").unwrap(),
            ["Dubai", "Sharjah"]
        );
    }

    #[test]
    fn unknown_column_is_reported() {
        let df = df!("a" => [1, 2]).unwrap();
        let err = DataProcessor::explode(&df, "b", ',').unwrap_err();
        assert!(matches!(err, AggregationError::ColumnNotFound(name) if name == "b"));
    }
}
