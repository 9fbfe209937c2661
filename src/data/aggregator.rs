//! Aggregator Module
//! Groups a table by one column and reduces a value column per group.

use crate::data::bins::BinSpec;
use crate::data::processor::DataProcessor;
use crate::data::summary::{SummaryRow, SummaryTable};
use log::debug;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AggregationError {
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),
    #[error("No data left to aggregate after removing missing values")]
    EmptyResult,
    #[error("Label '{0}' for missing keys is also a value of the group column")]
    MissingKeyCollision(String),
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Reduction applied within each group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggOp {
    /// Arithmetic sum; missing values contribute nothing.
    #[default]
    Sum,
    /// Number of rows in the group.
    Count,
}

/// Where the per-row number comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    Column(String),
    /// The same number for every row.
    Constant(f64),
}

/// What happens to rows whose group key is missing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingKeyPolicy {
    /// Row is left out of every group.
    #[default]
    Drop,
    /// Row is grouped under the given label. The label must not occur as a
    /// real key, otherwise aggregation fails with
    /// [`AggregationError::MissingKeyCollision`].
    Retain(String),
}

/// Output ordering of groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupOrder {
    #[default]
    FirstSeen,
    Label,
    ValueDescending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplodeStep {
    pub column: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_delimiter() -> char {
    ','
}

/// Derive a categorical column by binning a numeric one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinStep {
    pub source: String,
    pub into: String,
    pub spec: BinSpec,
}

/// Describes one grouped summary.
///
/// Binning runs first, then exploding, then grouping. `group_by` and a
/// column `value` are checked after those steps, so they may name derived
/// columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationRequest {
    pub group_by: String,
    pub value: ValueSource,
    #[serde(default)]
    pub op: AggOp,
    #[serde(default)]
    pub explode: Option<ExplodeStep>,
    #[serde(default)]
    pub bin: Option<BinStep>,
    #[serde(default)]
    pub missing_keys: MissingKeyPolicy,
    #[serde(default)]
    pub order: GroupOrder,
    /// Name of the value column in the summary. Defaults to the value
    /// column name, or "Count".
    #[serde(default)]
    pub value_label: Option<String>,
}

impl AggregationRequest {
    /// Sum `value` per distinct `group_by`.
    pub fn sum(group_by: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            group_by: group_by.into(),
            value: ValueSource::Column(value.into()),
            op: AggOp::Sum,
            explode: None,
            bin: None,
            missing_keys: MissingKeyPolicy::Drop,
            order: GroupOrder::FirstSeen,
            value_label: None,
        }
    }

    /// Count rows per distinct `group_by`.
    pub fn count(group_by: impl Into<String>) -> Self {
        Self {
            value: ValueSource::Constant(1.0),
            op: AggOp::Count,
            ..Self::sum(group_by, String::new())
        }
    }

    /// Split `column` on commas into one row per item before grouping.
    pub fn exploding(mut self, column: impl Into<String>) -> Self {
        self.explode = Some(ExplodeStep {
            column: column.into(),
            delimiter: default_delimiter(),
        });
        self
    }

    /// Bin numeric `source` into the group column using `spec`.
    pub fn binned(mut self, source: impl Into<String>, spec: BinSpec) -> Self {
        self.bin = Some(BinStep {
            source: source.into(),
            into: self.group_by.clone(),
            spec,
        });
        self
    }

    pub fn with_missing_keys(mut self, policy: MissingKeyPolicy) -> Self {
        self.missing_keys = policy;
        self
    }

    pub fn ordered(mut self, order: GroupOrder) -> Self {
        self.order = order;
        self
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.value_label = Some(label.into());
        self
    }

    fn value_column_name(&self) -> String {
        if let Some(label) = &self.value_label {
            return label.clone();
        }
        match (&self.value, self.op) {
            (ValueSource::Column(name), AggOp::Sum) => name.clone(),
            _ => "Count".to_string(),
        }
    }
}

/// Runs [`AggregationRequest`]s against tables.
pub struct Aggregator;

impl Aggregator {
    fn require(df: &DataFrame, name: &str) -> Result<(), AggregationError> {
        match df.get_column_index(name) {
            Some(_) => Ok(()),
            None => Err(AggregationError::ColumnNotFound(name.to_string())),
        }
    }

    /// Apply the bin and explode steps of `request`, returning the table that
    /// grouping will see.
    pub fn prepare(df: &DataFrame, request: &AggregationRequest) -> Result<DataFrame, AggregationError> {
        let mut table = df.clone();

        if let Some(step) = &request.bin {
            Self::require(&table, &step.source)?;
            table = DataProcessor::bin(&table, &step.source, &step.into, &step.spec)?;
        }

        if let Some(step) = &request.explode {
            Self::require(&table, &step.column)?;
            table = DataProcessor::explode(&table, &step.column, step.delimiter)?;
        }

        Self::require(&table, &request.group_by)?;
        if let ValueSource::Column(name) = &request.value {
            Self::require(&table, name)?;
        }

        Ok(table)
    }

    /// Group and reduce.
    ///
    /// Output is deterministic for identical input: groups appear in first-seen
    /// order unless `request.order` asks for another ordering.
    pub fn aggregate(df: &DataFrame, request: &AggregationRequest) -> Result<SummaryTable, AggregationError> {
        let table = Self::prepare(df, request)?;

        let keys = DataProcessor::text_values(&table, &request.group_by)?;
        let values: Vec<Option<f64>> = match &request.value {
            ValueSource::Column(name) => DataProcessor::numeric_values(&table, name)?,
            ValueSource::Constant(v) => vec![Some(*v); table.height()],
        };

        let mut summary = SummaryTable::new(request.group_by.clone(), request.value_column_name());
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut usable = 0usize;

        for (key, value) in keys.into_iter().zip(values) {
            let key = match (key, &request.missing_keys) {
                (Some(k), MissingKeyPolicy::Retain(label)) if k == *label => {
                    return Err(AggregationError::MissingKeyCollision(k));
                }
                (Some(k), _) => k,
                (None, MissingKeyPolicy::Retain(label)) => label.clone(),
                (None, MissingKeyPolicy::Drop) => continue,
            };

            let pos = *index.entry(key.clone()).or_insert_with(|| {
                summary.rows.push(SummaryRow {
                    label: key,
                    value: 0.0,
                    rows: 0,
                });
                summary.rows.len() - 1
            });
            let row = &mut summary.rows[pos];

            match request.op {
                AggOp::Count => {
                    row.value += 1.0;
                    row.rows += 1;
                    usable += 1;
                }
                AggOp::Sum => {
                    if let Some(v) = value {
                        row.value += v;
                        row.rows += 1;
                        usable += 1;
                    }
                }
            }
        }

        if usable == 0 {
            return Err(AggregationError::EmptyResult);
        }

        match request.order {
            GroupOrder::FirstSeen => {}
            GroupOrder::Label => summary.rows.sort_by(|a, b| a.label.cmp(&b.label)),
            GroupOrder::ValueDescending => summary.rows.sort_by(|a, b| {
                b.value
                    .partial_cmp(&a.value)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.label.cmp(&b.label))
            }),
        }

        debug!(
            "Aggregated {} rows by '{}' into {} groups",
            usable,
            request.group_by,
            summary.len()
        );

        Ok(summary)
    }
}
