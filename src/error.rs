use crate::config::ConfigError;
use crate::data::{AggregationError, LoadError};
use thiserror::Error;

/// Invalid choice made by whoever drives the dashboard.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Year {year} is not supported (choose {first}-{last})")]
    UnsupportedYear { year: i32, first: i32, last: i32 },
    #[error("Unknown {kind} '{value}'")]
    Unknown { kind: &'static str, value: String },
    #[error("Column '{0}' is not numeric")]
    NotNumeric(String),
    #[error("Column '{0}' is not categorical")]
    NotCategorical(String),
}

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Aggregation(#[from] AggregationError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;
