//! Healthboard - loading, validation and aggregation behind health data dashboards.
//!
//! Pages read a CSV source from an explicit data root, validate the columns
//! they need, aggregate into chart-ready summaries and hand the result to a
//! [`charts::ChartSink`]. Drawing is left to the sink.

pub mod charts;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod pages;
pub mod stats;

pub use config::{AppConfig, ConfigError};
pub use data::{
    AggOp, AggregationError, AggregationRequest, Aggregator, BinRange, BinSpec, ColumnSpec,
    DataLoader, LoadError, MissingKeyPolicy, SummaryTable,
};
pub use error::{DashboardError, SelectionError};
