//! Data module - CSV loading, validation and aggregation

pub mod aggregator;
pub mod bins;
mod loader;
mod processor;
mod summary;

pub use aggregator::{
    AggOp, AggregationError, AggregationRequest, Aggregator, BinStep, ExplodeStep, GroupOrder,
    MissingKeyPolicy, ValueSource,
};
pub use bins::{BinRange, BinSpec, BinSpecError, UNCLASSIFIED};
pub use loader::{missing_columns, ColumnKind, ColumnSpec, DataLoader, LoadError};
pub use processor::{cell_text, DataProcessor};
pub use summary::{SummaryRow, SummaryTable};
