//! Stats module - Descriptive statistics for numeric columns

mod calculator;

pub use calculator::{ColumnStats, StatsCalculator};
