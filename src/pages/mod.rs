//! Dashboard pages.
//!
//! Each page loads its source, picks aggregation requests and returns a
//! [`Page`] of chart panels. A panel that cannot be built becomes a notice;
//! only load failures and invalid selections fail the whole page.

mod distribution;
pub mod hospitals;
mod map;
mod reviews;
mod scatter;
mod trend;
mod yearly;

pub use distribution::distribution_page;
pub use map::map_page;
pub use reviews::{hospital_names, review_summary, reviews_page, ReviewSummary};
pub use scatter::{prepare_scatter, scatter_columns, scatter_page, ScatterSelection};
pub use trend::{state_trend, state_trend_page, states, StateTrend};
pub use yearly::{category_page, category_summary, year_file};

use crate::charts::{ChartData, Notice, Panel};
use crate::config::AppConfig;
use crate::data::{AggregationError, AggregationRequest, Aggregator, SummaryTable};
use crate::error::SelectionError;
use log::warn;
use polars::prelude::DataFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SummaryChart {
    Pie,
    Bar,
}

impl SummaryChart {
    fn wrap(self, summary: SummaryTable) -> ChartData {
        match self {
            Self::Pie => ChartData::Pie { summary },
            Self::Bar => ChartData::Bar { summary },
        }
    }
}

pub(crate) fn check_year(config: &AppConfig, year: i32) -> Result<(), SelectionError> {
    if config.years.contains(year) {
        Ok(())
    } else {
        Err(SelectionError::UnsupportedYear {
            year,
            first: config.years.first,
            last: config.years.last,
        })
    }
}

/// Turn an aggregation failure into the notice shown in the panel's place.
pub(crate) fn failure_notice(title: &str, err: &AggregationError) -> Notice {
    match err {
        AggregationError::ColumnNotFound(column) => Notice::missing_column(column, title),
        AggregationError::EmptyResult => {
            Notice::no_data(format!("No data to display for '{title}' after aggregation."))
        }
        AggregationError::MissingKeyCollision(_) => {
            Notice::failed(format!("Could not build '{title}': {err}"))
        }
        AggregationError::PolarsError(e) => {
            warn!("Panel '{title}' failed: {e}");
            Notice::failed(format!("Could not build '{title}': {e}"))
        }
    }
}

/// Aggregate and wrap the result as a chart panel, or a notice on failure.
pub(crate) fn summary_panel(
    df: &DataFrame,
    title: impl Into<String>,
    request: &AggregationRequest,
    chart: SummaryChart,
) -> Panel {
    let title = title.into();
    match Aggregator::aggregate(df, request) {
        Ok(summary) => Panel::chart(title, chart.wrap(summary)),
        Err(err) => {
            let notice = failure_notice(&title, &err);
            Panel::notice(title, notice)
        }
    }
}
