//! Per-year category breakdown (`{year}.csv`).

use super::{check_year, summary_panel, SummaryChart};
use crate::charts::{Notice, Page, Panel};
use crate::config::AppConfig;
use crate::data::{AggregationRequest, Aggregator, ColumnSpec, SummaryTable};
use crate::error::Result;
use log::info;

pub const CATEGORY: &str = "Category";
pub const VALUE: &str = "Value";

pub fn year_file(year: i32) -> String {
    format!("{year}.csv")
}

fn category_specs() -> [ColumnSpec; 2] {
    [ColumnSpec::categorical(CATEGORY), ColumnSpec::numeric(VALUE)]
}

/// Sum of `Value` per `Category` for one year.
pub fn category_summary(config: &AppConfig, year: i32) -> Result<SummaryTable> {
    check_year(config, year)?;
    let df = config.loader().load_specs(year_file(year), &category_specs())?;
    Ok(Aggregator::aggregate(&df, &AggregationRequest::sum(CATEGORY, VALUE))?)
}

/// Pie and bar views of the yearly category file.
pub fn category_page(config: &AppConfig, year: i32) -> Result<Page> {
    check_year(config, year)?;
    let file = year_file(year);
    let df = config.loader().load_specs(&file, &category_specs())?;
    info!("Building category page for {year} ({} rows)", df.height());

    let mut page = Page::new(format!("Data for {year}"));
    if df.height() == 0 {
        page.push(Panel::notice(
            "Distribution",
            Notice::no_data(format!("The file '{file}' contains no data rows.")),
        ));
        return Ok(page);
    }

    let request = AggregationRequest::sum(CATEGORY, VALUE);
    page.push(summary_panel(&df, format!("Distribution for {year}"), &request, SummaryChart::Pie));
    page.push(summary_panel(&df, format!("Values by category for {year}"), &request, SummaryChart::Bar));
    Ok(page)
}
