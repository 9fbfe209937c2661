//! Health data distribution: pie charts over the hospitals dataset.

use super::hospitals::{self, *};
use super::{check_year, failure_notice, summary_panel, SummaryChart};
use crate::charts::{ChartData, Notice, Page, Panel};
use crate::config::AppConfig;
use crate::data::{
    AggregationError, AggregationRequest, BinSpec, DataProcessor, GroupOrder, SummaryTable,
};
use crate::error::Result;
use log::info;
use polars::prelude::DataFrame;
use rayon::prelude::*;

enum Plan {
    Grouped {
        title: String,
        request: AggregationRequest,
    },
    Sentiment,
}

const SENTIMENT_TITLE: &str = "Overall Review Sentiment";

impl Plan {
    fn grouped(title: impl Into<String>, request: AggregationRequest) -> Self {
        Self::Grouped {
            title: title.into(),
            request,
        }
    }

    fn build(&self, df: &DataFrame) -> Panel {
        match self {
            Self::Grouped { title, request } => summary_panel(df, title.as_str(), request, SummaryChart::Pie),
            Self::Sentiment => sentiment_panel(df),
        }
    }
}

fn total(df: &DataFrame, column: &str) -> Result<Option<f64>, AggregationError> {
    let values: Vec<f64> = DataProcessor::numeric_values(df, column)?.into_iter().flatten().collect();
    Ok((!values.is_empty()).then(|| values.iter().sum()))
}

/// Positive vs negative review totals across all hospitals.
fn sentiment_panel(df: &DataFrame) -> Panel {
    let totals = total(df, POSITIVE_REVIEWS).and_then(|p| Ok((p, total(df, NEGATIVE_REVIEWS)?)));
    match totals {
        Ok((None, None)) => Panel::notice(
            SENTIMENT_TITLE,
            Notice::no_data(format!("No data to display for '{SENTIMENT_TITLE}' after aggregation.")),
        ),
        Ok((positive, negative)) => {
            let summary = SummaryTable::from_pairs(
                "Sentiment",
                "Count",
                [
                    ("Positive Reviews", positive.unwrap_or(0.0)),
                    ("Negative Reviews", negative.unwrap_or(0.0)),
                ],
            );
            Panel::chart(SENTIMENT_TITLE, ChartData::Pie { summary })
        }
        Err(err) => Panel::notice(SENTIMENT_TITLE, failure_notice(SENTIMENT_TITLE, &err)),
    }
}

fn plans(year: i32, bins: &BinSpec) -> Vec<Plan> {
    let patients = hospitals::patients_column(year);
    vec![
        Plan::grouped("Distribution of Hospitals by State", AggregationRequest::count(STATE)),
        Plan::grouped(
            "Distribution of Hospital Ratings",
            AggregationRequest::count(RATING_GROUP).binned(HOSPITAL_RATE, bins.clone()),
        ),
        Plan::grouped(
            format!("Patient Distribution by State in {year}"),
            AggregationRequest::sum(STATE, patients.clone()),
        ),
        Plan::grouped(
            format!("Cost Distribution by State in {year}"),
            AggregationRequest::sum(STATE, hospitals::cost_column(year)),
        ),
        Plan::grouped(
            format!("Income Distribution by State in {year}"),
            AggregationRequest::sum(STATE, hospitals::income_column(year)),
        ),
        Plan::grouped(
            format!("Surgeries Distribution by State in {year}"),
            AggregationRequest::sum(STATE, hospitals::surgeries_column(year)),
        ),
        Plan::Sentiment,
        Plan::grouped("Distribution of Doctors by State", AggregationRequest::sum(STATE, DOCTORS)),
        Plan::grouped(
            format!("Patient Distribution by Rating in {year}"),
            AggregationRequest::sum(RATING_GROUP, patients).binned(HOSPITAL_RATE, bins.clone()),
        ),
        Plan::grouped(
            "Overall Distribution of Treatment Types",
            AggregationRequest::count(TREATMENTS)
                .exploding(TREATMENTS)
                .ordered(GroupOrder::ValueDescending),
        ),
    ]
}

/// Ten pie panels over the hospitals dataset for one year.
///
/// Panels are independent reads of the same frame and are built in parallel;
/// a missing column only affects the panel that needs it.
pub fn distribution_page(config: &AppConfig, year: i32) -> Result<Page> {
    check_year(config, year)?;
    let df = load_hospitals::<&str>(config, &[])?;

    let mut page = Page::new("Comprehensive Health Data Distribution");
    if df.height() == 0 {
        page.push(Panel::notice("Hospitals", Notice::no_data("No data loaded to display charts.")));
        return Ok(page);
    }

    let plans = plans(year, &config.rating_bins);
    info!("Building {} distribution panels for {year}", plans.len());
    page.panels = plans.par_iter().map(|plan| plan.build(&df)).collect();
    Ok(page)
}
