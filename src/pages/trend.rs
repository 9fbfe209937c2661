//! Cost and income trend per emirate (state).

use super::hospitals::{cost_column, income_column, load_hospitals, STATE};
use crate::charts::{ChartData, LineSeries, Notice, Page, Panel};
use crate::config::AppConfig;
use crate::data::DataProcessor;
use crate::error::{Result, SelectionError};
use polars::prelude::DataFrame;
use serde::Serialize;

pub const COST_SERIES: &str = "Total Cost (Million AED)";
pub const INCOME_SERIES: &str = "Total Income (Million AED)";

/// Yearly totals for one state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateTrend {
    pub state: String,
    pub years: Vec<i32>,
    pub cost: Vec<f64>,
    pub income: Vec<f64>,
}

fn required_columns(config: &AppConfig) -> Vec<String> {
    let mut required = vec![STATE.to_string()];
    required.extend(config.years.iter().map(cost_column));
    required.extend(config.years.iter().map(income_column));
    required
}

fn column_total(df: &DataFrame, column: &str) -> Result<f64> {
    Ok(DataProcessor::numeric_values(df, column)?.into_iter().flatten().sum())
}

/// Distinct states, sorted.
pub fn states(config: &AppConfig) -> Result<Vec<String>> {
    let df = load_hospitals(config, &[STATE])?;
    Ok(DataProcessor::unique_values(&df, STATE)?)
}

/// Sum of every hospital's cost and income in `state`, per supported year.
pub fn state_trend(config: &AppConfig, state: &str) -> Result<StateTrend> {
    let df = load_hospitals(config, &required_columns(config))?;
    trend_from(&df, config, state)
}

fn trend_from(df: &DataFrame, config: &AppConfig, state: &str) -> Result<StateTrend> {
    let df_state = DataProcessor::filter_eq(df, STATE, state)?;
    if df_state.height() == 0 {
        return Err(SelectionError::Unknown {
            kind: "state",
            value: state.to_string(),
        }
        .into());
    }

    let years: Vec<i32> = config.years.iter().collect();
    let cost = years
        .iter()
        .map(|&y| column_total(&df_state, &cost_column(y)))
        .collect::<Result<Vec<f64>>>()?;
    let income = years
        .iter()
        .map(|&y| column_total(&df_state, &income_column(y)))
        .collect::<Result<Vec<f64>>>()?;

    Ok(StateTrend {
        state: state.to_string(),
        years,
        cost,
        income,
    })
}

/// Line chart of cost and income over the supported years.
pub fn state_trend_page(config: &AppConfig, state: &str) -> Result<Page> {
    let df = load_hospitals(config, &required_columns(config))?;

    let mut page = Page::new(format!("Cost & Income Trends for: {state}"));
    if df.height() == 0 {
        page.push(Panel::notice(
            "Financial Performance",
            Notice::no_data("The hospitals file contains no data rows."),
        ));
        return Ok(page);
    }

    let trend = trend_from(&df, config, state)?;
    let series = |name: &str, values: &[f64]| LineSeries {
        name: name.to_string(),
        points: trend
            .years
            .iter()
            .zip(values)
            .map(|(&y, &v)| (f64::from(y), v))
            .collect(),
    };

    page.push(Panel::chart(
        format!(
            "Hospital Financial Performance in {state} ({}-{})",
            config.years.first, config.years.last
        ),
        ChartData::Line {
            x_label: "Year".to_string(),
            y_label: "Amount (Million AED)".to_string(),
            series: vec![series(COST_SERIES, &trend.cost), series(INCOME_SERIES, &trend.income)],
        },
    ));
    Ok(page)
}
