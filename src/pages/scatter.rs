//! Scatter view over any two numeric hospital metrics.

use super::hospitals::{load_hospitals, LATITUDE, LONGITUDE, NAME};
use crate::charts::{ChartData, Detail, Notice, Page, Panel, ScatterData, ScatterPoint};
use crate::config::AppConfig;
use crate::data::{AggregationError, DataProcessor};
use crate::error::{Result, SelectionError};
use crate::stats::StatsCalculator;
use log::debug;
use polars::prelude::DataFrame;

/// Axes chosen for the scatter view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScatterSelection {
    pub x: String,
    pub y: String,
    /// Categorical column used to color points.
    pub color: Option<String>,
    /// Numeric column used to size points.
    pub size: Option<String>,
}

impl ScatterSelection {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            color: None,
            size: None,
        }
    }

    pub fn colored_by(mut self, column: impl Into<String>) -> Self {
        self.color = Some(column.into());
        self
    }

    pub fn sized_by(mut self, column: impl Into<String>) -> Self {
        self.size = Some(column.into());
        self
    }

    fn title(&self) -> String {
        let base = format!("{} vs. {}", self.x, self.y);
        match (&self.color, &self.size) {
            (None, None) => base,
            (Some(c), None) => format!("{base} (Colored by {c})"),
            (None, Some(s)) => format!("{base} (Sized by {s})"),
            (Some(c), Some(s)) => format!("{base} (Colored by {c}, Sized by {s})"),
        }
    }
}

/// (numeric, categorical) column choices. Coordinates are not offered as axes.
pub fn scatter_columns(df: &DataFrame) -> (Vec<String>, Vec<String>) {
    let numeric = DataProcessor::numeric_columns(df)
        .into_iter()
        .filter(|c| c != LATITUDE && c != LONGITUDE)
        .collect();
    (numeric, DataProcessor::text_columns(df))
}

fn validate(df: &DataFrame, selection: &ScatterSelection) -> Result<()> {
    let (numeric, categorical) = scatter_columns(df);

    let numeric_axes = [Some(&selection.x), Some(&selection.y), selection.size.as_ref()];
    for column in numeric_axes.into_iter().flatten() {
        if df.get_column_index(column).is_none() {
            return Err(AggregationError::ColumnNotFound(column.clone()).into());
        }
        if !numeric.contains(column) {
            return Err(SelectionError::NotNumeric(column.clone()).into());
        }
    }

    if let Some(column) = &selection.color {
        if df.get_column_index(column).is_none() {
            return Err(AggregationError::ColumnNotFound(column.clone()).into());
        }
        if !categorical.contains(column) {
            return Err(SelectionError::NotCategorical(column.clone()).into());
        }
    }
    Ok(())
}

/// Validate the selection and keep only rows with both axes present
/// (and a size, when sizing is requested).
pub fn prepare_scatter(df: &DataFrame, selection: &ScatterSelection) -> Result<DataFrame> {
    validate(df, selection)?;

    let mut required = vec![selection.x.as_str(), selection.y.as_str()];
    if let Some(size) = &selection.size {
        required.push(size);
    }
    let filtered = DataProcessor::drop_missing(df, &required)?;
    debug!(
        "Scatter {} kept {} of {} rows",
        selection.title(),
        filtered.height(),
        df.height()
    );
    Ok(filtered)
}

fn points(df: &DataFrame, selection: &ScatterSelection) -> Result<Vec<ScatterPoint>> {
    let xs = DataProcessor::numeric_values(df, &selection.x)?;
    let ys = DataProcessor::numeric_values(df, &selection.y)?;
    let n = df.height();
    let colors = match &selection.color {
        Some(c) => DataProcessor::text_values(df, c)?,
        None => vec![None; n],
    };
    let sizes = match &selection.size {
        Some(s) => DataProcessor::numeric_values(df, s)?,
        None => vec![None; n],
    };
    let labels = if df.get_column_index(NAME).is_some() {
        DataProcessor::text_values(df, NAME)?
    } else {
        vec![None; n]
    };

    let points = (0..n)
        .filter_map(|i| {
            Some(ScatterPoint {
                x: xs[i]?,
                y: ys[i]?,
                color: colors[i].clone(),
                size: sizes[i],
                label: labels[i].clone(),
            })
        })
        .collect();
    Ok(points)
}

fn stats_details(df: &DataFrame, selection: &ScatterSelection) -> Result<Vec<Detail>> {
    let mut details = Vec::new();
    for stats in StatsCalculator::describe_all_parallel(df, &[selection.x.as_str(), selection.y.as_str()])? {
        details.push(Detail::new(
            stats.column.clone(),
            format!(
                "n={} mean={:.2} median={:.2} std={:.2} min={:.2} max={:.2}",
                stats.count, stats.mean, stats.median, stats.std, stats.min, stats.max
            ),
        ));
    }
    let r = StatsCalculator::correlation(df, &selection.x, &selection.y)?;
    details.push(Detail::new(
        "Pearson correlation",
        r.map(|r| format!("{r:.3}")).unwrap_or_else(|| "n/a".to_string()),
    ));
    Ok(details)
}

pub fn scatter_page(config: &AppConfig, selection: &ScatterSelection) -> Result<Page> {
    let df = load_hospitals::<&str>(config, &[])?;
    let filtered = prepare_scatter(&df, selection)?;

    let mut page = Page::new("Detailed Scatter Plot Analysis");
    let title = format!("Relationship between {} and {}", selection.x, selection.y);

    if filtered.height() == 0 {
        page.push(Panel::notice(
            title,
            Notice::no_data(format!(
                "No valid data to plot for {} vs {} after removing missing values.",
                selection.x, selection.y
            )),
        ));
        return Ok(page);
    }

    page.push(Panel::chart(
        selection.title(),
        ChartData::Scatter(ScatterData {
            x: selection.x.clone(),
            y: selection.y.clone(),
            color: selection.color.clone(),
            size: selection.size.clone(),
            points: points(&filtered, selection)?,
        }),
    ));
    page.push(Panel::details("Statistics", stats_details(&filtered, selection)?));
    Ok(page)
}
