//! Review sentiment and keywords for a single hospital.

use super::hospitals::{
    load_hospitals, NAME, NEGATIVE_KEYWORDS, NEGATIVE_REVIEWS, POSITIVE_KEYWORDS, POSITIVE_REVIEWS,
    REVIEWS,
};
use crate::charts::{ChartData, Detail, Notice, Page, Panel};
use crate::config::AppConfig;
use crate::data::{cell_text, DataProcessor, SummaryTable};
use crate::error::{Result, SelectionError};
use polars::prelude::DataFrame;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSummary {
    pub hospital: String,
    pub total: f64,
    pub positive: f64,
    pub negative: f64,
    pub positive_percent: f64,
    pub negative_percent: f64,
    pub positive_keywords: Option<String>,
    pub negative_keywords: Option<String>,
}

impl ReviewSummary {
    pub fn has_reviews(&self) -> bool {
        self.total > 0.0
    }
}

/// Distinct hospital names, sorted.
pub fn hospital_names(config: &AppConfig) -> Result<Vec<String>> {
    let df = load_hospitals(config, &[NAME])?;
    Ok(DataProcessor::unique_values(&df, NAME)?)
}

fn number(df: &DataFrame, column: &str) -> Result<f64> {
    let values = DataProcessor::numeric_values(df, column)?;
    Ok(values.first().copied().flatten().unwrap_or(0.0))
}

fn keywords(df: &DataFrame, column: &str) -> Option<String> {
    let series = df.column(column).ok()?;
    let text = cell_text(series.get(0).ok()?)?;
    let text = text.trim();
    (!text.is_empty() && text != "N/A").then(|| text.to_string())
}

/// Review figures for the first row matching `hospital`.
///
/// Missing review counts read as zero; without any reviews both percentages
/// are zero as well.
pub fn review_summary(df: &DataFrame, hospital: &str) -> Result<ReviewSummary> {
    let row = DataProcessor::filter_eq(df, NAME, hospital)?;
    if row.height() == 0 {
        return Err(SelectionError::Unknown {
            kind: "hospital",
            value: hospital.to_string(),
        }
        .into());
    }
    let row = row.head(Some(1));

    let total = number(&row, REVIEWS)?;
    let mut positive = number(&row, POSITIVE_REVIEWS)?;
    let mut negative = number(&row, NEGATIVE_REVIEWS)?;
    if total == 0.0 {
        positive = 0.0;
        negative = 0.0;
    }

    let percent = |part: f64| if total > 0.0 { part / total * 100.0 } else { 0.0 };

    Ok(ReviewSummary {
        hospital: hospital.to_string(),
        total,
        positive,
        negative,
        positive_percent: percent(positive),
        negative_percent: percent(negative),
        positive_keywords: keywords(&row, POSITIVE_KEYWORDS),
        negative_keywords: keywords(&row, NEGATIVE_KEYWORDS),
    })
}

pub fn reviews_page(config: &AppConfig, hospital: &str) -> Result<Page> {
    let df = load_hospitals(config, &[NAME, REVIEWS, POSITIVE_REVIEWS, NEGATIVE_REVIEWS])?;
    let summary = review_summary(&df, hospital)?;

    let mut page = Page::new(format!("Review Analysis for: {hospital}"));

    if summary.has_reviews() {
        let sentiment = SummaryTable::from_pairs(
            "Sentiment",
            "Reviews",
            [("Positive", summary.positive), ("Negative", summary.negative)],
        );
        page.push(Panel::chart(
            format!("Total Reviews: {}", summary.total as i64),
            ChartData::Pie { summary: sentiment },
        ));
    } else {
        page.push(Panel::notice(
            "Review Sentiment",
            Notice::no_data("No reviews available for this hospital."),
        ));
    }

    page.push(Panel::details(
        "Review Summary",
        vec![
            Detail::new("Total reviews", summary.total),
            Detail::new("Positive", format!("{} ({:.1}%)", summary.positive, summary.positive_percent)),
            Detail::new("Negative", format!("{} ({:.1}%)", summary.negative, summary.negative_percent)),
        ],
    ));

    let keyword = |k: &Option<String>| k.clone().unwrap_or_else(|| "No keywords available.".to_string());
    page.push(Panel::details(
        "Keywords",
        vec![
            Detail::new("Positive", keyword(&summary.positive_keywords)),
            Detail::new("Negative", keyword(&summary.negative_keywords)),
        ],
    ));

    Ok(page)
}
