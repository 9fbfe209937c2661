//! Column names of the consolidated hospitals dataset and its loader.

use crate::config::AppConfig;
use crate::data::LoadError;
use polars::prelude::DataFrame;

pub const STATE: &str = "State";
pub const NAME: &str = "Name of hospital or clinic";
pub const HOSPITAL_RATE: &str = "Hospital rate";
pub const DOCTORS: &str = "Number of Doctors";
pub const TREATMENTS: &str = "Types of treatment it contains";
pub const REVIEWS: &str = "number of reviews";
pub const REVIEWERS: &str = "number of customers make reviews for the hospital";
pub const POSITIVE_REVIEWS: &str = "positive reviews";
pub const NEGATIVE_REVIEWS: &str = "negative reviews";
pub const POSITIVE_KEYWORDS: &str = "most repeated keywords for the hospital in positive reviews";
pub const NEGATIVE_KEYWORDS: &str = "most repeated keywords for the hospital in negative reviews";
pub const LATITUDE: &str = "Location_Lat";
pub const LONGITUDE: &str = "Location_Lon";

/// Derived column holding the rating bucket.
pub const RATING_GROUP: &str = "Rating Group";

pub fn patients_column(year: i32) -> String {
    format!("Number of patients in {year}")
}

pub fn cost_column(year: i32) -> String {
    format!("total cost of the hospital in {year} (million AED)")
}

pub fn income_column(year: i32) -> String {
    format!("total income of the hospital in {year} (million AED)")
}

pub fn surgeries_column(year: i32) -> String {
    format!("total number of surgeries in {year}")
}

/// Columns that hold numbers, possibly with non-numeric noise.
pub fn numeric_columns(years: impl Iterator<Item = i32>) -> Vec<String> {
    let mut columns = vec![HOSPITAL_RATE.to_string(), DOCTORS.to_string()];
    let years: Vec<i32> = years.collect();
    columns.extend(years.iter().map(|&y| patients_column(y)));
    columns.extend(years.iter().map(|&y| cost_column(y)));
    columns.extend(years.iter().map(|&y| income_column(y)));
    columns.extend(years.iter().map(|&y| surgeries_column(y)));
    columns.extend(
        [REVIEWERS, REVIEWS, POSITIVE_REVIEWS, NEGATIVE_REVIEWS]
            .iter()
            .map(|c| c.to_string()),
    );
    columns
}

/// Load the hospitals dataset, require `required` and coerce every known
/// numeric column that is present.
pub fn load_hospitals<S: AsRef<str>>(config: &AppConfig, required: &[S]) -> Result<DataFrame, LoadError> {
    let candidates = numeric_columns(config.years.iter());
    let candidates: Vec<&str> = candidates.iter().map(String::as_str).collect();
    config.loader().load_numeric(&config.hospitals_file, required, &candidates)
}
