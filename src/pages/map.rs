//! Hospital locations for the map view.

use super::hospitals::{
    cost_column, income_column, load_hospitals, patients_column, surgeries_column, DOCTORS,
    HOSPITAL_RATE, LATITUDE, LONGITUDE, NAME, STATE, TREATMENTS,
};
use crate::charts::{ChartData, MapData, MapPoint, Notice, Page, Panel};
use crate::config::AppConfig;
use crate::data::{DataLoader, DataProcessor};
use crate::error::Result;
use polars::prelude::DataFrame;

fn hover_columns(year: i32) -> Vec<String> {
    vec![
        HOSPITAL_RATE.to_string(),
        STATE.to_string(),
        DOCTORS.to_string(),
        patients_column(year),
        TREATMENTS.to_string(),
        cost_column(year),
        income_column(year),
        surgeries_column(year),
    ]
}

fn map_points(df: &DataFrame, hover: &[String]) -> Result<Vec<MapPoint>> {
    let lats = DataProcessor::numeric_values(df, LATITUDE)?;
    let lons = DataProcessor::numeric_values(df, LONGITUDE)?;
    let names = DataProcessor::text_values(df, NAME)?;
    let groups = if df.get_column_index(STATE).is_some() {
        DataProcessor::text_values(df, STATE)?
    } else {
        vec![None; df.height()]
    };
    let hover_values = hover
        .iter()
        .map(|c| DataProcessor::text_values(df, c))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut points = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let (Some(lat), Some(lon)) = (lats[i], lons[i]) else {
            continue;
        };
        points.push(MapPoint {
            lat,
            lon,
            name: names[i].clone().unwrap_or_default(),
            group: groups[i].clone(),
            hover: hover
                .iter()
                .zip(&hover_values)
                .map(|(c, v)| (c.clone(), v[i].clone().unwrap_or_else(|| "-".to_string())))
                .collect(),
        });
    }
    Ok(points)
}

/// Hospitals with coordinates, colored by state.
pub fn map_page(config: &AppConfig) -> Result<Page> {
    let df = load_hospitals(config, &[LATITUDE, LONGITUDE, NAME])?;
    let df = DataLoader::coerce_numeric(&df, &[LATITUDE, LONGITUDE])?;
    let located = DataProcessor::drop_missing(&df, &[LATITUDE, LONGITUDE])?;

    let mut page = Page::new("Interactive UAE Hospitals Map");
    let title = "Hospitals and Clinics Across the UAE";
    if located.height() == 0 {
        page.push(Panel::notice(
            title,
            Notice::no_data("No valid hospital locations to display after removing missing coordinates."),
        ));
        return Ok(page);
    }

    let hover: Vec<String> = hover_columns(config.years.first)
        .into_iter()
        .filter(|c| located.get_column_index(c).is_some())
        .collect();

    page.push(Panel::chart(
        title,
        ChartData::Map(MapData {
            center: (config.map.center_lat, config.map.center_lon),
            zoom: config.map.zoom,
            points: map_points(&located, &hover)?,
        }),
    ));
    Ok(page)
}
