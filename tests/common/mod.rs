#![allow(dead_code)]

use healthboard::AppConfig;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const HOSPITALS_HEADER: &str = "Name of hospital or clinic,State,Hospital rate,Number of Doctors,\
Number of patients in 2021,total cost of the hospital in 2021 (million AED),\
total income of the hospital in 2021 (million AED),total number of surgeries in 2021,\
number of reviews,positive reviews,negative reviews,Types of treatment it contains,\
most repeated keywords for the hospital in positive reviews,\
most repeated keywords for the hospital in negative reviews,Location_Lat,Location_Lon";

pub const HOSPITALS_ROWS: &[&str] = &[
    "Al Noor,Abu Dhabi,4.5,120,5000,300.5,350.0,800,100,80,20,\"Cardiology, Oncology\",friendly staff,long waits,24.45,54.37",
    "City Clinic,Dubai,3.2,40,2000,90,120,150,0,,,\"Dermatology,\",N/A,,25.20,55.27",
    "Gulf Care,Dubai,N/A,60,3000,150,140,300,50,30,20,\"Cardiology , Pediatrics\",clean,expensive,25.10,",
    "Desert Health,Sharjah,2.5,25,1000,40,60,90,10,5,5,,,,25.35,55.40",
];

/// Temporary data root with the given files written into it.
pub fn data_root(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (name, content) in files {
        fs::write(dir.path().join(name), content).expect("Failed to write fixture");
    }
    dir
}

pub fn hospitals_csv() -> String {
    let mut text = String::from(HOSPITALS_HEADER);
    for row in HOSPITALS_ROWS {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    text
}

/// Config pointing at `root`, supporting only 2021 so every yearly column exists.
pub fn config_for(root: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.data_root = root.to_path_buf();
    config.years.first = 2021;
    config.years.last = 2021;
    config
}
