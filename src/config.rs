//! Configuration Module
//! TOML settings for the data root, supported years, rating bins and map view.

use crate::data::{BinSpec, DataLoader};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write config file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Year range {first}..={last} is empty")]
    InvalidYears { first: i32, last: i32 },
    #[error("Config file already exists at {}. Use --force to overwrite.", .0.display())]
    AlreadyExists(PathBuf),
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the yearly CSV files and the hospitals dataset.
    pub data_root: PathBuf,
    pub hospitals_file: String,
    pub years: YearRange,
    /// Rows scanned to infer column types; `None` scans the whole file.
    pub infer_schema_length: Option<usize>,
    pub rating_bins: BinSpec,
    pub map: MapConfig,
}

/// Inclusive range of supported years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub first: i32,
    pub last: i32,
}

impl YearRange {
    pub fn contains(&self, year: i32) -> bool {
        (self.first..=self.last).contains(&year)
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> {
        self.first..=self.last
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            first: 2020,
            last: 2025,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: 24.4539,
            center_lon: 54.3773,
            zoom: 7,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("data"),
            hospitals_file: "UAE_hospitals_data.csv".to_string(),
            years: YearRange::default(),
            infer_schema_length: Some(10000),
            rating_bins: BinSpec::hospital_rating(),
            map: MapConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file. Keys left out fall back to their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.years.first > self.years.last {
            return Err(ConfigError::InvalidYears {
                first: self.years.first,
                last: self.years.last,
            });
        }
        Ok(())
    }

    /// Loader bound to the configured data root.
    pub fn loader(&self) -> DataLoader {
        DataLoader::new(&self.data_root).with_infer_schema_length(self.infer_schema_length)
    }

    /// Generate default configuration template as a string
    pub fn default_template() -> &'static str {
        DEFAULT_CONFIG_TEMPLATE
    }

    /// Write the default template to `path`
    pub fn write_default(path: &Path, force: bool) -> Result<(), ConfigError> {
        if path.exists() && !force {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# healthboard configuration

# Directory containing {year}.csv files and the hospitals dataset.
# Relative paths are resolved against the directory the command runs in.
data_root = "data"
hospitals_file = "UAE_hospitals_data.csv"

# Rows scanned when inferring column types.
infer_schema_length = 10000

[years]
first = 2020
last = 2025

[map]
center_lat = 24.4539
center_lon = 54.3773
zoom = 7

# Hospital rating buckets: lower bound inclusive, upper bound exclusive.
[rating_bins]
unclassified = "unclassified"

[[rating_bins.ranges]]
lower = 0.0
upper = 3.0
label = "Below 3.0"

[[rating_bins.ranges]]
lower = 3.0
upper = 4.0
label = "3.0 - 3.9"

[[rating_bins.ranges]]
lower = 4.0
upper = 5.0
label = "4.0 - 5.0"
"#;
