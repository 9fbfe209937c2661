//! Command Line Module
//! Arguments and subcommands of the healthboard binary.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for rendered pages
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain-text tables
    #[default]
    Text,
    /// One JSON document per page, for an external chart renderer
    Json,
}

/// Values that `list` can print
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ListTarget {
    /// Supported years
    Years,
    /// Distinct states (emirates) in the hospitals dataset
    States,
    /// Hospital and clinic names
    Hospitals,
    /// Numeric columns usable as scatter axes
    NumericColumns,
    /// Text columns usable for coloring
    CategoricalColumns,
}

/// Command-line arguments for healthboard
#[derive(Parser, Debug)]
#[command(version, about = "Health data dashboards from CSV files")]
pub struct Args {
    /// Path to a TOML config file
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Directory containing the data files (overrides the config)
    #[arg(long = "data-root", global = true)]
    pub data_root: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Category breakdown of {year}.csv as pie and bar charts
    Categories {
        #[arg(long)]
        year: i32,
    },
    /// Pie charts across the hospitals dataset for one year
    Distribution {
        #[arg(long)]
        year: i32,
    },
    /// Cost and income over the years for one state
    Trend {
        #[arg(long)]
        state: String,
    },
    /// Review sentiment and keywords for one hospital
    Reviews {
        #[arg(long)]
        hospital: String,
    },
    /// Scatter plot of two numeric columns
    Scatter {
        #[arg(long)]
        x: String,
        #[arg(long)]
        y: String,
        /// Categorical column to color points by
        #[arg(long)]
        color: Option<String>,
        /// Numeric column to size points by
        #[arg(long)]
        size: Option<String>,
    },
    /// Hospital locations
    Map,
    /// List selectable values
    List {
        #[arg(value_enum)]
        target: ListTarget,
    },
    /// Descriptive statistics for numeric columns of the hospitals dataset
    Describe {
        #[arg(required = true)]
        columns: Vec<String>,
    },
    /// Write the default configuration file
    InitConfig {
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long, action)]
        force: bool,
    },
}
