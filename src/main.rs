//! Healthboard - health data dashboards from CSV files
//!
//! Builds a dashboard page from the command line and writes it as text or JSON.

use anyhow::{Context, Result};
use clap::Parser;
use healthboard::charts::{ChartSink, JsonSink, Page, TextSink};
use healthboard::cli::{Args, Command, ListTarget, OutputFormat};
use healthboard::pages::{self, hospitals, ScatterSelection};
use healthboard::stats::StatsCalculator;
use healthboard::AppConfig;
use log::info;
use std::io::{self, Write};

fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(root) = &args.data_root {
        config.data_root = root.clone();
    }
    Ok(config)
}

fn render(page: &Page, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout().lock();
    match format {
        OutputFormat::Json => JsonSink::new(stdout).render_page(page)?,
        OutputFormat::Text => TextSink::new(stdout).render_page(page)?,
    }
    Ok(())
}

fn print_list(values: &[String], format: OutputFormat) -> Result<()> {
    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(values)?)?,
        OutputFormat::Text => {
            for v in values {
                writeln!(out, "{v}")?;
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = load_config(&args)?;
    log::debug!("Data root: {}", config.data_root.display());

    let page = match &args.command {
        Command::InitConfig { path, force } => {
            AppConfig::write_default(path, *force)?;
            info!("Wrote default config to {}", path.display());
            return Ok(());
        }
        Command::Categories { year } => pages::category_page(&config, *year)?,
        Command::Distribution { year } => pages::distribution_page(&config, *year)?,
        Command::Trend { state } => pages::state_trend_page(&config, state)?,
        Command::Reviews { hospital } => pages::reviews_page(&config, hospital)?,
        Command::Scatter { x, y, color, size } => {
            let selection = ScatterSelection {
                x: x.clone(),
                y: y.clone(),
                color: color.clone(),
                size: size.clone(),
            };
            pages::scatter_page(&config, &selection)?
        }
        Command::Map => pages::map_page(&config)?,
        Command::List { target } => {
            let values = match target {
                ListTarget::Years => config.years.iter().map(|y| y.to_string()).collect(),
                ListTarget::States => pages::states(&config)?,
                ListTarget::Hospitals => pages::hospital_names(&config)?,
                ListTarget::NumericColumns | ListTarget::CategoricalColumns => {
                    let df = hospitals::load_hospitals::<&str>(&config, &[])?;
                    let (numeric, categorical) = pages::scatter_columns(&df);
                    if *target == ListTarget::NumericColumns {
                        numeric
                    } else {
                        categorical
                    }
                }
            };
            return print_list(&values, args.format);
        }
        Command::Describe { columns } => {
            let df = hospitals::load_hospitals(&config, columns.as_slice())?;
            let stats = StatsCalculator::describe_all_parallel(&df, columns.as_slice())?;
            let mut out = io::stdout().lock();
            match args.format {
                OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?,
                OutputFormat::Text => {
                    for s in &stats {
                        writeln!(
                            out,
                            "{}: n={} missing={} mean={:.2} median={:.2} std={:.2} min={:.2} p05={:.2} p95={:.2} max={:.2}",
                            s.column, s.count, s.missing, s.mean, s.median, s.std, s.min, s.p05, s.p95, s.max
                        )?;
                    }
                }
            }
            return Ok(());
        }
    };

    render(&page, args.format)
}
