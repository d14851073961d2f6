// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod models;
pub mod ui;
pub mod utils;

use std::ops::RangeInclusive;
use std::path::PathBuf;

use anyhow::{Context, Result};

// Re-export commonly used types
pub use analysis::{evaluate, fit_trends};
pub use config::{DatasetKind, FitConfig};
pub use domain::{AnalysisError, SeriesPair, TimeSeries, TrendMethod};
pub use engine::{Focus, run_comparison};
pub use models::{ComparisonReport, EvaluationMetrics, TrendResult, TrendSet};
pub use ui::TrendsApp;

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Dataset to analyse
    #[arg(value_enum)]
    pub dataset: DatasetKind,

    /// CSV file to read instead of the dataset's default path
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Override the year column name
    #[arg(long)]
    pub year_column: Option<String>,

    /// Override the local series column name
    #[arg(long)]
    pub local_column: Option<String>,

    /// Override the reference series column name
    #[arg(long)]
    pub reference_column: Option<String>,

    /// Polynomial degree
    #[arg(long)]
    pub degree: Option<usize>,

    /// LOESS neighbourhood as a fraction of all points, in (0, 1]
    #[arg(long)]
    pub loess_fraction: Option<f64>,

    /// LOESS robustness iterations
    #[arg(long)]
    pub loess_iterations: Option<usize>,

    /// Rolling window in years
    #[arg(long)]
    pub window: Option<usize>,

    /// Convert the local series to anomalies against this baseline, e.g. 1951:2023
    #[arg(long, value_parser = parse_year_range)]
    pub local_anomaly_baseline: Option<RangeInclusive<i32>>,

    /// Write the full report as JSON
    #[arg(long)]
    pub report_json: Option<PathBuf>,

    /// Write the raw series and all derived trend columns as CSV
    #[arg(long)]
    pub trends_csv: Option<PathBuf>,

    /// Open the interactive chart window
    #[arg(long)]
    pub plot: bool,

    /// Restrict the chart to one method: best, poly, loess or rolling
    #[arg(long, requires = "plot")]
    pub focus: Option<Focus>,
}

impl Cli {
    pub fn fit_config(&self) -> FitConfig {
        FitConfig::default()
            .with_degree(self.degree)
            .with_loess_fraction(self.loess_fraction)
            .with_loess_iterations(self.loess_iterations)
            .with_window(self.window)
    }

    pub fn input_path(&self) -> PathBuf {
        self.input
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.dataset.config().default_input))
    }

    pub fn columns(&self) -> config::DatasetColumns {
        let mut columns = self.dataset.config().columns();
        if let Some(year) = &self.year_column {
            columns.year = year.clone();
        }
        if let Some(local) = &self.local_column {
            columns.local = local.clone();
        }
        if let Some(reference) = &self.reference_column {
            columns.reference = reference.clone();
        }
        columns
    }
}

/// Parse `START:END` (inclusive) into a year range.
pub fn parse_year_range(s: &str) -> Result<RangeInclusive<i32>, String> {
    let (start, end) = s
        .split_once(':')
        .ok_or_else(|| format!("expected START:END, got '{}'", s))?;
    let start = data::loader::parse_year(start).ok_or_else(|| format!("bad start year '{}'", start))?;
    let end = data::loader::parse_year(end).ok_or_else(|| format!("bad end year '{}'", end))?;
    if start > end {
        return Err(format!("baseline start {} is after end {}", start, end));
    }
    Ok(start..=end)
}

/// Load the dataset named on the command line and run the full comparison.
/// Loader and parameter errors abort; a method only gets skipped when the series is
/// too short for it.
pub fn run_analysis(args: &Cli) -> Result<ComparisonReport> {
    let dataset = args.dataset.config();
    let path = args.input_path();
    let loaded = data::load_series_pair(&path, &args.columns())
        .with_context(|| format!("Failed to load {} data from {:?}", dataset.kind, path))?;

    let mut pair = loaded.pair;
    if let Some(baseline) = &args.local_anomaly_baseline {
        pair = pair
            .with_local_anomalies(Some(baseline.clone()))
            .context("Failed to convert local series to anomalies")?;
    }

    let fit_config = args.fit_config();
    log::info!("Fitting {} with {:?}", dataset.kind, fit_config);
    run_comparison(dataset, pair, &fit_config)
        .with_context(|| format!("Failed to analyse {} data", dataset.kind))
}

/// Chart window entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(
    cc: &eframe::CreationContext,
    report: ComparisonReport,
    focus: Option<Focus>,
) -> Box<dyn eframe::App> {
    Box::new(ui::TrendsApp::new(cc, report, focus))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_overrides() {
        let cli = Cli::parse_from([
            "climate-trends",
            "precipitation",
            "--degree",
            "2",
            "--window",
            "5",
            "--plot",
            "--focus",
            "loess",
            "--local-anomaly-baseline",
            "1951:2023",
        ]);
        assert_eq!(cli.dataset, DatasetKind::Precipitation);
        let config = cli.fit_config();
        assert_eq!(config.polynomial_degree, 2);
        assert_eq!(config.rolling_window, 5);
        assert_eq!(cli.focus, Some(Focus::Method(TrendMethod::Loess)));
        assert_eq!(cli.local_anomaly_baseline, Some(1951..=2023));
        assert_eq!(cli.columns().local, "Israel Precipitation");
    }

    #[test]
    fn test_focus_requires_plot() {
        let result = Cli::try_parse_from(["climate-trends", "temperature", "--focus", "best"]);
        assert!(result.is_err());
        let cli = Cli::try_parse_from(["climate-trends", "temperature", "--plot", "--focus", "best"])
            .unwrap();
        assert_eq!(cli.focus, Some(Focus::Best));
    }

    #[test]
    fn test_parse_year_range() {
        assert_eq!(parse_year_range("1951:2023"), Ok(1951..=2023));
        assert!(parse_year_range("2023:1951").is_err());
        assert!(parse_year_range("1951-2023").is_err());
    }
}
