use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use itertools::Itertools;

use crate::domain::TrendMethod;
use crate::models::{ComparisonReport, SeriesAnalysis};

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .context(format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

fn column_suffix(method: TrendMethod) -> &'static str {
    match method {
        TrendMethod::Polynomial => "Poly_Trend",
        TrendMethod::Loess => "Loess_Trend",
        TrendMethod::RollingMean => "Rolling_Mean",
        TrendMethod::RollingStd => "Rolling_Std",
    }
}

const EXPORTED_METHODS: [TrendMethod; 4] = [
    TrendMethod::Polynomial,
    TrendMethod::Loess,
    TrendMethod::RollingMean,
    TrendMethod::RollingStd,
];

fn series_headers(analysis: &SeriesAnalysis) -> Vec<String> {
    std::iter::once(analysis.series.name.clone())
        .chain(
            EXPORTED_METHODS
                .iter()
                .map(|&m| format!("{}_{}", analysis.label, column_suffix(m))),
        )
        .collect()
}

/// Raw value and every trend value of `analysis` for `year`; empty cells when the
/// series has no such year or a method left it undefined.
fn series_cells(analysis: &SeriesAnalysis, year: i32) -> Vec<String> {
    let idx = analysis.series.years().binary_search(&year).ok();
    let raw = idx
        .and_then(|i| analysis.series.values().get(i))
        .map(|v| v.to_string())
        .unwrap_or_default();
    std::iter::once(raw)
        .chain(EXPORTED_METHODS.iter().map(|&m| {
            idx.zip(analysis.trend(m))
                .and_then(|(i, t)| t.values.get(i).copied().flatten())
                .map(|v| v.to_string())
                .unwrap_or_default()
        }))
        .collect()
}

/// Write the raw series and every derived column, one row per year of either series.
/// Undefined values (rolling gaps, skipped methods, missing years) are empty cells.
pub fn write_trends_csv(path: &Path, report: &ComparisonReport) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)
        .context(format!("Failed to create file: {}", path.display()))?;

    let mut header = vec!["year".to_string()];
    header.extend(series_headers(&report.local));
    header.extend(series_headers(&report.reference));
    writer.write_record(&header)?;

    let years = report
        .local
        .series
        .years()
        .iter()
        .merge(report.reference.series.years())
        .dedup();
    for &year in years {
        let mut row = vec![year.to_string()];
        row.extend(series_cells(&report.local, year));
        row.extend(series_cells(&report.reference, year));
        writer.write_record(&row)?;
    }

    writer
        .flush()
        .context(format!("Failed to write trends to: {}", path.display()))
}

/// Write the whole report as pretty JSON. Undefined metrics (NaN) become `null`.
pub fn write_report_json(path: &Path, report: &ComparisonReport) -> Result<()> {
    ensure_parent(path)?;
    let file = File::create(path).context(format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, report)
        .context(format!("Failed to serialize report to: {}", path.display()))
}
