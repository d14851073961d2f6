//! Reshapes the per-country precipitation table into the two-series layout the
//! comparison expects.
//!
//! The source table has one row per country (`code`, `name`) and one column per year,
//! named `YYYY` or `YYYY-MM` (e.g. `1950-07`). The output has one row per year with the
//! global average across all countries and the value of one named country.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::data::loader::{column_index, open_csv, parse_year};
use crate::domain::{AnalysisError, AnalysisResult};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PrecipitationRow {
    pub year: i32,
    #[serde(rename = "Global Average Precipitation")]
    pub global: f64,
    #[serde(rename = "Israel Precipitation")]
    pub local: f64,
}

/// Year encoded in a column header: `1950` or `1950-07`.
fn header_year(header: &str) -> Option<i32> {
    let header = header.trim();
    let year_part = header.split_once('-').map_or(header, |(year, _)| year);
    parse_year(year_part)
}

/// Build the yearly (global mean, local value) table from the wide country table.
pub fn prepare_precipitation(input: &Path, local_name: &str) -> AnalysisResult<Vec<PrecipitationRow>> {
    let mut reader = open_csv(input)?;
    let headers = reader.headers()?.clone();
    let name_idx = column_index(&headers, "name")?;

    let year_columns: Vec<(usize, i32)> = headers
        .iter()
        .enumerate()
        .filter_map(|(idx, h)| header_year(h).map(|year| (idx, year)))
        .collect();
    if year_columns.is_empty() {
        return Err(AnalysisError::MalformedColumn(
            "no year columns (YYYY or YYYY-MM) in header".to_string(),
        ));
    }

    let mut sums = vec![0.0; year_columns.len()];
    let mut counts = vec![0usize; year_columns.len()];
    let mut local_values: Option<Vec<Option<f64>>> = None;
    let mut local_line = 0;

    for result in reader.records() {
        let record = result?;
        let cells: Vec<Option<f64>> = year_columns
            .iter()
            .map(|(idx, _)| {
                record
                    .get(*idx)
                    .and_then(|s| s.trim().parse::<f64>().ok())
                    .filter(|v| v.is_finite())
            })
            .collect();

        // Every country, the local one included, contributes to the global mean
        for (slot, cell) in cells.iter().enumerate() {
            if let Some(value) = cell {
                sums[slot] += value;
                counts[slot] += 1;
            }
        }

        if local_values.is_none() && record.get(name_idx).map(str::trim) == Some(local_name) {
            local_line = record.position().map(|p| p.line() as usize).unwrap_or(0);
            local_values = Some(cells);
        }
    }

    let local_values = local_values.ok_or_else(|| {
        AnalysisError::MalformedColumn(format!("no row named '{}' in column 'name'", local_name))
    })?;

    let mut rows = Vec::with_capacity(year_columns.len());
    for (slot, &(_, year)) in year_columns.iter().enumerate() {
        if counts[slot] == 0 {
            return Err(AnalysisError::MalformedColumn(format!(
                "year column {} has no numeric values",
                year
            )));
        }
        let local = local_values[slot].ok_or_else(|| AnalysisError::MalformedRow {
            line: local_line,
            reason: format!("{} has no numeric value for {}", local_name, year),
        })?;
        rows.push(PrecipitationRow {
            year,
            global: sums[slot] / counts[slot] as f64,
            local,
        });
    }

    rows.sort_by_key(|row| row.year);
    if let Some(pair) = rows.windows(2).find(|w| w[0].year == w[1].year) {
        return Err(AnalysisError::MalformedColumn(format!(
            "year {} appears in more than one column",
            pair[0].year
        )));
    }

    log::info!(
        "Prepared {} years of precipitation for '{}' from {}",
        rows.len(),
        local_name,
        input.display()
    );
    Ok(rows)
}

/// Write the prepared table as `year,Global Average Precipitation,Israel Precipitation`.
pub fn write_precipitation_csv(path: &Path, rows: &[PrecipitationRow]) -> AnalysisResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
