use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{Datelike, NaiveDate};

use crate::config::{DEBUG_FLAGS, DatasetColumns};
use crate::domain::{AnalysisError, AnalysisResult, SeriesPair, TimeSeries};

/// A loaded dataset plus the number of rows dropped for an unreadable year.
#[derive(Debug, Clone)]
pub struct LoadedSeries {
    pub pair: SeriesPair,
    pub skipped_rows: usize,
}

/// Parse a 4-digit calendar year ("1951"). Anything else is `None`.
pub fn parse_year(field: &str) -> Option<i32> {
    let field = field.trim();
    if field.len() != 4 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(&format!("{}-01-01", field), "%Y-%m-%d")
        .ok()
        .map(|date| date.year())
}

pub(crate) fn open_csv(path: &Path) -> AnalysisResult<csv::Reader<BufReader<File>>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AnalysisError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => AnalysisError::Io(e),
    })?;
    Ok(csv::Reader::from_reader(BufReader::new(file)))
}

pub(crate) fn column_index(headers: &csv::StringRecord, name: &str) -> AnalysisResult<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| {
            AnalysisError::MalformedColumn(format!(
                "column '{}' not found (available: {})",
                name,
                headers.iter().collect::<Vec<_>>().join(", ")
            ))
        })
}

fn parse_value(field: Option<&str>, column: &str, line: usize) -> AnalysisResult<f64> {
    let raw = field.unwrap_or("").trim();
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AnalysisError::MalformedRow {
            line,
            reason: format!("'{}' is not a number in column '{}'", raw, column),
        })
}

/// Read the year column and the local/reference value columns of a CSV table.
///
/// Rows with an unparseable year are skipped and counted. A bad value in a row with a
/// valid year aborts the load, as does a missing column or a repeated year.
pub fn load_series_pair(path: &Path, columns: &DatasetColumns) -> AnalysisResult<LoadedSeries> {
    let mut reader = open_csv(path)?;
    let headers = reader.headers()?.clone();

    let year_idx = column_index(&headers, &columns.year)?;
    let local_idx = column_index(&headers, &columns.local)?;
    let reference_idx = column_index(&headers, &columns.reference)?;

    let mut local_points = Vec::new();
    let mut reference_points = Vec::new();
    let mut skipped_rows = 0usize;

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);

        let Some(year) = record.get(year_idx).and_then(parse_year) else {
            skipped_rows += 1;
            if DEBUG_FLAGS.print_skipped_rows {
                log::warn!(
                    "Skipping line {}: unparseable year {:?}",
                    line,
                    record.get(year_idx)
                );
            }
            continue;
        };

        local_points.push((year, parse_value(record.get(local_idx), &columns.local, line)?));
        reference_points.push((
            year,
            parse_value(record.get(reference_idx), &columns.reference, line)?,
        ));
    }

    if skipped_rows > 0 {
        log::warn!(
            "{}: skipped {} row(s) with an unparseable year",
            path.display(),
            skipped_rows
        );
    }

    if local_points.is_empty() {
        return Err(AnalysisError::MalformedColumn(format!(
            "column '{}' has no rows with a valid year",
            columns.year
        )));
    }

    let pair = SeriesPair::new(
        TimeSeries::from_points(columns.local.clone(), local_points)?,
        TimeSeries::from_points(columns.reference.clone(), reference_points)?,
    )?;

    log::info!(
        "Loaded {} years ({}-{}) from {}",
        pair.local().len(),
        pair.local().first_year().unwrap_or_default(),
        pair.local().last_year().unwrap_or_default(),
        path.display()
    );

    Ok(LoadedSeries { pair, skipped_rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn columns() -> DatasetColumns {
        DatasetColumns {
            year: "Year".to_string(),
            local: "Israel Anomaly".to_string(),
            reference: "Global Anomaly".to_string(),
        }
    }

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("1951"), Some(1951));
        assert_eq!(parse_year(" 2023 "), Some(2023));
        assert_eq!(parse_year("951"), None);
        assert_eq!(parse_year("19x1"), None);
        assert_eq!(parse_year(""), None);
    }

    #[test]
    fn test_loads_and_sorts() {
        let file = write_csv(
            "Year,Israel Anomaly,Global Anomaly\n2001,0.2,0.5\n2000,0.1,0.4\n2002,0.3,0.6\n",
        );
        let loaded = load_series_pair(file.path(), &columns()).unwrap();
        assert_eq!(loaded.skipped_rows, 0);
        assert_eq!(loaded.pair.local().years(), &[2000, 2001, 2002]);
        assert_eq!(loaded.pair.local().values(), &[0.1, 0.2, 0.3]);
        assert_eq!(loaded.pair.reference().values(), &[0.4, 0.5, 0.6]);
        assert_eq!(loaded.pair.local().name, "Israel Anomaly");
    }

    #[test]
    fn test_skips_bad_years_with_count() {
        let file = write_csv(
            "Year,Israel Anomaly,Global Anomaly\n2000,0.1,0.4\nn/a,9.9,9.9\n2001,0.2,0.5\n",
        );
        let loaded = load_series_pair(file.path(), &columns()).unwrap();
        assert_eq!(loaded.skipped_rows, 1);
        assert_eq!(loaded.pair.local().len(), 2);
    }

    #[test]
    fn test_bad_value_aborts() {
        let file = write_csv("Year,Israel Anomaly,Global Anomaly\n2000,abc,0.4\n");
        let err = load_series_pair(file.path(), &columns()).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedRow { .. }));
    }

    #[test]
    fn test_missing_column() {
        let file = write_csv("Year,Israel,Global Anomaly\n2000,0.1,0.4\n");
        let err = load_series_pair(file.path(), &columns()).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedColumn(_)));
    }

    #[test]
    fn test_duplicate_year() {
        let file = write_csv("Year,Israel Anomaly,Global Anomaly\n2000,0.1,0.4\n2000,0.2,0.5\n");
        let err = load_series_pair(file.path(), &columns()).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedRow { .. }));
    }

    #[test]
    fn test_no_valid_years() {
        let file = write_csv("Year,Israel Anomaly,Global Anomaly\nabc,0.1,0.4\n");
        let err = load_series_pair(file.path(), &columns()).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedColumn(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_series_pair(Path::new("/definitely/not/here.csv"), &columns()).unwrap_err();
        assert!(matches!(err, AnalysisError::InputNotFound { .. }));
    }
}
