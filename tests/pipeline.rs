use std::io::Write;

use approx::assert_relative_eq;
use clap::Parser;
use tempfile::{NamedTempFile, tempdir};

use climate_trends::data::{write_report_json, write_trends_csv};
use climate_trends::engine::report_lines;
use climate_trends::{Cli, TrendMethod, run_analysis};

// Local: exact cubic in the year, reference: exact line.
fn temperature_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Year,Israel Anomaly,Global Anomaly").unwrap();
    for year in 2000..2010 {
        let t = (year - 2000) as f64;
        let local = 0.01 * t.powi(3) - 0.1 * t.powi(2) + 0.2 * t - 0.5;
        let reference = 0.05 * t - 0.2;
        writeln!(file, "{},{},{}", year, local, reference).unwrap();
    }
    file.flush().unwrap();
    file
}

fn cli(path: &std::path::Path, extra: &[&str]) -> Cli {
    let mut args = vec![
        "climate-trends".to_string(),
        "temperature".to_string(),
        "--input".to_string(),
        path.display().to_string(),
    ];
    args.extend(extra.iter().map(|s| s.to_string()));
    Cli::parse_from(args)
}

#[test]
fn cubic_fit_recovers_exact_series() {
    let file = temperature_csv();
    let report = run_analysis(&cli(
        file.path(),
        &["--window", "3", "--loess-fraction", "0.5"],
    ))
    .unwrap();

    assert_eq!(report.local.series.len(), 10);
    let poly = report.local.metrics_for(TrendMethod::Polynomial).unwrap();
    assert_relative_eq!(poly.r2, 1.0, epsilon = 1e-9);
    assert!(poly.rmse < 1e-9);
    assert_eq!(poly.n, 10);

    // The linear reference is also exact under the default cubic
    let reference_poly = report.reference.metrics_for(TrendMethod::Polynomial).unwrap();
    assert_relative_eq!(reference_poly.r2, 1.0, epsilon = 1e-9);
    assert!(reference_poly.rmse < 1e-9);

    let rolling = report.local.metrics_for(TrendMethod::RollingMean).unwrap();
    assert_eq!(rolling.n, 8);
    assert_eq!(report.local.best_method, Some(TrendMethod::Polynomial));
}

#[test]
fn linear_degree_one_is_exact_for_reference() {
    let file = temperature_csv();
    let report = run_analysis(&cli(file.path(), &["--degree", "1"])).unwrap();

    let poly = report.reference.metrics_for(TrendMethod::Polynomial).unwrap();
    assert_relative_eq!(poly.r2, 1.0, epsilon = 1e-9);
    assert_relative_eq!(poly.mae, 0.0, epsilon = 1e-9);

    // Default window of 10 leaves a single defined point.
    let rolling = report.reference.trend(TrendMethod::RollingMean).unwrap();
    assert_eq!(rolling.defined_count(), 1);
}

#[test]
fn short_series_skips_methods_but_keeps_others() {
    let file = temperature_csv();
    let report = run_analysis(&cli(file.path(), &["--window", "20"])).unwrap();

    assert!(report.local.trend(TrendMethod::RollingMean).is_none());
    assert!(
        report
            .local
            .skipped
            .iter()
            .any(|(method, _)| *method == TrendMethod::RollingMean)
    );
    assert!(report.local.metrics_for(TrendMethod::Loess).is_some());
}

#[test]
fn report_lines_follow_metric_format() {
    let file = temperature_csv();
    let report = run_analysis(&cli(file.path(), &["--loess-fraction", "0.5"])).unwrap();
    let lines = report_lines(&report);

    assert!(
        lines[0].starts_with("Israel Polynomial Regression Metrics: R2 = 1.000, MAE = 0.000")
    );
    assert!(lines[1].starts_with("Global Polynomial Regression Metrics:"));
    assert!(lines.iter().any(|l| l == "Israel best fit: Polynomial Regression"));
}

#[test]
fn missing_input_is_an_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.csv");
    assert!(run_analysis(&cli(&missing, &[])).is_err());
}

#[test]
fn anomaly_baseline_centres_local_series() {
    let file = temperature_csv();
    let report =
        run_analysis(&cli(file.path(), &["--local-anomaly-baseline", "2000:2009"])).unwrap();

    let mean = report.local.series.values().iter().sum::<f64>() / 10.0;
    assert_relative_eq!(mean, 0.0, epsilon = 1e-12);
    // Reference is untouched.
    assert_relative_eq!(report.reference.series.values()[0], -0.2, epsilon = 1e-12);
}

#[test]
fn exports_write_csv_and_json() {
    let file = temperature_csv();
    let report = run_analysis(&cli(file.path(), &["--window", "3"])).unwrap();
    let dir = tempdir().unwrap();

    let csv_path = dir.path().join("out/trends.csv");
    write_trends_csv(&csv_path, &report).unwrap();
    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], "year");
    assert_eq!(&headers[1], "Israel Anomaly");
    assert_eq!(&headers[2], "Israel_Poly_Trend");
    assert_eq!(&headers[4], "Israel_Rolling_Mean");
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 10);
    assert_eq!(&rows[0][4], "");
    assert!(!rows[2][4].is_empty());

    let json_path = dir.path().join("report.json");
    write_report_json(&json_path, &report).unwrap();
    let value: serde_json::Value =
        serde_json::from_reader(std::fs::File::open(&json_path).unwrap()).unwrap();
    assert_eq!(value["dataset"], "Temperature");
    assert_eq!(value["local"]["label"], "Israel");
}

#[test]
fn invalid_fit_parameters_abort_the_run() {
    let file = temperature_csv();
    for flags in [["--loess-fraction", "1.5"], ["--window", "0"]] {
        let err = run_analysis(&cli(file.path(), &flags)).unwrap_err();
        let root = err.root_cause().to_string();
        assert!(root.starts_with("Invalid parameter"), "{}: {}", flags[0], root);
    }
}
