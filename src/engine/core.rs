use std::str::FromStr;

use chrono::Utc;

use crate::analysis::{evaluate, fit_trends, select_best};
use crate::config::{DatasetConfig, FitConfig};
use crate::domain::{AnalysisResult, SeriesPair, TimeSeries, TrendMethod};
use crate::models::{ComparisonReport, SeriesAnalysis};

/// Fit, score and rank every method for a single series.
/// Each series is evaluated on its own defined positions; gaps in one series never
/// shrink the comparison of the other. A method without enough data is skipped; any
/// other fitting error fails the whole series.
pub fn analyse_series(
    label: &str,
    series: TimeSeries,
    config: &FitConfig,
) -> AnalysisResult<SeriesAnalysis> {
    let (trends, skipped) = fit_trends(&series, config).into_parts()?;

    for (method, reason) in &skipped {
        log::warn!("{} {}: skipped ({})", label, method, reason);
    }

    let metrics: Vec<_> = trends
        .iter()
        .filter(|trend| trend.method.is_evaluated())
        .map(|trend| (trend.method, evaluate(&series, trend)))
        .collect();

    let best_method = select_best(&metrics);
    if best_method.is_none() {
        log::warn!("{}: no method produced comparable metrics", label);
    }

    Ok(SeriesAnalysis {
        label: label.to_string(),
        series,
        trends,
        metrics,
        skipped,
        best_method,
    })
}

/// The full local-vs-reference comparison for one dataset. Invalid fit parameters
/// abort before anything is fitted. The two series are independent, so they are
/// fitted in parallel.
pub fn run_comparison(
    dataset: &DatasetConfig,
    pair: SeriesPair,
    config: &FitConfig,
) -> AnalysisResult<ComparisonReport> {
    config.validate()?;
    let (local, reference) = pair.into_parts();

    let (local, reference) = rayon::join(
        || analyse_series(dataset.local_label, local, config),
        || analyse_series(dataset.reference_label, reference, config),
    );

    Ok(ComparisonReport {
        dataset: dataset.kind,
        title: dataset.chart_title.to_string(),
        y_axis_title: dataset.y_axis_title.to_string(),
        fit_config: *config,
        local: local?,
        reference: reference?,
        generated_at: Utc::now(),
    })
}

/// Which method a chart should show next to the raw series.
pub fn resolve_focus(analysis: &SeriesAnalysis, focus: Option<Focus>) -> Vec<TrendMethod> {
    match focus {
        None => TrendMethod::EVALUATED.to_vec(),
        Some(Focus::Best) => analysis.best_method.into_iter().collect(),
        Some(Focus::Method(method)) => vec![method],
    }
}

/// Chart restriction: one named method or each series' best method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Method(TrendMethod),
    Best,
}

impl FromStr for Focus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "best" => Ok(Focus::Best),
            "poly" | "polynomial" => Ok(Focus::Method(TrendMethod::Polynomial)),
            "loess" | "lowess" => Ok(Focus::Method(TrendMethod::Loess)),
            "rolling" | "rolling-mean" => Ok(Focus::Method(TrendMethod::RollingMean)),
            other => Err(format!(
                "unknown focus '{}' (expected best, poly, loess or rolling)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TEMPERATURE;
    use crate::domain::AnalysisError;

    fn linear_pair() -> SeriesPair {
        let years: Vec<i32> = (2000..2010).collect();
        let local: Vec<f64> = (0..10).map(|v| v as f64).collect();
        let reference: Vec<f64> = (0..10).map(|v| 0.5 * v as f64 + 1.0).collect();
        SeriesPair::new(
            TimeSeries::new("Israel Anomaly", years.clone(), local).unwrap(),
            TimeSeries::new("Global Anomaly", years, reference).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_linear_data_scores_perfectly_for_polynomial() {
        let config = FitConfig::default().with_degree(Some(1)).with_window(Some(3));
        let report = run_comparison(&TEMPERATURE, linear_pair(), &config).unwrap();

        for analysis in report.analyses() {
            let poly = analysis.metrics_for(TrendMethod::Polynomial).unwrap();
            assert!((poly.r2 - 1.0).abs() < 1e-9);
            assert!(poly.mae < 1e-9);
            assert!(poly.rmse < 1e-9);
            assert_eq!(analysis.metrics.len(), 3);
            assert!(analysis.skipped.is_empty());
        }
        assert_eq!(report.local.label, "Israel");
        assert_eq!(report.reference.label, "Global");
    }

    #[test]
    fn test_rolling_metrics_use_only_defined_positions() {
        let config = FitConfig::default().with_window(Some(3));
        let report = run_comparison(&TEMPERATURE, linear_pair(), &config).unwrap();
        let rolling = report.local.metrics_for(TrendMethod::RollingMean).unwrap();
        assert_eq!(rolling.n, 8);
        // A trailing mean of a unit-slope line lags by exactly one
        assert!((rolling.mae - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_short_series_reports_skipped_methods() {
        let config = FitConfig::default().with_window(Some(20));
        let report = run_comparison(&TEMPERATURE, linear_pair(), &config).unwrap();
        let skipped: Vec<TrendMethod> = report.local.skipped.iter().map(|(m, _)| *m).collect();
        assert_eq!(skipped, vec![TrendMethod::RollingMean, TrendMethod::RollingStd]);
        assert!(report.local.metrics_for(TrendMethod::RollingMean).is_none());
        assert!(report.local.best_method.is_some());
    }

    #[test]
    fn test_invalid_parameters_abort_instead_of_skipping() {
        for config in [
            FitConfig::default().with_loess_fraction(Some(1.5)),
            FitConfig::default().with_window(Some(0)),
        ] {
            assert!(matches!(
                run_comparison(&TEMPERATURE, linear_pair(), &config),
                Err(AnalysisError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_focus_parsing() {
        assert_eq!("best".parse::<Focus>(), Ok(Focus::Best));
        assert_eq!("LOESS".parse::<Focus>(), Ok(Focus::Method(TrendMethod::Loess)));
        assert_eq!("poly".parse::<Focus>(), Ok(Focus::Method(TrendMethod::Polynomial)));
        assert!("spline".parse::<Focus>().is_err());
    }

    #[test]
    fn test_resolve_focus() {
        let config = FitConfig::default().with_degree(Some(1)).with_window(Some(3));
        let report = run_comparison(&TEMPERATURE, linear_pair(), &config).unwrap();
        assert_eq!(resolve_focus(&report.local, None).len(), 3);
        assert_eq!(
            resolve_focus(&report.local, Some(Focus::Method(TrendMethod::Loess))),
            vec![TrendMethod::Loess]
        );
        assert_eq!(
            resolve_focus(&report.local, Some(Focus::Best)),
            report.local.best_method.into_iter().collect::<Vec<_>>()
        );
    }
}
