use crate::analysis::loess::fit_loess;
use crate::analysis::polynomial::fit_polynomial;
use crate::analysis::rolling::{rolling_mean, rolling_std};
use crate::config::FitConfig;
use crate::domain::TimeSeries;
use crate::models::TrendSet;

/// Run every trend method on `series`. Methods fail independently: a series too short
/// for the rolling window still gets its polynomial and LOESS curves.
pub fn fit_trends(series: &TimeSeries, config: &FitConfig) -> TrendSet {
    TrendSet {
        polynomial: fit_polynomial(series, config.polynomial_degree),
        loess: fit_loess(series, &config.loess),
        rolling_mean: rolling_mean(series, config.rolling_window),
        rolling_std: rolling_std(series, config.rolling_window),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AnalysisError;

    #[test]
    fn test_short_series_skips_only_rolling() {
        let years: Vec<i32> = (2000..2006).collect();
        let values = vec![0.1, 0.4, 0.2, 0.5, 0.7, 0.6];
        let series = TimeSeries::new("short", years, values).unwrap();

        let trends = fit_trends(&series, &FitConfig::default());
        assert_eq!(trends.polynomial.as_ref().unwrap().len(), 6);
        assert_eq!(trends.loess.as_ref().unwrap().len(), 6);
        assert!(matches!(
            trends.rolling_mean,
            Err(AnalysisError::InsufficientData { required: 10, .. })
        ));
        assert!(trends.rolling_std.is_err());
    }

    #[test]
    fn test_all_lengths_match_series() {
        let years: Vec<i32> = (1950..2023).collect();
        let values: Vec<f64> = years.iter().map(|&y| (y as f64 * 0.37).cos()).collect();
        let series = TimeSeries::new("full", years, values).unwrap();

        let trends = fit_trends(&series, &FitConfig::default());
        let (fitted, failed) = trends.into_parts().unwrap();
        assert!(failed.is_empty());
        assert_eq!(fitted.len(), 4);
        assert!(fitted.iter().all(|t| t.len() == series.len()));
    }
}
