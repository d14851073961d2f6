//! Trailing-window statistics.

use statrs::statistics::Statistics;

use crate::domain::{AnalysisError, AnalysisResult, TimeSeries, TrendMethod};
use crate::models::TrendResult;

fn check_window(series: &TimeSeries, window: usize, method: TrendMethod) -> AnalysisResult<()> {
    if window == 0 {
        return Err(AnalysisError::InvalidParameter(
            "rolling window must be at least 1".to_string(),
        ));
    }
    if series.len() < window {
        return Err(AnalysisError::InsufficientData {
            method,
            got: series.len(),
            required: window,
        });
    }
    Ok(())
}

/// Apply `stat` to every trailing window of `window` values. The first `window - 1`
/// positions have no full window and stay `None`.
fn rolling_apply(values: &[f64], window: usize, stat: impl Fn(&[f64]) -> Option<f64>) -> Vec<Option<f64>> {
    std::iter::repeat_n(None, window - 1)
        .chain(values.windows(window).map(stat))
        .collect()
}

/// Simple moving average over trailing windows.
pub fn rolling_mean(series: &TimeSeries, window: usize) -> AnalysisResult<TrendResult> {
    check_window(series, window, TrendMethod::RollingMean)?;
    let values = rolling_apply(series.values(), window, |w| Some(w.iter().mean()));
    Ok(TrendResult::new(TrendMethod::RollingMean, values))
}

/// Moving sample standard deviation (n - 1 denominator). A one-point window has no
/// sample deviation, so `window == 1` yields only `None`.
pub fn rolling_std(series: &TimeSeries, window: usize) -> AnalysisResult<TrendResult> {
    check_window(series, window, TrendMethod::RollingStd)?;
    let values = rolling_apply(series.values(), window, |w| {
        if w.len() < 2 {
            None
        } else {
            Some(w.iter().std_dev())
        }
    });
    Ok(TrendResult::new(TrendMethod::RollingStd, values))
}
