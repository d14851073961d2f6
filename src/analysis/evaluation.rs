//! Goodness-of-fit metrics between a series and a fitted curve.

use itertools::Itertools;

use crate::domain::TimeSeries;
use crate::models::{EvaluationMetrics, TrendResult};

/// Score `predicted` against `actual` over the positions where the prediction is defined.
pub fn evaluate(actual: &TimeSeries, predicted: &TrendResult) -> EvaluationMetrics {
    evaluate_values(actual.values(), &predicted.values)
}

/// Pairwise-complete R², MAE and RMSE. Positions whose prediction is `None` or
/// non-finite are dropped from both sides before anything is computed.
pub fn evaluate_values(actual: &[f64], predicted: &[Option<f64>]) -> EvaluationMetrics {
    let (observed, fitted): (Vec<f64>, Vec<f64>) = actual
        .iter()
        .zip(predicted)
        .filter_map(|(&a, p)| p.filter(|v| v.is_finite()).map(|p| (a, p)))
        .unzip();

    let n = observed.len();
    if n == 0 {
        return EvaluationMetrics::undefined();
    }
    let n_f = n as f64;

    let mean = observed.iter().sum::<f64>() / n_f;
    let (ss_res, abs_sum) = observed
        .iter()
        .zip_eq(&fitted)
        .fold((0.0, 0.0), |(ss, abs), (a, p)| {
            let residual = a - p;
            (ss + residual * residual, abs + residual.abs())
        });
    let ss_tot: f64 = observed.iter().map(|a| (a - mean).powi(2)).sum();

    let r2 = if ss_tot > 0.0 {
        1.0 - ss_res / ss_tot
    } else {
        f64::NAN
    };

    EvaluationMetrics {
        r2,
        mae: abs_sum / n_f,
        rmse: (ss_res / n_f).sqrt(),
        n,
    }
}
