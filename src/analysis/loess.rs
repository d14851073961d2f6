//! LOESS (locally weighted scatterplot smoothing).
//!
//! Every point gets its own weighted linear regression over the `k` nearest
//! neighbours, with tricube distance weights. After the first pass, bisquare
//! robustness weights computed from the residuals down-weight outliers and the
//! local fits are repeated.
//!
//! Input points are sorted by year for the neighbourhood search; results are
//! written back in the caller's ordering.

use statrs::statistics::{Data, Median};

use crate::config::{DEBUG_FLAGS, LoessSettings};
use crate::domain::{AnalysisError, AnalysisResult, TimeSeries, TrendMethod};
use crate::models::TrendResult;

/// Bisquare tuning constant applied to the median absolute residual.
const BISQUARE_C: f64 = 6.0;

/// Distances below `NEAR * h` get full weight, beyond `FAR * h` none.
const NEAR: f64 = 0.001;
const FAR: f64 = 0.999;

/// Smallest series LOESS can produce a fit for.
const MIN_POINTS: usize = 2;

/// Neighbourhood size for `fraction` of `n` points.
pub fn neighbourhood_size(fraction: f64, n: usize) -> usize {
    // The small offset keeps e.g. 0.1 * 70 from truncating to 6.
    let k = (fraction * n as f64 + 1e-10).floor() as usize;
    k.clamp(MIN_POINTS.min(n), n)
}

/// Tricube kernel on a normalised distance.
#[inline]
fn tricube(distance: f64, radius: f64) -> f64 {
    if distance <= NEAR * radius {
        1.0
    } else if distance <= FAR * radius {
        let u = distance / radius;
        let a = 1.0 - u * u * u;
        a * a * a
    } else {
        0.0
    }
}

/// Bisquare robustness weight for a residual given the residual scale.
#[inline]
fn bisquare(residual: f64, scale: f64) -> f64 {
    let r = residual.abs();
    if r <= NEAR * scale {
        1.0
    } else if r <= FAR * scale {
        let u = r / scale;
        let a = 1.0 - u * u;
        a * a
    } else {
        0.0
    }
}

/// Indices that would sort `x` ascending (stable).
fn argsort(x: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..x.len()).collect();
    order.sort_by(|&a, &b| x[a].total_cmp(&x[b]));
    order
}

/// Weighted linear fit over `left..=right`, evaluated at `x[idx]`.
/// Offsets are taken relative to `x[idx]` so the intercept is the fitted value.
fn fit_point(
    x: &[f64],
    y: &[f64],
    robustness: &[f64],
    idx: usize,
    left: usize,
    right: usize,
) -> f64 {
    let x_current = x[idx];
    let radius = (x_current - x[left]).max(x[right] - x_current);

    let mut sum_w = 0.0;
    let mut sum_wx = 0.0;
    let mut sum_wy = 0.0;
    let mut sum_wxx = 0.0;
    let mut sum_wxy = 0.0;

    for j in left..=right {
        let dx = x[j] - x_current;
        let w = if radius > 0.0 {
            tricube(dx.abs(), radius)
        } else {
            1.0
        } * robustness[j];
        sum_w += w;
        sum_wx += w * dx;
        sum_wy += w * y[j];
        sum_wxx += w * dx * dx;
        sum_wxy += w * dx * y[j];
    }

    if sum_w <= 0.0 {
        return y[idx];
    }

    let x_mean = sum_wx / sum_w;
    let y_mean = sum_wy / sum_w;
    let variance = sum_wxx - sum_wx * sum_wx / sum_w;
    let tol = 1e-7_f64.max(f64::EPSILON * radius * radius);
    if variance <= tol {
        return y_mean;
    }

    let covariance = sum_wxy - sum_wx * sum_wy / sum_w;
    let slope = covariance / variance;
    // Evaluated at offset 0
    y_mean - slope * x_mean
}

/// One smoothing pass over sorted data with the given robustness weights.
fn smooth_pass(x: &[f64], y: &[f64], robustness: &[f64], k: usize) -> Vec<f64> {
    let n = x.len();
    let mut fitted = Vec::with_capacity(n);
    let mut left = 0;
    let mut right = k - 1;

    for idx in 0..n {
        // Slide the window right while that brings its far edge closer to x[idx]
        while right + 1 < n && x[idx] - x[left] > x[right + 1] - x[idx] {
            left += 1;
            right += 1;
        }
        fitted.push(fit_point(x, y, robustness, idx, left, right));
    }

    fitted
}

/// Raw LOESS smoothing of `y` against `x`; output is in the input ordering.
pub fn loess_smooth(x: &[f64], y: &[f64], settings: &LoessSettings) -> AnalysisResult<Vec<f64>> {
    let n = x.len();
    if n != y.len() {
        return Err(AnalysisError::InvalidParameter(format!(
            "LOESS needs equal-length inputs, got {} x and {} y values",
            n,
            y.len()
        )));
    }
    if n < MIN_POINTS {
        return Err(AnalysisError::InsufficientData {
            method: TrendMethod::Loess,
            got: n,
            required: MIN_POINTS,
        });
    }
    if !(settings.fraction > 0.0 && settings.fraction <= 1.0) {
        return Err(AnalysisError::InvalidParameter(format!(
            "LOESS fraction must be in (0, 1], got {}",
            settings.fraction
        )));
    }

    let order = argsort(x);
    let xs: Vec<f64> = order.iter().map(|&i| x[i]).collect();
    let ys: Vec<f64> = order.iter().map(|&i| y[i]).collect();
    let k = neighbourhood_size(settings.fraction, n);

    let mean_abs_y = ys.iter().map(|v| v.abs()).sum::<f64>() / n as f64;
    let mut robustness = vec![1.0; n];
    let mut fitted = smooth_pass(&xs, &ys, &robustness, k);

    for iteration in 0..settings.robustness_iterations {
        let abs_residuals: Vec<f64> = ys
            .iter()
            .zip(&fitted)
            .map(|(actual, fit)| (actual - fit).abs())
            .collect();
        let scale = BISQUARE_C * Data::new(abs_residuals.clone()).median();

        if DEBUG_FLAGS.print_loess_iterations {
            log::info!("LOESS pass {}: residual scale {:.6}", iteration + 1, scale);
        }

        // Residuals are negligible: further passes cannot change the fit
        if scale <= 1e-7 * mean_abs_y || scale == 0.0 {
            break;
        }

        for (weight, residual) in robustness.iter_mut().zip(&abs_residuals) {
            *weight = bisquare(*residual, scale);
        }
        fitted = smooth_pass(&xs, &ys, &robustness, k);
    }

    let mut output = vec![0.0; n];
    for (sorted_pos, &original_idx) in order.iter().enumerate() {
        output[original_idx] = fitted[sorted_pos];
    }
    Ok(output)
}

/// LOESS trend of a yearly series.
pub fn fit_loess(series: &TimeSeries, settings: &LoessSettings) -> AnalysisResult<TrendResult> {
    let years: Vec<f64> = series.years().iter().map(|&y| y as f64).collect();
    let smoothed = loess_smooth(&years, series.values(), settings)?;
    Ok(TrendResult::complete(TrendMethod::Loess, smoothed))
}
