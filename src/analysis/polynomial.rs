//! Least-squares polynomial trend.
//!
//! Years are centred on their mean and scaled into `[-1, 1]` before building the
//! Vandermonde matrix. Raw calendar years raised to the third power sit around 8e9,
//! which makes the normal equations useless; the scaled basis spans the same
//! polynomial space, so evaluated values are unchanged.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::config::DEBUG_FLAGS;
use crate::domain::{AnalysisError, AnalysisResult, TimeSeries, TrendMethod};
use crate::models::TrendResult;

/// Singular values below this are treated as zero by the SVD solve.
const SINGULAR_VALUE_EPS: f64 = 1e-12;

/// A fitted polynomial `p(t) = c0 + c1 t + ... + cd t^d` with `t = (year - center) / scale`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PolynomialFit {
    /// Coefficients in ascending powers of the scaled year.
    pub coefficients: Vec<f64>,
    pub center: f64,
    pub scale: f64,
}

impl PolynomialFit {
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    #[inline]
    fn scaled(&self, year: f64) -> f64 {
        (year - self.center) / self.scale
    }

    /// Evaluate the polynomial at a calendar year (Horner's scheme).
    pub fn predict(&self, year: f64) -> f64 {
        let t = self.scaled(year);
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * t + c)
    }
}

/// Fit a degree-`degree` polynomial to (year, value) by least squares.
pub fn fit_polynomial_model(series: &TimeSeries, degree: usize) -> AnalysisResult<PolynomialFit> {
    let n = series.len();
    let required = degree.checked_add(1).ok_or_else(|| {
        AnalysisError::InvalidParameter(format!("polynomial degree {} is too large", degree))
    })?;
    if n < required {
        return Err(AnalysisError::InsufficientData {
            method: TrendMethod::Polynomial,
            got: n,
            required,
        });
    }

    let years: Vec<f64> = series.years().iter().map(|&y| y as f64).collect();
    let center = years.iter().sum::<f64>() / n as f64;
    let max_offset = years
        .iter()
        .map(|y| (y - center).abs())
        .fold(0.0_f64, f64::max);
    let scale = if max_offset > 0.0 { max_offset } else { 1.0 };

    let design = DMatrix::from_fn(n, required, |row, col| {
        ((years[row] - center) / scale).powi(col as i32)
    });
    let observed = DVector::from_column_slice(series.values());

    let svd = design.svd(true, true);
    let solution = svd
        .solve(&observed, SINGULAR_VALUE_EPS)
        .map_err(|e| AnalysisError::InvalidParameter(format!("polynomial least squares: {}", e)))?;

    let fit = PolynomialFit {
        coefficients: solution.iter().copied().collect(),
        center,
        scale,
    };

    if DEBUG_FLAGS.print_polynomial_coefficients {
        log::info!(
            "{}: degree {} coefficients {:?} (center {}, scale {})",
            series.name,
            degree,
            fit.coefficients,
            fit.center,
            fit.scale
        );
    }

    Ok(fit)
}

/// Polynomial trend evaluated at every observed year.
pub fn fit_polynomial(series: &TimeSeries, degree: usize) -> AnalysisResult<TrendResult> {
    let fit = fit_polynomial_model(series, degree)?;
    let values = series
        .years()
        .iter()
        .map(|&year| fit.predict(year as f64))
        .collect();
    Ok(TrendResult::complete(TrendMethod::Polynomial, values))
}
