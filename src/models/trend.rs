use serde::Serialize;

use crate::domain::{AnalysisError, AnalysisResult, TrendMethod};

// ============================================================================
// TrendResult: fitted values aligned with the input years
// ============================================================================

/// One fitted curve. `values[i]` belongs to the i-th year of the source series;
/// `None` marks positions the method cannot define (leading rolling-window gap).
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TrendResult {
    pub method: TrendMethod,
    pub values: Vec<Option<f64>>,
}

impl TrendResult {
    pub fn new(method: TrendMethod, values: Vec<Option<f64>>) -> Self {
        Self { method, values }
    }

    /// Wrap a fully defined curve.
    pub fn complete(method: TrendMethod, values: Vec<f64>) -> Self {
        Self {
            method,
            values: values.into_iter().map(Some).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// (year, value) pairs for the defined positions only.
    pub fn defined_points<'a>(&'a self, years: &'a [i32]) -> impl Iterator<Item = (i32, f64)> + 'a {
        years
            .iter()
            .zip(self.values.iter())
            .filter_map(|(&year, value)| value.map(|v| (year, v)))
    }
}

// ============================================================================
// TrendSet: every method's outcome for one series
// ============================================================================

/// Each method fails independently, so one short series does not discard the others.
#[derive(Debug)]
pub struct TrendSet {
    pub polynomial: AnalysisResult<TrendResult>,
    pub loess: AnalysisResult<TrendResult>,
    pub rolling_mean: AnalysisResult<TrendResult>,
    pub rolling_std: AnalysisResult<TrendResult>,
}

impl TrendSet {
    pub fn get(&self, method: TrendMethod) -> &AnalysisResult<TrendResult> {
        match method {
            TrendMethod::Polynomial => &self.polynomial,
            TrendMethod::Loess => &self.loess,
            TrendMethod::RollingMean => &self.rolling_mean,
            TrendMethod::RollingStd => &self.rolling_std,
        }
    }

    /// Consume the set, keeping successful results and returning the methods skipped
    /// for lack of data separately. Any other failure is returned as the error.
    pub fn into_parts(self) -> AnalysisResult<(Vec<TrendResult>, Vec<(TrendMethod, String)>)> {
        let mut fitted = Vec::new();
        let mut failed = Vec::new();
        for (method, result) in [
            (TrendMethod::Polynomial, self.polynomial),
            (TrendMethod::Loess, self.loess),
            (TrendMethod::RollingMean, self.rolling_mean),
            (TrendMethod::RollingStd, self.rolling_std),
        ] {
            match result {
                Ok(trend) => fitted.push(trend),
                Err(e @ AnalysisError::InsufficientData { .. }) => {
                    failed.push((method, e.to_string()))
                }
                Err(e) => return Err(e),
            }
        }
        Ok((fitted, failed))
    }
}

// ============================================================================
// EvaluationMetrics
// ============================================================================

/// Goodness of fit over the positions where the prediction is defined.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct EvaluationMetrics {
    /// Coefficient of determination; NaN when the actual values have zero variance.
    pub r2: f64,
    pub mae: f64,
    pub rmse: f64,
    /// Number of compared points.
    pub n: usize,
}

impl EvaluationMetrics {
    pub fn undefined() -> Self {
        Self {
            r2: f64::NAN,
            mae: f64::NAN,
            rmse: f64::NAN,
            n: 0,
        }
    }

    pub fn is_comparable(&self) -> bool {
        self.n > 0 && self.r2.is_finite() && self.rmse.is_finite() && self.mae.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defined_points_skip_gaps() {
        let trend = TrendResult::new(TrendMethod::RollingMean, vec![None, Some(1.5), Some(2.5)]);
        let points: Vec<(i32, f64)> = trend.defined_points(&[2000, 2001, 2002]).collect();
        assert_eq!(points, vec![(2001, 1.5), (2002, 2.5)]);
        assert_eq!(trend.defined_count(), 2);
    }

    #[test]
    fn test_into_parts_splits_failures() {
        let set = TrendSet {
            polynomial: Ok(TrendResult::complete(TrendMethod::Polynomial, vec![1.0])),
            loess: Ok(TrendResult::complete(TrendMethod::Loess, vec![1.0])),
            rolling_mean: Err(AnalysisError::InsufficientData {
                method: TrendMethod::RollingMean,
                got: 1,
                required: 10,
            }),
            rolling_std: Err(AnalysisError::InsufficientData {
                method: TrendMethod::RollingStd,
                got: 1,
                required: 10,
            }),
        };
        let (fitted, failed) = set.into_parts().unwrap();
        assert_eq!(fitted.len(), 2);
        assert_eq!(failed.len(), 2);
        assert_eq!(failed[0].0, TrendMethod::RollingMean);
    }

    #[test]
    fn test_into_parts_propagates_parameter_errors() {
        let set = TrendSet {
            polynomial: Ok(TrendResult::complete(TrendMethod::Polynomial, vec![1.0])),
            loess: Err(AnalysisError::InvalidParameter("fraction".to_string())),
            rolling_mean: Ok(TrendResult::complete(TrendMethod::RollingMean, vec![1.0])),
            rolling_std: Ok(TrendResult::new(TrendMethod::RollingStd, vec![None])),
        };
        assert!(matches!(
            set.into_parts(),
            Err(AnalysisError::InvalidParameter(_))
        ));
    }
}
