//! Trend fitting and evaluation configuration

use serde::Serialize;

use crate::domain::{AnalysisError, AnalysisResult};

/// Settings for the LOESS smoother
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoessSettings {
    // Share of all observations used in each local regression, in (0, 1]
    pub fraction: f64,
    // Number of bisquare re-weighting passes after the initial fit
    pub robustness_iterations: usize,
}

/// Settings for method selection
pub struct SelectionSettings {
    // Two R2 values closer than this are treated as a tie
    pub r2_tie_tolerance: f64,
}

/// The Master Analysis Configuration
pub struct AnalysisConfig {
    // Degree of the least-squares polynomial trend
    pub polynomial_degree: usize,
    // Trailing window (in years) for rolling mean / std
    pub rolling_window: usize,

    // Sub-groups
    pub loess: LoessSettings,
    pub selection: SelectionSettings,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    polynomial_degree: 3,
    rolling_window: 10,

    loess: LoessSettings {
        fraction: 0.1,
        // Same pass count as the classic lowess smoother
        robustness_iterations: 3,
    },

    selection: SelectionSettings {
        r2_tie_tolerance: 1e-12,
    },
};

/// Runtime fit parameters: the `ANALYSIS` defaults, optionally overridden from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitConfig {
    pub polynomial_degree: usize,
    pub loess: LoessSettings,
    pub rolling_window: usize,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            polynomial_degree: ANALYSIS.polynomial_degree,
            loess: ANALYSIS.loess,
            rolling_window: ANALYSIS.rolling_window,
        }
    }
}

impl FitConfig {
    pub fn with_degree(mut self, degree: Option<usize>) -> Self {
        if let Some(degree) = degree {
            self.polynomial_degree = degree;
        }
        self
    }

    pub fn with_loess_fraction(mut self, fraction: Option<f64>) -> Self {
        if let Some(fraction) = fraction {
            self.loess.fraction = fraction;
        }
        self
    }

    pub fn with_loess_iterations(mut self, iterations: Option<usize>) -> Self {
        if let Some(iterations) = iterations {
            self.loess.robustness_iterations = iterations;
        }
        self
    }

    pub fn with_window(mut self, window: Option<usize>) -> Self {
        if let Some(window) = window {
            self.rolling_window = window;
        }
        self
    }

    /// Reject parameters no method could run with. Too little data for a method is
    /// not a configuration error and is handled per method instead.
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.polynomial_degree.checked_add(1).is_none() {
            return Err(AnalysisError::InvalidParameter(format!(
                "polynomial degree {} is too large",
                self.polynomial_degree
            )));
        }
        let fraction = self.loess.fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(AnalysisError::InvalidParameter(format!(
                "LOESS fraction must be in (0, 1], got {}",
                fraction
            )));
        }
        if self.rolling_window == 0 {
            return Err(AnalysisError::InvalidParameter(
                "rolling window must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_analysis_config() {
        let config = FitConfig::default();
        assert_eq!(config.polynomial_degree, 3);
        assert_eq!(config.rolling_window, 10);
        assert!((config.loess.fraction - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.loess.robustness_iterations, 3);
    }

    #[test]
    fn test_overrides_only_touch_given_fields() {
        let config = FitConfig::default()
            .with_degree(Some(1))
            .with_loess_fraction(None)
            .with_window(Some(3));
        assert_eq!(config.polynomial_degree, 1);
        assert_eq!(config.rolling_window, 3);
        assert_eq!(config.loess, ANALYSIS.loess);
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        assert!(FitConfig::default().validate().is_ok());
        assert!(FitConfig::default().with_loess_fraction(Some(1.0)).validate().is_ok());

        for config in [
            FitConfig::default().with_loess_fraction(Some(1.5)),
            FitConfig::default().with_loess_fraction(Some(0.0)),
            FitConfig::default().with_loess_fraction(Some(f64::NAN)),
            FitConfig::default().with_window(Some(0)),
            FitConfig::default().with_degree(Some(usize::MAX)),
        ] {
            assert!(matches!(
                config.validate(),
                Err(AnalysisError::InvalidParameter(_))
            ));
        }
    }
}
