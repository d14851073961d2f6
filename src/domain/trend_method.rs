use serde::Serialize;

/// The smoothing/fitting techniques applied to every series.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Debug,
    Serialize,
    strum_macros::EnumIter,
    strum_macros::Display,
)]
pub enum TrendMethod {
    #[strum(to_string = "Polynomial")]
    Polynomial,
    #[strum(to_string = "LOESS")]
    Loess,
    #[strum(to_string = "Rolling Mean")]
    RollingMean,
    #[strum(to_string = "Rolling Std")]
    RollingStd,
}

impl TrendMethod {
    /// Methods that produce a fitted curve and are scored against the raw series.
    /// Rolling std measures dispersion, so it is never scored.
    pub const EVALUATED: [TrendMethod; 3] = [
        TrendMethod::Polynomial,
        TrendMethod::Loess,
        TrendMethod::RollingMean,
    ];

    /// Label used in the printed metric lines.
    pub fn metrics_label(self) -> &'static str {
        match self {
            TrendMethod::Polynomial => "Polynomial Regression",
            TrendMethod::Loess => "LOESS",
            TrendMethod::RollingMean => "Rolling Mean",
            TrendMethod::RollingStd => "Rolling Std",
        }
    }

    /// Label used in chart legends.
    pub fn legend_label(self) -> &'static str {
        match self {
            TrendMethod::Polynomial => "Polynomial Trend",
            TrendMethod::Loess => "LOESS Trend",
            TrendMethod::RollingMean => "Rolling Mean",
            TrendMethod::RollingStd => "Rolling Std",
        }
    }

    pub fn is_evaluated(self) -> bool {
        Self::EVALUATED.contains(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_only_rolling_std_is_unscored() {
        let unscored: Vec<TrendMethod> = TrendMethod::iter().filter(|m| !m.is_evaluated()).collect();
        assert_eq!(unscored, vec![TrendMethod::RollingStd]);
    }

    #[test]
    fn test_labels() {
        assert_eq!(TrendMethod::Polynomial.metrics_label(), "Polynomial Regression");
        assert_eq!(TrendMethod::Loess.legend_label(), "LOESS Trend");
        assert_eq!(TrendMethod::RollingMean.to_string(), "Rolling Mean");
    }
}
