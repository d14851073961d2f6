use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{DatasetKind, FitConfig};
use crate::domain::{TimeSeries, TrendMethod};
use crate::models::trend::{EvaluationMetrics, TrendResult};

/// Everything computed for one series: the fitted curves, their scores and the winner.
#[derive(Serialize, Debug, Clone)]
pub struct SeriesAnalysis {
    /// Prefix for metric lines and legends, e.g. "Israel".
    pub label: String,
    pub series: TimeSeries,
    pub trends: Vec<TrendResult>,
    pub metrics: Vec<(TrendMethod, EvaluationMetrics)>,
    /// Methods that could not be fitted, with the reason.
    pub skipped: Vec<(TrendMethod, String)>,
    pub best_method: Option<TrendMethod>,
}

impl SeriesAnalysis {
    pub fn trend(&self, method: TrendMethod) -> Option<&TrendResult> {
        self.trends.iter().find(|t| t.method == method)
    }

    pub fn metrics_for(&self, method: TrendMethod) -> Option<&EvaluationMetrics> {
        self.metrics
            .iter()
            .find(|(m, _)| *m == method)
            .map(|(_, metrics)| metrics)
    }
}

/// Result of one full local-vs-reference comparison run.
#[derive(Serialize, Debug, Clone)]
pub struct ComparisonReport {
    pub dataset: DatasetKind,
    pub title: String,
    pub y_axis_title: String,
    pub fit_config: FitConfig,
    pub local: SeriesAnalysis,
    pub reference: SeriesAnalysis,
    pub generated_at: DateTime<Utc>,
}

impl ComparisonReport {
    pub fn analyses(&self) -> [&SeriesAnalysis; 2] {
        [&self.local, &self.reference]
    }
}
