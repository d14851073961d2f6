//! Picking the best-fitting method for a series.
//!
//! Rule: highest R² wins. R² values within `r2_tie_tolerance` of each other tie,
//! and ties go to the lower RMSE, then the lower MAE, then the earlier entry.
//! Methods without comparable metrics (NaN, no points) are never chosen.

use std::cmp::Ordering;

use crate::config::ANALYSIS;
use crate::domain::TrendMethod;
use crate::models::EvaluationMetrics;

fn rank(a: &EvaluationMetrics, b: &EvaluationMetrics) -> Ordering {
    if (a.r2 - b.r2).abs() > ANALYSIS.selection.r2_tie_tolerance {
        // Higher R2 first
        return b.r2.total_cmp(&a.r2);
    }
    a.rmse
        .total_cmp(&b.rmse)
        .then_with(|| a.mae.total_cmp(&b.mae))
}

pub fn select_best(metrics: &[(TrendMethod, EvaluationMetrics)]) -> Option<TrendMethod> {
    metrics
        .iter()
        .filter(|(_, m)| m.is_comparable())
        // min_by keeps the first of equal elements
        .min_by(|(_, a), (_, b)| rank(a, b))
        .map(|(method, _)| *method)
}
