// Computed results: fitted trends, scores and reports
pub mod report;
pub mod trend;

pub use report::{ComparisonReport, SeriesAnalysis};
pub use trend::{EvaluationMetrics, TrendResult, TrendSet};
