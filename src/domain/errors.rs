use std::path::PathBuf;

use crate::domain::trend_method::TrendMethod;

/// Error type for loading, fitting and evaluating climate series.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Input file not found: {}", .path.display())]
    InputNotFound { path: PathBuf },

    #[error("Malformed row {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("Malformed column: {0}")]
    MalformedColumn(String),

    #[error("Insufficient data for {method}: got {got} points, need at least {required}")]
    InsufficientData {
        method: TrendMethod,
        got: usize,
        required: usize,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
