// Domain types and value objects
pub mod errors;
pub mod series;
pub mod trend_method;

// Re-export commonly used types
pub use errors::{AnalysisError, AnalysisResult};
pub use series::{SeriesPair, TimeSeries};
pub use trend_method::TrendMethod;
