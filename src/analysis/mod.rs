// Trend estimation, evaluation and method selection
pub mod evaluation;
pub mod loess;
pub mod polynomial;
pub mod rolling;
pub mod selection;
pub mod trends;

// Re-export commonly used functions
pub use evaluation::{evaluate, evaluate_values};
pub use loess::fit_loess;
pub use polynomial::{PolynomialFit, fit_polynomial};
pub use rolling::{rolling_mean, rolling_std};
pub use selection::select_best;
pub use trends::fit_trends;
