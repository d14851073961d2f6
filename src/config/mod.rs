//! Configuration module for the climate trends application.

pub mod analysis;
pub mod datasets;

mod debug; // Private: files use crate::config::DEBUG_FLAGS not crate::config::debug::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod plot;

// Re-export commonly used items
pub use analysis::{ANALYSIS, FitConfig, LoessSettings};
pub use datasets::{DatasetColumns, DatasetConfig, DatasetKind, PRECIPITATION, TEMPERATURE};
