// Data loading, preparation and export
pub mod export;
pub mod loader;
pub mod precipitation;

// Re-export commonly used functions
pub use export::{write_report_json, write_trends_csv};
pub use loader::{LoadedSeries, load_series_pair};
pub use precipitation::{PrecipitationRow, prepare_precipitation, write_precipitation_csv};
