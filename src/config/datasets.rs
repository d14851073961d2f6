//! The two fixed datasets compared by the application.

use serde::Serialize;

/// Which columns of the input table hold the year and the two series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetColumns {
    pub year: String,
    pub local: String,
    pub reference: String,
}

/// Static description of a dataset: where it lives, what its columns are called
/// and how the results are labelled.
pub struct DatasetConfig {
    pub kind: DatasetKind,
    pub default_input: &'static str,
    pub year_column: &'static str,
    pub local_column: &'static str,
    pub reference_column: &'static str,
    // Prefix used in metric lines and legends ("Israel Polynomial Trend")
    pub local_label: &'static str,
    pub reference_label: &'static str,
    pub chart_title: &'static str,
    pub y_axis_title: &'static str,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum, strum_macros::Display,
)]
pub enum DatasetKind {
    #[strum(to_string = "temperature")]
    Temperature,
    #[strum(to_string = "precipitation")]
    Precipitation,
}

impl DatasetKind {
    pub fn config(self) -> &'static DatasetConfig {
        match self {
            DatasetKind::Temperature => &TEMPERATURE,
            DatasetKind::Precipitation => &PRECIPITATION,
        }
    }
}

impl DatasetConfig {
    pub fn columns(&self) -> DatasetColumns {
        DatasetColumns {
            year: self.year_column.to_string(),
            local: self.local_column.to_string(),
            reference: self.reference_column.to_string(),
        }
    }
}

pub const TEMPERATURE: DatasetConfig = DatasetConfig {
    kind: DatasetKind::Temperature,
    default_input: "data/temperature_data.csv",
    year_column: "Year",
    local_column: "Israel Anomaly",
    reference_column: "Global Anomaly",
    local_label: "Israel",
    reference_label: "Global",
    chart_title: "Temperature Anomalies: Israel vs. Global",
    y_axis_title: "Temperature Anomaly (°C)",
};

pub const PRECIPITATION: DatasetConfig = DatasetConfig {
    kind: DatasetKind::Precipitation,
    default_input: "data/Precipitation_analysis.csv",
    year_column: "year",
    local_column: "Israel Precipitation",
    reference_column: "Global Average Precipitation",
    local_label: "Israel",
    reference_label: "Global",
    chart_title: "Precipitation: Israel vs. Global",
    y_axis_title: "Precipitation (mm)",
};
