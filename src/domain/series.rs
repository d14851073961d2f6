use std::ops::RangeInclusive;

use serde::Serialize;
use statrs::statistics::Statistics;

use crate::domain::errors::{AnalysisError, AnalysisResult};

// ============================================================================
// TimeSeries: one value per calendar year
// ============================================================================

/// A yearly series. Years are strictly increasing and every value is finite.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub name: String,
    years: Vec<i32>,
    values: Vec<f64>,
}

impl TimeSeries {
    pub fn new(name: impl Into<String>, years: Vec<i32>, values: Vec<f64>) -> AnalysisResult<Self> {
        let name = name.into();
        if years.len() != values.len() {
            return Err(AnalysisError::MalformedColumn(format!(
                "{}: {} years but {} values",
                name,
                years.len(),
                values.len()
            )));
        }

        // Line numbers are 1-based data rows
        if let Some(idx) = years.windows(2).position(|w| w[1] <= w[0]) {
            return Err(AnalysisError::MalformedRow {
                line: idx + 2,
                reason: format!(
                    "{}: year {} does not follow {}",
                    name,
                    years[idx + 1],
                    years[idx]
                ),
            });
        }
        if let Some(idx) = values.iter().position(|v| !v.is_finite()) {
            return Err(AnalysisError::MalformedRow {
                line: idx + 1,
                reason: format!("{}: non-finite value for year {}", name, years[idx]),
            });
        }

        Ok(Self {
            name,
            years,
            values,
        })
    }

    /// Build from (year, value) pairs in any order. Duplicate years are rejected.
    pub fn from_points(
        name: impl Into<String>,
        mut points: Vec<(i32, f64)>,
    ) -> AnalysisResult<Self> {
        points.sort_by_key(|&(year, _)| year);
        let (years, values) = points.into_iter().unzip();
        Self::new(name, years, values)
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.years.iter().copied().zip(self.values.iter().copied())
    }

    pub fn first_year(&self) -> Option<i32> {
        self.years.first().copied()
    }

    pub fn last_year(&self) -> Option<i32> {
        self.years.last().copied()
    }

    /// Convert absolute values into deviations from the mean over `baseline` years
    /// (the whole series when `None`).
    pub fn to_anomalies(&self, baseline: Option<RangeInclusive<i32>>) -> AnalysisResult<Self> {
        let baseline_values: Vec<f64> = self
            .points()
            .filter(|(year, _)| baseline.as_ref().is_none_or(|range| range.contains(year)))
            .map(|(_, value)| value)
            .collect();

        if baseline_values.is_empty() {
            return Err(AnalysisError::InvalidParameter(format!(
                "anomaly baseline {:?} contains no years of {}",
                baseline, self.name
            )));
        }

        let baseline_mean = baseline_values.iter().mean();
        Ok(Self {
            name: self.name.clone(),
            years: self.years.clone(),
            values: self.values.iter().map(|v| v - baseline_mean).collect(),
        })
    }
}

// ============================================================================
// SeriesPair: the local and the reference series of one dataset
// ============================================================================

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SeriesPair {
    local: TimeSeries,
    reference: TimeSeries,
}

impl SeriesPair {
    /// Both series must cover exactly the same years.
    pub fn new(local: TimeSeries, reference: TimeSeries) -> AnalysisResult<Self> {
        if local.years() != reference.years() {
            return Err(AnalysisError::MalformedColumn(format!(
                "{} ({} years, {:?}-{:?}) and {} ({} years, {:?}-{:?}) cover different years",
                local.name,
                local.len(),
                local.first_year(),
                local.last_year(),
                reference.name,
                reference.len(),
                reference.first_year(),
                reference.last_year()
            )));
        }
        Ok(Self { local, reference })
    }

    pub fn local(&self) -> &TimeSeries {
        &self.local
    }

    pub fn reference(&self) -> &TimeSeries {
        &self.reference
    }

    pub fn into_parts(self) -> (TimeSeries, TimeSeries) {
        (self.local, self.reference)
    }

    /// Replace the local series by its anomalies; years are unchanged.
    pub fn with_local_anomalies(self, baseline: Option<RangeInclusive<i32>>) -> AnalysisResult<Self> {
        let local = self.local.to_anomalies(baseline)?;
        Self::new(local, self.reference)
    }
}
