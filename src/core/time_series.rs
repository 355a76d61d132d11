//! Canonical per-unit time series and the optional pressure covariate.

use crate::error::{EwsError, Result};
use crate::utils::stats;
use chrono::{Datelike, NaiveDate};

/// A single `(time, value)` entry. `value == None` is an explicit non-observation.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub time: f64,
    pub value: Option<f64>,
}

/// Ordered, gap-aware time series for one spatial unit.
///
/// Times are finite and strictly increasing; present values are finite.
/// Both invariants are enforced at construction.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalTimeSeries {
    times: Vec<f64>,
    values: Vec<Option<f64>>,
    label: Option<String>,
}

/// Builder for constructing a [`CanonicalTimeSeries`].
#[derive(Debug, Clone, Default)]
pub struct CanonicalTimeSeriesBuilder {
    times: Vec<f64>,
    values: Vec<Option<f64>>,
    label: Option<String>,
}

impl CanonicalTimeSeriesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn times(mut self, times: Vec<f64>) -> Self {
        self.times = times;
        self
    }

    /// Set observation dates; converted to decimal years.
    pub fn dates(mut self, dates: &[NaiveDate]) -> Self {
        self.times = dates.iter().map(|d| decimal_year(*d)).collect();
        self
    }

    pub fn values(mut self, values: Vec<Option<f64>>) -> Self {
        self.values = values;
        self
    }

    /// Set values where NaN marks a missing observation.
    pub fn raw_values(mut self, values: Vec<f64>) -> Self {
        self.values = nan_as_missing(values);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn build(self) -> Result<CanonicalTimeSeries> {
        let mut series = CanonicalTimeSeries::new(self.times, self.values)?;
        series.label = self.label;
        Ok(series)
    }
}

impl CanonicalTimeSeries {
    /// Create a series from parallel time and value vectors.
    pub fn new(times: Vec<f64>, values: Vec<Option<f64>>) -> Result<Self> {
        if values.len() != times.len() {
            return Err(EwsError::DimensionMismatch {
                expected: times.len(),
                got: values.len(),
            });
        }
        validate_time_axis(&times)?;
        validate_values(&values)?;

        Ok(Self {
            times,
            values,
            label: None,
        })
    }

    /// Create a series from raw values where NaN marks a missing observation.
    pub fn from_raw(times: Vec<f64>, values: Vec<f64>) -> Result<Self> {
        Self::new(times, nan_as_missing(values))
    }

    /// Create a series indexed by calendar dates (converted to decimal years).
    pub fn from_dates(dates: &[NaiveDate], values: Vec<Option<f64>>) -> Result<Self> {
        Self::new(dates.iter().map(|d| decimal_year(*d)).collect(), values)
    }

    /// Total number of entries, including missing ones.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Values in time order, `None` where missing.
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    pub fn observations(&self) -> impl Iterator<Item = Observation> + '_ {
        self.times
            .iter()
            .zip(&self.values)
            .map(|(&time, &value)| Observation { time, value })
    }

    /// Check if the series has missing entries.
    pub fn has_missing_values(&self) -> bool {
        self.values.iter().any(Option::is_none)
    }

    /// Number of non-missing observations.
    pub fn observed_len(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Non-missing values, in time order.
    pub fn observed_values(&self) -> Vec<f64> {
        self.values.iter().flatten().copied().collect()
    }

    /// Times of non-missing observations.
    pub fn observed_times(&self) -> Vec<f64> {
        self.observations()
            .filter(|o| o.value.is_some())
            .map(|o| o.time)
            .collect()
    }

    /// `(min, max)` time over non-missing observations.
    pub fn span(&self) -> Option<(f64, f64)> {
        let mut observed = self.observations().filter(|o| o.value.is_some());
        let first = observed.next()?.time;
        let last = observed.last().map_or(first, |o| o.time);
        Some((first, last))
    }

    /// Differences between consecutive non-missing values.
    pub fn first_differences(&self) -> Vec<f64> {
        stats::first_differences(&self.observed_values())
    }

    /// Time gaps between consecutive non-missing observations.
    pub fn observed_gaps(&self) -> Vec<f64> {
        stats::first_differences(&self.observed_times())
    }
}

/// Exogenous stressor magnitudes sharing the state series' time axis.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PressureCovariate {
    times: Vec<f64>,
    values: Vec<Option<f64>>,
}

impl PressureCovariate {
    pub fn new(times: Vec<f64>, values: Vec<Option<f64>>) -> Result<Self> {
        if values.len() != times.len() {
            return Err(EwsError::DimensionMismatch {
                expected: times.len(),
                got: values.len(),
            });
        }
        validate_time_axis(&times)?;
        validate_values(&values)?;
        Ok(Self { times, values })
    }

    /// Create a covariate from raw values where NaN marks a missing observation.
    pub fn from_raw(times: Vec<f64>, values: Vec<f64>) -> Result<Self> {
        Self::new(times, nan_as_missing(values))
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// A covariate is aligned when it carries exactly the series' time axis.
    pub fn is_aligned_with(&self, series: &CanonicalTimeSeries) -> bool {
        self.times == series.times
    }

    /// Non-missing values whose time lies inside `[start, end]`.
    pub fn observed_within(&self, start: f64, end: f64) -> Vec<f64> {
        self.times
            .iter()
            .zip(&self.values)
            .filter(|&(&t, _)| t >= start && t <= end)
            .filter_map(|(_, v)| *v)
            .collect()
    }
}

/// Everything the engine needs about one spatial unit.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct MonitoringUnit {
    pub series: CanonicalTimeSeries,
    pub covariate: Option<PressureCovariate>,
}

impl MonitoringUnit {
    pub fn new(series: CanonicalTimeSeries) -> Self {
        Self {
            series,
            covariate: None,
        }
    }

    pub fn with_covariate(mut self, covariate: PressureCovariate) -> Self {
        self.covariate = Some(covariate);
        self
    }
}

impl From<CanonicalTimeSeries> for MonitoringUnit {
    fn from(series: CanonicalTimeSeries) -> Self {
        Self::new(series)
    }
}

/// Convert a calendar date to a decimal year (e.g. 2020-07-02 → ~2020.5).
pub fn decimal_year(date: NaiveDate) -> f64 {
    let year = date.year();
    let days_in_year = if NaiveDate::from_ymd_opt(year, 12, 31).map(|d| d.ordinal()) == Some(366) {
        366.0
    } else {
        365.0
    };
    year as f64 + f64::from(date.ordinal0()) / days_in_year
}

fn nan_as_missing(values: Vec<f64>) -> Vec<Option<f64>> {
    values
        .into_iter()
        .map(|v| if v.is_nan() { None } else { Some(v) })
        .collect()
}

fn validate_time_axis(times: &[f64]) -> Result<()> {
    if let Some(index) = times.iter().position(|t| !t.is_finite()) {
        return Err(EwsError::TimestampError(format!(
            "time at index {index} is not finite"
        )));
    }
    if times.windows(2).any(|w| w[1] <= w[0]) {
        return Err(EwsError::TimestampError(
            "times must be strictly increasing".to_string(),
        ));
    }
    Ok(())
}

fn validate_values(values: &[Option<f64>]) -> Result<()> {
    for (index, value) in values.iter().enumerate() {
        if let Some(v) = value {
            if !v.is_finite() {
                return Err(EwsError::InvalidValue { index, value: *v });
            }
        }
    }
    Ok(())
}
