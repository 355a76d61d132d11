//! Long-format panel → canonical per-unit series.
//!
//! Parsing files and choosing columns is the caller's job. This adapter only
//! takes already-typed `(unit, time, value[, pressure])` records, groups them by
//! unit, collapses records that share a time with an [`Aggregation`], and hands
//! back one [`MonitoringUnit`] per unit.

use super::time_series::{CanonicalTimeSeries, MonitoringUnit, PressureCovariate};
use crate::error::{EwsError, Result};
use std::collections::BTreeMap;

/// How records sharing a unit and time are collapsed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aggregation {
    /// Average of replicate measurements (transects, quadrats).
    #[default]
    Mean,
    /// Total across components, e.g. per-taxon cover into total cover.
    Sum,
}

impl Aggregation {
    /// Collapse present values; `None` if every value is missing.
    fn apply(self, values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let total: f64 = values.iter().sum();
        match self {
            Self::Mean => Some(total / values.len() as f64),
            Self::Sum => Some(total),
        }
    }
}

/// One parsed row of a monitoring table.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRecord {
    pub unit: String,
    pub time: f64,
    /// State variable; NaN is treated like `None`.
    pub value: Option<f64>,
    /// Optional exogenous pressure measured alongside the state.
    pub pressure: Option<f64>,
}

impl PanelRecord {
    pub fn new(unit: impl Into<String>, time: f64, value: Option<f64>) -> Self {
        Self {
            unit: unit.into(),
            time,
            value,
            pressure: None,
        }
    }

    pub fn with_pressure(mut self, pressure: Option<f64>) -> Self {
        self.pressure = pressure;
        self
    }
}

/// Group records into one monitoring unit per unit identifier.
///
/// State values are collapsed with `aggregation`; pressure values are always
/// averaged. A covariate is attached only when at least one record of the unit
/// carries a pressure value. NaN values count as missing.
///
/// # Errors
///
/// [`EwsError::InvalidRecord`] names the offending unit for a non-finite time
/// or an infinite state or pressure value; one bad record rejects the whole
/// panel so callers can fix or drop it explicitly. An empty record set is
/// [`EwsError::EmptyData`].
pub fn build_panel<I>(records: I, aggregation: Aggregation) -> Result<BTreeMap<String, MonitoringUnit>>
where
    I: IntoIterator<Item = PanelRecord>,
{
    let mut grouped: BTreeMap<String, Vec<PanelRecord>> = BTreeMap::new();
    for record in records {
        check_record(&record)?;
        grouped.entry(record.unit.clone()).or_default().push(record);
    }

    if grouped.is_empty() {
        return Err(EwsError::EmptyData);
    }

    let mut panel = BTreeMap::new();
    for (unit, mut rows) in grouped {
        rows.sort_by(|a, b| a.time.total_cmp(&b.time));

        let mut times = Vec::new();
        let mut values = Vec::new();
        let mut pressures = Vec::new();
        let mut has_pressure = false;

        for group in rows.chunk_by(|a, b| a.time == b.time) {
            let state: Vec<f64> = group.iter().filter_map(|r| present(r.value)).collect();
            let pressure: Vec<f64> = group.iter().filter_map(|r| present(r.pressure)).collect();
            has_pressure |= !pressure.is_empty();

            times.push(group[0].time);
            values.push(aggregation.apply(&state));
            pressures.push(Aggregation::Mean.apply(&pressure));
        }

        let covariate = if has_pressure {
            Some(PressureCovariate::new(times.clone(), pressures).map_err(|e| in_unit(&unit, e))?)
        } else {
            None
        };
        let mut series = CanonicalTimeSeries::new(times, values).map_err(|e| in_unit(&unit, e))?;
        series.set_label(unit.clone());

        panel.insert(unit, MonitoringUnit { series, covariate });
    }

    Ok(panel)
}

fn check_record(record: &PanelRecord) -> Result<()> {
    let invalid = |message: String| EwsError::InvalidRecord {
        unit: record.unit.clone(),
        message,
    };
    if !record.time.is_finite() {
        return Err(invalid(format!("non-finite time {}", record.time)));
    }
    for (name, value) in [("value", record.value), ("pressure", record.pressure)] {
        if let Some(v) = value.filter(|v| v.is_infinite()) {
            return Err(invalid(format!(
                "non-finite {name} {v} at time {}",
                record.time
            )));
        }
    }
    Ok(())
}

/// Attach the unit name to a construction error (e.g. an aggregate overflowing).
fn in_unit(unit: &str, error: EwsError) -> EwsError {
    EwsError::InvalidRecord {
        unit: unit.to_string(),
        message: error.to_string(),
    }
}

fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

/// Record-length overview of a panel.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelSummary {
    /// Distinct sampled times per unit.
    pub lengths: BTreeMap<String, usize>,
}

impl PanelSummary {
    pub fn from_panel(panel: &BTreeMap<String, MonitoringUnit>) -> Self {
        Self {
            lengths: panel
                .iter()
                .map(|(unit, u)| (unit.clone(), u.series.len()))
                .collect(),
        }
    }

    pub fn unit_count(&self) -> usize {
        self.lengths.len()
    }

    pub fn min_length(&self) -> Option<usize> {
        self.lengths.values().copied().min()
    }

    pub fn max_length(&self) -> Option<usize> {
        self.lengths.values().copied().max()
    }

    /// The unit with the most sampled times; ties go to the first in order.
    pub fn best_sampled(&self) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        for (unit, &len) in &self.lengths {
            if best.map_or(true, |(_, b)| len > b) {
                best = Some((unit, len));
            }
        }
        best.map(|(unit, _)| unit)
    }

    /// Units whose record is shorter than `threshold`.
    pub fn short_record_units(&self, threshold: usize) -> Vec<&str> {
        self.lengths
            .iter()
            .filter(|(_, &len)| len < threshold)
            .map(|(unit, _)| unit.as_str())
            .collect()
    }
}
