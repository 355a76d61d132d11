//! Survey-style series: jump size and pressure context instead of rolling statistics.
//!
//! Reef surveys repeated every few years cannot satisfy rolling-window
//! preconditions, so no trend classification is attempted here. The result
//! always carries [`SPARSE_NOTE`].

use crate::core::{
    CanonicalTimeSeries, PressureCovariate, PressureSummary, SparseResult, WarningCode, SPARSE_NOTE,
};
use crate::utils::stats;
use std::collections::BTreeSet;

/// Assessor for snapshot series sampled on external schedules.
#[derive(Debug, Clone, Copy, Default)]
pub struct SparseSeriesAssessor;

impl SparseSeriesAssessor {
    pub fn new() -> Self {
        Self
    }

    pub fn assess_sparse(
        &self,
        series: &CanonicalTimeSeries,
        covariate: Option<&PressureCovariate>,
    ) -> SparseResult {
        let span = series.span();
        let mut warnings = BTreeSet::new();

        let pressure = match covariate {
            Some(c) if c.is_aligned_with(series) => {
                span.and_then(|(start, end)| summarize_pressure(&c.observed_within(start, end)))
            }
            Some(_) => {
                warnings.insert(WarningCode::CovariateMisaligned);
                None
            }
            None => None,
        };

        SparseResult {
            observations: series.observed_len(),
            span,
            max_inter_survey_change: stats::max_abs(&series.first_differences()),
            pressure,
            warnings,
            note: SPARSE_NOTE,
        }
    }
}

/// Count, min, mean, max and sample std of pressure values.
pub fn summarize_pressure(values: &[f64]) -> Option<PressureSummary> {
    let (min, max) = stats::min_max(values)?;
    Some(PressureSummary {
        count: values.len(),
        min,
        mean: stats::mean(values)?,
        max,
        std: stats::std_dev(values),
    })
}
