//! Can the data support an early-warning signal at all?
//!
//! Rules, applied in order:
//!
//! 1. `signal_std` is the sample std of the observed values and `noise_std`
//!    the sample std of their first differences.
//! 2. `noise_std > signal_std` raises [`WarningCode::NoiseDominates`].
//! 3. Undefined lag-1 autocorrelation raises [`WarningCode::AutocorrUndefined`];
//!    a magnitude below the weak threshold raises [`WarningCode::WeakAutocorr`].
//! 4. Fewer valid rolling estimates than the fragile threshold raises
//!    [`WarningCode::RollingDiagnosticsFragile`].
//! 5. The fixed [`INTERPRETATION`] caveat is always attached.

use super::config::EwsConfig;
use super::csd::{CSDResult, CSDSignalAnalyzer};
use crate::core::{CanonicalTimeSeries, WarningCode, INTERPRETATION};
use crate::utils::stats;
use std::collections::BTreeSet;

/// Output of [`DetectabilityAssessor::assess`].
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DetectabilityResult {
    pub signal_std: Option<f64>,
    pub noise_std: Option<f64>,
    pub lag1_autocorrelation: Option<f64>,
    pub valid_rolling_variance: usize,
    pub valid_rolling_autocorrelation: usize,
    pub warnings: BTreeSet<WarningCode>,
    pub interpretation: &'static str,
}

impl DetectabilityResult {
    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.contains(&code)
    }
}

/// Judges whether noise, autocorrelation and sample size permit detection.
#[derive(Debug, Clone)]
pub struct DetectabilityAssessor {
    window: usize,
    weak_autocorrelation_threshold: f64,
    fragile_sample_count_threshold: usize,
}

impl Default for DetectabilityAssessor {
    fn default() -> Self {
        Self::new(&EwsConfig::default())
    }
}

impl DetectabilityAssessor {
    pub fn new(config: &EwsConfig) -> Self {
        Self {
            window: config.rolling_window,
            weak_autocorrelation_threshold: config.weak_autocorrelation_threshold,
            fragile_sample_count_threshold: config.fragile_sample_count_threshold,
        }
    }

    /// Assess a series, running the rolling CSD check internally.
    pub fn assess(&self, series: &CanonicalTimeSeries) -> DetectabilityResult {
        let csd = CSDSignalAnalyzer::new(self.window).analyze(series);
        self.assess_with(series, &csd)
    }

    /// Assess a series reusing an existing CSD result for the rolling counts.
    pub fn assess_with(&self, series: &CanonicalTimeSeries, csd: &CSDResult) -> DetectabilityResult {
        let observed = series.observed_values();
        let mut warnings = BTreeSet::new();

        let signal_std = stats::std_dev(&observed);
        let noise_std = stats::std_dev(&stats::first_differences(&observed));
        if let (Some(signal), Some(noise)) = (signal_std, noise_std) {
            if noise > signal {
                warnings.insert(WarningCode::NoiseDominates);
            }
        }

        let lag1_autocorrelation = stats::lag1_autocorrelation(&observed);
        match lag1_autocorrelation {
            None => {
                warnings.insert(WarningCode::AutocorrUndefined);
            }
            Some(r) if r.abs() < self.weak_autocorrelation_threshold => {
                warnings.insert(WarningCode::WeakAutocorr);
            }
            Some(_) => {}
        }

        let valid_rolling_variance = csd.valid_variance_count();
        let valid_rolling_autocorrelation = csd.valid_autocorrelation_count();
        if valid_rolling_variance < self.fragile_sample_count_threshold
            || valid_rolling_autocorrelation < self.fragile_sample_count_threshold
        {
            warnings.insert(WarningCode::RollingDiagnosticsFragile);
        }

        DetectabilityResult {
            signal_std,
            noise_std,
            lag1_autocorrelation,
            valid_rolling_variance,
            valid_rolling_autocorrelation,
            warnings,
            interpretation: INTERPRETATION,
        }
    }
}
