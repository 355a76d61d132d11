//! Critical-slowing-down check from rolling variance and autocorrelation.
//!
//! Near a critical transition a system recovers more slowly from perturbations,
//! which shows up as rising variance and rising lag-1 autocorrelation. This
//! module only reports the *direction* of both rolling statistics between the
//! first and last valid window; with the short records typical of ecological
//! monitoring no significance test is attempted.

use crate::core::{CanonicalTimeSeries, RollingDiagnostics, Trend};
use crate::transform::{rolling_lag1_autocorrelation, rolling_var, valid_values};
use crate::utils::stats;

/// Default rolling window size.
pub const DEFAULT_WINDOW: usize = 5;

/// Result of the rolling CSD check.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CSDResult {
    pub rolling_variance_trend: Trend,
    pub rolling_autocorrelation_trend: Trend,
    /// Largest absolute change between consecutive observations.
    pub max_step: Option<f64>,
    pub rolling: RollingDiagnostics,
}

impl CSDResult {
    pub fn valid_variance_count(&self) -> usize {
        self.rolling.valid_variance_count()
    }

    pub fn valid_autocorrelation_count(&self) -> usize {
        self.rolling.valid_autocorrelation_count()
    }
}

/// Rolling-window critical-slowing-down analyzer.
#[derive(Debug, Clone)]
pub struct CSDSignalAnalyzer {
    window: usize,
}

impl Default for CSDSignalAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl CSDSignalAnalyzer {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn analyze(&self, series: &CanonicalTimeSeries) -> CSDResult {
        let max_step = stats::max_abs(&series.first_differences());

        let variance = rolling_var(series.values(), self.window);
        let autocorrelation = rolling_lag1_autocorrelation(series.values(), self.window);

        CSDResult {
            rolling_variance_trend: Trend::from_valid(&valid_values(&variance)),
            rolling_autocorrelation_trend: Trend::from_valid(&valid_values(&autocorrelation)),
            max_step,
            rolling: RollingDiagnostics {
                window: self.window,
                times: series.times().to_vec(),
                variance,
                autocorrelation,
            },
        }
    }
}
