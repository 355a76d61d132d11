//! Thresholds and window sizes used by the diagnostic stages.

use super::csd::DEFAULT_WINDOW;
use crate::core::SamplingRegime;
use crate::error::{EwsError, Result};

/// Configuration for the early-warning diagnostic engine.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EwsConfig {
    /// Minimum non-missing observations for the regular path.
    pub min_series_length: usize,
    /// Rolling window size (entries, missing ones included).
    pub rolling_window: usize,
    /// `|lag-1 autocorrelation|` below this raises `WeakAutocorr`.
    pub weak_autocorrelation_threshold: f64,
    /// Fewer valid rolling estimates than this raises `RollingDiagnosticsFragile`.
    pub fragile_sample_count_threshold: usize,
    /// Sparse series with fewer observations than this get a `FewSurveys` warning.
    pub sparse_min_length: usize,
    /// Share of gaps equal to the modal gap needed to call a series regular.
    pub regularity_tolerance: f64,
    /// Two gaps count as equal when they differ by at most this fraction of the median gap.
    pub gap_tolerance: f64,
    /// Force the sampling regime instead of inferring it from the time axis.
    pub regime_override: Option<SamplingRegime>,
}

impl Default for EwsConfig {
    fn default() -> Self {
        Self {
            min_series_length: 10,
            rolling_window: DEFAULT_WINDOW,
            weak_autocorrelation_threshold: 0.2,
            fragile_sample_count_threshold: 3,
            sparse_min_length: 5,
            regularity_tolerance: 0.5,
            gap_tolerance: 0.05,
            regime_override: None,
        }
    }
}

impl EwsConfig {
    /// Configuration for survey datasets known to be externally scheduled.
    pub fn survey() -> Self {
        Self {
            regime_override: Some(SamplingRegime::Sparse),
            ..Default::default()
        }
    }

    pub fn min_series_length(mut self, n: usize) -> Self {
        self.min_series_length = n;
        self
    }

    pub fn rolling_window(mut self, window: usize) -> Self {
        self.rolling_window = window;
        self
    }

    pub fn weak_autocorrelation_threshold(mut self, threshold: f64) -> Self {
        self.weak_autocorrelation_threshold = threshold;
        self
    }

    pub fn fragile_sample_count_threshold(mut self, count: usize) -> Self {
        self.fragile_sample_count_threshold = count;
        self
    }

    pub fn sparse_min_length(mut self, n: usize) -> Self {
        self.sparse_min_length = n;
        self
    }

    pub fn regularity_tolerance(mut self, tolerance: f64) -> Self {
        self.regularity_tolerance = tolerance;
        self
    }

    pub fn gap_tolerance(mut self, tolerance: f64) -> Self {
        self.gap_tolerance = tolerance;
        self
    }

    pub fn regime_override(mut self, regime: Option<SamplingRegime>) -> Self {
        self.regime_override = regime;
        self
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.min_series_length == 0 {
            return Err(EwsError::InvalidParameter(
                "min_series_length must be positive".to_string(),
            ));
        }
        if self.rolling_window < 2 {
            return Err(EwsError::InvalidParameter(format!(
                "rolling_window must be at least 2, got {}",
                self.rolling_window
            )));
        }
        if !self.weak_autocorrelation_threshold.is_finite()
            || self.weak_autocorrelation_threshold < 0.0
        {
            return Err(EwsError::InvalidParameter(format!(
                "weak_autocorrelation_threshold must be a non-negative number, got {}",
                self.weak_autocorrelation_threshold
            )));
        }
        if !(self.regularity_tolerance > 0.0 && self.regularity_tolerance <= 1.0) {
            return Err(EwsError::InvalidParameter(format!(
                "regularity_tolerance must be in (0, 1], got {}",
                self.regularity_tolerance
            )));
        }
        if !(self.gap_tolerance >= 0.0 && self.gap_tolerance < 1.0) {
            return Err(EwsError::InvalidParameter(format!(
                "gap_tolerance must be in [0, 1), got {}",
                self.gap_tolerance
            )));
        }
        Ok(())
    }
}
