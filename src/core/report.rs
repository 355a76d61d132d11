//! Structured per-unit diagnostic output.
//!
//! A [`DiagnosticReport`] is assembled once by the engine and is read-only from
//! then on. Rendering (console, dashboard, files) happens outside the crate.

use std::collections::BTreeSet;
use std::fmt;

/// Fixed caveat carried by every report.
pub const INTERPRETATION: &str = "Even if a tipping point existed in the underlying system, \
the combination of noise level, autocorrelation structure, and limited temporal resolution \
may prevent reliable detection of early-warning signals in this dataset. \
Absence of a detectable signal is not evidence that no transition is underway.";

/// Fixed caveat carried by every sparse-path result.
pub const SPARSE_NOTE: &str = "This series is externally forced and irregularly sampled. \
Absence of early-warning signals is expected and does not imply system stability. \
Threshold-like jumps are better attributed to identifiable external stressors \
than to an intrinsic tipping dynamic.";

/// Whether a unit had enough data to be analysed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    InsufficientData,
}

impl Status {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::InsufficientData => "INSUFFICIENT_DATA",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a series was sampled, as seen by the validator.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplingRegime {
    /// Regularly spaced monitoring; eligible for rolling-window diagnostics.
    Regular,
    /// Snapshot surveys at irregular, externally driven intervals.
    Sparse,
}

impl SamplingRegime {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Sparse => "sparse",
        }
    }
}

/// Direction of a rolling statistic from its first to its last valid estimate.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trend {
    Increasing,
    Decreasing,
    Undefined,
}

impl Trend {
    /// Compare the earliest and latest valid values.
    ///
    /// `Increasing` iff last > first; a single valid value compares with
    /// itself and is therefore `Decreasing`.
    pub fn from_valid(valid: &[f64]) -> Self {
        match (valid.first(), valid.last()) {
            (Some(first), Some(last)) if last > first => Self::Increasing,
            (Some(_), Some(_)) => Self::Decreasing,
            _ => Self::Undefined,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Undefined => "undefined",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory conditions attached to an otherwise complete report.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WarningCode {
    /// Year-to-year variability exceeds the variability of the state itself.
    NoiseDominates,
    /// Lag-1 autocorrelation too weak for CSD indicators to be informative.
    WeakAutocorr,
    /// Lag-1 autocorrelation could not be computed (e.g. zero variance).
    AutocorrUndefined,
    /// Too few valid rolling-window estimates to read a trend.
    RollingDiagnosticsFragile,
    /// A pressure covariate was supplied on a different time axis.
    CovariateMisaligned,
    /// Sparse record with fewer surveys than the configured minimum.
    FewSurveys,
}

impl WarningCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoiseDominates => "NOISE_DOMINATES",
            Self::WeakAutocorr => "WEAK_AUTOCORR",
            Self::AutocorrUndefined => "AUTOCORR_UNDEFINED",
            Self::RollingDiagnosticsFragile => "ROLLING_DIAGNOSTICS_FRAGILE",
            Self::CovariateMisaligned => "COVARIATE_MISALIGNED",
            Self::FewSurveys => "FEW_SURVEYS",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rolling-window estimates aligned to the series' entries.
///
/// Entry `i` is the statistic of the window ending at entry `i`; `None` marks a
/// skipped position.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RollingDiagnostics {
    pub window: usize,
    pub times: Vec<f64>,
    pub variance: Vec<Option<f64>>,
    pub autocorrelation: Vec<Option<f64>>,
}

impl RollingDiagnostics {
    pub fn valid_variance_count(&self) -> usize {
        self.variance.iter().flatten().count()
    }

    pub fn valid_autocorrelation_count(&self) -> usize {
        self.autocorrelation.iter().flatten().count()
    }

    /// The last `n` valid variance estimates as `(time, value)` pairs.
    pub fn recent_variance(&self, n: usize) -> Vec<(f64, f64)> {
        recent(&self.times, &self.variance, n)
    }

    /// The last `n` valid autocorrelation estimates as `(time, value)` pairs.
    pub fn recent_autocorrelation(&self, n: usize) -> Vec<(f64, f64)> {
        recent(&self.times, &self.autocorrelation, n)
    }
}

fn recent(times: &[f64], values: &[Option<f64>], n: usize) -> Vec<(f64, f64)> {
    let mut out: Vec<(f64, f64)> = times
        .iter()
        .zip(values)
        .rev()
        .filter_map(|(&t, v)| v.map(|v| (t, v)))
        .take(n)
        .collect();
    out.reverse();
    out
}

/// Descriptive summary of a pressure covariate over the state series' span.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureSummary {
    pub count: usize,
    pub min: f64,
    pub mean: f64,
    pub max: f64,
    /// Sample standard deviation; `None` with fewer than two values.
    pub std: Option<f64>,
}

/// Output of the sparse (survey-style) assessment path.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SparseResult {
    pub observations: usize,
    pub span: Option<(f64, f64)>,
    pub max_inter_survey_change: Option<f64>,
    pub pressure: Option<PressureSummary>,
    pub warnings: BTreeSet<WarningCode>,
    pub note: &'static str,
}

/// One report per spatial unit.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticReport {
    pub(crate) span: Option<(f64, f64)>,
    pub(crate) length: usize,
    pub(crate) status: Status,
    pub(crate) regime: SamplingRegime,
    pub(crate) signal_std: Option<f64>,
    pub(crate) noise_std: Option<f64>,
    pub(crate) lag1_autocorrelation: Option<f64>,
    pub(crate) max_step: Option<f64>,
    pub(crate) rolling_variance_trend: Trend,
    pub(crate) rolling_autocorrelation_trend: Trend,
    pub(crate) rolling: Option<RollingDiagnostics>,
    pub(crate) sparse: Option<SparseResult>,
    pub(crate) warnings: BTreeSet<WarningCode>,
    pub(crate) interpretation: &'static str,
}

impl DiagnosticReport {
    /// A report carrying only the validator's summary.
    pub(crate) fn skeleton(
        span: Option<(f64, f64)>,
        length: usize,
        status: Status,
        regime: SamplingRegime,
    ) -> Self {
        Self {
            span,
            length,
            status,
            regime,
            signal_std: None,
            noise_std: None,
            lag1_autocorrelation: None,
            max_step: None,
            rolling_variance_trend: Trend::Undefined,
            rolling_autocorrelation_trend: Trend::Undefined,
            rolling: None,
            sparse: None,
            warnings: BTreeSet::new(),
            interpretation: INTERPRETATION,
        }
    }

    pub fn span(&self) -> Option<(f64, f64)> {
        self.span
    }

    /// Count of non-missing observations.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    pub fn regime(&self) -> SamplingRegime {
        self.regime
    }

    pub fn signal_std(&self) -> Option<f64> {
        self.signal_std
    }

    pub fn noise_std(&self) -> Option<f64> {
        self.noise_std
    }

    pub fn lag1_autocorrelation(&self) -> Option<f64> {
        self.lag1_autocorrelation
    }

    pub fn max_step(&self) -> Option<f64> {
        self.max_step
    }

    pub fn rolling_variance_trend(&self) -> Trend {
        self.rolling_variance_trend
    }

    pub fn rolling_autocorrelation_trend(&self) -> Trend {
        self.rolling_autocorrelation_trend
    }

    pub fn rolling(&self) -> Option<&RollingDiagnostics> {
        self.rolling.as_ref()
    }

    pub fn sparse(&self) -> Option<&SparseResult> {
        self.sparse.as_ref()
    }

    pub fn warnings(&self) -> &BTreeSet<WarningCode> {
        &self.warnings
    }

    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.contains(&code)
    }

    pub fn interpretation(&self) -> &'static str {
        self.interpretation
    }
}
