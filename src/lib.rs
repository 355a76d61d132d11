//! # anofox-ews
//!
//! Detectability diagnostics for early-warning signals of critical
//! transitions in ecological monitoring data.
//!
//! Rather than claiming that a tipping point is approaching, the crate
//! reports whether a series *could* support such a claim: is it long enough,
//! is the year-to-year noise smaller than the signal, is there enough
//! autocorrelation, and are there enough valid rolling-window estimates.
//! Survey-style series sampled at irregular intervals are routed to a
//! separate path that reports jump sizes and pressure context instead.

#![allow(clippy::upper_case_acronyms)]

pub mod core;
pub mod diagnostics;
pub mod error;
pub mod transform;
pub mod utils;

pub use error::{EwsError, Result};

pub mod prelude {
    pub use crate::core::{
        build_panel, CanonicalTimeSeries, DiagnosticReport, MonitoringUnit, PanelRecord,
        PressureCovariate, SamplingRegime, Status, Trend, WarningCode,
    };
    pub use crate::diagnostics::{DiagnosticEngine, EwsConfig};
    pub use crate::error::{EwsError, Result};
}
