//! Early-warning-signal detectability diagnostics.
//!
//! Each monitoring unit passes through a fixed pipeline:
//!
//! - **SeriesValidator**: effective length, span and sampling regime
//! - **CSDSignalAnalyzer**: rolling variance and lag-1 autocorrelation trends
//! - **DetectabilityAssessor**: noise, autocorrelation and sample-size warnings
//! - **SparseSeriesAssessor**: jump size and pressure context for survey data
//!
//! [`DiagnosticEngine`] routes regular series through the rolling checks and
//! sparse series through the survey path, and merges the stage outputs into a
//! [`DiagnosticReport`](crate::core::DiagnosticReport).
//!
//! # Example
//!
//! ```
//! use anofox_ews::core::{CanonicalTimeSeries, Status, Trend};
//! use anofox_ews::diagnostics::{DiagnosticEngine, EwsConfig};
//!
//! let times: Vec<f64> = (2001..=2010).map(f64::from).collect();
//! let values = vec![10.0, 10.0, 10.0, 10.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0];
//! let series = CanonicalTimeSeries::from_raw(times, values).unwrap();
//!
//! let engine = DiagnosticEngine::new(EwsConfig::default()).unwrap();
//! let report = engine.assess(&series);
//!
//! assert_eq!(report.status(), Status::Ok);
//! assert_eq!(report.rolling_variance_trend(), Trend::Increasing);
//! ```

mod config;
mod csd;
mod detectability;
mod engine;
mod sparse;
mod validator;

pub use config::EwsConfig;
pub use csd::{CSDResult, CSDSignalAnalyzer, DEFAULT_WINDOW};
pub use detectability::{DetectabilityAssessor, DetectabilityResult};
pub use engine::DiagnosticEngine;
pub use sparse::{summarize_pressure, SparseSeriesAssessor};
pub use validator::{classify_regime, SeriesValidator, ValidationSummary};
