//! Core data structures: canonical series, panel adapter and report types.

pub mod panel;
mod report;
mod time_series;

pub use panel::{build_panel, Aggregation, PanelRecord, PanelSummary};
pub use report::{
    DiagnosticReport, PressureSummary, RollingDiagnostics, SamplingRegime, SparseResult, Status,
    Trend, WarningCode, INTERPRETATION, SPARSE_NOTE,
};
pub use time_series::{
    decimal_year, CanonicalTimeSeries, CanonicalTimeSeriesBuilder, MonitoringUnit, Observation,
    PressureCovariate,
};
