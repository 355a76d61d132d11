//! Error types for the anofox-ews library.
//!
//! Errors are reserved for malformed inputs (series, covariates, configuration).
//! Statistically degenerate data never produces an error; it is reported through
//! [`crate::core::WarningCode`] and [`crate::core::Status`] instead.

use thiserror::Error;

/// Result type alias for early-warning diagnostics.
pub type Result<T> = std::result::Result<T, EwsError>;

/// Errors raised while constructing inputs to the diagnostic engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EwsError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Parallel vectors have different lengths.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Time axis is not finite, sorted and unique.
    #[error("timestamp error: {0}")]
    TimestampError(String),

    /// An observed value is NaN or infinite instead of being marked missing.
    #[error("invalid value at index {index}: {value}")]
    InvalidValue { index: usize, value: f64 },

    /// A panel record for the named unit carries an unusable value.
    #[error("invalid record for unit '{unit}': {message}")]
    InvalidRecord { unit: String, message: String },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
