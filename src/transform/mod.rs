//! Window transformations for time series.
//!
//! # Example
//!
//! ```
//! use anofox_ews::transform::{rolling_var, valid_values};
//!
//! let series = vec![Some(1.0), Some(2.0), None, Some(4.0), Some(5.0), Some(7.0)];
//!
//! // Windows touching the gap are skipped, not filled.
//! let rv = rolling_var(&series, 3);
//! assert_eq!(valid_values(&rv).len(), 1);
//! ```

pub mod window;

pub use window::{rolling_apply, rolling_lag1_autocorrelation, rolling_var, valid_values};
