//! Numeric helpers shared by the diagnostic stages.

pub mod stats;

pub use stats::{
    first_differences, lag1_autocorrelation, max_abs, mean, median, min_max, std_dev, variance,
};
