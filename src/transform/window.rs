//! Trailing rolling-window statistics over series with explicit gaps.
//!
//! A window position yields `None` when fewer than `window` entries precede it
//! or when any entry inside it is missing. No fill value is ever substituted.

use crate::utils::stats;

/// Generic trailing rolling window application.
///
/// The output has one entry per input position, aligned to the window's last
/// element. `f` may itself decline to produce a value.
pub fn rolling_apply<F>(series: &[Option<f64>], window: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    let n = series.len();
    let mut result = vec![None; n];
    if window == 0 || n < window {
        return result;
    }

    let mut buffer = Vec::with_capacity(window);
    for end in window..=n {
        buffer.clear();
        buffer.extend(series[end - window..end].iter().map_while(|v| *v));
        if buffer.len() == window {
            result[end - 1] = f(&buffer);
        }
    }

    result
}

/// Compute rolling sample variance.
pub fn rolling_var(series: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window < 2 {
        return vec![None; series.len()];
    }
    rolling_apply(series, window, stats::variance)
}

/// Compute rolling lag-1 autocorrelation.
pub fn rolling_lag1_autocorrelation(series: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling_apply(series, window, stats::lag1_autocorrelation)
}

/// Valid (non-skip) values of a rolling sequence, in order.
pub fn valid_values(rolling: &[Option<f64>]) -> Vec<f64> {
    rolling.iter().flatten().copied().collect()
}
