//! Statistical utility functions.
//!
//! Every estimator returns `None` instead of NaN when it is undefined for the
//! given input, so degenerate data can be diagnosed rather than propagated.

/// Keep a value only if it is finite.
#[inline]
pub fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Check whether every value in the slice is identical.
pub fn is_constant(values: &[f64]) -> bool {
    match values.split_first() {
        Some((first, rest)) => rest.iter().all(|v| v == first),
        None => true,
    }
}

/// Calculate the mean of a slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    finite(values.iter().sum::<f64>() / values.len() as f64)
}

/// Calculate the median of a slice.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    let mid = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    finite(mid)
}

/// Calculate the sample variance of a slice (n-1 denominator).
///
/// Constant input yields exactly `0.0`, regardless of rounding in the mean.
pub fn variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    if is_constant(values) {
        return Some(0.0);
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    finite(sum_sq / (values.len() - 1) as f64)
}

/// Calculate the sample standard deviation of a slice.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    variance(values).map(f64::sqrt)
}

/// Differences between consecutive values: `x[i+1] - x[i]`.
pub fn first_differences(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Largest absolute value, or `None` for empty input.
pub fn max_abs(values: &[f64]) -> Option<f64> {
    values.iter().map(|x| x.abs()).reduce(f64::max).and_then(finite)
}

/// Minimum and maximum of a slice.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let (first, rest) = values.split_first()?;
    Some(
        rest.iter()
            .fold((*first, *first), |(lo, hi), &x| (lo.min(x), hi.max(x))),
    )
}

/// Lag-1 autocorrelation as the Pearson correlation of `x[1..]` against `x[..n-1]`.
///
/// Undefined with fewer than two lagged pairs or when either shifted segment has
/// zero variance.
pub fn lag1_autocorrelation(values: &[f64]) -> Option<f64> {
    if values.len() < 3 {
        return None;
    }
    let lagged = &values[..values.len() - 1];
    let leading = &values[1..];
    if is_constant(lagged) || is_constant(leading) {
        return None;
    }

    let mx = mean(lagged)?;
    let my = mean(leading)?;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (&x, &y) in lagged.iter().zip(leading) {
        let dx = x - mx;
        let dy = y - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx <= 0.0 || syy <= 0.0 {
        return None;
    }
    finite((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}
