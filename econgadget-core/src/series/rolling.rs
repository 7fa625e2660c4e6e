//! Trailing rolling means.
//!
//! The value at index `i` is the mean of the `window` values ending at `i`.
//! The first `window - 1` positions have no value.

/// Short trailing window (months).
pub const SHORT_WINDOW: usize = 6;

/// Long trailing window (months).
pub const LONG_WINDOW: usize = 12;

pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }
    for (i, w) in values.windows(window).enumerate() {
        out[i + window - 1] = Some(w.iter().sum::<f64>() / window as f64);
    }
    out
}
