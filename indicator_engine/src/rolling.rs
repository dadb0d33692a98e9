//! Trailing-window statistics over plain slices.
//!
//! Output is always the same length as the input. The first `window - 1`
//! entries are `None`; so is everything when `window` is zero or longer than
//! the input. Each window is summed from scratch, so a constant input yields
//! exactly that constant rather than an accumulated rounding error.

/// Arithmetic mean of each trailing window.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |chunk| Some(mean(chunk)))
}

/// Sample standard deviation (n - 1 denominator) of each trailing window.
///
/// A one-element window has no sample deviation, so `window == 1` is
/// undefined everywhere.
pub fn rolling_sample_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window < 2 {
        return vec![None; values.len()];
    }

    rolling(values, window, |chunk| {
        let m = mean(chunk);
        let sum_sq = chunk.iter().map(|x| (x - m).powi(2)).sum::<f64>();
        Some((sum_sq / (chunk.len() - 1) as f64).sqrt())
    })
}

fn rolling(
    values: &[f64],
    window: usize,
    stat: impl Fn(&[f64]) -> Option<f64>,
) -> Vec<Option<f64>> {
    if window == 0 || window > values.len() {
        return vec![None; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    out.resize(window - 1, None);
    out.extend(values.windows(window).map(stat));
    out
}

fn mean(chunk: &[f64]) -> f64 {
    chunk.iter().sum::<f64>() / chunk.len() as f64
}
