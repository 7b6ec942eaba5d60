//! Cross-correlation with normalization and peak lag detection.
//!
//! Used to measure how decorrelated the two channels of a stereo reverb are.
//! Identical channels correlate at 1.0 at lag 0; a well-decorrelated tail
//! stays close to 0 at every lag.
//!
//! # Definition
//!
//! ```text
//! R_xy(τ) = Σ_{n} x[n] · y[n + τ]
//! ```
//!
//! When y is x delayed by τ₀ samples, R_xy peaks at τ = τ₀.
//!
//! Reference: Oppenheim & Schafer, "Discrete-Time Signal Processing" (3rd ed.), §2.8.

/// Direct time-domain cross-correlation.
///
/// The output has length `2 * max_lag + 1`, laid out as
/// `[R(-max_lag), …, R(0), …, R(max_lag)]`. Time complexity O(n · max_lag).
pub fn xcorr_direct(x: &[f32], y: &[f32], max_lag: usize) -> Vec<f32> {
    let max_lag = max_lag as isize;
    (-max_lag..=max_lag)
        .map(|lag| {
            x.iter()
                .enumerate()
                .filter_map(|(n, &xn)| {
                    let m = n as isize + lag;
                    usize::try_from(m).ok().and_then(|m| y.get(m)).map(|&ym| xn * ym)
                })
                .sum()
        })
        .collect()
}

/// Normalized cross-correlation with values in [-1, 1].
///
/// ```text
/// R̂_xy(τ) = R_xy(τ) / sqrt(Σ x[n]² · Σ y[n]²)
/// ```
///
/// If either signal is silent the raw (all-zero) correlation is returned.
pub fn xcorr_normalized(x: &[f32], y: &[f32], max_lag: usize) -> Vec<f32> {
    let raw = xcorr_direct(x, y, max_lag);

    let norm_x: f32 = x.iter().map(|&v| v * v).sum::<f32>().sqrt();
    let norm_y: f32 = y.iter().map(|&v| v * v).sum::<f32>().sqrt();
    let denom = norm_x * norm_y;

    if denom < 1e-12 {
        return raw;
    }

    raw.iter().map(|&r| r / denom).collect()
}

/// Lag of maximum absolute correlation and its value.
///
/// `max_lag` must be the value the correlation was computed with. Positive
/// lag means y lags x.
pub fn peak_lag(correlation: &[f32], max_lag: usize) -> (isize, f32) {
    correlation
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.abs().total_cmp(&b.abs()))
        .map_or((0, 0.0), |(i, &value)| (i as isize - max_lag as isize, value))
}

/// Inter-channel coherence: the largest absolute normalized correlation
/// within ±`max_lag` samples.
///
/// 1.0 for identical channels, near 0 for decorrelated ones.
pub fn channel_coherence(left: &[f32], right: &[f32], max_lag: usize) -> f32 {
    peak_lag(&xcorr_normalized(left, right, max_lag), max_lag).1.abs()
}
