//! Level measurement for audio signals
//!
//! - RMS and peak level, linear and dB
//! - Tail length: where a decaying response falls below a threshold for good

/// Level reported for silence, in dB.
pub const SILENCE_DB: f32 = -200.0;

/// Compute RMS (Root Mean Square) level of a signal
///
/// Returns RMS value in linear scale (not dB)
pub fn rms(signal: &[f32]) -> f32 {
    if signal.is_empty() {
        return 0.0;
    }

    let sum_sq: f32 = signal.iter().map(|&x| x * x).sum();
    (sum_sq / signal.len() as f32).sqrt()
}

/// Compute RMS level in dB
pub fn rms_db(signal: &[f32]) -> f32 {
    to_db(rms(signal))
}

/// Compute peak level (maximum absolute value)
pub fn peak(signal: &[f32]) -> f32 {
    signal.iter().map(|x| x.abs()).fold(0.0, f32::max)
}

/// Compute peak level in dB
pub fn peak_db(signal: &[f32]) -> f32 {
    to_db(peak(signal))
}

/// Number of samples up to and including the last one whose magnitude
/// exceeds `threshold`.
///
/// Zero for a signal that never exceeds it.
pub fn tail_length(signal: &[f32], threshold: f32) -> usize {
    signal
        .iter()
        .rposition(|x| x.abs() > threshold)
        .map_or(0, |i| i + 1)
}

fn to_db(linear: f32) -> f32 {
    if linear > 1e-10 {
        20.0 * linear.log10()
    } else {
        SILENCE_DB
    }
}
