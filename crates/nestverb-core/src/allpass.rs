//! One-multiply Schroeder allpass on an oversampled delay.
//!
//! [`LongAllpass`] is the elementary unit of the nested lattice. Its delay time
//! and gain are passed on every call, so both may be modulated per sample.

use crate::OversampledDelay;
use crate::flush_denormal;

/// Canonical one-multiply allpass.
///
/// ```text
/// x'     = input - g · state
/// output = state + g · x'
/// state  = delay(x', seconds)
/// ```
///
/// The magnitude response is flat for any `|g| < 1` and any delay time.
/// The gain is not clamped here: keeping `|g| < 1` is the caller's job, and
/// the reverb's parameter ranges guarantee it. A gain at or beyond unity
/// produces a growing filter.
///
/// # Example
///
/// ```rust
/// use nestverb_core::LongAllpass;
///
/// let mut allpass = LongAllpass::with_max_time(48000.0, 0.1);
///
/// // The impulse leaves immediately scaled by g, the rest waits in the delay
/// let out = allpass.process(1.0, 48000.0, 0.01, 0.5);
/// assert_eq!(out, 0.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LongAllpass {
    delay: OversampledDelay,
    /// One-sample state register (the delay output from the previous call)
    state: f32,
}

impl LongAllpass {
    /// Create an allpass whose delay holds up to `max_seconds`.
    pub fn with_max_time(sample_rate: f32, max_seconds: f32) -> Self {
        Self {
            delay: OversampledDelay::with_max_time(sample_rate, max_seconds),
            state: 0.0,
        }
    }

    /// Resize the delay buffer and clear all state. Not real-time safe.
    pub fn setup(&mut self, sample_rate: f32, max_seconds: f32) {
        self.delay.setup(sample_rate, max_seconds);
        self.state = 0.0;
    }

    /// Clear the delay line and the state register.
    pub fn reset(&mut self) {
        self.delay.reset();
        self.state = 0.0;
    }

    /// Process one sample with the given delay time and feedback gain.
    #[inline]
    pub fn process(&mut self, input: f32, sample_rate: f32, seconds: f32, gain: f32) -> f32 {
        let x = input - gain * self.state;
        let output = self.state + gain * x;
        self.state = flush_denormal(self.delay.process(x, sample_rate, seconds));
        output
    }

    /// Delay buffer capacity in half-sample cells.
    pub fn capacity(&self) -> usize {
        self.delay.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 48000.0;

    #[test]
    fn test_allpass_impulse_response() {
        // 1 ms at 48 kHz is 96 cells, a whole number of samples
        let mut allpass = LongAllpass::with_max_time(SR, 0.01);
        let g = 0.5;
        let out: Vec<f32> = (0..200)
            .map(|i| allpass.process(if i == 0 { 1.0 } else { 0.0 }, SR, 0.001, g))
            .collect();

        assert_eq!(out[0], g);
        for (i, &y) in out.iter().enumerate().take(49).skip(1) {
            assert_eq!(y, 0.0, "sample {i} should be silent");
        }
        // Delayed path: (1 - g²) after delay plus one sample of state
        assert!((out[49] - (1.0 - g * g)).abs() < 1e-4, "got {}", out[49]);
    }

    #[test]
    fn test_allpass_energy_conservation() {
        let mut allpass = LongAllpass::with_max_time(SR, 0.01);
        let energy: f32 = (0..20_000)
            .map(|i| {
                let y = allpass.process(if i == 0 { 1.0 } else { 0.0 }, SR, 0.001, 0.7);
                y * y
            })
            .sum();

        assert!(
            (energy - 1.0).abs() < 1e-3,
            "unit impulse energy should be preserved, got {energy}"
        );
    }

    #[test]
    fn test_allpass_reset() {
        let mut allpass = LongAllpass::with_max_time(SR, 0.01);
        for _ in 0..500 {
            allpass.process(1.0, SR, 0.002, 0.6);
        }

        allpass.reset();

        for _ in 0..500 {
            assert_eq!(allpass.process(0.0, SR, 0.002, 0.6), 0.0);
        }
    }

    #[test]
    fn test_allpass_time_varying_stays_finite() {
        let mut allpass = LongAllpass::with_max_time(SR, 0.02);
        for i in 0..48_000 {
            let t = 0.005 + 0.004 * libm::sinf(i as f32 * 0.001);
            let g = 0.9 * libm::cosf(i as f32 * 0.0003);
            let out = allpass.process(if i % 1000 == 0 { 1.0 } else { 0.0 }, SR, t, g);
            assert!(out.is_finite() && out.abs() < 100.0, "sample {i}: {out}");
        }
    }

    #[test]
    fn test_no_denormals_after_silence() {
        let mut allpass = LongAllpass::with_max_time(SR, 0.01);

        for _ in 0..1000 {
            allpass.process(0.5, SR, 0.001, 0.7);
        }

        // Output should decay cleanly without producing IEEE 754 subnormals
        for i in 0..100_000 {
            let out = allpass.process(0.0, SR, 0.001, 0.7);
            assert!(
                out == 0.0 || out.abs() > f32::MIN_POSITIVE,
                "Denormal detected at sample {}: {:.2e}",
                i,
                out
            );
        }
    }
}
