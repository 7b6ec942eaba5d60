//! Parameter ramps for zipper-free coefficient changes.
//!
//! A reverb lattice holds hundreds of coefficients that all change together
//! when a control moves. Each one is a [`ParameterRamp`]: a bare
//! `(value, target)` pair. The smoothing coefficient lives once in a shared
//! [`RampTiming`] and is handed to every ramp at process time, so all
//! coefficients settle in the same real-world time window.
//!
//! ## Usage
//!
//! ```rust
//! use nestverb_core::{ParameterRamp, RampTiming};
//!
//! let timing = RampTiming::new(48000.0, 0.01); // 10 ms
//! let mut gain = ParameterRamp::new(1.0);
//!
//! // Set new target - smoothing happens while processing
//! gain.push(0.5);
//!
//! for _ in 0..4800 {
//!     let smoothed_gain = gain.process(timing.kp());
//!     // Use smoothed_gain for processing...
//! }
//! assert!((gain.value() - 0.5).abs() < 1e-4);
//! ```

use core::f32::consts::TAU;

/// Default smoothing time in seconds.
pub const DEFAULT_SMOOTHING_SECONDS: f32 = 0.2;

/// One-pole coefficient for a given cutoff frequency.
///
/// Solves the one-pole lowpass `y += kp · (x − y)` for the `kp` whose −3 dB
/// point lands exactly on `cutoff_hz`:
///
/// ```text
/// ω  = 2π · fc / fs
/// y  = 1 − cos ω
/// kp = −y + √((y + 2) · y)
/// ```
///
/// For small ω this approaches `ω`, the familiar `2π·fc/fs` approximation,
/// but stays exact up to Nyquist where `kp = 2√2 − 2`.
#[inline]
pub fn cutoff_to_kp(sample_rate: f32, cutoff_hz: f32) -> f32 {
    let omega = TAU * cutoff_hz / sample_rate;
    let y = 1.0 - libm::cosf(omega);
    -y + libm::sqrtf((y + 2.0) * y)
}

/// Shared smoothing clock for a group of [`ParameterRamp`]s.
///
/// The cutoff is the reciprocal of the smoothing time, clamped to Nyquist.
/// A non-positive (or NaN) time or sample rate gives `kp = 1`, which makes
/// every ramp jump straight to its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampTiming {
    sample_rate: f32,
    seconds: f32,
    kp: f32,
}

impl Default for RampTiming {
    fn default() -> Self {
        Self::new(44100.0, DEFAULT_SMOOTHING_SECONDS)
    }
}

impl RampTiming {
    /// Create a timing with the given sample rate and smoothing time.
    pub fn new(sample_rate: f32, seconds: f32) -> Self {
        let mut timing = Self {
            sample_rate,
            seconds,
            kp: 1.0,
        };
        timing.recalculate();
        timing
    }

    /// Update the sample rate and recompute `kp`.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate();
    }

    /// Update the smoothing time and recompute `kp`.
    ///
    /// Cheap when the time is unchanged, so it may be called every block.
    pub fn set_time(&mut self, seconds: f32) {
        if seconds != self.seconds {
            self.seconds = seconds;
            self.recalculate();
        }
    }

    /// Per-sample smoothing coefficient in `(0, 1]`.
    #[inline]
    pub fn kp(&self) -> f32 {
        self.kp
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Smoothing time in seconds.
    pub fn time(&self) -> f32 {
        self.seconds
    }

    fn recalculate(&mut self) {
        if !(self.seconds > 0.0 && self.sample_rate > 0.0) {
            self.kp = 1.0;
            return;
        }
        let cutoff = (1.0 / self.seconds).min(self.sample_rate / 2.0);
        self.kp = cutoff_to_kp(self.sample_rate, cutoff);
    }
}

/// An exponentially smoothed coefficient.
///
/// Holds only the current value and the target; the step size comes from a
/// shared [`RampTiming`]. [`push`](Self::push) never moves the current value,
/// so changing targets mid-ramp is click-free.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParameterRamp {
    value: f32,
    target: f32,
}

impl ParameterRamp {
    /// Create a ramp resting at `initial`.
    pub const fn new(initial: f32) -> Self {
        Self {
            value: initial,
            target: initial,
        }
    }

    /// Set a new target; the current value keeps moving from where it is.
    #[inline]
    pub fn push(&mut self, target: f32) {
        self.target = target;
    }

    /// Snap both value and target to `value`.
    #[inline]
    pub fn reset(&mut self, value: f32) {
        self.value = value;
        self.target = value;
    }

    /// Advance one sample towards the target and return the new value.
    #[inline]
    pub fn process(&mut self, kp: f32) -> f32 {
        self.value += kp * (self.target - self.value);
        self.value
    }

    /// Current value without advancing.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Target value.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Whether the ramp has reached its target (within 1e-6).
    #[inline]
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < 1e-6
    }
}
