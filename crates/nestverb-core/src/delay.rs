//! Oversampled fractional delay line.
//!
//! [`OversampledDelay`] is the only buffer-owning primitive in the lattice.
//! Every elementary all-pass unit owns one, and its delay time may change on
//! every sample without zipper noise.
//!
//! # 2× write
//!
//! Each host sample writes two cells: the linear midpoint between the previous
//! and the current input, then the current input itself. Reads therefore
//! resolve half-sample steps exactly and interpolate linearly in between:
//!
//! ```text
//! write:  ... | mid(x[n-1], x[n]) | x[n] | ...     cursor += 2
//! read:   t = clamp(2 · fs · seconds, 0, capacity - 1)
//!         y = b[r + 1] - frac(t) · (b[r + 1] - b[r]),   r = w - floor(t)
//! ```
//!
//! The midpoint write is a gentle lowpass at the top of the band. In exchange
//! the read position needs no separate fractional-delay filter when it is swept.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

/// Smallest buffer the delay ever holds, in cells.
const MIN_CAPACITY: usize = 4;

/// Circular delay line written at twice the host rate.
///
/// Out-of-range or NaN delay times are clamped into `[0, capacity - 1]`
/// cells; the audio path never allocates and never panics.
///
/// # Example
///
/// ```rust
/// use nestverb_core::OversampledDelay;
///
/// let mut delay = OversampledDelay::with_max_time(48000.0, 0.01);
///
/// // First output of an impulse through a 1 ms delay is silent
/// let out = delay.process(1.0, 48000.0, 0.001);
/// assert_eq!(out, 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct OversampledDelay {
    buffer: Vec<f32>,
    write_pos: usize,
    /// Last raw input, the left end of the next midpoint write
    last_input: f32,
}

impl Default for OversampledDelay {
    fn default() -> Self {
        Self {
            buffer: vec![0.0; MIN_CAPACITY],
            write_pos: 0,
            last_input: 0.0,
        }
    }
}

impl OversampledDelay {
    /// Create a minimal delay line. Call [`setup`](Self::setup) before use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a delay line sized for `max_seconds` at `sample_rate`.
    pub fn with_max_time(sample_rate: f32, max_seconds: f32) -> Self {
        let mut delay = Self::default();
        delay.setup(sample_rate, max_seconds);
        delay
    }

    /// Number of cells needed to hold `max_seconds` at twice `sample_rate`.
    ///
    /// `⌈2 · sample_rate · max_seconds⌉ + 1`, never less than 4.
    pub fn required_capacity(sample_rate: f32, max_seconds: f32) -> usize {
        let cells = libm::ceilf(2.0 * sample_rate * max_seconds);
        if cells.is_finite() && cells > 0.0 {
            (cells as usize + 1).max(MIN_CAPACITY)
        } else {
            MIN_CAPACITY
        }
    }

    /// Allocate and zero the buffer. Not real-time safe.
    pub fn setup(&mut self, sample_rate: f32, max_seconds: f32) {
        let capacity = Self::required_capacity(sample_rate, max_seconds);
        self.buffer.clear();
        self.buffer.resize(capacity, 0.0);
        self.write_pos = 0;
        self.last_input = 0.0;
    }

    /// Zero the buffer and the midpoint memory, keeping the allocation.
    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
        self.last_input = 0.0;
    }

    /// Buffer length in (half-sample) cells.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Longest delay this line can produce at `sample_rate`, in seconds.
    pub fn max_time(&self, sample_rate: f32) -> f32 {
        (self.buffer.len() - 1) as f32 / (2.0 * sample_rate)
    }

    /// Push one input sample and read the sample `seconds` ago.
    #[inline]
    pub fn process(&mut self, input: f32, sample_rate: f32, seconds: f32) -> f32 {
        let size = self.buffer.len();

        // max() drops NaN, so a NaN time reads at zero delay. The oldest cell
        // still holding history sits at size - 1.
        let time = (2.0 * sample_rate * seconds)
            .max(0.0)
            .min((size - 1) as f32);
        let time_int = time as usize;
        let frac = time - time_int as f32;

        let read_pos = (self.write_pos + size - time_int) % size;

        self.buffer[self.write_pos] = input - 0.5 * (input - self.last_input);
        self.write_pos = (self.write_pos + 1) % size;
        self.buffer[self.write_pos] = input;
        self.write_pos = (self.write_pos + 1) % size;
        self.last_input = input;

        let older = self.buffer[read_pos];
        let newer = self.buffer[(read_pos + 1) % size];
        newer - frac * (newer - older)
    }
}
