//! The audio callback boundary.
//!
//! The [`Effect`] trait is what a host drives: one-off allocation in
//! [`setup`](Effect::setup), block-rate parameter updates in
//! [`set_parameters`](Effect::set_parameters), and per-sample stereo
//! processing in between.
//!
//! ## Design Decisions
//!
//! - **Stereo in, stereo out**: reverbs couple their channels (cross-feed,
//!   mid/side spread), so the unit of work is a sample pair.
//!
//! - **Object-safe**: hosts may hold a `Box<dyn Effect>`. Generic dispatch is
//!   still preferred where the type is known.
//!
//! - **No allocations**: everything except `setup` runs on the audio thread.
//!
//! - **Never panics on buffer length**: block processing runs over the
//!   shortest of the four slices.

/// Stereo audio processor driven by a host callback.
///
/// # Example
///
/// ```rust
/// use nestverb_core::Effect;
///
/// struct Swap;
///
/// impl Effect for Swap {
///     fn setup(&mut self, _sample_rate: f32) {}
///     fn reset(&mut self) {}
///     fn set_parameters(&mut self) {}
///
///     fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
///         (right, left)
///     }
/// }
///
/// let mut swap = Swap;
/// let (mut out_l, mut out_r) = ([0.0; 2], [0.0; 2]);
/// swap.process(&[1.0, 2.0], &[3.0, 4.0], &mut out_l, &mut out_r);
/// assert_eq!(out_l, [3.0, 4.0]);
/// ```
pub trait Effect {
    /// Allocate for `sample_rate` and clear all state. Not real-time safe.
    ///
    /// Must be called again whenever the sample rate changes.
    fn setup(&mut self, sample_rate: f32);

    /// Clear all signal state and snap smoothed parameters to their targets.
    fn reset(&mut self);

    /// Called when playback starts. Defaults to [`reset`](Self::reset).
    fn startup(&mut self) {
        self.reset();
    }

    /// Apply the current parameter values. Called once per block.
    fn set_parameters(&mut self);

    /// Process one stereo sample.
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32);

    /// Process a stereo block.
    ///
    /// The block length is the shortest of the four slices.
    fn process(&mut self, in_left: &[f32], in_right: &[f32], out_left: &mut [f32], out_right: &mut [f32]) {
        let inputs = in_left.iter().zip(in_right);
        let outputs = out_left.iter_mut().zip(out_right.iter_mut());
        for ((&l, &r), (out_l, out_r)) in inputs.zip(outputs) {
            (*out_l, *out_r) = self.process_stereo(l, r);
        }
    }

    /// Processing latency in samples. Reverbs report 0.
    fn latency_samples(&self) -> usize {
        0
    }
}
