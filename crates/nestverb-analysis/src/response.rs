//! Impulse and magnitude response measurement of stereo effects.
//!
//! An all-pass network has `|H(f)| = 1` at every frequency. Measuring that
//! takes an impulse response long enough to have decayed completely, then a
//! rectangular-window FFT over it:
//!
//! ```text
//! h = effect(δ)        |H[k]| = |FFT(h)[k]|
//! ```

use nestverb_core::Effect;

use crate::fft::{Fft, Window};

/// Input channel that receives the impulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpulseInput {
    /// Impulse on the left input only.
    Left,
    /// Impulse on the right input only.
    Right,
    /// Impulse on both inputs.
    Both,
}

/// Left and right responses to one impulse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StereoResponse {
    /// Left output.
    pub left: Vec<f32>,
    /// Right output.
    pub right: Vec<f32>,
}

/// Feed a unit impulse into `effect` and record `length` output samples.
///
/// The effect is processed in its current state; call
/// [`reset`](Effect::reset) first for a clean measurement.
pub fn impulse_response<E: Effect + ?Sized>(
    effect: &mut E,
    input: ImpulseInput,
    length: usize,
) -> StereoResponse {
    let (gain_l, gain_r) = match input {
        ImpulseInput::Left => (1.0, 0.0),
        ImpulseInput::Right => (0.0, 1.0),
        ImpulseInput::Both => (1.0, 1.0),
    };

    let (left, right) = (0..length)
        .map(|n| {
            if n == 0 {
                effect.process_stereo(gain_l, gain_r)
            } else {
                effect.process_stereo(0.0, 0.0)
            }
        })
        .unzip();
    StereoResponse { left, right }
}

/// Linear magnitude response of an impulse response, DC to Nyquist.
///
/// `fft_size` should be at least the length of the response; longer
/// responses are truncated.
pub fn magnitude_response(ir: &[f32], fft_size: usize, window: Window) -> Vec<f32> {
    let mut frame: Vec<f32> = ir.iter().take(fft_size).copied().collect();
    window.apply(&mut frame);
    Fft::new(fft_size)
        .forward(&frame)
        .iter()
        .map(|c| c.norm())
        .collect()
}

/// Largest distance of any bin from unity gain.
///
/// Returns 0 for an ideal all-pass and `f32::INFINITY` for an empty
/// response.
pub fn unity_deviation(magnitudes: &[f32]) -> f32 {
    if magnitudes.is_empty() {
        return f32::INFINITY;
    }
    magnitudes
        .iter()
        .map(|m| (m - 1.0).abs())
        .fold(0.0, f32::max)
}

/// Total energy `Σ x²` of a signal.
pub fn energy(signal: &[f32]) -> f32 {
    signal.iter().map(|x| x * x).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Delay1 {
        state: (f32, f32),
    }

    impl Effect for Delay1 {
        fn setup(&mut self, _sample_rate: f32) {}

        fn reset(&mut self) {
            self.state = (0.0, 0.0);
        }

        fn set_parameters(&mut self) {}

        fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
            core::mem::replace(&mut self.state, (left, -right))
        }
    }

    #[test]
    fn test_impulse_routing() {
        let mut fx = Delay1 { state: (0.0, 0.0) };
        let ir = impulse_response(&mut fx, ImpulseInput::Right, 4);
        assert_eq!(ir.left, vec![0.0; 4]);
        assert_eq!(ir.right, vec![0.0, -1.0, 0.0, 0.0]);

        fx.reset();
        let ir = impulse_response(&mut fx, ImpulseInput::Both, 3);
        assert_eq!(ir.left, vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_pure_delay_is_allpass() {
        let mut fx = Delay1 { state: (0.0, 0.0) };
        let ir = impulse_response(&mut fx, ImpulseInput::Left, 64);
        let mags = magnitude_response(&ir.left, 64, Window::Rectangular);

        assert_eq!(mags.len(), 33);
        assert!(unity_deviation(&mags) < 1e-6);
        assert_eq!(energy(&ir.left), 1.0);
    }

    #[test]
    fn test_lowpass_is_not_allpass() {
        let ir = [0.5, 0.5];
        let mags = magnitude_response(&ir, 16, Window::Rectangular);
        assert!((mags[0] - 1.0).abs() < 1e-6);
        assert!(mags[8] < 1e-6);
        assert!((unity_deviation(&mags) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_deviation() {
        assert_eq!(unity_deviation(&[]), f32::INFINITY);
    }
}
