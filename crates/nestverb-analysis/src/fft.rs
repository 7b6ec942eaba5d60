//! FFT wrapper with windowing functions

use rustfft::{FftPlanner, num_complex::Complex};
use std::f32::consts::PI;
use std::sync::Arc;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Rectangular (no windowing). Use for impulse responses.
    Rectangular,
    /// Hann window (raised cosine)
    Hann,
}

impl Window {
    /// Apply window to a buffer
    pub fn apply(&self, buffer: &mut [f32]) {
        let n = buffer.len();
        match self {
            Window::Rectangular => {}
            Window::Hann => {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    let w = 0.5 * (1.0 - (2.0 * PI * i as f32 / n as f32).cos());
                    *sample *= w;
                }
            }
        }
    }
}

/// Forward/inverse FFT pair of one size.
pub struct Fft {
    fft: Arc<dyn rustfft::Fft<f32>>,
    ifft: Arc<dyn rustfft::Fft<f32>>,
    size: usize,
}

impl Fft {
    /// Plan an FFT of `size` points.
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            fft: planner.plan_fft_forward(size),
            ifft: planner.plan_fft_inverse(size),
            size,
        }
    }

    /// Get FFT size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Forward FFT of a real signal.
    ///
    /// The input is zero-padded or truncated to the FFT size. Returns the
    /// `size/2 + 1` bins from DC to Nyquist.
    pub fn forward(&self, input: &[f32]) -> Vec<Complex<f32>> {
        let mut buffer: Vec<Complex<f32>> = input
            .iter()
            .take(self.size)
            .map(|&x| Complex::new(x, 0.0))
            .collect();
        buffer.resize(self.size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);

        buffer.truncate(self.size / 2 + 1);
        buffer
    }

    /// Forward FFT on a full complex buffer (in-place)
    pub fn forward_complex(&self, buffer: &mut [Complex<f32>]) {
        self.fft.process(buffer);
    }

    /// Normalized inverse FFT on a full complex buffer (in-place)
    pub fn inverse_complex(&self, buffer: &mut [Complex<f32>]) {
        self.ifft.process(buffer);

        let scale = 1.0 / self.size as f32;
        for c in buffer.iter_mut() {
            *c *= scale;
        }
    }
}

/// Compute magnitude spectrum in dB
pub fn magnitude_db(spectrum: &[Complex<f32>]) -> Vec<f32> {
    spectrum
        .iter()
        .map(|c| 20.0 * c.norm().max(1e-10).log10())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_bin_count() {
        let fft = Fft::new(512);
        assert_eq!(fft.size(), 512);
        assert_eq!(fft.forward(&[1.0]).len(), 257);
    }

    #[test]
    fn test_impulse_is_flat() {
        let fft = Fft::new(256);
        for bin in fft.forward(&[1.0]) {
            assert!((bin.norm() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_sine_peak() {
        let fft = Fft::new(256);
        let input: Vec<f32> = (0..256)
            .map(|i| (2.0 * PI * 10.0 * i as f32 / 256.0).sin())
            .collect();
        let spectrum = fft.forward(&input);

        let peak = spectrum
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.norm().total_cmp(&b.norm()))
            .map(|(i, _)| i);
        assert_eq!(peak, Some(10));
    }

    #[test]
    fn test_complex_roundtrip() {
        let fft = Fft::new(64);
        let original: Vec<Complex<f32>> = (0..64)
            .map(|i| Complex::new((i as f32 * 0.3).sin(), 0.0))
            .collect();
        let mut buffer = original.clone();
        fft.forward_complex(&mut buffer);
        fft.inverse_complex(&mut buffer);

        for (a, b) in original.iter().zip(&buffer) {
            assert!((a.re - b.re).abs() < 1e-5);
        }
    }

    #[test]
    fn test_hann_window_endpoints() {
        let mut buffer = vec![1.0; 64];
        Window::Hann.apply(&mut buffer);
        assert!(buffer[0].abs() < 1e-6);
        assert!((buffer[32] - 1.0).abs() < 1e-6);

        let mut flat = vec![1.0; 8];
        Window::Rectangular.apply(&mut flat);
        assert_eq!(flat, vec![1.0; 8]);
    }

    #[test]
    fn test_magnitude_db() {
        let db = magnitude_db(&[Complex::new(1.0, 0.0), Complex::new(0.0, 0.1), Complex::new(0.0, 0.0)]);
        assert!(db[0].abs() < 1e-6);
        assert!((db[1] + 20.0).abs() < 1e-4);
        assert!((db[2] + 200.0).abs() < 1e-3);
    }
}
