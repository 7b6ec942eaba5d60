//! Nestverb Analysis - measurement tools for lattice reverbs
//!
//! - [`fft`] - FFT wrapper with windowing functions
//! - [`response`] - Impulse and magnitude response of an [`Effect`](nestverb_core::Effect)
//! - [`decay`] - Schroeder energy decay curve, RT60 and EDT
//! - [`dynamics`] - RMS, peak and tail length
//! - [`xcorr`] - Cross-correlation and inter-channel coherence
//!
//! ## Example
//!
//! ```rust
//! use nestverb_analysis::fft::Window;
//! use nestverb_analysis::response::{magnitude_response, unity_deviation};
//!
//! // A pure delay is all-pass
//! let ir = [0.0, 0.0, 1.0];
//! let mags = magnitude_response(&ir, 64, Window::Rectangular);
//! assert!(unity_deviation(&mags) < 1e-6);
//! ```

pub mod decay;
pub mod dynamics;
pub mod fft;
pub mod response;
pub mod xcorr;

pub use decay::{DecayTimes, decay_times, energy_decay_curve};
pub use fft::{Fft, Window, magnitude_db};
pub use response::{
    ImpulseInput, StereoResponse, energy, impulse_response, magnitude_response, unity_deviation,
};
pub use xcorr::{channel_coherence, peak_lag, xcorr_direct, xcorr_normalized};
