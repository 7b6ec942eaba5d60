//! WAV I/O and offline rendering for nestverb.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav_stereo`] and [`write_wav_stereo`]
//! - **Offline rendering**: [`render`] drives any [`Effect`](nestverb_core::Effect)
//!   over a whole file, block by block, with an optional tail
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nestverb_effects::DenseReverb;
//! use nestverb_io::{RenderOptions, read_wav_stereo, render, write_wav_stereo};
//!
//! let (input, spec) = read_wav_stereo("input.wav")?;
//! let mut reverb = DenseReverb::new(spec.sample_rate as f32);
//!
//! let options = RenderOptions { tail_samples: 2 * spec.sample_rate as usize, ..Default::default() };
//! let output = render(&mut reverb, &input, options, |_| {})?;
//!
//! write_wav_stereo("output.wav", &output, spec)?;
//! ```

mod render;
mod samples;
mod wav;

pub use render::{DEFAULT_BLOCK_SIZE, RenderOptions, render};
pub use samples::StereoSamples;
pub use wav::{WavFormat, WavInfo, WavSpec, read_wav_info, read_wav_stereo, write_wav_stereo};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Only 16, 24 and 32-bit output is written.
    #[error("Unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),

    /// There is nothing to process.
    #[error("Input has no samples")]
    EmptyInput,
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
