//! WAV file reading and writing.

use crate::{Error, Result, StereoSamples};
use hound::{SampleFormat, WavReader, WavWriter};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let num_frames = u64::from(reader.duration());
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// Sample rate and bit depth of a stereo WAV file.
///
/// 32-bit files are written as IEEE float, everything else as PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (16, 24 or 32).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl WavSpec {
    fn to_hound(self) -> hound::WavSpec {
        hound::WavSpec {
            channels: 2,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format: if self.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Read a WAV file as stereo samples along with its spec.
///
/// Mono files are duplicated to both channels. Files with more than two
/// channels keep only the first two.
pub fn read_wav_stereo<P: AsRef<Path>>(path: P) -> Result<(StereoSamples, WavSpec)> {
    let path = path.as_ref();
    let reader = WavReader::new(BufReader::new(File::open(path)?))?;
    let hound_spec = reader.spec();
    let spec = WavSpec::from(hound_spec);
    let channels = usize::from(hound_spec.channels).max(1);

    let all_samples: Vec<f32> = match hound_spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (hound_spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let stereo = match channels {
        1 => StereoSamples::from_mono(all_samples),
        2 => StereoSamples::from_interleaved(&all_samples),
        _ => {
            let (left, right) = all_samples
                .chunks_exact(channels)
                .map(|frame| (frame[0], frame[1]))
                .unzip();
            StereoSamples { left, right }
        }
    };

    tracing::debug!(
        path = %path.display(),
        channels,
        sample_rate = spec.sample_rate,
        frames = stereo.len(),
        "read wav"
    );
    Ok((stereo, spec))
}

/// Write stereo samples to a WAV file.
///
/// Integer formats are clipped to full scale; float files keep the exact
/// values.
pub fn write_wav_stereo<P: AsRef<Path>>(
    path: P,
    samples: &StereoSamples,
    spec: WavSpec,
) -> Result<()> {
    if !matches!(spec.bits_per_sample, 16 | 24 | 32) {
        return Err(Error::UnsupportedBitDepth(spec.bits_per_sample));
    }

    let path = path.as_ref();
    let mut writer = WavWriter::new(BufWriter::new(File::create(path)?), spec.to_hound())?;

    if spec.bits_per_sample == 32 {
        for (&l, &r) in samples.left.iter().zip(&samples.right) {
            writer.write_sample(l)?;
            writer.write_sample(r)?;
        }
    } else {
        let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
        let quantize = |x: f32| (x * max_val).clamp(-max_val, max_val - 1.0) as i32;
        for (&l, &r) in samples.left.iter().zip(&samples.right) {
            writer.write_sample(quantize(l))?;
            writer.write_sample(quantize(r))?;
        }
    }

    writer.finalize()?;
    tracing::debug!(
        path = %path.display(),
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        frames = samples.len(),
        "wrote wav"
    );
    Ok(())
}
