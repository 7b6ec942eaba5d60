//! Impulse response rendering and decay measurement.

use super::common::{EngineArgs, build_reverb, seconds_to_samples};
use anyhow::{Context, bail};
use clap::{Args, ValueEnum};
use nestverb_analysis::dynamics::{peak_db, tail_length};
use nestverb_analysis::{ImpulseInput, channel_coherence, decay_times, impulse_response};
use nestverb_io::{StereoSamples, WavSpec, write_wav_stereo};
use std::path::PathBuf;

/// Level below which the tail counts as finished.
const TAIL_THRESHOLD: f32 = 1e-6;

/// Largest lag searched for inter-channel correlation, in milliseconds.
const COHERENCE_LAG_MS: f32 = 1.0;

/// Input channel that receives the impulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Side {
    /// Left input only
    Left,
    /// Right input only
    Right,
    /// Both inputs
    Both,
}

impl From<Side> for ImpulseInput {
    fn from(side: Side) -> Self {
        match side {
            Side::Left => Self::Left,
            Side::Right => Self::Right,
            Side::Both => Self::Both,
        }
    }
}

#[derive(Args)]
pub struct ImpulseArgs {
    /// Output WAV file for the impulse response (omit to only measure)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    engine: EngineArgs,

    /// Sample rate in Hz
    #[arg(long, default_value_t = 48000)]
    sample_rate: u32,

    /// Response length in seconds
    #[arg(long, default_value_t = 4.0)]
    length: f32,

    /// Input channel that receives the impulse
    #[arg(long, value_enum, default_value_t = Side::Left)]
    input: Side,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value_t = 32)]
    bit_depth: u16,
}

pub fn run(args: ImpulseArgs) -> anyhow::Result<()> {
    let length = seconds_to_samples(args.length, args.sample_rate)?;
    if length == 0 {
        bail!("--length must cover at least one sample");
    }

    let mut reverb = build_reverb(&args.engine, args.sample_rate as f32)?;
    let ir = impulse_response(reverb.as_mut(), args.input.into(), length);

    let sr = args.sample_rate as f32;
    println!(
        "Impulse response: {:?} lattice, {} Hz, {} samples",
        args.engine.topology, args.sample_rate, length
    );
    for (name, channel) in [("Left", &ir.left), ("Right", &ir.right)] {
        let tail = tail_length(channel, TAIL_THRESHOLD) as f32 / sr;
        match decay_times(channel, sr) {
            Some(decay) => println!(
                "  {name:<5} RT60 {:.3}s{}, EDT {:.3}s, peak {:.1} dB, tail {:.3}s",
                decay.rt60_seconds,
                if decay.from_t30 { "" } else { " (T20)" },
                decay.edt_seconds,
                peak_db(channel),
                tail,
            ),
            None => println!(
                "  {name:<5} no measurable decay, peak {:.1} dB, tail {:.3}s",
                peak_db(channel),
                tail,
            ),
        }
    }

    let max_lag = (COHERENCE_LAG_MS * 1e-3 * sr).round() as usize;
    println!(
        "  Coherence (±{COHERENCE_LAG_MS} ms): {:.3}",
        channel_coherence(&ir.left, &ir.right, max_lag)
    );

    if let Some(path) = &args.output {
        let spec = WavSpec {
            sample_rate: args.sample_rate,
            bits_per_sample: args.bit_depth,
        };
        write_wav_stereo(path, &StereoSamples::new(ir.left, ir.right), spec)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("\nWrote {}", path.display());
    }
    Ok(())
}
