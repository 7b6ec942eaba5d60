//! File-based reverb processing command.

use super::common::{EngineArgs, build_reverb, progress_bar, seconds_to_samples};
use anyhow::Context;
use clap::Args;
use nestverb_analysis::dynamics::{peak_db, rms_db};
use nestverb_core::ParameterInfo;
use nestverb_io::{RenderOptions, StereoSamples, WavSpec, read_wav_stereo, render, write_wav_stereo};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    engine: EngineArgs,

    /// Silence appended so the tail can ring out, in seconds
    #[arg(long, default_value_t = 2.0)]
    tail: f32,

    /// Processing block size. Parameters are read once per block.
    #[arg(long, default_value_t = nestverb_io::DEFAULT_BLOCK_SIZE)]
    block_size: usize,

    /// Output bit depth (16, 24, or 32). Defaults to the input's.
    #[arg(long)]
    bit_depth: Option<u16>,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    println!("Reading {}...", args.input.display());
    let (input, spec) = read_wav_stereo(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let sample_rate = spec.sample_rate;

    println!(
        "  {} samples, {} Hz, {:.2}s",
        input.len(),
        sample_rate,
        input.len() as f32 / sample_rate as f32
    );

    let mut reverb = build_reverb(&args.engine, sample_rate as f32)?;
    let options = RenderOptions {
        block_size: args.block_size,
        tail_samples: seconds_to_samples(args.tail, sample_rate)?,
    };

    println!(
        "Processing with {:?} lattice ({} parameters)...",
        args.engine.topology,
        reverb.param_count()
    );

    let pb = progress_bar((input.len() + options.tail_samples) as u64)?;
    let output = render(reverb.as_mut(), &input, options, |done| {
        pb.set_position(done as u64);
    })?;
    pb.finish_with_message("done");

    let out_spec = WavSpec {
        sample_rate,
        bits_per_sample: args.bit_depth.unwrap_or(spec.bits_per_sample),
    };
    write_wav_stereo(&args.output, &output, out_spec)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!("\nStats:");
    print_stats("Input: ", &input);
    print_stats("Output:", &output);
    if out_spec.bits_per_sample < 32 && output.peak() > 1.0 {
        tracing::warn!(
            peak = output.peak(),
            "output exceeds full scale and was clipped; lower wet or write 32-bit float"
        );
    }

    println!("\nWrote {}", args.output.display());
    Ok(())
}

fn print_stats(label: &str, samples: &StereoSamples) {
    println!(
        "  {label} RMS {:.1} / {:.1} dB, Peak {:.1} / {:.1} dB",
        rms_db(&samples.left),
        rms_db(&samples.right),
        peak_db(&samples.left),
        peak_db(&samples.right),
    );
}
