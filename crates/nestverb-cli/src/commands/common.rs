//! Shared CLI helpers used across multiple commands.

use anyhow::{Context, bail};
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use nestverb_core::{Effect, LatticeNode, ParameterInfo};
use nestverb_effects::{
    DEFAULT_MAX_TIME, DenseReverb, FlatReverb, LatticeReverb, ParamKey, ParseParamError,
    ReverbParams, SlotGroup, TaperedReverb,
};

/// Parse a `key=value` string for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!(
            "Invalid parameter format: '{}' (expected key=value)",
            s
        )),
    }
}

/// Lattice tree shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Topology {
    /// One level of 16 units
    Flat,
    /// Four levels of 5, 4, 3 and 2 (120 units)
    Tapered,
    /// Four levels of 4 (256 units)
    Dense,
}

impl Topology {
    /// Number of nesting levels.
    pub fn levels(self) -> usize {
        match self {
            Self::Flat => 1,
            Self::Tapered | Self::Dense => 4,
        }
    }
}

/// Engine options shared by every command that builds a reverb.
#[derive(Args, Debug, Clone)]
pub struct EngineArgs {
    /// Lattice topology
    #[arg(short, long, value_enum, default_value_t = Topology::Dense)]
    pub topology: Topology,

    /// Longest delay time any unit may reach, in seconds
    #[arg(long, default_value_t = DEFAULT_MAX_TIME)]
    pub max_time: f32,

    /// Parameter override, e.g. "time.3=0.05", "time=0.05" (whole group), "seed=7"
    #[arg(short, long = "param", value_parser = parse_key_val, number_of_values = 1)]
    pub params: Vec<(String, String)>,
}

/// A lattice reverb of any topology behind one object-safe interface.
pub trait Reverb: Effect + ParameterInfo + Send {
    /// Parameter store.
    fn params(&self) -> &ReverbParams;
    /// Mutable parameter store; call [`Effect::reset`] or
    /// [`Effect::set_parameters`] afterwards.
    fn params_mut(&mut self) -> &mut ReverbParams;
}

impl<T: LatticeNode + Send> Reverb for LatticeReverb<T> {
    fn params(&self) -> &ReverbParams {
        LatticeReverb::params(self)
    }

    fn params_mut(&mut self) -> &mut ReverbParams {
        LatticeReverb::params_mut(self)
    }
}

/// Build a reverb from the command-line options and apply every `--param`.
///
/// The engine is reset afterwards, so it starts from the overridden values.
pub fn build_reverb(args: &EngineArgs, sample_rate: f32) -> anyhow::Result<Box<dyn Reverb>> {
    if !(args.max_time.is_finite() && args.max_time > 0.0) {
        bail!("--max-time must be a positive number of seconds");
    }
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        bail!("invalid sample rate {sample_rate}");
    }

    let mut reverb: Box<dyn Reverb> = match args.topology {
        Topology::Flat => Box::new(FlatReverb::with_max_time(sample_rate, args.max_time)),
        Topology::Tapered => Box::new(TaperedReverb::with_max_time(sample_rate, args.max_time)),
        Topology::Dense => Box::new(DenseReverb::with_max_time(sample_rate, args.max_time)),
    };

    for (key, value) in &args.params {
        apply_param(reverb.params_mut(), key, value)?;
    }
    reverb.reset();

    tracing::info!(
        topology = ?args.topology,
        sample_rate,
        max_time = args.max_time,
        overrides = args.params.len(),
        "reverb ready"
    );
    Ok(reverb)
}

/// Apply one `key=value` override.
///
/// `key` is either a textual parameter ID (`time.3`, `d2_feed.0`, `wet`,
/// `time_multiply`) or a bare per-slot group name (`time`, `lowpass_cutoff`),
/// which sets every slot of that group. Switch values also accept `on`/`off`.
pub fn apply_param(params: &mut ReverbParams, key: &str, value: &str) -> anyhow::Result<()> {
    let value = parse_value(value)
        .with_context(|| format!("invalid value '{value}' for parameter '{key}'"))?;

    match key.parse::<ParamKey>() {
        Ok(param) => {
            if !params.set(param, value) {
                bail!("parameter '{param}' does not exist in this topology");
            }
        }
        Err(ParseParamError::MissingIndex) => {
            let Some(group) = SlotGroup::from_name(key) else {
                bail!("unknown parameter '{key}'");
            };
            if !params.keys().any(|k| k.slot_group() == Some(group)) {
                bail!("parameter group '{key}' does not exist in this topology");
            }
            params.fill(group, value);
        }
        Err(err) => bail!("parameter '{key}': {err}"),
    }

    tracing::debug!(key, value, "parameter override");
    Ok(())
}

fn parse_value(value: &str) -> anyhow::Result<f32> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" => Ok(1.0),
        "off" | "false" => Ok(0.0),
        other => {
            let parsed: f32 = other.parse()?;
            if !parsed.is_finite() {
                bail!("value is not finite");
            }
            Ok(parsed)
        }
    }
}

/// Progress bar over `len` sample frames.
pub fn progress_bar(len: u64) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );
    Ok(pb)
}

/// Convert seconds to a whole number of samples.
pub fn seconds_to_samples(seconds: f32, sample_rate: u32) -> anyhow::Result<usize> {
    if !(seconds.is_finite() && seconds >= 0.0) {
        bail!("duration must be a non-negative number of seconds, got {seconds}");
    }
    Ok((f64::from(seconds) * f64::from(sample_rate)).round() as usize)
}
