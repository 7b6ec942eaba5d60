//! Offline rendering of a stereo effect over a whole file.

use nestverb_core::Effect;

use crate::{Error, Result, StereoSamples};

/// Block size used when none is given.
pub const DEFAULT_BLOCK_SIZE: usize = 256;

/// How an effect is driven over a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Samples per block. `set_parameters` runs once at the start of each.
    pub block_size: usize,
    /// Silence appended to the input so the tail can ring out.
    pub tail_samples: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            tail_samples: 0,
        }
    }
}

/// Run `effect` over `input` block by block.
///
/// The effect is used in its current state; call [`Effect::reset`] first for
/// a clean render. `progress` receives the number of frames finished after
/// every block.
///
/// # Errors
///
/// [`Error::EmptyInput`] if `input` is empty.
pub fn render<E, F>(
    effect: &mut E,
    input: &StereoSamples,
    options: RenderOptions,
    mut progress: F,
) -> Result<StereoSamples>
where
    E: Effect + ?Sized,
    F: FnMut(usize),
{
    if input.is_empty() {
        return Err(Error::EmptyInput);
    }

    let block_size = options.block_size.max(1);
    let mut source = input.clone();
    source.extend_silence(options.tail_samples);
    let mut output = StereoSamples::silence(source.len());

    tracing::debug!(
        frames = source.len(),
        block_size,
        tail = options.tail_samples,
        "render started"
    );

    let inputs = source.left.chunks(block_size).zip(source.right.chunks(block_size));
    let outputs = output
        .left
        .chunks_mut(block_size)
        .zip(output.right.chunks_mut(block_size));

    let mut done = 0;
    for ((in_l, in_r), (out_l, out_r)) in inputs.zip(outputs) {
        effect.set_parameters();
        effect.process(in_l, in_r, out_l, out_r);
        done += in_l.len();
        progress(done);
    }

    Ok(output)
}
