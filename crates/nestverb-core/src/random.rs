//! Seeded per-slot offsets for stereo decorrelation.
//!
//! The left and right lattices share every base parameter. What makes them
//! sound like two different rooms is a small, deterministic, per-slot offset
//! drawn from one of six independent streams:
//!
//! | Stream | Perturbs |
//! |--------|----------|
//! | [`OffsetStream::Time`] | elementary delay times |
//! | [`OffsetStream::InnerFeed`] | elementary all-pass gains |
//! | [`OffsetStream::Feed1`] .. [`OffsetStream::Feed4`] | outer lattice feeds, one stream per level |
//!
//! All six are derived from one master seed, so a seed fully reproduces the
//! stereo image. Draws are taken once per reseed and held; they only change
//! per block when a stream is explicitly [`redraw`](RandomOffsetBank::redraw)n.
//!
//! [`LowpassNoise`] is the slow random walk behind the delay time LFO. It uses
//! the same master seed on a separate ChaCha stream.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of independent offset streams.
pub const STREAM_COUNT: usize = 6;

/// One of the six offset streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OffsetStream {
    /// Elementary delay time.
    Time,
    /// Elementary all-pass gain.
    InnerFeed,
    /// Outer feed of level-1 lattices.
    Feed1,
    /// Outer feed of level-2 lattices.
    Feed2,
    /// Outer feed of level-3 lattices.
    Feed3,
    /// Outer feed of level-4 lattices.
    Feed4,
}

impl OffsetStream {
    /// All streams in derivation order.
    pub const ALL: [Self; STREAM_COUNT] = [
        Self::Time,
        Self::InnerFeed,
        Self::Feed1,
        Self::Feed2,
        Self::Feed3,
        Self::Feed4,
    ];

    /// Position in [`ALL`](Self::ALL).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stream for the outer feeds of lattice `level` (1-based).
    pub const fn feed(level: usize) -> Option<Self> {
        match level {
            1 => Some(Self::Feed1),
            2 => Some(Self::Feed2),
            3 => Some(Self::Feed3),
            4 => Some(Self::Feed4),
            _ => None,
        }
    }

    /// Parameter group prefix this stream perturbs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::InnerFeed => "inner_feed",
            Self::Feed1 => "d1_feed",
            Self::Feed2 => "d2_feed",
            Self::Feed3 => "d3_feed",
            Self::Feed4 => "d4_feed",
        }
    }

    /// Inverse of [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    /// Lattice level whose outer feeds this stream perturbs, if any.
    pub const fn level(self) -> Option<usize> {
        match self {
            Self::Time | Self::InnerFeed => None,
            Self::Feed1 => Some(1),
            Self::Feed2 => Some(2),
            Self::Feed3 => Some(3),
            Self::Feed4 => Some(4),
        }
    }
}

/// Map a draw in `[-1, 1]` to a left/right multiplier pair.
///
/// The offset `draw · range` always shrinks exactly one side and leaves the
/// other at `multiply`:
///
/// ```text
/// offset ≥ 0  →  [multiply, (1 − offset) · multiply]
/// offset < 0  →  [(1 + offset) · multiply, multiply]
/// ```
///
/// A zero `range` gives identical channels.
///
/// # Example
///
/// ```rust
/// use nestverb_core::offset_to_multiplier;
///
/// assert_eq!(offset_to_multiplier(0.5, 0.2, 1.0), [1.0, 0.9]);
/// assert_eq!(offset_to_multiplier(-0.5, 0.2, 2.0), [1.8, 2.0]);
/// ```
#[inline]
pub fn offset_to_multiplier(draw: f32, range: f32, multiply: f32) -> [f32; 2] {
    let offset = draw * range;
    if offset >= 0.0 {
        [multiply, (1.0 - offset) * multiply]
    } else {
        [(1.0 + offset) * multiply, multiply]
    }
}

/// Six seeded streams and the per-slot draws they currently hold.
///
/// Draw tables are allocated once in [`new`](Self::new); reseeding and
/// redrawing only overwrite them.
#[derive(Debug, Clone)]
pub struct RandomOffsetBank {
    seed: Option<u32>,
    sub_seeds: [u64; STREAM_COUNT],
    streams: [ChaCha8Rng; STREAM_COUNT],
    draws: [Vec<f32>; STREAM_COUNT],
    /// Set when a stream has moved past its reseed-time draws.
    advanced: [bool; STREAM_COUNT],
}

impl RandomOffsetBank {
    /// Create a bank with `slots[i]` held draws for stream `i`, seeded with 0.
    pub fn new(slots: [usize; STREAM_COUNT]) -> Self {
        let mut bank = Self {
            seed: None,
            sub_seeds: [0; STREAM_COUNT],
            streams: core::array::from_fn(|_| ChaCha8Rng::seed_from_u64(0)),
            draws: slots.map(|n| vec![0.0; n]),
            advanced: [false; STREAM_COUNT],
        };
        bank.reseed(0);
        bank
    }

    /// Master seed of the current epoch.
    pub fn seed(&self) -> Option<u32> {
        self.seed
    }

    /// Number of held draws for `stream`.
    pub fn slot_count(&self, stream: OffsetStream) -> usize {
        self.draws[stream.index()].len()
    }

    /// Derive six sub-seeds from `master_seed` and refill every table.
    pub fn reseed(&mut self, master_seed: u32) {
        let mut master = ChaCha8Rng::seed_from_u64(u64::from(master_seed));
        self.sub_seeds = core::array::from_fn(|_| master.next_u64());
        self.seed = Some(master_seed);

        for stream in OffsetStream::ALL {
            self.rewind(stream);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(seed = master_seed, "offset bank reseeded");
    }

    /// Reseed only when `seed` differs from the last applied one.
    ///
    /// Returns `true` when a reseed happened.
    pub fn reseed_if_changed(&mut self, seed: u32) -> bool {
        if self.seed == Some(seed) {
            return false;
        }
        self.reseed(seed);
        true
    }

    /// Restart every stream from its sub-seed, keeping the master seed.
    pub fn restart(&mut self) {
        for stream in OffsetStream::ALL {
            self.rewind(stream);
        }
    }

    /// Restore a stream's reseed-time draws.
    ///
    /// Does nothing unless the stream was [`redraw`](Self::redraw)n since.
    pub fn hold(&mut self, stream: OffsetStream) {
        if self.advanced[stream.index()] {
            self.rewind(stream);
        }
    }

    /// Continue a stream and replace its held draws with fresh ones.
    pub fn redraw(&mut self, stream: OffsetStream) {
        let i = stream.index();
        let rng = &mut self.streams[i];
        for draw in &mut self.draws[i] {
            *draw = rng.random_range(-1.0..=1.0);
        }
        self.advanced[i] = true;
    }

    /// Take the next value of `stream` in `[-1, 1]`.
    ///
    /// This advances the stream; the held per-slot draws are unaffected until
    /// the next [`redraw`](Self::redraw) or reseed.
    pub fn draw_offset(&mut self, stream: OffsetStream) -> f32 {
        self.streams[stream.index()].random_range(-1.0..=1.0)
    }

    /// Held draw for slot `index` of `stream`, or 0.0 past the table.
    #[inline]
    pub fn offset(&self, stream: OffsetStream, index: usize) -> f32 {
        self.draws[stream.index()].get(index).copied().unwrap_or(0.0)
    }

    fn rewind(&mut self, stream: OffsetStream) {
        let i = stream.index();
        self.streams[i] = ChaCha8Rng::seed_from_u64(self.sub_seeds[i]);
        self.redraw(stream);
        self.advanced[i] = false;
    }
}

/// ChaCha stream of the master seed reserved for [`LowpassNoise`].
const NOISE_STREAM: u64 = 1;

/// Lowpassed uniform noise, one left/right pair per slot.
///
/// Each [`advance`](Self::advance) takes a fresh draw in `[0, 1)` for every
/// slot and channel and moves the held value towards it by `kp`. Small
/// coefficients give a slow wander; 1.0 gives white noise at the call rate.
///
/// # Example
///
/// ```rust
/// use nestverb_core::LowpassNoise;
///
/// let mut noise = LowpassNoise::new(4);
/// noise.reseed(7);
/// assert_eq!(noise.value(2), [0.0, 0.0]);
///
/// noise.advance(0.5);
/// let [l, r] = noise.value(2);
/// assert!((0.0..0.5).contains(&l) && (0.0..0.5).contains(&r));
/// ```
#[derive(Debug, Clone)]
pub struct LowpassNoise {
    seed: u32,
    rng: ChaCha8Rng,
    state: Vec<[f32; 2]>,
}

impl LowpassNoise {
    /// Create `slots` pairs at rest, seeded with 0.
    pub fn new(slots: usize) -> Self {
        let mut noise = Self {
            seed: 0,
            rng: ChaCha8Rng::seed_from_u64(0),
            state: vec![[0.0; 2]; slots],
        };
        noise.restart();
        noise
    }

    /// Switch to `master_seed` and [`restart`](Self::restart).
    pub fn reseed(&mut self, master_seed: u32) {
        self.seed = master_seed;
        self.restart();
    }

    /// Rewind the generator and return every slot to zero.
    pub fn restart(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(u64::from(self.seed));
        self.rng.set_stream(NOISE_STREAM);
        self.state.fill([0.0; 2]);
    }

    /// Move every slot one step towards a fresh draw.
    pub fn advance(&mut self, kp: f32) {
        for pair in &mut self.state {
            for value in pair.iter_mut() {
                let draw: f32 = self.rng.random_range(0.0..1.0);
                *value += kp * (draw - *value);
            }
        }
    }

    /// Left/right values of slot `index`, or zeros past the end.
    #[inline]
    pub fn value(&self, index: usize) -> [f32; 2] {
        self.state.get(index).copied().unwrap_or([0.0; 2])
    }
}
