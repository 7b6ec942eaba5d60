//! Nested all-pass lattice reverb.
//!
//! Two identical lattice trees, one per channel, decorrelated by seeded
//! per-slot offsets. Every coefficient is ramped, so any parameter can move
//! while audio is running.
//!
//! ```text
//!  in_l ──(+)──► left tree ──┐            ┌──► dry·in_l + wet·l' ─► out_l
//!          ▲ cross·prev_r    ├─► spread ──┤
//!  in_r ──(+)──► right tree ─┘            └──► dry·in_r + wet·r' ─► out_r
//!          ▲ cross·prev_l        (l', r') become (prev_l, prev_r)
//! ```
//!
//! Effective per-slot coefficients are resolved once per block:
//!
//! ```text
//! [m_l, m_r] = offset_to_multiplier(draw, offset_range, multiply)
//! left  = base · m_l
//! right = base · m_r
//! ```
//!
//! Delay times additionally wander by `time_lfo_amount · noise`, where the
//! noise is a per-unit, per-channel random walk in `[0, 1)` advanced once per
//! block. Each unit's output passes through a one-pole damping filter set by
//! `lowpass_cutoff`, identical for both channels.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::boxed::Box;

use nestverb_core::{
    AllpassCell, Effect, Lattice, LatticeNode, LowpassNoise, OffsetStream, ParamDescriptor,
    ParameterInfo, ParameterRamp, ProcessContext, RampTiming, RandomOffsetBank, SlotVisitor,
    dry_wet, flush_denormal, offset_to_multiplier, stereo_spread,
};

use crate::params::{MAX_LEVELS, MAX_TIME, ParamLayout, ReverbParams};

/// Default longest delay time in seconds.
pub const DEFAULT_MAX_TIME: f32 = MAX_TIME;

/// One level, sixteen cells.
pub type FlatLattice = Lattice<AllpassCell, 16>;

/// Four levels of four: 256 cells.
pub type DenseLattice = Lattice<Lattice<Lattice<Lattice<AllpassCell, 4>, 4>, 4>, 4>;

/// Four levels narrowing outwards: 5 · 4 · 3 · 2 = 120 cells.
pub type TaperedLattice = Lattice<Lattice<Lattice<Lattice<AllpassCell, 5>, 4>, 3>, 2>;

/// Single-level reverb with 16 cells per channel.
pub type FlatReverb = LatticeReverb<FlatLattice>;

/// Four-level reverb with 256 cells per channel.
pub type DenseReverb = LatticeReverb<DenseLattice>;

/// Four-level reverb with 120 cells per channel.
pub type TaperedReverb = LatticeReverb<TaperedLattice>;

/// Output channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Left tree.
    Left,
    /// Right tree.
    Right,
}

/// Resolved coefficients of one elementary unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitParameters {
    /// Delay time in seconds.
    pub seconds: f32,
    /// All-pass gain.
    pub inner_feed: f32,
    /// Output damping coefficient.
    pub damping: f32,
}

/// Nested all-pass lattice reverb over the tree type `T`.
///
/// `T` must be a [`Lattice`] one to four levels deep; anything else fails to
/// compile.
///
/// # Parameters
///
/// All parameters live in a [`ReverbParams`] store reached through
/// [`params_mut`](Self::params_mut). Changes take effect at the next
/// [`set_parameters`](Effect::set_parameters) call and glide over the
/// smoothness time.
///
/// # Example
///
/// ```rust
/// use nestverb_core::{Effect, OffsetStream};
/// use nestverb_effects::{FlatReverb, ParamKey};
///
/// let mut reverb = FlatReverb::new(48000.0);
/// reverb.params_mut().fill(OffsetStream::Time, 0.03);
/// reverb.params_mut().set(ParamKey::Seed, 7.0);
/// reverb.set_parameters();
///
/// let (l, r) = reverb.process_stereo(0.5, 0.5);
/// assert!(l.is_finite() && r.is_finite());
/// ```
pub struct LatticeReverb<T: LatticeNode> {
    left: Box<T>,
    right: Box<T>,
    params: ReverbParams,
    bank: RandomOffsetBank,
    lfo: LowpassNoise,
    timing: RampTiming,

    // Smoothed globals
    stereo_cross: ParameterRamp,
    stereo_spread: ParameterRamp,
    dry: ParameterRamp,
    wet: ParameterRamp,

    /// Post-spread output of the previous sample
    previous: (f32, f32),
    sample_rate: f32,
    max_time: f32,
}

impl<T: LatticeNode> LatticeReverb<T> {
    /// Create a reverb whose delays hold up to [`DEFAULT_MAX_TIME`].
    pub fn new(sample_rate: f32) -> Self {
        Self::with_max_time(sample_rate, DEFAULT_MAX_TIME)
    }

    /// Create a reverb whose delays hold up to `max_time` seconds.
    pub fn with_max_time(sample_rate: f32, max_time: f32) -> Self {
        const { assert!(T::LEVEL >= 1 && T::LEVEL <= MAX_LEVELS) };

        let layout = ParamLayout::of::<T>();
        let mut reverb = Self {
            left: Box::default(),
            right: Box::default(),
            params: ReverbParams::new(layout),
            bank: RandomOffsetBank::new(layout.stream_slots()),
            lfo: LowpassNoise::new(T::UNITS),
            timing: RampTiming::default(),
            stereo_cross: ParameterRamp::default(),
            stereo_spread: ParameterRamp::default(),
            dry: ParameterRamp::default(),
            wet: ParameterRamp::default(),
            previous: (0.0, 0.0),
            sample_rate,
            max_time,
        };
        reverb.setup(sample_rate);
        reverb
    }

    /// Parameter store.
    pub fn params(&self) -> &ReverbParams {
        &self.params
    }

    /// Mutable parameter store. Call [`set_parameters`](Effect::set_parameters)
    /// afterwards to apply the changes.
    pub fn params_mut(&mut self) -> &mut ReverbParams {
        &mut self.params
    }

    /// Current sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Longest delay time the buffers hold, in seconds.
    pub fn max_time(&self) -> f32 {
        self.max_time
    }

    /// Master seed of the current offset epoch.
    pub fn seed(&self) -> Option<u32> {
        self.bank.seed()
    }

    /// Resolved target coefficients of unit `index` in one channel.
    pub fn unit_parameters(&self, channel: Channel, index: usize) -> Option<UnitParameters> {
        self.tree(channel).unit(index).map(|cell| UnitParameters {
            seconds: cell.seconds.target(),
            inner_feed: cell.inner_feed.target(),
            damping: cell.damping.target(),
        })
    }

    /// Resolved target outer feed of slot `index` at `level` in one channel.
    pub fn feed_parameter(&self, channel: Channel, level: usize, index: usize) -> Option<f32> {
        self.tree(channel).feed(level, index).map(ParameterRamp::target)
    }

    fn tree(&self, channel: Channel) -> &T {
        match channel {
            Channel::Left => &self.left,
            Channel::Right => &self.right,
        }
    }

    /// Resolve every slot from the store and the held draws.
    fn assign(&mut self, snap: bool) {
        let mut resolve = Resolve {
            params: &self.params,
            bank: &self.bank,
            lfo: &self.lfo,
            snap,
            unit: 0,
            slot: [0; MAX_LEVELS + 1],
        };
        T::visit_pair(&mut self.left, &mut self.right, &mut resolve);

        let globals = [
            (&mut self.stereo_cross, self.params.stereo_cross()),
            (&mut self.stereo_spread, self.params.stereo_spread()),
            (&mut self.dry, self.params.dry()),
            (&mut self.wet, self.params.wet()),
        ];
        for (ramp, value) in globals {
            set_ramp(ramp, value, snap);
        }
    }
}

impl<T: LatticeNode> Effect for LatticeReverb<T> {
    fn setup(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.timing.set_sample_rate(sample_rate);
        self.left.setup(sample_rate, self.max_time);
        self.right.setup(sample_rate, self.max_time);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate,
            max_time = self.max_time,
            levels = T::LEVEL,
            units = T::UNITS,
            "lattice reverb configured"
        );

        self.reset();
    }

    fn reset(&mut self) {
        self.bank.reseed(self.params.seed());
        self.lfo.reseed(self.params.seed());
        self.timing.set_time(self.params.smoothness());
        self.assign(true);

        self.left.reset();
        self.right.reset();
        self.previous = (0.0, 0.0);
    }

    fn set_parameters(&mut self) {
        self.timing.set_time(self.params.smoothness());
        if self.bank.reseed_if_changed(self.params.seed()) {
            self.lfo.reseed(self.params.seed());
        }

        for stream in OffsetStream::ALL {
            if self.params.modulation(stream) {
                self.bank.redraw(stream);
            } else {
                self.bank.hold(stream);
            }
        }
        self.lfo.advance(self.params.time_lfo_lowpass());

        self.assign(false);
    }

    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let kp = self.timing.kp();
        let cross = self.stereo_cross.process(kp);
        let spread = self.stereo_spread.process(kp);
        let dry = self.dry.process(kp);
        let wet = self.wet.process(kp);

        let ctx = ProcessContext {
            sample_rate: self.sample_rate,
            kp,
        };
        let (prev_l, prev_r) = self.previous;
        let raw_l = self.left.process(left + cross * prev_r, &ctx);
        let raw_r = self.right.process(right + cross * prev_l, &ctx);

        let (wet_l, wet_r) = stereo_spread(raw_l, raw_r, spread);
        self.previous = (flush_denormal(wet_l), flush_denormal(wet_r));

        (dry_wet(left, wet_l, dry, wet), dry_wet(right, wet_r, dry, wet))
    }
}

impl<T: LatticeNode> ParameterInfo for LatticeReverb<T> {
    fn param_count(&self) -> usize {
        self.params.param_count()
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        self.params.param_info(index)
    }

    fn get_param(&self, index: usize) -> f32 {
        self.params.get_param(index)
    }

    fn set_param(&mut self, index: usize, value: f32) {
        self.params.set_param(index, value);
    }
}

fn set_ramp(ramp: &mut ParameterRamp, value: f32, snap: bool) {
    if snap {
        ramp.reset(value);
    } else {
        ramp.push(value);
    }
}

/// Writes resolved left/right coefficients into both trees.
///
/// Units and feed slots arrive in flat index order per level, so running
/// counters give each slot its index.
struct Resolve<'a> {
    params: &'a ReverbParams,
    bank: &'a RandomOffsetBank,
    lfo: &'a LowpassNoise,
    snap: bool,
    unit: usize,
    slot: [usize; MAX_LEVELS + 1],
}

impl Resolve<'_> {
    fn pair(&self, stream: OffsetStream, index: usize) -> [f32; 2] {
        offset_to_multiplier(
            self.bank.offset(stream, index),
            self.params.offset_range(stream),
            self.params.multiply(stream),
        )
    }
}

impl SlotVisitor for Resolve<'_> {
    fn unit(&mut self, left: &mut AllpassCell, right: &mut AllpassCell) {
        let i = self.unit;
        self.unit += 1;

        let time = self.params.time(i);
        let depth = self.params.time_lfo_amount(i);
        let [l, r] = self.pair(OffsetStream::Time, i);
        let [lfo_l, lfo_r] = self.lfo.value(i);
        set_ramp(&mut left.seconds, time * l + depth * lfo_l, self.snap);
        set_ramp(&mut right.seconds, time * r + depth * lfo_r, self.snap);

        let gain = self.params.inner_feed(i);
        let [l, r] = self.pair(OffsetStream::InnerFeed, i);
        set_ramp(&mut left.inner_feed, gain * l, self.snap);
        set_ramp(&mut right.inner_feed, gain * r, self.snap);

        let cutoff = self.params.lowpass_cutoff(i);
        set_ramp(&mut left.damping, cutoff, self.snap);
        set_ramp(&mut right.damping, cutoff, self.snap);
    }

    fn feed(&mut self, level: usize, left: &mut ParameterRamp, right: &mut ParameterRamp) {
        let Some(stream) = OffsetStream::feed(level) else {
            return;
        };
        let i = self.slot[level];
        self.slot[level] += 1;

        let feed = self.params.feed(level, i);
        let [l, r] = self.pair(stream, i);
        set_ramp(left, feed * l, self.snap);
        set_ramp(right, feed * r, self.snap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ParamKey, SlotGroup};
    use alloc::vec::Vec;

    const SR: f32 = 48000.0;

    type Small = LatticeReverb<Lattice<Lattice<AllpassCell, 2>, 2>>;

    fn small() -> Small {
        let mut reverb = Small::with_max_time(SR, 0.01);
        for (i, t) in [0.0011, 0.0013, 0.0017, 0.0019].into_iter().enumerate() {
            reverb.params_mut().set(ParamKey::Time(i), t);
        }
        reverb.params_mut().fill(OffsetStream::InnerFeed, 0.3);
        reverb.params_mut().fill(OffsetStream::Feed1, 0.3);
        reverb.params_mut().fill(OffsetStream::Feed2, 0.3);
        reverb.params_mut().set(ParamKey::Dry, 0.0);
        reverb.params_mut().set(ParamKey::Wet, 1.0);
        reverb.reset();
        reverb
    }

    fn render(reverb: &mut impl Effect, len: usize) -> (Vec<f32>, Vec<f32>) {
        (0..len)
            .map(|n| {
                let x = if n == 0 { 1.0 } else { 0.0 };
                reverb.process_stereo(x, 0.5 * x)
            })
            .unzip()
    }

    #[test]
    fn test_defaults_resolved_on_construction() {
        let reverb = FlatReverb::new(SR);
        assert_eq!(reverb.seed(), Some(0));
        assert_eq!(reverb.max_time(), DEFAULT_MAX_TIME);

        for i in 0..16 {
            let l = reverb.unit_parameters(Channel::Left, i).unwrap();
            let r = reverb.unit_parameters(Channel::Right, i).unwrap();
            // Time offsets of 5% shrink exactly one side
            assert!(l.seconds == 0.1 || r.seconds == 0.1);
            assert!(l.seconds >= 0.095 - 1e-6 && r.seconds >= 0.095 - 1e-6);
            // Inner feed has no offset by default
            assert_eq!(l.inner_feed, 0.5);
            assert_eq!(r.inner_feed, 0.5);
            assert_eq!((l.damping, r.damping), (1.0, 1.0));
            assert_eq!(reverb.feed_parameter(Channel::Left, 1, i), Some(0.5));
        }
        assert!(reverb.unit_parameters(Channel::Left, 16).is_none());
        assert!(reverb.feed_parameter(Channel::Left, 2, 0).is_none());
    }

    #[test]
    fn test_dense_topology_sizes() {
        let reverb = DenseReverb::new(SR);
        assert_eq!(reverb.param_count(), 4 * 256 + 256 + 64 + 16 + 4 + 18 + 7);
        assert!(reverb.unit_parameters(Channel::Right, 255).is_some());
        assert!(reverb.feed_parameter(Channel::Right, 4, 3).is_some());
        assert!(reverb.feed_parameter(Channel::Right, 4, 4).is_none());

        let tapered = TaperedReverb::new(SR);
        assert_eq!(tapered.params().layout().units(), 120);
        assert_eq!(tapered.params().layout().slots(4), 2);
    }

    #[test]
    fn test_set_parameters_pushes_targets() {
        let mut reverb = small();
        reverb.params_mut().set(ParamKey::Feed { level: 2, index: 1 }, -0.4);
        reverb.params_mut().set(ParamKey::OffsetRange(OffsetStream::Time), 0.0);
        reverb.set_parameters();

        assert_eq!(reverb.feed_parameter(Channel::Left, 2, 1), Some(-0.4));
        assert_eq!(reverb.feed_parameter(Channel::Right, 2, 1), Some(-0.4));
        let unit = reverb.unit_parameters(Channel::Right, 2).unwrap();
        assert_eq!(unit.seconds, 0.0017);

        // Targets are pushed, not snapped
        assert_eq!(reverb.left.feed(2, 1).unwrap().value(), 0.3);
    }

    #[test]
    fn test_reset_snaps() {
        let mut reverb = small();
        reverb.params_mut().set(ParamKey::Wet, 0.25);
        reverb.params_mut().set(ParamKey::Feed { level: 1, index: 0 }, 0.1);
        reverb.set_parameters();
        reverb.reset();

        assert!(reverb.wet.is_settled());
        assert_eq!(reverb.wet.value(), 0.25);
        assert_eq!(reverb.left.feed(1, 0).unwrap().value(), 0.1);
    }

    #[test]
    fn test_impulse_decays_to_silence() {
        let mut reverb = small();
        let (l, r) = render(&mut reverb, 96_000);

        assert!(l.iter().chain(&r).all(|v| v.is_finite()));
        assert!(l[..2400].iter().any(|&v| v != 0.0));
        assert!(l[48_000..].iter().chain(&r[48_000..]).all(|v| v.abs() < 1e-9));
        assert_eq!(l[95_999], 0.0);
        assert_eq!(r[95_999], 0.0);
    }

    #[test]
    fn test_dry_only_passes_input() {
        let mut reverb = small();
        reverb.params_mut().set(ParamKey::Dry, 1.0);
        reverb.params_mut().set(ParamKey::Wet, 0.0);
        reverb.reset();

        for &(l, r) in &[(0.5, -0.25), (0.0, 1.0), (-1.0, 0.0)] {
            assert_eq!(reverb.process_stereo(l, r), (l, r));
        }
    }

    #[test]
    fn test_cross_zero_isolates_channels() {
        let mut a = small();
        let mut b = small();

        for n in 0..4000 {
            let x = if n % 500 == 0 { 1.0 } else { 0.0 };
            let (la, _) = a.process_stereo(x, 0.0);
            let (lb, _) = b.process_stereo(x, if n % 37 == 0 { -0.8 } else { 0.1 });
            assert_eq!(la.to_bits(), lb.to_bits(), "sample {n}: {la} vs {lb}");
        }
    }

    #[test]
    fn test_cross_feed_couples_channels() {
        let mut reverb = small();
        reverb.params_mut().set(ParamKey::StereoCross, 0.5);
        reverb.reset();

        let right: Vec<f32> = (0..2000)
            .map(|n| reverb.process_stereo(if n == 0 { 1.0 } else { 0.0 }, 0.0).1)
            .collect();
        assert!(right.iter().any(|&v| v != 0.0));
    }

    #[test]
    fn test_spread_zero_is_mono() {
        let mut reverb = small();
        reverb.params_mut().set(ParamKey::StereoSpread, 0.0);
        reverb.reset();

        let (l, r) = render(&mut reverb, 3000);
        assert_eq!(l, r);
    }

    fn both(reverb: &Small, index: usize) -> (Option<UnitParameters>, Option<UnitParameters>) {
        (
            reverb.unit_parameters(Channel::Left, index),
            reverb.unit_parameters(Channel::Right, index),
        )
    }

    #[test]
    fn test_modulation_toggle() {
        let mut reverb = small();
        reverb.params_mut().set(ParamKey::OffsetRange(OffsetStream::InnerFeed), 0.5);
        reverb.set_parameters();
        let held = both(&reverb, 0);

        // Off: repeated blocks resolve to the same targets
        reverb.set_parameters();
        reverb.set_parameters();
        assert_eq!(both(&reverb, 0), held);

        // On: every block draws new offsets
        reverb.params_mut().set(ParamKey::Modulation(OffsetStream::Time), 1.0);
        reverb.params_mut().set(ParamKey::Modulation(OffsetStream::InnerFeed), 1.0);
        let targets: Vec<_> = (0..4)
            .map(|_| {
                reverb.set_parameters();
                both(&reverb, 0)
            })
            .collect();
        assert!(targets.windows(2).all(|w| w[0] != w[1]));

        // Off again: back to the reseed-time draws
        reverb.params_mut().set(ParamKey::Modulation(OffsetStream::Time), 0.0);
        reverb.params_mut().set(ParamKey::Modulation(OffsetStream::InnerFeed), 0.0);
        reverb.set_parameters();
        assert_eq!(both(&reverb, 0), held);
    }

    #[test]
    fn test_seed_change_reseeds_at_block() {
        let mut reverb = small();
        let before: Vec<_> = (0..4).map(|i| both(&reverb, i)).collect();

        reverb.params_mut().set(ParamKey::Seed, 12345.0);
        reverb.set_parameters();
        assert_eq!(reverb.seed(), Some(12345));

        let after: Vec<_> = (0..4).map(|i| both(&reverb, i)).collect();
        assert_ne!(before, after);
        assert_eq!(reverb.params().time(0), 0.0011);
    }

    #[test]
    fn test_over_range_times_hold_longest_delay() {
        // At 1024 Hz a 1/16 s buffer holds exactly 128 cells of history, so
        // any longer time must read the same taps as 1/16 s itself
        let build = |time: f32| {
            let mut reverb = FlatReverb::with_max_time(1024.0, 0.0625);
            reverb.params_mut().fill(OffsetStream::Time, time);
            reverb.params_mut().set(ParamKey::OffsetRange(OffsetStream::Time), 0.0);
            reverb.params_mut().set(ParamKey::Dry, 0.0);
            reverb.reset();
            reverb
        };
        let mut clamped = build(0.2);
        let mut longest = build(0.0625);

        let (a, _) = render(&mut clamped, 2000);
        let (b, _) = render(&mut longest, 2000);
        assert_eq!(a, b);
    }

    #[test]
    fn test_damping_shortens_tail() {
        // Sample 0 is the direct path, which no cell touches
        let tail_energy = |reverb: &mut Small| {
            let (l, r) = render(reverb, 9600);
            l[1..].iter().chain(&r[1..]).map(|v| v * v).sum::<f32>()
        };

        let mut plain = small();
        let mut damped = small();
        damped.params_mut().fill(SlotGroup::LowpassCutoff, 0.05);
        damped.reset();

        let p = damped.unit_parameters(Channel::Right, 3).unwrap();
        assert_eq!(p.damping, 0.05);

        let plain_energy = tail_energy(&mut plain);
        let damped_energy = tail_energy(&mut damped);
        assert!(
            damped_energy < 0.5 * plain_energy,
            "damped {damped_energy} vs plain {plain_energy}"
        );
    }

    #[test]
    fn test_time_lfo_wanders_within_depth() {
        let depth = 0.0005;
        let mut reverb = small();
        reverb.params_mut().set(ParamKey::TimeLfoAmount(0), depth);
        reverb.params_mut().set(ParamKey::TimeLfoLowpass, 1.0);
        reverb.reset();

        // Reset leaves the walk at rest
        let (base_l, base_r) = match both(&reverb, 0) {
            (Some(l), Some(r)) => (l.seconds, r.seconds),
            _ => panic!("unit 0 missing"),
        };
        let still = both(&reverb, 1);

        let mut seen = Vec::new();
        for _ in 0..8 {
            reverb.set_parameters();
            let l = reverb.unit_parameters(Channel::Left, 0).unwrap().seconds;
            let r = reverb.unit_parameters(Channel::Right, 0).unwrap().seconds;
            assert!(l >= base_l - 1e-9 && l < base_l + depth + 1e-9, "left {l}");
            assert!(r >= base_r - 1e-9 && r < base_r + depth + 1e-9, "right {r}");
            assert_ne!(l - base_l, r - base_r);
            seen.push((l, r));

            // Units without depth keep their times
            assert_eq!(both(&reverb, 1), still);
        }
        assert!(seen.windows(2).all(|w| w[0] != w[1]));

        // Same seed, same walk
        let mut again = small();
        again.params_mut().set(ParamKey::TimeLfoAmount(0), depth);
        again.params_mut().set(ParamKey::TimeLfoLowpass, 1.0);
        again.reset();
        for &(l, r) in &seen {
            again.set_parameters();
            let p = (
                again.unit_parameters(Channel::Left, 0).unwrap().seconds,
                again.unit_parameters(Channel::Right, 0).unwrap().seconds,
            );
            assert_eq!(p, (l, r));
        }
    }

    #[test]
    fn test_time_lfo_at_rest_without_depth() {
        let mut reverb = small();
        reverb.params_mut().set(ParamKey::TimeLfoLowpass, 1.0);
        reverb.set_parameters();
        let first: Vec<_> = (0..4).map(|i| both(&reverb, i)).collect();
        for _ in 0..4 {
            reverb.set_parameters();
            let now: Vec<_> = (0..4).map(|i| both(&reverb, i)).collect();
            assert_eq!(now, first);
        }
    }

    #[test]
    fn test_parameter_info_delegates() {
        let mut reverb = small();
        let index = reverb
            .params()
            .layout()
            .index_of(ParamKey::StereoSpread)
            .unwrap();
        reverb.set_param(index, 3.0);
        assert_eq!(reverb.get_param(index), 1.0);
        assert_eq!(reverb.param_info(index).unwrap().string_id, "stereo_spread");
    }

    #[test]
    fn test_setup_resizes() {
        let mut reverb = small();
        reverb.setup(96000.0);
        assert_eq!(reverb.sample_rate(), 96000.0);
        assert!(reverb.left.unit(0).unwrap().capacity() >= 1920);

        let (l, _) = render(&mut reverb, 1000);
        assert!(l.iter().all(|v| v.is_finite()));
    }
}
