//! Parameter store for the lattice reverb.
//!
//! Every parameter is a plain `f32` addressed by a [`ParamKey`]. Keys print as
//! and parse from stable textual IDs:
//!
//! | Key | Text |
//! |-----|------|
//! | [`ParamKey::Time`] | `time.3` |
//! | [`ParamKey::InnerFeed`] | `inner_feed.3` |
//! | [`ParamKey::LowpassCutoff`] | `lowpass_cutoff.3` |
//! | [`ParamKey::TimeLfoAmount`] | `time_lfo_amount.3` |
//! | [`ParamKey::Feed`] | `d2_feed.1` |
//! | [`ParamKey::Multiply`] | `time_multiply` |
//! | [`ParamKey::OffsetRange`] | `d1_feed_offset_range` |
//! | [`ParamKey::Modulation`] | `time_modulation` |
//! | globals | `seed`, `stereo_cross`, `stereo_spread`, `dry`, `wet`, `smoothness`, `time_lfo_lowpass` |
//!
//! # Flat layout
//!
//! [`ReverbParams`] stores all values in one vector, sized from the lattice
//! topology when it is built:
//!
//! ```text
//! time × units | inner_feed × units | lowpass_cutoff × units
//! | time_lfo_amount × units | d1..d4_feed × slots(level)
//! | multiply × 6 | offset_range × 6 | modulation × 6
//! | seed | stereo_cross | stereo_spread | dry | wet | smoothness
//! | time_lfo_lowpass
//! ```
//!
//! This is also the index order of its [`ParameterInfo`] implementation.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use nestverb_core::{
    LatticeNode, OffsetStream, ParamDescriptor, ParamId, ParamScale, ParameterInfo, STREAM_COUNT,
};

/// Deepest supported lattice nesting.
pub const MAX_LEVELS: usize = 4;

/// Largest seed value.
pub const MAX_SEED: u32 = 1 << 24;

/// Upper bound of every per-slot delay time, in seconds.
pub const MAX_TIME: f32 = 0.2;

/// Magnitude limit of every feed coefficient.
pub const MAX_FEED: f32 = 0.999;

/// Address of one reverb parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKey {
    /// Base delay time of an elementary unit.
    Time(usize),
    /// Base all-pass gain of an elementary unit.
    InnerFeed(usize),
    /// One-pole damping coefficient on a unit's output; 1.0 is undamped.
    LowpassCutoff(usize),
    /// Depth of a unit's random delay time modulation, in seconds.
    TimeLfoAmount(usize),
    /// Base outer feed of slot `index` at lattice `level` (1-based).
    Feed {
        /// Lattice level, 1 to 4.
        level: usize,
        /// Slot index within the level.
        index: usize,
    },
    /// Scale applied to a whole group.
    Multiply(OffsetStream),
    /// Left/right offset depth of a group.
    OffsetRange(OffsetStream),
    /// Redraw a group's offsets every block.
    Modulation(OffsetStream),
    /// Master seed of the offset streams.
    Seed,
    /// Cross-feed from each channel's previous output into the other input.
    StereoCross,
    /// Mid/side width; 0.5 leaves the image unchanged.
    StereoSpread,
    /// Dry gain.
    Dry,
    /// Wet gain.
    Wet,
    /// Smoothing time of every coefficient ramp, in seconds.
    Smoothness,
    /// Lowpass coefficient of the random walk behind the time LFO.
    TimeLfoLowpass,
}

/// Global keys in layout order.
const GLOBALS: [ParamKey; 7] = [
    ParamKey::Seed,
    ParamKey::StereoCross,
    ParamKey::StereoSpread,
    ParamKey::Dry,
    ParamKey::Wet,
    ParamKey::Smoothness,
    ParamKey::TimeLfoLowpass,
];

/// Per-unit groups stored ahead of the feeds.
const UNIT_GROUPS: usize = 4;

/// A per-slot parameter group, the part of a textual ID before the `.`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotGroup {
    /// Times, inner feeds or one level's outer feeds.
    Offset(OffsetStream),
    /// Output damping of every unit.
    LowpassCutoff,
    /// Time LFO depth of every unit.
    TimeLfoAmount,
}

impl SlotGroup {
    /// Textual prefix, e.g. `time` or `lowpass_cutoff`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Offset(stream) => stream.name(),
            Self::LowpassCutoff => "lowpass_cutoff",
            Self::TimeLfoAmount => "time_lfo_amount",
        }
    }

    /// Look up a group by its prefix.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "lowpass_cutoff" => Some(Self::LowpassCutoff),
            "time_lfo_amount" => Some(Self::TimeLfoAmount),
            _ => OffsetStream::from_name(name).map(Self::Offset),
        }
    }

    /// Key of slot `index` in this group.
    pub fn key(self, index: usize) -> ParamKey {
        match self {
            Self::Offset(OffsetStream::Time) => ParamKey::Time(index),
            Self::Offset(OffsetStream::InnerFeed) => ParamKey::InnerFeed(index),
            Self::Offset(stream) => ParamKey::Feed {
                level: stream.level().unwrap_or(1),
                index,
            },
            Self::LowpassCutoff => ParamKey::LowpassCutoff(index),
            Self::TimeLfoAmount => ParamKey::TimeLfoAmount(index),
        }
    }
}

impl From<OffsetStream> for SlotGroup {
    fn from(stream: OffsetStream) -> Self {
        Self::Offset(stream)
    }
}

impl ParamKey {
    /// Stable numeric ID.
    ///
    /// Per-slot groups use `(stream + 1) · 10000 + index`, followed by
    /// `70000 + index` for damping and `80000 + index` for LFO depth. Group
    /// controls and globals sit below 1000.
    pub fn id(self) -> ParamId {
        let slot = |stream: OffsetStream, index: usize| {
            ParamId((stream.index() as u32 + 1) * 10_000 + index as u32)
        };
        match self {
            Self::Time(i) => slot(OffsetStream::Time, i),
            Self::InnerFeed(i) => slot(OffsetStream::InnerFeed, i),
            Self::LowpassCutoff(i) => ParamId(70_000 + i as u32),
            Self::TimeLfoAmount(i) => ParamId(80_000 + i as u32),
            Self::Feed { level, index } => match OffsetStream::feed(level) {
                Some(stream) => slot(stream, index),
                None => ParamId(0),
            },
            Self::Multiply(s) => ParamId(100 + s.index() as u32),
            Self::OffsetRange(s) => ParamId(110 + s.index() as u32),
            Self::Modulation(s) => ParamId(120 + s.index() as u32),
            Self::Seed => ParamId(200),
            Self::StereoCross => ParamId(201),
            Self::StereoSpread => ParamId(202),
            Self::Dry => ParamId(203),
            Self::Wet => ParamId(204),
            Self::Smoothness => ParamId(205),
            Self::TimeLfoLowpass => ParamId(206),
        }
    }

    /// Descriptor with range, default and scale.
    pub fn descriptor(self) -> ParamDescriptor {
        let desc = match self {
            Self::Time(_) => ParamDescriptor::seconds("Time", "Time", 0.0, MAX_TIME, 0.1)
                .with_scale(ParamScale::Power(2.0)),
            Self::InnerFeed(_) => feed_descriptor("Inner Feed", "InFeed"),
            Self::LowpassCutoff(_) => {
                ParamDescriptor::coefficient("Lowpass Cutoff", "LPCut", MIN_CUTOFF, 1.0, 1.0)
                    .with_scale(ParamScale::Logarithmic)
            }
            Self::TimeLfoAmount(_) => {
                ParamDescriptor::seconds("Time LFO Amount", "LfoAmt", 0.0, MAX_TIME, 0.0)
                    .with_scale(ParamScale::Power(2.0))
            }
            Self::Feed { level, .. } => match level {
                1 => feed_descriptor("D1 Feed", "D1Feed"),
                2 => feed_descriptor("D2 Feed", "D2Feed"),
                3 => feed_descriptor("D3 Feed", "D3Feed"),
                _ => feed_descriptor("D4 Feed", "D4Feed"),
            },
            Self::Multiply(s) => {
                let (name, short) = match s {
                    OffsetStream::Time => ("Time Multiply", "TimeMul"),
                    OffsetStream::InnerFeed => ("Inner Feed Multiply", "InMul"),
                    OffsetStream::Feed1 => ("D1 Feed Multiply", "D1Mul"),
                    OffsetStream::Feed2 => ("D2 Feed Multiply", "D2Mul"),
                    OffsetStream::Feed3 => ("D3 Feed Multiply", "D3Mul"),
                    OffsetStream::Feed4 => ("D4 Feed Multiply", "D4Mul"),
                };
                ParamDescriptor::coefficient(name, short, 0.0, 1.0, 1.0)
            }
            Self::OffsetRange(s) => {
                let (name, short, default) = match s {
                    OffsetStream::Time => ("Time Offset Range", "TimeRng", 0.05),
                    OffsetStream::InnerFeed => ("Inner Feed Offset Range", "InRng", 0.0),
                    OffsetStream::Feed1 => ("D1 Feed Offset Range", "D1Rng", 0.0),
                    OffsetStream::Feed2 => ("D2 Feed Offset Range", "D2Rng", 0.0),
                    OffsetStream::Feed3 => ("D3 Feed Offset Range", "D3Rng", 0.0),
                    OffsetStream::Feed4 => ("D4 Feed Offset Range", "D4Rng", 0.0),
                };
                ParamDescriptor::coefficient(name, short, 0.0, 1.0, default)
            }
            Self::Modulation(s) => match s {
                OffsetStream::Time => ParamDescriptor::toggle("Time Modulation", "TimeMod"),
                OffsetStream::InnerFeed => ParamDescriptor::toggle("Inner Feed Modulation", "InMod"),
                OffsetStream::Feed1 => ParamDescriptor::toggle("D1 Feed Modulation", "D1Mod"),
                OffsetStream::Feed2 => ParamDescriptor::toggle("D2 Feed Modulation", "D2Mod"),
                OffsetStream::Feed3 => ParamDescriptor::toggle("D3 Feed Modulation", "D3Mod"),
                OffsetStream::Feed4 => ParamDescriptor::toggle("D4 Feed Modulation", "D4Mod"),
            },
            Self::Seed => ParamDescriptor::integer("Seed", "Seed", MAX_SEED as f32),
            Self::StereoCross => ParamDescriptor::coefficient("Stereo Cross", "Cross", -1.0, 1.0, 0.0),
            Self::StereoSpread => {
                ParamDescriptor::coefficient("Stereo Spread", "Spread", 0.0, 1.0, 0.5)
            }
            Self::Dry => ParamDescriptor::coefficient("Dry", "Dry", 0.0, 2.0, 0.5),
            Self::Wet => ParamDescriptor::coefficient("Wet", "Wet", 0.0, 2.0, 0.5),
            Self::Smoothness => {
                ParamDescriptor::seconds("Smoothness", "Smooth", 0.001, 8.0, 0.2)
                    .with_scale(ParamScale::Logarithmic)
            }
            Self::TimeLfoLowpass => {
                ParamDescriptor::coefficient("Time LFO Lowpass", "LfoLP", MIN_CUTOFF, 1.0, 0.01)
                    .with_scale(ParamScale::Logarithmic)
            }
        };
        desc.with_id(self.id(), self.group_name())
            .with_group(self.group_name())
    }

    /// Group key: the per-slot prefix, or the full text of a scalar key.
    ///
    /// Shared by every slot of a group, so it also serves as the
    /// descriptor's `string_id`. The [`Display`](fmt::Display) text is the
    /// unique textual ID.
    pub fn group_name(self) -> &'static str {
        match self {
            Self::Time(_)
            | Self::InnerFeed(_)
            | Self::LowpassCutoff(_)
            | Self::TimeLfoAmount(_)
            | Self::Feed { .. } => self.slot_group().map_or("", SlotGroup::name),
            Self::Multiply(s) => match s {
                OffsetStream::Time => "time_multiply",
                OffsetStream::InnerFeed => "inner_feed_multiply",
                OffsetStream::Feed1 => "d1_feed_multiply",
                OffsetStream::Feed2 => "d2_feed_multiply",
                OffsetStream::Feed3 => "d3_feed_multiply",
                OffsetStream::Feed4 => "d4_feed_multiply",
            },
            Self::OffsetRange(s) => match s {
                OffsetStream::Time => "time_offset_range",
                OffsetStream::InnerFeed => "inner_feed_offset_range",
                OffsetStream::Feed1 => "d1_feed_offset_range",
                OffsetStream::Feed2 => "d2_feed_offset_range",
                OffsetStream::Feed3 => "d3_feed_offset_range",
                OffsetStream::Feed4 => "d4_feed_offset_range",
            },
            Self::Modulation(s) => match s {
                OffsetStream::Time => "time_modulation",
                OffsetStream::InnerFeed => "inner_feed_modulation",
                OffsetStream::Feed1 => "d1_feed_modulation",
                OffsetStream::Feed2 => "d2_feed_modulation",
                OffsetStream::Feed3 => "d3_feed_modulation",
                OffsetStream::Feed4 => "d4_feed_modulation",
            },
            Self::Seed => "seed",
            Self::StereoCross => "stereo_cross",
            Self::StereoSpread => "stereo_spread",
            Self::Dry => "dry",
            Self::Wet => "wet",
            Self::Smoothness => "smoothness",
            Self::TimeLfoLowpass => "time_lfo_lowpass",
        }
    }

    /// Group of a per-slot key.
    pub fn slot_group(self) -> Option<SlotGroup> {
        match self {
            Self::Time(_) => Some(SlotGroup::Offset(OffsetStream::Time)),
            Self::InnerFeed(_) => Some(SlotGroup::Offset(OffsetStream::InnerFeed)),
            Self::LowpassCutoff(_) => Some(SlotGroup::LowpassCutoff),
            Self::TimeLfoAmount(_) => Some(SlotGroup::TimeLfoAmount),
            Self::Feed { level, .. } => OffsetStream::feed(level).map(SlotGroup::Offset),
            _ => None,
        }
    }

    /// Slot index of a per-slot key.
    pub fn slot(self) -> Option<usize> {
        match self {
            Self::Time(i)
            | Self::InnerFeed(i)
            | Self::LowpassCutoff(i)
            | Self::TimeLfoAmount(i)
            | Self::Feed { index: i, .. } => Some(i),
            _ => None,
        }
    }
}

/// Smallest damping or LFO lowpass coefficient.
const MIN_CUTOFF: f32 = 0.001;

fn feed_descriptor(name: &'static str, short_name: &'static str) -> ParamDescriptor {
    ParamDescriptor::coefficient(name, short_name, -MAX_FEED, MAX_FEED, 0.5)
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot() {
            Some(index) => write!(f, "{}.{index}", self.group_name()),
            None => f.write_str(self.group_name()),
        }
    }
}

/// Error returned when a textual parameter ID does not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseParamError {
    /// No parameter or group has this name.
    UnknownName,
    /// A per-slot group was named without a `.index` suffix.
    MissingIndex,
    /// The text after `.` is not an unsigned integer.
    InvalidIndex,
}

impl fmt::Display for ParseParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownName => write!(f, "unknown parameter name"),
            Self::MissingIndex => write!(f, "per-slot parameter needs an index, e.g. time.0"),
            Self::InvalidIndex => write!(f, "parameter index is not an unsigned integer"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseParamError {}

impl FromStr for ParamKey {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((group, index)) = s.split_once('.') {
            let index: usize = index.parse().map_err(|_| ParseParamError::InvalidIndex)?;
            let group = SlotGroup::from_name(group).ok_or(ParseParamError::UnknownName)?;
            return Ok(group.key(index));
        }

        if SlotGroup::from_name(s).is_some() {
            return Err(ParseParamError::MissingIndex);
        }
        if let Some(key) = GLOBALS.into_iter().find(|k| k.group_name() == s) {
            return Ok(key);
        }

        let group = |suffix: &str| s.strip_suffix(suffix).and_then(OffsetStream::from_name);
        if let Some(stream) = group("_multiply") {
            Ok(Self::Multiply(stream))
        } else if let Some(stream) = group("_offset_range") {
            Ok(Self::OffsetRange(stream))
        } else if let Some(stream) = group("_modulation") {
            Ok(Self::Modulation(stream))
        } else {
            Err(ParseParamError::UnknownName)
        }
    }
}

/// Parameter counts of one lattice topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamLayout {
    units: usize,
    slots: [usize; MAX_LEVELS],
}

impl ParamLayout {
    /// Layout for `units` elementary units and `slots[l - 1]` feeds at level `l`.
    pub const fn new(units: usize, slots: [usize; MAX_LEVELS]) -> Self {
        Self { units, slots }
    }

    /// Layout of the tree type `T`.
    pub fn of<T: LatticeNode>() -> Self {
        Self::new(T::UNITS, core::array::from_fn(|i| T::slots(i + 1)))
    }

    /// Number of elementary units.
    pub fn units(&self) -> usize {
        self.units
    }

    /// Number of feed slots at `level`, 0 outside 1..=4.
    pub fn slots(&self, level: usize) -> usize {
        level
            .checked_sub(1)
            .and_then(|l| self.slots.get(l))
            .copied()
            .unwrap_or(0)
    }

    /// Held draws needed per offset stream.
    pub fn stream_slots(&self) -> [usize; STREAM_COUNT] {
        OffsetStream::ALL.map(|s| match s.level() {
            Some(level) => self.slots(level),
            None => self.units,
        })
    }

    /// Total parameter count.
    pub fn len(&self) -> usize {
        UNIT_GROUPS * self.units
            + self.slots.iter().sum::<usize>()
            + 3 * STREAM_COUNT
            + GLOBALS.len()
    }

    /// Always `false`: group controls and globals are present in every layout.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Flat index of `key`, or `None` if the topology has no such slot.
    pub fn index_of(&self, key: ParamKey) -> Option<usize> {
        let feeds: usize = self.slots.iter().sum();
        let groups = UNIT_GROUPS * self.units + feeds;
        let unit = |group: usize, i: usize| (i < self.units).then_some(group * self.units + i);
        match key {
            ParamKey::Time(i) => unit(0, i),
            ParamKey::InnerFeed(i) => unit(1, i),
            ParamKey::LowpassCutoff(i) => unit(2, i),
            ParamKey::TimeLfoAmount(i) => unit(3, i),
            ParamKey::Feed { level, index } => {
                if index >= self.slots(level) {
                    return None;
                }
                let before: usize = self.slots[..level - 1].iter().sum();
                Some(UNIT_GROUPS * self.units + before + index)
            }
            ParamKey::Multiply(s) => Some(groups + s.index()),
            ParamKey::OffsetRange(s) => Some(groups + STREAM_COUNT + s.index()),
            ParamKey::Modulation(s) => Some(groups + 2 * STREAM_COUNT + s.index()),
            global => GLOBALS
                .iter()
                .position(|&k| k == global)
                .map(|p| groups + 3 * STREAM_COUNT + p),
        }
    }

    /// Key at flat `index`.
    pub fn key_at(&self, index: usize) -> Option<ParamKey> {
        let mut i = index;
        let unit_keys: [fn(usize) -> ParamKey; UNIT_GROUPS] = [
            ParamKey::Time,
            ParamKey::InnerFeed,
            ParamKey::LowpassCutoff,
            ParamKey::TimeLfoAmount,
        ];
        for key in unit_keys {
            if i < self.units {
                return Some(key(i));
            }
            i -= self.units;
        }
        for (l, &count) in self.slots.iter().enumerate() {
            if i < count {
                return Some(ParamKey::Feed {
                    level: l + 1,
                    index: i,
                });
            }
            i -= count;
        }
        let streams = OffsetStream::ALL;
        if i < STREAM_COUNT {
            return Some(ParamKey::Multiply(streams[i]));
        }
        i -= STREAM_COUNT;
        if i < STREAM_COUNT {
            return Some(ParamKey::OffsetRange(streams[i]));
        }
        i -= STREAM_COUNT;
        if i < STREAM_COUNT {
            return Some(ParamKey::Modulation(streams[i]));
        }
        GLOBALS.get(i - STREAM_COUNT).copied()
    }
}

/// Plain parameter values for one lattice topology.
///
/// Every write is clamped to the key's descriptor range; reads of slots the
/// topology does not have return `None` (or 0.0 from the typed accessors).
///
/// # Example
///
/// ```rust
/// use nestverb_effects::{ParamKey, ParamLayout, ReverbParams};
///
/// let mut params = ReverbParams::new(ParamLayout::new(4, [4, 0, 0, 0]));
/// params.set("inner_feed.2".parse().unwrap(), 1.5);
/// assert_eq!(params.inner_feed(2), 0.999);
/// assert_eq!(params.time(0), 0.1);
/// assert!(!params.set(ParamKey::Time(4), 0.05));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReverbParams {
    layout: ParamLayout,
    values: Vec<f32>,
}

impl ReverbParams {
    /// Store with every parameter at its default.
    pub fn new(layout: ParamLayout) -> Self {
        let values = (0..layout.len())
            .map(|i| layout.key_at(i).map_or(0.0, |k| k.descriptor().default))
            .collect();
        Self { layout, values }
    }

    /// Store sized for the tree type `T`.
    pub fn for_topology<T: LatticeNode>() -> Self {
        Self::new(ParamLayout::of::<T>())
    }

    /// Topology counts.
    pub fn layout(&self) -> &ParamLayout {
        &self.layout
    }

    /// Current value of `key`.
    pub fn get(&self, key: ParamKey) -> Option<f32> {
        self.layout.index_of(key).map(|i| self.values[i])
    }

    /// Set `key`, clamped to its range. Returns `false` if the key has no slot.
    pub fn set(&mut self, key: ParamKey, value: f32) -> bool {
        match self.layout.index_of(key) {
            Some(i) => {
                self.values[i] = key.descriptor().clamp(value);
                true
            }
            None => false,
        }
    }

    /// Set every per-slot value of one group.
    pub fn fill(&mut self, group: impl Into<SlotGroup>, value: f32) {
        let group = group.into();
        for (i, slot) in self.values.iter_mut().enumerate() {
            if let Some(key) = self.layout.key_at(i)
                && key.slot_group() == Some(group)
            {
                *slot = key.descriptor().clamp(value);
            }
        }
    }

    /// Restore every default.
    pub fn reset_to_defaults(&mut self) {
        *self = Self::new(self.layout);
    }

    /// Iterate keys in flat layout order.
    pub fn keys(&self) -> impl Iterator<Item = ParamKey> + '_ {
        (0..self.layout.len()).filter_map(|i| self.layout.key_at(i))
    }

    #[inline]
    fn value(&self, key: ParamKey) -> f32 {
        self.get(key).unwrap_or(0.0)
    }

    /// Base delay time of unit `index`.
    #[inline]
    pub fn time(&self, index: usize) -> f32 {
        self.value(ParamKey::Time(index))
    }

    /// Base all-pass gain of unit `index`.
    #[inline]
    pub fn inner_feed(&self, index: usize) -> f32 {
        self.value(ParamKey::InnerFeed(index))
    }

    /// Output damping coefficient of unit `index`.
    #[inline]
    pub fn lowpass_cutoff(&self, index: usize) -> f32 {
        self.value(ParamKey::LowpassCutoff(index))
    }

    /// Time LFO depth of unit `index`, in seconds.
    #[inline]
    pub fn time_lfo_amount(&self, index: usize) -> f32 {
        self.value(ParamKey::TimeLfoAmount(index))
    }

    /// Base outer feed of slot `index` at `level`.
    #[inline]
    pub fn feed(&self, level: usize, index: usize) -> f32 {
        self.value(ParamKey::Feed { level, index })
    }

    /// Group scale.
    #[inline]
    pub fn multiply(&self, group: OffsetStream) -> f32 {
        self.value(ParamKey::Multiply(group))
    }

    /// Group offset depth.
    #[inline]
    pub fn offset_range(&self, group: OffsetStream) -> f32 {
        self.value(ParamKey::OffsetRange(group))
    }

    /// Whether the group's offsets are redrawn every block.
    #[inline]
    pub fn modulation(&self, group: OffsetStream) -> bool {
        self.value(ParamKey::Modulation(group)) >= 0.5
    }

    /// Master seed.
    pub fn seed(&self) -> u32 {
        self.value(ParamKey::Seed) as u32
    }

    /// Cross-feed amount in `[-1, 1]`.
    pub fn stereo_cross(&self) -> f32 {
        self.value(ParamKey::StereoCross)
    }

    /// Mid/side width in `[0, 1]`.
    pub fn stereo_spread(&self) -> f32 {
        self.value(ParamKey::StereoSpread)
    }

    /// Dry gain.
    pub fn dry(&self) -> f32 {
        self.value(ParamKey::Dry)
    }

    /// Wet gain.
    pub fn wet(&self) -> f32 {
        self.value(ParamKey::Wet)
    }

    /// Ramp smoothing time in seconds.
    pub fn smoothness(&self) -> f32 {
        self.value(ParamKey::Smoothness)
    }

    /// Per-block lowpass coefficient of the time LFO.
    pub fn time_lfo_lowpass(&self) -> f32 {
        self.value(ParamKey::TimeLfoLowpass)
    }
}

impl ParameterInfo for ReverbParams {
    fn param_count(&self) -> usize {
        self.layout.len()
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        self.layout.key_at(index).map(ParamKey::descriptor)
    }

    fn get_param(&self, index: usize) -> f32 {
        self.values.get(index).copied().unwrap_or(0.0)
    }

    fn set_param(&mut self, index: usize, value: f32) {
        if let Some(key) = self.layout.key_at(index) {
            self.values[index] = key.descriptor().clamp(value);
        }
    }
}
