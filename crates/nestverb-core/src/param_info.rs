//! Parameter introspection for hosts, command lines and presets.
//!
//! A reverb exposes a few hundred plain-valued parameters whose count depends
//! on the lattice topology. The [`ParameterInfo`] trait gives index-based
//! access to all of them, each described by a [`ParamDescriptor`] carrying:
//!
//! - [`ParamId`]: stable numeric ID for automation and persistence
//! - [`ParamScale`]: normalization curve (linear, logarithmic, power)
//! - [`ParamFlags`]: capability flags (automatable, stepped, ...)
//! - `string_id`: the parameter group key, e.g. `"time"` or `"stereo_spread"`.
//!   Every slot of a per-slot group shares it; the slot is told apart by
//!   [`ParamId`] or by the index.
//!
//! # Example
//!
//! ```rust
//! use nestverb_core::{ParameterInfo, ParamDescriptor, ParamId};
//!
//! struct Width {
//!     spread: f32,
//! }
//!
//! impl ParameterInfo for Width {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::coefficient("Stereo Spread", "Spread", 0.0, 1.0, 0.5)
//!                 .with_id(ParamId(9), "stereo_spread")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         if index == 0 { self.spread } else { 0.0 }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if let Some(desc) = self.param_info(index) {
//!             self.spread = desc.clamp(value);
//!         }
//!     }
//! }
//! ```

/// Scaling curve for parameter normalization.
///
/// - **Linear**: `normalized = (value - min) / (max - min)`
/// - **Logarithmic**: `normalized = ln(value/min) / ln(max/min)`
/// - **Power(exp)**: `normalized = ((value - min) / (max - min)).powf(1.0 / exp)`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParamScale {
    /// Linear mapping (default).
    #[default]
    Linear,
    /// Logarithmic mapping. Requires `min > 0.0`.
    Logarithmic,
    /// Power curve. An exponent above 1.0 gives more resolution at the low end
    /// of the plain range.
    Power(f32),
}

/// Stable numeric parameter identifier.
///
/// Once assigned, a `ParamId` never changes for a given parameter. Reverb
/// parameters are numbered by group base plus slot index, so IDs survive
/// topology changes as long as a slot exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(pub u32);

/// Parameter capability flags.
///
/// # Example
///
/// ```rust
/// use nestverb_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::STEPPED));
/// assert!(!ParamFlags::AUTOMATABLE.contains(ParamFlags::STEPPED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// Host can automate this parameter (default).
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Discrete integer steps (toggles, seeds).
    pub const STEPPED: Self = Self(1 << 1);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Trait for processors that expose introspectable parameters.
///
/// Parameters are addressed by zero-based index, stable for the lifetime of
/// the instance. Values are plain (not normalized); implementations clamp
/// writes to the descriptor range and ignore out-of-bounds indices.
pub trait ParameterInfo {
    /// Number of parameters. Valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`, or `None` past the end.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current plain value, or `0.0` past the end.
    fn get_param(&self, index: usize) -> f32;

    /// Set a plain value, clamped to the descriptor range.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name (case-insensitive).
    ///
    /// Matches against both [`ParamDescriptor::name`] and
    /// [`ParamDescriptor::short_name`], returning the first hit.
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        for i in 0..self.param_count() {
            if let Some(desc) = self.param_info(i)
                && (desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name))
            {
                return Some(i);
            }
        }
        None
    }

    /// Stable [`ParamId`] of the parameter at `index`.
    fn param_id(&self, index: usize) -> Option<ParamId> {
        self.param_info(index).map(|d| d.id)
    }

    /// Index of the parameter with the given [`ParamId`].
    ///
    /// Scans all parameters (O(n)), so keep it off the audio path.
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }
}

/// Metadata for one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full display name (e.g. "Time", "Stereo Spread").
    pub name: &'static str,
    /// Short name for narrow displays, 8 characters or less.
    pub short_name: &'static str,
    /// Display unit.
    pub unit: ParamUnit,
    /// Minimum plain value.
    pub min: f32,
    /// Maximum plain value.
    pub max: f32,
    /// Value after construction.
    pub default: f32,
    /// Recommended step for encoder-style control.
    pub step: f32,
    /// Stable numeric ID. Default: `ParamId(0)` (unassigned).
    pub id: ParamId,
    /// Group key used in textual IDs (e.g. `"time"`, `"d2_feed"`).
    ///
    /// Not unique: all slots of a per-slot group share one key. Use
    /// [`id`](Self::id) to address a single parameter.
    pub string_id: &'static str,
    /// Normalization curve.
    pub scale: ParamScale,
    /// Capability flags.
    pub flags: ParamFlags,
    /// Parameter group for tree display. Empty means top level.
    pub group: &'static str,
}

impl ParamDescriptor {
    const fn base(
        name: &'static str,
        short_name: &'static str,
        unit: ParamUnit,
        min: f32,
        max: f32,
        default: f32,
        step: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit,
            min,
            max,
            default,
            step,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE,
            group: "",
        }
    }

    /// Time parameter in seconds.
    pub const fn seconds(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::base(name, short_name, ParamUnit::Seconds, min, max, default, 0.001)
    }

    /// Dimensionless coefficient (feeds, multipliers, ranges, gains).
    pub const fn coefficient(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::base(name, short_name, ParamUnit::None, min, max, default, 0.01)
    }

    /// On/off switch stored as 0.0 or 1.0.
    pub const fn toggle(name: &'static str, short_name: &'static str) -> Self {
        Self::base(name, short_name, ParamUnit::None, 0.0, 1.0, 0.0, 1.0)
            .with_flags(ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED))
    }

    /// Integer parameter in `[0, max]`.
    pub const fn integer(name: &'static str, short_name: &'static str, max: f32) -> Self {
        Self::base(name, short_name, ParamUnit::None, 0.0, max, 0.0, 1.0)
            .with_flags(ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED))
    }

    /// Sets the stable parameter ID and group key.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nestverb_core::{ParamDescriptor, ParamId};
    ///
    /// let desc = ParamDescriptor::coefficient("Dry", "Dry", 0.0, 2.0, 0.5)
    ///     .with_id(ParamId(11), "dry");
    /// assert_eq!(desc.id, ParamId(11));
    /// assert_eq!(desc.string_id, "dry");
    /// ```
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Sets the normalization scale.
    pub const fn with_scale(mut self, scale: ParamScale) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the parameter flags.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the parameter group.
    pub const fn with_group(mut self, group: &'static str) -> Self {
        self.group = group;
        self
    }

    /// Clamps a value to this parameter's range. NaN maps to the default.
    ///
    /// Stepped parameters are also rounded to the nearest integer.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default;
        }
        let value = if self.flags.contains(ParamFlags::STEPPED) {
            libm::roundf(value)
        } else {
            value
        };
        value.clamp(self.min, self.max)
    }

    /// Converts a plain value to the normalized range `[0, 1]`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nestverb_core::{ParamDescriptor, ParamScale};
    ///
    /// let desc = ParamDescriptor::seconds("Time", "Time", 0.0, 0.2, 0.1)
    ///     .with_scale(ParamScale::Power(2.0));
    /// assert!((desc.normalize(0.05) - 0.5).abs() < 1e-6);
    /// ```
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        match self.scale {
            ParamScale::Linear => (value - self.min) / range,
            ParamScale::Logarithmic => {
                if self.min <= 0.0 || value <= 0.0 {
                    return 0.0;
                }
                libm::logf(value / self.min) / libm::logf(self.max / self.min)
            }
            ParamScale::Power(exp) => {
                let linear = (value - self.min) / range;
                libm::powf(linear, 1.0 / exp)
            }
        }
    }

    /// Converts a normalized value in `[0, 1]` back to the plain range.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        match self.scale {
            ParamScale::Linear => self.min + normalized * (self.max - self.min),
            ParamScale::Logarithmic => {
                if self.min <= 0.0 {
                    return self.min;
                }
                self.min * libm::powf(self.max / self.min, normalized)
            }
            ParamScale::Power(exp) => {
                let curved = libm::powf(normalized, exp);
                self.min + curved * (self.max - self.min)
            }
        }
    }
}

/// Display unit of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Seconds, for delay and smoothing times.
    Seconds,
    /// Dimensionless.
    None,
}

impl ParamUnit {
    /// Unit suffix for display.
    ///
    /// ```rust
    /// use nestverb_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Seconds.suffix(), " s");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Seconds => " s",
            ParamUnit::None => "",
        }
    }
}
