//! Nestverb Core - nested all-pass lattice primitives
//!
//! This crate provides the building blocks of a recursively nested, randomized
//! all-pass lattice reverb, designed for real-time audio processing with zero
//! allocation in the audio path.
//!
//! # Core Abstractions
//!
//! ## Signal Path
//!
//! - [`OversampledDelay`] - Fractional delay written at twice the host rate
//! - [`LongAllpass`] - One-multiply Schroeder allpass with per-sample time and gain
//! - [`AllpassCell`] - An allpass with its own time, gain and damping ramps
//! - [`Lattice`] - One lattice level, nested through the [`LatticeNode`] trait
//!
//! ## Parameter Smoothing
//!
//! - [`ParameterRamp`] - Exponential `(value, target)` pair
//! - [`RampTiming`] - Shared smoothing coefficient for a group of ramps
//!
//! ## Stereo Decorrelation
//!
//! - [`RandomOffsetBank`] - Six seeded offset streams
//! - [`offset_to_multiplier`] - Left/right multiplier pair from one draw
//! - [`LowpassNoise`] - Slow per-slot random walk for delay time modulation
//!
//! ## Host Boundary
//!
//! - [`Effect`] - Object-safe stereo processing trait
//! - [`ParameterInfo`] - Index-based parameter introspection
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (with `alloc`). Disable the default
//! `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! nestverb-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use nestverb_core::{AllpassCell, Lattice, LatticeNode, ProcessContext, RampTiming};
//!
//! // Two levels: three lattices of four cells each
//! let mut tree: Lattice<Lattice<AllpassCell, 4>, 3> = Lattice::new();
//! tree.setup(48000.0, 0.2);
//! assert_eq!(<Lattice<Lattice<AllpassCell, 4>, 3>>::UNITS, 12);
//!
//! let timing = RampTiming::new(48000.0, 0.2);
//! let ctx = ProcessContext { sample_rate: 48000.0, kp: timing.kp() };
//! let out = tree.process(1.0, &ctx);
//! assert!(out.is_finite());
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: Buffers are sized in `setup`, never on the audio path
//! - **Infallible DSP**: Out-of-range inputs are clamped, never reported
//! - **Compile-time topology**: Nesting depth and branch counts are type parameters

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod allpass;
pub mod delay;
pub mod effect;
pub mod lattice;
pub mod math;
pub mod param;
pub mod param_info;
pub mod random;

// Re-export main types at crate root
pub use allpass::LongAllpass;
pub use delay::OversampledDelay;
pub use effect::Effect;
pub use lattice::{AllpassCell, Lattice, LatticeNode, ProcessContext, SlotVisitor};
pub use math::{dry_wet, flush_denormal, stereo_spread};
pub use param::{DEFAULT_SMOOTHING_SECONDS, ParameterRamp, RampTiming, cutoff_to_kp};
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamScale, ParamUnit, ParameterInfo};
pub use random::{
    LowpassNoise, OffsetStream, RandomOffsetBank, STREAM_COUNT, offset_to_multiplier,
};
