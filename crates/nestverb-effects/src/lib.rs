//! Nestverb Effects - nested randomized all-pass lattice reverb
//!
//! This crate assembles the primitives of `nestverb-core` into a complete
//! stereo reverb:
//!
//! - [`LatticeReverb`] - Two decorrelated lattice trees with cross-feed,
//!   mid/side spread and independent dry/wet gains
//! - [`ReverbParams`] - Flat, topology-sized parameter store
//! - [`ParamKey`] - Typed parameter addresses with stable textual IDs
//! - [`SlotGroup`] - Per-slot parameter groups for whole-group writes
//!
//! Ready-made topologies:
//!
//! | Alias | Shape | Cells per channel |
//! |-------|-------|-------------------|
//! | [`FlatReverb`] | 16 | 16 |
//! | [`TaperedReverb`] | 5 × 4 × 3 × 2 | 120 |
//! | [`DenseReverb`] | 4 × 4 × 4 × 4 | 256 |
//!
//! Any [`Lattice`](nestverb_core::Lattice) one to four levels deep works.
//!
//! ## Example
//!
//! ```rust
//! use nestverb_core::{Effect, OffsetStream};
//! use nestverb_effects::{DenseReverb, ParamKey};
//!
//! let mut reverb = DenseReverb::new(48000.0);
//! let params = reverb.params_mut();
//! params.fill(OffsetStream::Time, 0.05);
//! params.set(ParamKey::Wet, 0.8);
//! params.set("seed".parse().unwrap(), 42.0);
//! reverb.set_parameters();
//!
//! let input = [1.0, 0.0, 0.0, 0.0];
//! let (mut out_l, mut out_r) = ([0.0; 4], [0.0; 4]);
//! reverb.process(&input, &input, &mut out_l, &mut out_r);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod params;
pub mod reverb;

// Re-export main types at crate root
pub use params::{
    MAX_FEED, MAX_LEVELS, MAX_SEED, MAX_TIME, ParamKey, ParamLayout, ParseParamError,
    ReverbParams, SlotGroup,
};
pub use reverb::{
    Channel, DEFAULT_MAX_TIME, DenseLattice, DenseReverb, FlatLattice, FlatReverb, LatticeReverb,
    TaperedLattice, TaperedReverb, UnitParameters,
};
