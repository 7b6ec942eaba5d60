//! Mathematical utility functions for the reverb signal path.
//!
//! All functions are allocation-free and suitable for `no_std`.
//!
//! - [`flush_denormal`] - Keep decaying feedback state out of the subnormal range
//! - [`stereo_spread`] - Mid/side width control
//! - [`dry_wet`] - Independent dry and wet gains

/// Flush subnormal (denormalized) floats to zero.
///
/// Subnormal floats (~1e-38 to 1e-45) cause severe CPU performance
/// degradation on most architectures (up to 100x slowdown). This function
/// replaces values below 1e-20 with zero, providing margin before the
/// IEEE 754 subnormal range begins.
///
/// Every one-sample state register of the lattice passes through this, so a
/// silent input drives the whole tree to exact zero instead of an endless
/// subnormal tail.
///
/// Reference: IEEE 754-2008, Section 3.4 (Subnormal numbers)
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Stereo width.
///
/// Each output channel takes the other channel scaled by `1 - 2 · spread`:
///
/// ```text
/// left'  = left  + (1 - 2 · spread) · right
/// right' = right + (1 - 2 · spread) · left
/// ```
///
/// This is the mid/side blend `mid - spread · (mid ∓ side)` with
/// `mid = left + right` and `side = left - right`, rearranged so that 0.5
/// passes both channels through bit for bit.
///
/// | spread | result |
/// |--------|--------|
/// | 0.0 | `(mid, mid)`, mono sum on both sides |
/// | 0.5 | `(left, right)`, unchanged |
/// | 1.0 | `(side, -side)`, difference only |
///
/// # Example
///
/// ```rust
/// use nestverb_core::stereo_spread;
///
/// assert_eq!(stereo_spread(0.25, -0.75, 0.5), (0.25, -0.75));
/// ```
#[inline]
pub fn stereo_spread(left: f32, right: f32, spread: f32) -> (f32, f32) {
    let k = 1.0 - 2.0 * spread;
    (left + k * right, right + k * left)
}

/// Mix a dry and a wet signal with independent gains.
///
/// Unlike a crossfade, `dry` and `wet` are not tied together: both at 1.0
/// sums the two signals at full level.
#[inline]
pub fn dry_wet(dry_signal: f32, wet_signal: f32, dry: f32, wet: f32) -> f32 {
    dry * dry_signal + wet * wet_signal
}
