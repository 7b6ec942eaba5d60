//! Recursively nested all-pass lattice.
//!
//! A lattice node owns `N` children and, per child slot, one outer feed
//! coefficient plus one sample of memory. A child is either an elementary
//! [`AllpassCell`] or another lattice, so the whole tree is a single generic
//! type resolved at compile time:
//!
//! ```text
//! level 1:  Lattice<AllpassCell, N1>
//! level 2:  Lattice<Lattice<AllpassCell, N1>, N2>
//! level 3:  Lattice<Lattice<Lattice<AllpassCell, N1>, N2>, N3>
//! ```
//!
//! Every level runs the same two-pass recursion per sample:
//!
//! ```text
//! forward,  i = 0 .. N-1:    x -= feed[i] · buffer[i];   in[i] = x
//! backward, i = N-1 .. 0:    c = child[i](out)
//!                            out = buffer[i] + feed[i] · in[i]
//!                            buffer[i] = c
//! ```
//!
//! Each outer feed ramp advances once per sample in the forward pass; the
//! backward pass reads it without advancing. Each cell advances its own time
//! and gain ramps when it is processed.
//!
//! ## Parameter assignment
//!
//! Left and right trees always share a topology. [`LatticeNode::visit_pair`]
//! walks both in lock-step, post-order: a child's whole subtree first, then the
//! feed of the slot that holds it. Within one level, units and feed slots are
//! therefore visited in increasing flat index order.

use crate::flush_denormal;
use crate::{LongAllpass, ParameterRamp};

/// Per-sample values shared by every node of a tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessContext {
    /// Host sample rate in Hz.
    pub sample_rate: f32,
    /// Ramp coefficient from the shared [`RampTiming`](crate::RampTiming).
    pub kp: f32,
}

/// An elementary all-pass unit with its own delay time and gain ramps.
///
/// The unit's output can be damped by a one-pole lowpass whose coefficient is
/// ramped like the other parameters. A coefficient of 1.0 (the default)
/// bypasses the filter.
#[derive(Debug, Clone)]
pub struct AllpassCell {
    allpass: LongAllpass,
    /// Delay time in seconds.
    pub seconds: ParameterRamp,
    /// All-pass gain.
    pub inner_feed: ParameterRamp,
    /// One-pole coefficient of the output damping, in (0, 1].
    pub damping: ParameterRamp,
    damped: f32,
}

impl Default for AllpassCell {
    fn default() -> Self {
        Self {
            allpass: LongAllpass::default(),
            seconds: ParameterRamp::default(),
            inner_feed: ParameterRamp::default(),
            damping: ParameterRamp::new(1.0),
            damped: 0.0,
        }
    }
}

impl AllpassCell {
    /// Delay buffer capacity in half-sample cells.
    pub fn capacity(&self) -> usize {
        self.allpass.capacity()
    }
}

/// Visitor handed matching left/right slots by [`LatticeNode::visit_pair`].
pub trait SlotVisitor {
    /// Called once per elementary unit.
    fn unit(&mut self, left: &mut AllpassCell, right: &mut AllpassCell);

    /// Called once per outer feed slot at `level` (1-based).
    fn feed(&mut self, level: usize, left: &mut ParameterRamp, right: &mut ParameterRamp);
}

/// A node of the nested lattice tree.
///
/// Implemented by [`AllpassCell`] (level 0) and [`Lattice`] (one level above
/// its children).
pub trait LatticeNode: Default + Send {
    /// Nesting level: 0 for a cell, 1 for a lattice of cells, and so on.
    const LEVEL: usize;

    /// Number of elementary cells in this subtree.
    const UNITS: usize;

    /// Number of outer feed slots at `level` in this subtree.
    fn slots(level: usize) -> usize;

    /// Size every delay line for `max_seconds` and clear all state.
    fn setup(&mut self, sample_rate: f32, max_seconds: f32);

    /// Zero all memory. Coefficients are left untouched.
    fn reset(&mut self);

    /// Process one sample.
    fn process(&mut self, input: f32, ctx: &ProcessContext) -> f32;

    /// Walk two trees in lock-step, post-order.
    fn visit_pair<V: SlotVisitor>(left: &mut Self, right: &mut Self, visitor: &mut V);

    /// Elementary cell at flat `index`.
    fn unit(&self, index: usize) -> Option<&AllpassCell>;

    /// Mutable elementary cell at flat `index`.
    fn unit_mut(&mut self, index: usize) -> Option<&mut AllpassCell>;

    /// Outer feed ramp of slot `index` at `level`.
    fn feed(&self, level: usize, index: usize) -> Option<&ParameterRamp>;

    /// Mutable outer feed ramp of slot `index` at `level`.
    fn feed_mut(&mut self, level: usize, index: usize) -> Option<&mut ParameterRamp>;
}

impl LatticeNode for AllpassCell {
    const LEVEL: usize = 0;
    const UNITS: usize = 1;

    fn slots(_level: usize) -> usize {
        0
    }

    fn setup(&mut self, sample_rate: f32, max_seconds: f32) {
        self.allpass.setup(sample_rate, max_seconds);
        self.damped = 0.0;
    }

    fn reset(&mut self) {
        self.allpass.reset();
        self.damped = 0.0;
    }

    #[inline]
    fn process(&mut self, input: f32, ctx: &ProcessContext) -> f32 {
        let seconds = self.seconds.process(ctx.kp);
        let gain = self.inner_feed.process(ctx.kp);
        let damping = self.damping.process(ctx.kp);
        let y = self.allpass.process(input, ctx.sample_rate, seconds, gain);

        self.damped = if damping >= 1.0 {
            y
        } else {
            flush_denormal(self.damped + damping * (y - self.damped))
        };
        self.damped
    }

    fn visit_pair<V: SlotVisitor>(left: &mut Self, right: &mut Self, visitor: &mut V) {
        visitor.unit(left, right);
    }

    fn unit(&self, index: usize) -> Option<&AllpassCell> {
        (index == 0).then_some(self)
    }

    fn unit_mut(&mut self, index: usize) -> Option<&mut AllpassCell> {
        (index == 0).then_some(self)
    }

    fn feed(&self, _level: usize, _index: usize) -> Option<&ParameterRamp> {
        None
    }

    fn feed_mut(&mut self, _level: usize, _index: usize) -> Option<&mut ParameterRamp> {
        None
    }
}

/// One lattice level over `N` children of type `C`.
///
/// # Example
///
/// ```rust
/// use nestverb_core::{AllpassCell, Lattice, LatticeNode, ProcessContext};
///
/// let mut node: Lattice<AllpassCell, 2> = Lattice::default();
/// node.setup(48000.0, 0.01);
/// for i in 0..2 {
///     node.feed_mut(1, i).unwrap().reset(0.3);
///     let cell = node.unit_mut(i).unwrap();
///     cell.seconds.reset(0.005);
///     cell.inner_feed.reset(0.5);
/// }
///
/// let ctx = ProcessContext { sample_rate: 48000.0, kp: 1.0 };
/// let y = node.process(1.0, &ctx);
/// assert!((y - 0.3).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct Lattice<C, const N: usize> {
    children: [C; N],
    feed: [ParameterRamp; N],
    /// One sample of memory per slot
    buffer: [f32; N],
    /// Forward-pass scratch
    input: [f32; N],
}

impl<C: LatticeNode, const N: usize> Default for Lattice<C, N> {
    fn default() -> Self {
        Self {
            children: core::array::from_fn(|_| C::default()),
            feed: [ParameterRamp::default(); N],
            buffer: [0.0; N],
            input: [0.0; N],
        }
    }
}

impl<C: LatticeNode, const N: usize> Lattice<C, N> {
    /// Create a tree with zero coefficients. Call [`setup`](LatticeNode::setup) before use.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: LatticeNode, const N: usize> LatticeNode for Lattice<C, N> {
    const LEVEL: usize = C::LEVEL + 1;
    const UNITS: usize = C::UNITS * N;

    fn slots(level: usize) -> usize {
        match level {
            l if l == Self::LEVEL => N,
            l if l < Self::LEVEL => N * C::slots(l),
            _ => 0,
        }
    }

    fn setup(&mut self, sample_rate: f32, max_seconds: f32) {
        for child in &mut self.children {
            child.setup(sample_rate, max_seconds);
        }
        self.buffer = [0.0; N];
        self.input = [0.0; N];
    }

    fn reset(&mut self) {
        for child in &mut self.children {
            child.reset();
        }
        self.buffer = [0.0; N];
        self.input = [0.0; N];
    }

    #[inline]
    fn process(&mut self, input: f32, ctx: &ProcessContext) -> f32 {
        let mut x = input;
        for ((feed, buffer), slot) in self
            .feed
            .iter_mut()
            .zip(&self.buffer)
            .zip(&mut self.input)
        {
            x -= feed.process(ctx.kp) * buffer;
            *slot = x;
        }

        let mut out = x;
        for (((child, feed), buffer), slot) in self
            .children
            .iter_mut()
            .zip(&self.feed)
            .zip(&mut self.buffer)
            .zip(&self.input)
            .rev()
        {
            let child_out = child.process(out, ctx);
            out = *buffer + feed.value() * slot;
            *buffer = flush_denormal(child_out);
        }
        out
    }

    fn visit_pair<V: SlotVisitor>(left: &mut Self, right: &mut Self, visitor: &mut V) {
        let children = left.children.iter_mut().zip(right.children.iter_mut());
        let feeds = left.feed.iter_mut().zip(right.feed.iter_mut());
        for ((l_child, r_child), (l_feed, r_feed)) in children.zip(feeds) {
            C::visit_pair(l_child, r_child, visitor);
            visitor.feed(Self::LEVEL, l_feed, r_feed);
        }
    }

    fn unit(&self, index: usize) -> Option<&AllpassCell> {
        self.children
            .get(index / C::UNITS)?
            .unit(index % C::UNITS)
    }

    fn unit_mut(&mut self, index: usize) -> Option<&mut AllpassCell> {
        self.children
            .get_mut(index / C::UNITS)?
            .unit_mut(index % C::UNITS)
    }

    fn feed(&self, level: usize, index: usize) -> Option<&ParameterRamp> {
        if level == Self::LEVEL {
            return self.feed.get(index);
        }
        let per_child = C::slots(level);
        if per_child == 0 {
            return None;
        }
        self.children
            .get(index / per_child)?
            .feed(level, index % per_child)
    }

    fn feed_mut(&mut self, level: usize, index: usize) -> Option<&mut ParameterRamp> {
        if level == Self::LEVEL {
            return self.feed.get_mut(index);
        }
        let per_child = C::slots(level);
        if per_child == 0 {
            return None;
        }
        self.children
            .get_mut(index / per_child)?
            .feed_mut(level, index % per_child)
    }
}
