//! Integration tests for nestverb-core.
//!
//! Verifies signal-level behavior across modules: long-run all-pass
//! stability, magnitude flatness of fixed cells and nested trees measured by
//! direct DFT, and seeded offsets resolved through the lattice visitor.

use nestverb_core::{
    AllpassCell, Lattice, LatticeNode, LongAllpass, OffsetStream, ParameterRamp, ProcessContext,
    RandomOffsetBank, SlotVisitor, offset_to_multiplier,
};

const SAMPLE_RATE: f32 = 48000.0;
const CTX: ProcessContext = ProcessContext {
    sample_rate: SAMPLE_RATE,
    kp: 1.0,
};

/// Magnitude of the DFT of `ir` at `bins` evenly spaced frequencies up to Nyquist.
fn magnitudes(ir: &[f32], bins: usize) -> Vec<f64> {
    (0..bins)
        .map(|k| {
            let omega = core::f64::consts::PI * k as f64 / (bins - 1) as f64;
            let (mut re, mut im) = (0.0f64, 0.0f64);
            for (n, &y) in ir.iter().enumerate() {
                let phase = omega * n as f64;
                re += f64::from(y) * phase.cos();
                im -= f64::from(y) * phase.sin();
            }
            (re * re + im * im).sqrt()
        })
        .collect()
}

fn impulse(n: usize) -> f32 {
    if n == 0 { 1.0 } else { 0.0 }
}

// ============================================================================
// 1. All-pass unit
// ============================================================================

#[test]
fn allpass_unity_gain_stability() {
    for &gain in &[0.999, -0.999] {
        let mut allpass = LongAllpass::with_max_time(SAMPLE_RATE, 0.01);
        let mut energy = 0.0f64;
        let mut peak = 0.0f32;
        for n in 0..1_000_000 {
            let y = allpass.process(impulse(n), SAMPLE_RATE, 0.001, gain);
            energy += f64::from(y) * f64::from(y);
            peak = peak.max(y.abs());
        }
        assert!(energy.is_finite() && energy <= 1.001, "g = {gain}: energy {energy}");
        assert!(peak <= 1.0 + 1e-3, "g = {gain}: peak {peak}");
    }
}

#[test]
fn allpass_magnitude_flat() {
    let mut allpass = LongAllpass::with_max_time(SAMPLE_RATE, 0.01);
    let ir: Vec<f32> = (0..8192)
        .map(|n| allpass.process(impulse(n), SAMPLE_RATE, 0.001, 0.7))
        .collect();

    for (k, m) in magnitudes(&ir, 65).iter().enumerate() {
        assert!((m - 1.0).abs() < 1e-3, "bin {k}: |H| = {m}");
    }
}

// ============================================================================
// 2. Nested lattice
// ============================================================================

#[test]
fn nested_lattice_magnitude_flat() {
    type Tree = Lattice<Lattice<AllpassCell, 2>, 2>;
    let mut tree = Tree::new();
    tree.setup(SAMPLE_RATE, 0.01);
    for (i, &t) in [0.001, 0.0015, 0.002, 0.0025].iter().enumerate() {
        let cell = tree.unit_mut(i).unwrap();
        cell.seconds.reset(t);
        cell.inner_feed.reset(0.3);
    }
    for level in 1..=2 {
        for i in 0..Tree::slots(level) {
            tree.feed_mut(level, i).unwrap().reset(0.3);
        }
    }

    let ir: Vec<f32> = (0..24_000).map(|n| tree.process(impulse(n), &CTX)).collect();
    for (k, m) in magnitudes(&ir, 33).iter().enumerate() {
        assert!((m - 1.0).abs() < 2e-3, "bin {k}: |H| = {m}");
    }
}

#[test]
fn lattice_follows_ramped_coefficients() {
    let mut tree: Lattice<AllpassCell, 4> = Lattice::new();
    tree.setup(SAMPLE_RATE, 0.02);
    for i in 0..4 {
        let cell = tree.unit_mut(i).unwrap();
        cell.seconds.reset(0.002);
        cell.seconds.push(0.015);
        cell.inner_feed.reset(0.0);
        cell.inner_feed.push(0.6);
        tree.feed_mut(1, i).unwrap().push(0.4);
    }

    let ctx = ProcessContext {
        sample_rate: SAMPLE_RATE,
        kp: 0.001,
    };
    for n in 0..48_000 {
        let y = tree.process(if n % 4800 == 0 { 1.0 } else { 0.0 }, &ctx);
        assert!(y.is_finite() && y.abs() < 10.0, "sample {n}: {y}");
    }

    let cell = tree.unit(2).unwrap();
    assert!((cell.seconds.value() - 0.015).abs() < 1e-5);
    assert!((cell.inner_feed.value() - 0.6).abs() < 1e-5);
    assert!((tree.feed(1, 3).unwrap().value() - 0.4).abs() < 1e-5);
}

// ============================================================================
// 3. Seeded offsets through the visitor
// ============================================================================

/// Resolves base coefficients plus seeded offsets into both trees.
struct Decorrelate<'a> {
    bank: &'a RandomOffsetBank,
    unit: usize,
    feed: [usize; 5],
}

impl SlotVisitor for Decorrelate<'_> {
    fn unit(&mut self, left: &mut AllpassCell, right: &mut AllpassCell) {
        let draw = self.bank.offset(OffsetStream::Time, self.unit);
        let [l, r] = offset_to_multiplier(draw, 0.1, 1.0);
        left.seconds.reset(0.004 * l);
        right.seconds.reset(0.004 * r);
        left.inner_feed.reset(0.5);
        right.inner_feed.reset(0.5);
        self.unit += 1;
    }

    fn feed(&mut self, level: usize, left: &mut ParameterRamp, right: &mut ParameterRamp) {
        let index = self.feed[level];
        let stream = OffsetStream::feed(level).unwrap();
        let [l, r] = offset_to_multiplier(self.bank.offset(stream, index), 0.2, 1.0);
        left.reset(0.5 * l);
        right.reset(0.5 * r);
        self.feed[level] += 1;
    }
}

#[test]
fn seeded_offsets_decorrelate_channels() {
    type Tree = Lattice<Lattice<AllpassCell, 3>, 2>;
    let mut left = Tree::new();
    let mut right = Tree::new();
    left.setup(SAMPLE_RATE, 0.01);
    right.setup(SAMPLE_RATE, 0.01);

    let bank = RandomOffsetBank::new([Tree::UNITS, 0, Tree::slots(1), Tree::slots(2), 0, 0]);
    let mut visitor = Decorrelate {
        bank: &bank,
        unit: 0,
        feed: [0; 5],
    };
    Tree::visit_pair(&mut left, &mut right, &mut visitor);
    assert_eq!(visitor.unit, 6);
    assert_eq!(visitor.feed[1..3], [6, 2]);

    for i in 0..Tree::UNITS {
        let (l, r) = (left.unit(i).unwrap(), right.unit(i).unwrap());
        assert!(l.seconds.value() <= 0.004 && r.seconds.value() <= 0.004);
        assert!(l.seconds.value() == 0.004 || r.seconds.value() == 0.004);
    }

    let out_l: Vec<f32> = (0..2000).map(|n| left.process(impulse(n), &CTX)).collect();
    let out_r: Vec<f32> = (0..2000).map(|n| right.process(impulse(n), &CTX)).collect();
    assert_ne!(out_l, out_r);
}
