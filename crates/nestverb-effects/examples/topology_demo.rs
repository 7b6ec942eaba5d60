//! Compare the three lattice topologies by their impulse responses.
//!
//! Prints RT60, early decay time and inter-channel coherence for each tree
//! at the same settings.
//!
//! Run with: cargo run --example topology_demo

use nestverb_analysis::{ImpulseInput, channel_coherence, decay_times, impulse_response};
use nestverb_core::{Effect, LatticeNode, OffsetStream};
use nestverb_effects::{DenseReverb, FlatReverb, LatticeReverb, ParamKey, TaperedReverb};

const SAMPLE_RATE: f32 = 48000.0;
const SECONDS: f32 = 3.0;

fn configure<T: LatticeNode>(reverb: &mut LatticeReverb<T>) {
    let params = reverb.params_mut();
    params.fill(OffsetStream::Time, 0.03);
    params.fill(OffsetStream::InnerFeed, 0.6);
    for group in [OffsetStream::Feed1, OffsetStream::Feed2, OffsetStream::Feed3, OffsetStream::Feed4] {
        params.fill(group, 0.5);
    }
    params.set(ParamKey::OffsetRange(OffsetStream::Time), 0.3);
    params.set(ParamKey::Dry, 0.0);
    params.set(ParamKey::Wet, 1.0);
    reverb.reset();
}

fn measure<T: LatticeNode>(name: &str, mut reverb: LatticeReverb<T>) {
    configure(&mut reverb);
    let ir = impulse_response(&mut reverb, ImpulseInput::Left, (SECONDS * SAMPLE_RATE) as usize);
    let coherence = channel_coherence(&ir.left, &ir.right, 48);

    match decay_times(&ir.left, SAMPLE_RATE) {
        Some(decay) => println!(
            "{name:<8} {:>4} units  RT60 {:.2}s  EDT {:.2}s  coherence {coherence:.3}",
            T::UNITS,
            decay.rt60_seconds,
            decay.edt_seconds,
        ),
        None => println!("{name:<8} {:>4} units  no measurable decay", T::UNITS),
    }
}

fn main() {
    println!("nestverb topology comparison");
    println!("============================\n");

    measure("flat", FlatReverb::new(SAMPLE_RATE));
    measure("tapered", TaperedReverb::new(SAMPLE_RATE));
    measure("dense", DenseReverb::new(SAMPLE_RATE));
}
