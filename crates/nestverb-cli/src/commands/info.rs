//! Topology and parameter listing.

use super::common::Topology;
use clap::Args;
use nestverb_core::ParamDescriptor;
use nestverb_effects::{DenseLattice, FlatLattice, ParamKey, ReverbParams, TaperedLattice};

#[derive(Args)]
pub struct InfoArgs {
    /// Lattice topology
    #[arg(value_enum, default_value_t = Topology::Dense)]
    topology: Topology,

    /// List every parameter slot instead of one line per group
    #[arg(short, long)]
    all: bool,
}

/// Default parameter store of a topology.
pub fn topology_params(topology: Topology) -> ReverbParams {
    match topology {
        Topology::Flat => ReverbParams::for_topology::<FlatLattice>(),
        Topology::Tapered => ReverbParams::for_topology::<TaperedLattice>(),
        Topology::Dense => ReverbParams::for_topology::<DenseLattice>(),
    }
}

pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let params = topology_params(args.topology);
    let layout = params.layout();

    println!("{:?} lattice", args.topology);
    println!("  Levels:     {}", args.topology.levels());
    println!("  Units:      {} per channel", layout.units());
    for level in 1..=args.topology.levels() {
        println!("  D{level} feeds:   {}", layout.slots(level));
    }
    println!("  Parameters: {}", layout.len());
    println!();

    println!(
        "  {:<26} {:>6} {:>10} {:>10} {:>10}",
        "ID", "SLOTS", "MIN", "MAX", "DEFAULT"
    );
    println!("  {}", "-".repeat(66));

    let mut previous: Option<&str> = None;
    for key in params.keys() {
        if args.all {
            print_row(&key.to_string(), 1, &key.descriptor());
            continue;
        }
        if previous == Some(key.group_name()) {
            continue;
        }
        previous = Some(key.group_name());
        let slots = params
            .keys()
            .filter(|k| k.group_name() == key.group_name())
            .count();
        print_row(&group_label(key), slots, &key.descriptor());
    }

    println!();
    println!("Set a single slot with --param time.3=0.05, or a whole group with --param time=0.05");
    Ok(())
}

fn group_label(key: ParamKey) -> String {
    match key.slot() {
        Some(_) => format!("{}.*", key.group_name()),
        None => key.to_string(),
    }
}

fn print_row(label: &str, slots: usize, desc: &ParamDescriptor) {
    let suffix = desc.unit.suffix();
    println!(
        "  {:<26} {:>6} {:>10} {:>10} {:>10}",
        label,
        slots,
        format!("{}{suffix}", desc.min),
        format!("{}{suffix}", desc.max),
        format!("{}{suffix}", desc.default),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topology_params_sizes() {
        assert_eq!(topology_params(Topology::Flat).layout().units(), 16);
        assert_eq!(topology_params(Topology::Tapered).layout().units(), 120);
        assert_eq!(topology_params(Topology::Dense).layout().units(), 256);
    }

    #[test]
    fn test_group_label() {
        assert_eq!(group_label(ParamKey::Time(4)), "time.*");
        assert_eq!(
            group_label(ParamKey::Feed { level: 2, index: 0 }),
            "d2_feed.*"
        );
        assert_eq!(group_label(ParamKey::Wet), "wet");
    }
}
