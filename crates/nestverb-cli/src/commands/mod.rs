//! CLI subcommands.

pub mod common;
pub mod impulse;
pub mod info;
pub mod process;
