//! Construction of the workflow-engine command line

mod builder;
mod spec;

pub use builder::{build_snakemake_command, RunOptions, DEFAULT_PROGRAM};
pub use spec::CommandSpec;
