//! Snaketool utilities
//!
//! Shared plumbing for command-line tools that wrap a Snakemake workflow:
//! layered YAML config files (system default, local copy, run-time
//! overrides, workflow profile), construction of the Snakemake command line,
//! and a fail-fast subprocess runner.

pub mod cli;
pub mod command;
pub mod config;
pub mod echo;
pub mod runner;

pub use command::{build_snakemake_command, CommandSpec, RunOptions};
pub use config::{
    copy_config, initialise_config, read_config, recursive_merge_config, tuple_to_list,
    update_config, write_config, ConfigDocument, ConfigError,
};
pub use echo::{msg, msg_box, CaptureEcho, Echo, SilentEcho, StderrEcho};
pub use runner::{run_command, run_snakemake, RunError};
