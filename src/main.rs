//! Snaketool CLI
//!
//! Entry point for the `snaketool` command-line tool.

use std::process;

use clap::Parser;
use snaketool_utils::cli::{Cli, Commands, ConfigArgs, RunArgs};
use snaketool_utils::{initialise_config, msg, run_snakemake};
use tracing_subscriber::EnvFilter;

fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run_workflow(args),
        Commands::Config(args) => run_config(args),
    }
}

fn run_workflow(args: RunArgs) {
    let echo = args.echo();
    let options = args.into_options();

    match run_snakemake(&options, &echo) {
        Ok(code) => process::exit(code),
        Err(e) => {
            msg(&echo, &format!("ERROR: {}", e));
            process::exit(e.exit_code());
        }
    }
}

fn run_config(args: ConfigArgs) {
    let echo = args.echo();
    let merge = args.merge_config();

    if let Err(e) = initialise_config(
        &args.configfile,
        &args.system_config,
        merge.as_ref(),
        args.workflow_profile.as_deref(),
        args.system_workflow_profile.as_deref(),
        &echo,
    ) {
        msg(&echo, &format!("ERROR: {}", e));
        process::exit(1);
    }
}
