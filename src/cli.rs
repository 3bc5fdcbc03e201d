//! Shared command-line surface for Snakemake-powered tools
//!
//! Tools flatten [`RunArgs`] / [`ConfigArgs`] into their own subcommands.
//! clap lists subcommands in the order they are declared, so help output
//! follows registration order rather than alphabetical order.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_yaml::{Mapping, Value};

use crate::command::{RunOptions, DEFAULT_PROGRAM};
use crate::config::{recursive_merge_config, ConfigDocument};
use crate::echo::StderrEcho;

/// Top-level parser for the `snaketool` binary
#[derive(Parser, Debug)]
#[command(name = "snaketool")]
#[command(about = "Run Snakemake workflows with layered YAML config", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the workflow
    Run(RunArgs),

    /// Copy the system default config for editing
    Config(ConfigArgs),
}

/// Options for launching a workflow
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Workflow definition file
    #[arg(long, short = 's')]
    pub snakefile: PathBuf,

    /// Local config file (created from --system-config if missing)
    #[arg(long)]
    pub configfile: Option<PathBuf>,

    /// System default config file
    #[arg(long)]
    pub system_config: Option<PathBuf>,

    /// Workflow-profile directory
    #[arg(long)]
    pub workflow_profile: Option<PathBuf>,

    /// System default workflow-profile config file
    #[arg(long)]
    pub system_workflow_profile: Option<PathBuf>,

    /// Number of local cores
    #[arg(long, short = 't', default_value_t = 1)]
    pub threads: u32,

    /// Use conda for rule environments
    #[arg(long)]
    pub use_conda: bool,

    /// Directory for conda environments
    #[arg(long)]
    pub conda_prefix: Option<PathBuf>,

    /// Named Snakemake profile
    #[arg(long)]
    pub profile: Option<String>,

    /// Default Snakemake argument (repeatable)
    #[arg(long, allow_hyphen_values = true)]
    pub snake_default: Vec<String>,

    /// Override a config value, e.g. `--set params.k=21` (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub overrides: Vec<(String, Value)>,

    /// Engine executable
    #[arg(long, default_value = DEFAULT_PROGRAM)]
    pub program: String,

    /// Append status messages to this file
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// Extra Snakemake arguments (after --)
    #[arg(last = true)]
    pub snake_args: Vec<String>,
}

impl RunArgs {
    pub fn into_options(self) -> RunOptions {
        let merge_config = overrides_to_document(&self.overrides);
        RunOptions {
            program: self.program,
            snakefile: self.snakefile,
            configfile: self.configfile,
            system_config: self.system_config,
            merge_config,
            workflow_profile: self.workflow_profile,
            system_workflow_profile: self.system_workflow_profile,
            merge_workflow_profile: None,
            threads: self.threads,
            use_conda: self.use_conda,
            conda_prefix: self.conda_prefix,
            snake_default: self.snake_default,
            snake_args: self.snake_args,
            profile: self.profile,
        }
    }

    pub fn echo(&self) -> StderrEcho {
        echo_for(self.log.as_ref())
    }
}

/// Options for materialising config files without running anything
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Local config file to create
    #[arg(long, default_value = "config.yaml")]
    pub configfile: PathBuf,

    /// System default config file
    #[arg(long)]
    pub system_config: PathBuf,

    /// Workflow-profile directory
    #[arg(long)]
    pub workflow_profile: Option<PathBuf>,

    /// System default workflow-profile config file
    #[arg(long)]
    pub system_workflow_profile: Option<PathBuf>,

    /// Override a config value in the new copy (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub overrides: Vec<(String, Value)>,

    /// Append status messages to this file
    #[arg(long)]
    pub log: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn merge_config(&self) -> Option<ConfigDocument> {
        overrides_to_document(&self.overrides)
    }

    pub fn echo(&self) -> StderrEcho {
        echo_for(self.log.as_ref())
    }
}

/// Names of `cmd`'s subcommands, in the order they were registered
pub fn subcommand_names(cmd: &clap::Command) -> Vec<String> {
    cmd.get_subcommands()
        .map(|c| c.get_name().to_string())
        .filter(|name| name != "help")
        .collect()
}

fn echo_for(log: Option<&PathBuf>) -> StderrEcho {
    match log {
        Some(path) => StderrEcho::with_log(path),
        None => StderrEcho::new(),
    }
}

/// Parse `KEY=VALUE`, reading VALUE as a YAML scalar or flow collection
fn parse_key_value(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    if key.is_empty() || key.split('.').any(str::is_empty) {
        return Err(format!("invalid key '{}'", key));
    }
    let value = if value.is_empty() {
        Value::String(String::new())
    } else {
        serde_yaml::from_str(value).map_err(|e| format!("invalid value '{}': {}", value, e))?
    };
    Ok((key.to_string(), value))
}

/// Fold dotted-key overrides into a nested document, later keys winning
fn overrides_to_document(overrides: &[(String, Value)]) -> Option<ConfigDocument> {
    if overrides.is_empty() {
        return None;
    }

    let mut doc = ConfigDocument::new();
    for (key, value) in overrides {
        let mut parts: Vec<&str> = key.split('.').collect();
        let leaf = parts.pop().unwrap_or_default();

        let mut patch = Mapping::new();
        patch.insert(Value::from(leaf), value.clone());
        for part in parts.into_iter().rev() {
            let mut outer = Mapping::new();
            outer.insert(Value::from(part), Value::Mapping(patch));
            patch = outer;
        }
        recursive_merge_config(&mut doc, &patch);
    }
    Some(doc)
}
