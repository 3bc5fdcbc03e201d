//! Blocking execution of the engine command
//!
//! The command is flattened to a single string and handed to the platform
//! shell. A failed run is fatal: the host process exits with code 1.

use std::io;
use std::process::{self, Command, ExitStatus};

use thiserror::Error;

use crate::command::{build_snakemake_command, CommandSpec, RunOptions};
use crate::config::ConfigError;
use crate::echo::{msg, msg_box, Echo};

/// Exit code used when the engine run fails
pub const EXIT_CODE_FAILED: i32 = 1;

/// Runner errors
#[derive(Debug, Error)]
pub enum RunError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to spawn shell: {0}")]
    Spawn(#[source] io::Error),
}

impl RunError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Config(_) => 1,
            RunError::Spawn(_) => 1,
        }
    }
}

/// Run `spec` through the shell and wait for it.
///
/// The command is announced in a box before it starts. stdio is inherited.
pub fn execute(spec: &CommandSpec, echo: &dyn Echo) -> Result<ExitStatus, RunError> {
    let line = spec.to_shell_string();
    msg_box(echo, "Snakemake command", Some(&line));

    tracing::debug!(command = %line, "spawning shell");
    let status = shell(&line).status().map_err(RunError::Spawn)?;
    tracing::debug!(?status, "engine exited");
    Ok(status)
}

/// Run `spec` once. Returns 0 on success; on failure the process exits with 1.
pub fn run_command(spec: &CommandSpec, echo: &dyn Echo) -> Result<i32, RunError> {
    let status = execute(spec, echo)?;
    if !status.success() {
        msg(echo, "ERROR: Snakemake failed");
        process::exit(EXIT_CODE_FAILED);
    }
    msg(echo, "Snakemake finished successfully");
    Ok(0)
}

/// Build the engine command from `options` and run it.
pub fn run_snakemake(options: &RunOptions, echo: &dyn Echo) -> Result<i32, RunError> {
    let spec = build_snakemake_command(options, echo)?;
    run_command(&spec, echo)
}

#[cfg(unix)]
fn shell(line: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(line);
    cmd
}

#[cfg(windows)]
fn shell(line: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(line);
    cmd
}
