//! Snakemake command construction
//!
//! Tokens are appended in a fixed order, each group toggled independently:
//! 1. `<program> -s <snakefile>`
//! 2. `--configfile <path>` (config initialised and updated first)
//! 3. `--cores <n>` unless a profile is in effect
//! 4. `--use-conda [--conda-prefix <path>]`
//! 5. default engine args
//! 6. passthrough args
//! 7. `--profile <name>`, then `--workflow-profile <dir>` last

use std::path::{Path, PathBuf};

use super::spec::{has_flag, CommandSpec};
use crate::config::{
    copy_config, read_config, update_config, workflow_profile_config, ConfigDocument, ConfigError,
};
use crate::echo::{msg_box, Echo};

/// Program invoked when none is configured
pub const DEFAULT_PROGRAM: &str = "snakemake";

/// Everything needed to build and launch one engine run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Engine executable (default: "snakemake")
    pub program: String,

    /// Workflow definition passed with `-s`
    pub snakefile: PathBuf,

    /// Local config passed with `--configfile`
    pub configfile: Option<PathBuf>,

    /// System default copied to `configfile` when it does not exist
    pub system_config: Option<PathBuf>,

    /// Values merged into `configfile` before the run
    pub merge_config: Option<ConfigDocument>,

    /// Workflow-profile directory passed with `--workflow-profile`
    pub workflow_profile: Option<PathBuf>,

    /// System default copied to `<workflow_profile>/config.yaml`
    pub system_workflow_profile: Option<PathBuf>,

    /// Values merged into the workflow-profile config before the run
    pub merge_workflow_profile: Option<ConfigDocument>,

    /// Local cores (default: 1)
    pub threads: u32,

    /// Pass `--use-conda`
    pub use_conda: bool,

    /// Conda environment directory, only used with `use_conda`
    pub conda_prefix: Option<PathBuf>,

    /// Tool-level default engine args
    pub snake_default: Vec<String>,

    /// User passthrough engine args
    pub snake_args: Vec<String>,

    /// Named engine profile passed with `--profile`
    pub profile: Option<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            snakefile: PathBuf::from("Snakefile"),
            configfile: None,
            system_config: None,
            merge_config: None,
            workflow_profile: None,
            system_workflow_profile: None,
            merge_workflow_profile: None,
            threads: 1,
            use_conda: false,
            conda_prefix: None,
            snake_default: Vec::new(),
            snake_args: Vec::new(),
            profile: None,
        }
    }
}

impl RunOptions {
    pub fn new(snakefile: impl Into<PathBuf>) -> Self {
        Self {
            snakefile: snakefile.into(),
            ..Self::default()
        }
    }

    /// The engine takes its core count from a profile when one is named,
    /// either here or in the passthrough args.
    pub fn uses_profile(&self) -> bool {
        self.profile.is_some() || has_flag(&self.snake_args, "--profile")
    }
}

/// Build the engine command, materialising config files on the way.
pub fn build_snakemake_command(
    options: &RunOptions,
    echo: &dyn Echo,
) -> Result<CommandSpec, ConfigError> {
    let mut cmd = CommandSpec::new(options.program.as_str());
    cmd.arg("-s").arg(options.snakefile.display());

    if let Some(ref configfile) = options.configfile {
        prepare_config(
            configfile,
            options.system_config.as_deref(),
            options.merge_config.as_ref(),
            echo,
        )?;

        let runtime = read_config(configfile)?;
        let dump = serde_yaml::to_string(&runtime)?;
        msg_box(echo, "Runtime config", Some(&dump));

        cmd.arg("--configfile").arg(configfile.display());
    }

    if !options.uses_profile() {
        cmd.arg("--cores").arg(options.threads);
    }

    if options.use_conda {
        cmd.arg("--use-conda");
        if let Some(ref prefix) = options.conda_prefix {
            cmd.arg("--conda-prefix").arg(prefix.display());
        }
    }

    cmd.args(&options.snake_default);
    cmd.args(&options.snake_args);

    if let Some(ref profile) = options.profile {
        cmd.arg("--profile").arg(profile);
    }

    if let Some(ref workflow_profile) = options.workflow_profile {
        prepare_config(
            &workflow_profile_config(workflow_profile),
            options.system_workflow_profile.as_deref(),
            options.merge_workflow_profile.as_ref(),
            echo,
        )?;
        cmd.arg("--workflow-profile").arg(workflow_profile.display());
    }

    tracing::debug!(command = %cmd, "built engine command");
    Ok(cmd)
}

/// Copy the system default if needed, then apply a non-empty merge in place.
fn prepare_config(
    local: &Path,
    system: Option<&Path>,
    merge: Option<&ConfigDocument>,
    echo: &dyn Echo,
) -> Result<(), ConfigError> {
    if let Some(system) = system {
        copy_config(local, system, None, echo)?;
    }
    if let Some(patch) = merge.filter(|m| !m.is_empty()) {
        update_config(local, patch, None, echo)?;
    }
    Ok(())
}
