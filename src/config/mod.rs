//! YAML configuration lifecycle
//!
//! Config files are layered:
//! 1. System default shipped with the tool
//! 2. Local copy the user edits (created from the system default on first use)
//! 3. Run-time overrides merged into the local copy
//!
//! Merge semantics:
//! - Mappings: merge by key (recursive)
//! - Sequences: REPLACE
//! - Scalars: override

mod init;
mod merge;
mod normalize;
mod store;
mod update;

use std::path::PathBuf;

pub use init::{copy_config, initialise_config, workflow_profile_config, PROFILE_CONFIG_FILE};
pub use merge::{merged, recursive_merge_config};
pub use normalize::tuple_to_list;
pub use store::{read_config, write_config};
pub use update::update_config;

/// A YAML mapping that preserves key insertion order
pub type ConfigDocument = serde_yaml::Mapping;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("YAML serialization error: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("expected a YAML mapping at the top level of {0}")]
    NotAMapping(String),

    #[error("expected a mapping value, got a {0}")]
    UnexpectedValue(&'static str),
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }
}
