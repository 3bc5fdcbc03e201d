//! Read-merge-write of an existing config file

use std::path::Path;

use super::{read_config, recursive_merge_config, write_config, ConfigDocument, ConfigError};
use crate::echo::{msg, Echo};

/// Merge `patch` into the config at `source` and write the result.
///
/// `destination` defaults to `source` (in-place update). Read errors are
/// returned as-is; nothing is written in that case.
pub fn update_config(
    source: &Path,
    patch: &ConfigDocument,
    destination: Option<&Path>,
    echo: &dyn Echo,
) -> Result<(), ConfigError> {
    let destination = destination.unwrap_or(source);
    let mut config = read_config(source)?;
    msg(echo, "Updating config file with new values");
    recursive_merge_config(&mut config, patch);
    write_config(&config, destination, echo)
}
