//! Reading and writing config files

use std::fs;
use std::path::Path;

use serde_yaml::Value;

use super::{ConfigDocument, ConfigError};
use crate::echo::{msg, Echo};

/// Read a YAML config file into a document.
///
/// An empty file reads as an empty document.
pub fn read_config(path: &Path) -> Result<ConfigDocument, ConfigError> {
    tracing::debug!(path = %path.display(), "reading config");
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;

    let value: Value = serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    match value {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(ConfigDocument::new()),
        _ => Err(ConfigError::NotAMapping(path.display().to_string())),
    }
}

/// Write a document to `path`, replacing any existing file.
///
/// The parent directory must already exist.
pub fn write_config(doc: &ConfigDocument, path: &Path, echo: &dyn Echo) -> Result<(), ConfigError> {
    msg(echo, &format!("Writing config file to {}", path.display()));
    let yaml = serde_yaml::to_string(doc)?;
    fs::write(path, yaml).map_err(|e| ConfigError::io(path, e))
}
