//! Conversion of typed override values into a config document
//!
//! Command-line tools collect overrides into ordinary Rust values (structs,
//! maps, tuples from multi-value options). Those have to become plain YAML
//! before they can be merged or written. Tuples, tuple structs and arrays
//! all serialize as YAML sequences, at any depth.

use serde::Serialize;
use serde_yaml::Value;

use super::{ConfigDocument, ConfigError};

/// Convert any serializable mapping into a [`ConfigDocument`].
///
/// Tuple-shaped values become sequences; everything else is kept as-is.
pub fn tuple_to_list<T>(value: &T) -> Result<ConfigDocument, ConfigError>
where
    T: Serialize + ?Sized,
{
    match serde_yaml::to_value(value)? {
        Value::Mapping(map) => Ok(map),
        other => Err(ConfigError::UnexpectedValue(kind_of(&other))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null value",
        Value::Bool(_) => "boolean value",
        Value::Number(_) => "number value",
        Value::String(_) => "string value",
        Value::Sequence(_) => "sequence value",
        Value::Mapping(_) => "mapping value",
        Value::Tagged(_) => "tagged value",
    }
}
