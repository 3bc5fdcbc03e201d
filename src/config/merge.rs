//! Config merge logic
//!
//! Only mappings recurse. Everything else, sequences included, is replaced
//! wholesale by the patch value.

use serde_yaml::{Mapping, Value};

use super::ConfigDocument;

/// Merge `patch` into `base` in place.
///
/// Merge semantics:
/// - Mappings: merge by key (recursive). A missing or non-mapping base value
///   is replaced by an empty mapping first.
/// - Sequences: REPLACE (patch wins entirely)
/// - Scalars: override (patch wins)
///
/// Keys only present in `base` are left alone. Applying the same patch twice
/// gives the same result as applying it once.
pub fn recursive_merge_config(base: &mut ConfigDocument, patch: &ConfigDocument) {
    for (key, value) in patch {
        match value {
            Value::Mapping(nested) => {
                if !matches!(base.get(key), Some(Value::Mapping(_))) {
                    base.insert(key.clone(), Value::Mapping(Mapping::new()));
                }
                if let Some(Value::Mapping(inner)) = base.get_mut(key) {
                    recursive_merge_config(inner, nested);
                }
            }
            other => {
                base.insert(key.clone(), other.clone());
            }
        }
    }
}

/// Merge `patch` over a copy of `base`, leaving both inputs untouched
pub fn merged(base: &ConfigDocument, patch: &ConfigDocument) -> ConfigDocument {
    let mut out = base.clone();
    recursive_merge_config(&mut out, patch);
    out
}
