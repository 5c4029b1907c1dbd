//! Reading plugin options from a config document

use buildcfg_core::PluginError;
use serde_json::{Map, Value};

/// Empty table used when a plugin was declared without options.
static EMPTY: std::sync::LazyLock<Map<String, Value>> = std::sync::LazyLock::new(Map::new);

pub(crate) fn table(options: &Value) -> Result<&Map<String, Value>, PluginError> {
    match options {
        Value::Null => Ok(&*EMPTY),
        Value::Object(map) => Ok(map),
        _ => Err(PluginError::invalid_option("options", "a table")),
    }
}

pub(crate) fn bool_or(
    options: &Map<String, Value>,
    key: &str,
    default: bool,
) -> Result<bool, PluginError> {
    match options.get(key) {
        None => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(PluginError::invalid_option(key, "a boolean")),
    }
}

pub(crate) fn string(options: &Map<String, Value>, key: &str) -> Result<Option<String>, PluginError> {
    match options.get(key) {
        None => Ok(None),
        Some(Value::String(s)) if !s.is_empty() => Ok(Some(s.clone())),
        Some(_) => Err(PluginError::invalid_option(key, "a non-empty string")),
    }
}
