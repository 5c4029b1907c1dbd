//! Compile-time constants from plugin options

use crate::options;
use buildcfg_core::{ConfigDraft, Plugin, PluginError};
use serde_json::Value;
use std::collections::BTreeMap;

/// Sets every option as a `define` entry, overriding earlier values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinePlugin {
    pub entries: BTreeMap<String, String>,
}

impl DefinePlugin {
    pub fn new<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Options: a table of strings, numbers or booleans.
    pub fn from_options(options: &Value) -> Result<Self, PluginError> {
        let mut entries = BTreeMap::new();
        for (key, value) in options::table(options)? {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return Err(PluginError::invalid_option(key, "a string, number or boolean")),
            };
            entries.insert(key.clone(), value);
        }
        Ok(Self { entries })
    }
}

impl Plugin for DefinePlugin {
    fn name(&self) -> &str {
        "define"
    }

    fn transform(&self, mut config: ConfigDraft) -> Result<ConfigDraft, PluginError> {
        config
            .define
            .extend(self.entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(config)
    }
}
