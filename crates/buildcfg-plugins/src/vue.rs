//! Vue framework integration

use crate::options;
use buildcfg_core::{ConfigDraft, Plugin, PluginError};
use serde_json::Value;

/// Extension of single-file components.
pub const SFC_EXTENSION: &str = ".vue";

/// Registers `.vue` sources and the framework's compile-time flags.
///
/// Flags are only set when the user has not defined them already.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VuePlugin {
    /// Keep the Options API in the build
    pub options_api: bool,
    /// Keep devtools support in production builds
    pub prod_devtools: bool,
}

impl VuePlugin {
    pub fn new() -> Self {
        Self {
            options_api: true,
            prod_devtools: false,
        }
    }

    /// Options: `optionsApi` (bool, default true), `prodDevtools`
    /// (bool, default false).
    pub fn from_options(options: &Value) -> Result<Self, PluginError> {
        let table = options::table(options)?;
        Ok(Self {
            options_api: options::bool_or(table, "optionsApi", true)?,
            prod_devtools: options::bool_or(table, "prodDevtools", false)?,
        })
    }
}

impl Default for VuePlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for VuePlugin {
    fn name(&self) -> &str {
        "vue"
    }

    fn transform(&self, mut config: ConfigDraft) -> Result<ConfigDraft, PluginError> {
        config.add_extension(SFC_EXTENSION);
        config.define_default("__VUE_OPTIONS_API__", self.options_api.to_string());
        config.define_default("__VUE_PROD_DEVTOOLS__", self.prod_devtools.to_string());
        Ok(config)
    }
}
