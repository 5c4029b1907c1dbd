//! Report bundle packaging
//!
//! Reports are served from an arbitrary sub-path of the host application,
//! so assets must be referenced relative to the bundle and the bundle needs
//! a known output directory to be packaged from.

use crate::options;
use buildcfg_core::{ConfigDraft, Plugin, PluginError};
use serde_json::Value;

/// Default output directory, relative to the project root.
pub const DEFAULT_OUT_DIR: &str = "dist";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LxrPlugin {
    /// Output directory override (relative to the root)
    pub out_dir: Option<String>,
}

impl LxrPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options: `outDir` (string).
    pub fn from_options(options: &Value) -> Result<Self, PluginError> {
        let table = options::table(options)?;
        Ok(Self {
            out_dir: options::string(table, "outDir")?,
        })
    }
}

impl Plugin for LxrPlugin {
    fn name(&self) -> &str {
        "lxr"
    }

    fn transform(&self, mut config: ConfigDraft) -> Result<ConfigDraft, PluginError> {
        if config.entry_points.is_empty() {
            return Err(PluginError::failed(
                "a report bundle needs at least one entry point",
            ));
        }

        config.base = "./".to_string();
        if let Some(dir) = &self.out_dir {
            config.out_dir = Some(config.root.join(dir));
        } else if config.out_dir.is_none() {
            config.out_dir = Some(config.root.join(DEFAULT_OUT_DIR));
        }
        tracing::debug!(out_dir = ?config.out_dir, "Report bundle configured");
        Ok(config)
    }
}
