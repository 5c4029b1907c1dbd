//! Loading raw configurations from files

use super::RawConfig;
use crate::Result;
use crate::plugin::PluginSource;
use buildcfg_fs::{ConfigStore, NormalizedPath};
use std::path::Path;

/// A raw configuration together with where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Canonical path of the config file
    pub path: NormalizedPath,
    /// Directory containing the config file; relative paths anchor here
    pub base_dir: NormalizedPath,
    pub raw: RawConfig,
}

/// Reads config files and materializes their plugins
pub struct ConfigLoader<'a> {
    store: ConfigStore,
    plugins: &'a dyn PluginSource,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(plugins: &'a dyn PluginSource) -> Self {
        Self {
            store: ConfigStore::new(),
            plugins,
        }
    }

    /// Load a specific config file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<LoadedConfig> {
        let path = NormalizedPath::canonical(path)?;
        tracing::debug!(path = %path, "Loading config file");

        let document = self.store.load_document(&path)?;
        let raw = RawConfig::from_document(&document, self.plugins)?;
        let base_dir = path.parent().unwrap_or_else(|| NormalizedPath::new("/"));

        Ok(LoadedConfig {
            path,
            base_dir,
            raw,
        })
    }

    /// Find and load the conventional config file in `dir`.
    pub fn discover(&self, dir: impl AsRef<Path>) -> Result<LoadedConfig> {
        let dir = NormalizedPath::canonical(dir)?;
        let path = self.store.discover(&dir)?;
        self.load(path.to_native())
    }
}
