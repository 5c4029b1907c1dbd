//! Plugin registry

use buildcfg_core::{Error, Plugin, PluginError, PluginSource, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Builds a plugin from its document options.
pub type PluginFactory = fn(&Value) -> std::result::Result<Arc<dyn Plugin>, PluginError>;

/// A named plugin factory.
#[derive(Debug, Clone)]
pub struct PluginRegistration {
    pub name: String,
    pub description: String,
    pub factory: PluginFactory,
}

impl PluginRegistration {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        factory: PluginFactory,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            factory,
        }
    }
}

/// Lookup of plugin factories by the name used in config files.
///
/// A registry is an ordinary value; callers build one and pass it to the
/// loader.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    plugins: HashMap<String, PluginRegistration>,
}

impl PluginRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with all built-in plugins.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for reg in crate::builtins::builtin_registrations() {
            registry.register(reg);
        }
        registry
    }

    /// Register a plugin factory, replacing any previous one of that name.
    pub fn register(&mut self, reg: PluginRegistration) {
        if self.plugins.contains_key(&reg.name) {
            tracing::debug!(plugin = %reg.name, "Replacing registered plugin");
        }
        self.plugins.insert(reg.name.clone(), reg);
    }

    pub fn get(&self, name: &str) -> Option<&PluginRegistration> {
        self.plugins.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// List all registered plugin names (sorted).
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.plugins.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// All registrations sorted by name.
    pub fn registrations(&self) -> Vec<&PluginRegistration> {
        let mut regs: Vec<_> = self.plugins.values().collect();
        regs.sort_by(|a, b| a.name.cmp(&b.name));
        regs
    }
}

impl PluginSource for PluginRegistry {
    fn instantiate(&self, name: &str, options: &Value) -> Result<Arc<dyn Plugin>> {
        let reg = self
            .get(name)
            .ok_or_else(|| Error::UnknownPlugin(name.to_string()))?;
        (reg.factory)(options).map_err(|source| Error::PluginOptions {
            plugin: name.to_string(),
            source,
        })
    }
}
