//! User-authored configuration before validation

use crate::plugin::Plugin;
use std::fmt;
use std::sync::Arc;

/// A partially specified configuration as written by the user.
///
/// Mappings are kept as ordered entry lists rather than maps so that a key
/// declared twice is still visible to the resolver, which rejects it.
/// Every field is optional; absent fields behave as empty containers.
#[derive(Clone, Default)]
pub struct RawConfig {
    pub(crate) root: Option<String>,
    pub(crate) base: Option<String>,
    pub(crate) plugins: Vec<Arc<dyn Plugin>>,
    pub(crate) alias: Vec<(String, String)>,
    pub(crate) extensions: Vec<String>,
    pub(crate) entry_points: Vec<(String, String)>,
    pub(crate) out_dir: Option<String>,
    pub(crate) define: Vec<(String, String)>,
}

impl RawConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the project root (relative to the base directory).
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Set the public URL base.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Append a plugin; declaration order is application order.
    pub fn with_plugin(mut self, plugin: Arc<dyn Plugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    pub fn with_alias(mut self, key: impl Into<String>, path: impl Into<String>) -> Self {
        self.alias.push((key.into(), path.into()));
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extensions.push(extension.into());
        self
    }

    pub fn with_entry_point(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.entry_points.push((name.into(), path.into()));
        self
    }

    pub fn with_out_dir(mut self, out_dir: impl Into<String>) -> Self {
        self.out_dir = Some(out_dir.into());
        self
    }

    pub fn with_define(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.define.push((key.into(), value.into()));
        self
    }

    /// Names of the declared plugins, in order.
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    pub fn alias(&self) -> &[(String, String)] {
        &self.alias
    }

    pub fn entry_points(&self) -> &[(String, String)] {
        &self.entry_points
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
            && self.base.is_none()
            && self.plugins.is_empty()
            && self.alias.is_empty()
            && self.extensions.is_empty()
            && self.entry_points.is_empty()
            && self.out_dir.is_none()
            && self.define.is_empty()
    }
}

impl fmt::Debug for RawConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawConfig")
            .field("root", &self.root)
            .field("base", &self.base)
            .field("plugins", &self.plugin_names())
            .field("alias", &self.alias)
            .field("extensions", &self.extensions)
            .field("entry_points", &self.entry_points)
            .field("out_dir", &self.out_dir)
            .field("define", &self.define)
            .finish()
    }
}
