//! Intermediate configuration passed through plugins

use buildcfg_fs::NormalizedPath;
use std::collections::BTreeMap;

/// The mutable configuration value plugins observe and return.
///
/// When a plugin receives a draft, every path in it is absolute. Paths a
/// plugin inserts may be relative; they are anchored at `root` afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDraft {
    /// Project root
    pub root: NormalizedPath,

    /// Public URL base
    pub base: String,

    /// Path aliases keyed by their symbolic prefix
    pub alias: BTreeMap<String, NormalizedPath>,

    /// Extensions tried when importing without one, in priority order
    pub extensions: Vec<String>,

    /// Named build entry points
    pub entry_points: BTreeMap<String, NormalizedPath>,

    /// Build output directory
    pub out_dir: Option<NormalizedPath>,

    /// Compile-time constant replacements
    pub define: BTreeMap<String, String>,
}

impl ConfigDraft {
    /// Append an extension unless it is already listed.
    pub fn add_extension(&mut self, extension: impl Into<String>) {
        let extension = extension.into();
        if !self.extensions.contains(&extension) {
            self.extensions.push(extension);
        }
    }

    /// Set a define entry only if the key is not present yet.
    pub fn define_default(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.define.entry(key.into()).or_insert_with(|| value.into());
    }
}
