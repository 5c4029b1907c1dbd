//! Configuration resolution
//!
//! The `ConfigResolver` turns a [`RawConfig`] into a [`ResolvedConfig`]:
//!
//! 1. Validate the shape (absolute base directory, non-empty unique keys)
//! 2. Expand `${NAME}` references and anchor every path at the root
//! 3. Reject duplicate plugin names
//! 4. Apply the plugins in declaration order
//! 5. Freeze the result
//!
//! Resolution is all-or-nothing: no partial configuration is returned on
//! failure, and the only I/O is read-only existence checks.

use super::{ConfigDraft, RawConfig, ResolvedConfig, env};
use crate::{Error, Result};
use buildcfg_fs::NormalizedPath;
use std::collections::{BTreeMap, HashSet};

/// When referenced paths must exist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PathCheck {
    /// Aliases and entry points must exist at resolution time
    #[default]
    Eager,
    /// Existence is left to the consumer
    Lazy,
}

/// What happens when a plugin's transform fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PluginFailurePolicy {
    /// Abort resolution with `PluginTransformFailure`
    #[default]
    Fail,
    /// Log a warning and continue with the configuration from before the plugin
    Skip,
}

/// Options controlling a resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    pub path_check: PathCheck,
    pub plugin_failure: PluginFailurePolicy,
    /// Values for `${NAME}` references in path strings
    pub env: BTreeMap<String, String>,
}

impl ResolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lazy(mut self) -> Self {
        self.path_check = PathCheck::Lazy;
        self
    }

    pub fn with_plugin_failure(mut self, policy: PluginFailurePolicy) -> Self {
        self.plugin_failure = policy;
        self
    }

    pub fn with_env<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

/// Resolve with default options: eager path checks, failing plugins abort.
pub fn resolve(raw: RawConfig, base_dir: impl Into<NormalizedPath>) -> Result<ResolvedConfig> {
    ConfigResolver::new(base_dir).resolve(raw)
}

/// Resolves raw configurations against a base directory
///
/// Holds no state beyond its inputs; each call to [`resolve`](Self::resolve)
/// is independent.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    base_dir: NormalizedPath,
    options: ResolveOptions,
}

impl ConfigResolver {
    /// Create a resolver anchored at `base_dir`, which must be absolute.
    pub fn new(base_dir: impl Into<NormalizedPath>) -> Self {
        Self {
            base_dir: base_dir.into(),
            options: ResolveOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn base_dir(&self) -> &NormalizedPath {
        &self.base_dir
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Resolve `raw` into a frozen configuration.
    pub fn resolve(&self, raw: RawConfig) -> Result<ResolvedConfig> {
        self.validate_shape(&raw)?;
        tracing::debug!(base_dir = %self.base_dir, "Config shape validated");

        let mut draft = self.normalize(&raw)?;
        tracing::debug!(
            root = %draft.root,
            aliases = draft.alias.len(),
            entry_points = draft.entry_points.len(),
            "Paths normalized"
        );

        check_unique_plugins(&raw)?;

        let mut applied = Vec::with_capacity(raw.plugins.len());
        for plugin in &raw.plugins {
            let name = plugin.name().to_string();
            let before = draft.clone();

            let failure = |reason: String| Error::PluginTransformFailure {
                plugin: name.clone(),
                reason,
            };
            let outcome = plugin
                .transform(draft)
                .map_err(|e| failure(e.to_string()))
                .and_then(|next| preserves_keys(&before, &next).map(|()| next).map_err(failure))
                .and_then(|next| self.renormalize(&before, next));

            match (outcome, self.options.plugin_failure) {
                (Ok(next), _) => {
                    draft = next;
                    tracing::debug!(plugin = %name, "Plugin applied");
                    applied.push(name);
                }
                (Err(error), PluginFailurePolicy::Skip) => {
                    tracing::warn!(plugin = %name, %error, "Plugin failed, skipping");
                    draft = before;
                }
                (Err(error), PluginFailurePolicy::Fail) => return Err(error),
            }
        }

        Ok(ResolvedConfig::freeze(draft, applied))
    }

    fn validate_shape(&self, raw: &RawConfig) -> Result<()> {
        if !self.base_dir.is_absolute() {
            return Err(Error::shape(
                "baseDir",
                format!("an absolute path, got `{}`", self.base_dir),
            ));
        }

        check_mapping("resolve.alias", &raw.alias)?;
        check_mapping("build.entryPoints", &raw.entry_points)?;

        let mut defined = HashSet::new();
        for (key, _) in &raw.define {
            if key.is_empty() {
                return Err(Error::shape("define", "non-empty keys"));
            }
            if !defined.insert(key.as_str()) {
                return Err(Error::DuplicateKey {
                    field: "define".into(),
                    key: key.clone(),
                });
            }
        }

        if raw.extensions.iter().any(|ext| ext.is_empty()) {
            return Err(Error::shape("resolve.extensions", "non-empty strings"));
        }
        if raw.out_dir.as_deref() == Some("") {
            return Err(Error::shape("build.outDir", "a non-empty path"));
        }
        Ok(())
    }

    fn normalize(&self, raw: &RawConfig) -> Result<ConfigDraft> {
        let root_str = raw.root.as_deref().unwrap_or(".");
        let root = self.expand("root", root_str)?.absolutize(&self.base_dir);
        if self.options.path_check == PathCheck::Eager && !root.is_dir() {
            return Err(Error::path("root", root.as_str(), "directory not found"));
        }

        let mut alias = BTreeMap::new();
        for (key, value) in &raw.alias {
            let field = format!("resolve.alias.{key}");
            let path = self.expand(&field, value)?.absolutize(&root);
            self.check_exists(&field, &path)?;
            alias.insert(key.clone(), path);
        }

        let mut entry_points = BTreeMap::new();
        for (name, value) in &raw.entry_points {
            let field = format!("build.entryPoints.{name}");
            let path = self.expand(&field, value)?.absolutize(&root);
            self.check_exists(&field, &path)?;
            entry_points.insert(name.clone(), path);
        }

        // Output directory: anchored but never required to exist
        let out_dir = raw
            .out_dir
            .as_deref()
            .map(|dir| self.expand("build.outDir", dir).map(|p| p.absolutize(&root)))
            .transpose()?;

        let mut extensions: Vec<String> = Vec::with_capacity(raw.extensions.len());
        for ext in &raw.extensions {
            if !extensions.contains(ext) {
                extensions.push(ext.clone());
            }
        }

        Ok(ConfigDraft {
            root,
            base: raw.base.clone().unwrap_or_else(|| "/".to_string()),
            alias,
            extensions,
            entry_points,
            out_dir,
            define: raw.define.iter().cloned().collect(),
        })
    }

    /// Anchor paths a plugin produced and check the ones it added or changed.
    ///
    /// Changed paths get the same `${NAME}` expansion as user paths.
    fn renormalize(&self, before: &ConfigDraft, mut next: ConfigDraft) -> Result<ConfigDraft> {
        if next.root != before.root {
            next.root = self.expand("root", next.root.as_str())?.absolutize(&self.base_dir);
            if self.options.path_check == PathCheck::Eager && !next.root.is_dir() {
                return Err(Error::path("root", next.root.as_str(), "directory not found"));
            }
        }
        let root = next.root.clone();

        for (key, path) in next.alias.iter_mut() {
            if before.alias.get(key) != Some(&*path) {
                let field = format!("resolve.alias.{key}");
                *path = self.expand(&field, path.as_str())?.absolutize(&root);
                self.check_exists(&field, path)?;
            }
        }
        for (name, path) in next.entry_points.iter_mut() {
            if before.entry_points.get(name) != Some(&*path) {
                let field = format!("build.entryPoints.{name}");
                *path = self.expand(&field, path.as_str())?.absolutize(&root);
                self.check_exists(&field, path)?;
            }
        }
        if let Some(out_dir) = next.out_dir.as_mut() {
            if before.out_dir.as_ref() != Some(&*out_dir) {
                *out_dir = self.expand("build.outDir", out_dir.as_str())?.absolutize(&root);
            }
        }
        Ok(next)
    }

    fn expand(&self, field: &str, value: &str) -> Result<NormalizedPath> {
        env::expand(value, &self.options.env)
            .map(NormalizedPath::new)
            .map_err(|name| {
                Error::path(
                    field,
                    value,
                    format!("environment variable `{name}` is not defined"),
                )
            })
    }

    fn check_exists(&self, field: &str, path: &NormalizedPath) -> Result<()> {
        if self.options.path_check == PathCheck::Eager && !path.exists() {
            return Err(Error::path(field, path.as_str(), "path does not exist"));
        }
        Ok(())
    }
}

fn check_mapping(field: &str, entries: &[(String, String)]) -> Result<()> {
    let mut seen = HashSet::new();
    for (key, value) in entries {
        if key.is_empty() {
            return Err(Error::shape(field, "non-empty keys"));
        }
        if value.is_empty() {
            return Err(Error::shape(format!("{field}.{key}"), "a non-empty path"));
        }
        if !seen.insert(key.as_str()) {
            return Err(Error::DuplicateKey {
                field: field.to_string(),
                key: key.clone(),
            });
        }
    }
    Ok(())
}

fn check_unique_plugins(raw: &RawConfig) -> Result<()> {
    let mut seen = HashSet::new();
    for name in raw.plugin_names() {
        if !seen.insert(name) {
            return Err(Error::DuplicatePlugin(name.to_string()));
        }
    }
    Ok(())
}

/// Non-destructive merge policy: keys present before a transform survive it.
fn preserves_keys(before: &ConfigDraft, after: &ConfigDraft) -> std::result::Result<(), String> {
    let removed = |field: &str, key: &str| format!("removed `{field}.{key}`");

    if let Some(key) = before.alias.keys().find(|k| !after.alias.contains_key(*k)) {
        return Err(removed("resolve.alias", key));
    }
    if let Some(key) = before
        .entry_points
        .keys()
        .find(|k| !after.entry_points.contains_key(*k))
    {
        return Err(removed("build.entryPoints", key));
    }
    if let Some(key) = before.define.keys().find(|k| !after.define.contains_key(*k)) {
        return Err(removed("define", key));
    }
    if let Some(ext) = before.extensions.iter().find(|e| !after.extensions.contains(*e)) {
        return Err(removed("resolve.extensions", ext));
    }
    if before.out_dir.is_some() && after.out_dir.is_none() {
        return Err("removed `build.outDir`".to_string());
    }
    Ok(())
}
