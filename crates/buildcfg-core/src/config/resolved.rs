//! The final, frozen configuration

use super::ConfigDraft;
use crate::Result;
use buildcfg_fs::NormalizedPath;
use buildcfg_fs::checksum::compute_content_checksum;
use serde::Serialize;
use std::collections::BTreeMap;

/// The resolved configuration consumed by a build engine.
///
/// Every path is absolute and normalized, plugin transforms have already
/// been applied, and the value exposes read accessors only. Maps are
/// ordered so that serialization and [`fingerprint`](Self::fingerprint)
/// are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    root: NormalizedPath,
    base: String,
    plugins: Vec<String>,
    resolve: ResolveSection,
    build: BuildSection,
    define: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveSection {
    alias: BTreeMap<String, NormalizedPath>,
    extensions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct BuildSection {
    entry_points: BTreeMap<String, NormalizedPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    out_dir: Option<NormalizedPath>,
}

impl ResolvedConfig {
    /// Freeze a fully normalized draft.
    pub(crate) fn freeze(draft: ConfigDraft, plugins: Vec<String>) -> Self {
        Self {
            root: draft.root,
            base: draft.base,
            plugins,
            resolve: ResolveSection {
                alias: draft.alias,
                extensions: draft.extensions,
            },
            build: BuildSection {
                entry_points: draft.entry_points,
                out_dir: draft.out_dir,
            },
            define: draft.define,
        }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Names of the plugins whose transforms were applied, in order.
    pub fn plugins(&self) -> &[String] {
        &self.plugins
    }

    pub fn alias(&self) -> &BTreeMap<String, NormalizedPath> {
        &self.resolve.alias
    }

    pub fn extensions(&self) -> &[String] {
        &self.resolve.extensions
    }

    pub fn entry_points(&self) -> &BTreeMap<String, NormalizedPath> {
        &self.build.entry_points
    }

    pub fn out_dir(&self) -> Option<&NormalizedPath> {
        self.build.out_dir.as_ref()
    }

    pub fn define(&self) -> &BTreeMap<String, String> {
        &self.define
    }

    /// Pretty JSON rendering.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Content checksum (`sha256:<hex>`) of the canonical JSON form.
    ///
    /// Two resolutions of the same inputs yield the same fingerprint.
    pub fn fingerprint(&self) -> Result<String> {
        let canonical = serde_json::to_string(self)?;
        Ok(compute_content_checksum(&canonical))
    }
}
