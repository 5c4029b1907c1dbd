//! Error types for buildcfg-core

use crate::plugin::PluginError;

/// Result type for buildcfg-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or resolving a configuration
///
/// Every variant is terminal for the resolution call that produced it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A field has the wrong semantic type
    #[error("Invalid config at `{field}`: expected {expected}")]
    InvalidShape { field: String, expected: String },

    /// A path could not be expanded or does not exist
    #[error("Cannot resolve `{field}` ({path}): {reason}")]
    PathResolutionFailure {
        field: String,
        path: String,
        reason: String,
    },

    /// Two plugins share a name
    #[error("Duplicate plugin name: {0}")]
    DuplicatePlugin(String),

    /// A mapping declares the same key twice
    #[error("Duplicate key `{key}` in `{field}`")]
    DuplicateKey { field: String, key: String },

    /// A plugin's transform failed or violated the merge policy
    #[error("Plugin `{plugin}` failed: {reason}")]
    PluginTransformFailure { plugin: String, reason: String },

    /// A config file references a plugin the source does not know
    #[error("Unknown plugin: {0}")]
    UnknownPlugin(String),

    /// A plugin rejected the options it was instantiated with
    #[error("Invalid options for plugin `{plugin}`: {source}")]
    PluginOptions {
        plugin: String,
        #[source]
        source: PluginError,
    },

    /// Filesystem error from buildcfg-fs
    #[error(transparent)]
    Fs(#[from] buildcfg_fs::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn shape(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidShape {
            field: field.into(),
            expected: expected.into(),
        }
    }

    pub(crate) fn path(
        field: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::PathResolutionFailure {
            field: field.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// The configuration field the error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidShape { field, .. }
            | Self::PathResolutionFailure { field, .. }
            | Self::DuplicateKey { field, .. } => Some(field.as_str()),
            Self::DuplicatePlugin(_)
            | Self::PluginTransformFailure { .. }
            | Self::UnknownPlugin(_)
            | Self::PluginOptions { .. } => Some("plugins"),
            Self::Fs(_) | Self::Json(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_failure_display_names_field_and_path() {
        let err = Error::path("build.entryPoints.app", "/proj/missing.html", "file not found");
        let display = err.to_string();
        assert!(display.contains("build.entryPoints.app"), "got: {}", display);
        assert!(display.contains("/proj/missing.html"), "got: {}", display);
        assert_eq!(err.field(), Some("build.entryPoints.app"));
    }

    #[test]
    fn plugin_errors_point_at_plugins_field() {
        assert_eq!(Error::DuplicatePlugin("p".into()).field(), Some("plugins"));
    }
}
