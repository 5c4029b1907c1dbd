//! Plugin capability trait
//!
//! A plugin is any value with a name and a transform over [`ConfigDraft`].
//! The resolver is polymorphic over implementers and never enumerates them.

use crate::Result;
use crate::config::ConfigDraft;
use serde_json::Value;
use std::sync::Arc;

/// Failure reported by a plugin
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PluginError {
    #[error("{0}")]
    Failed(String),

    #[error("invalid option `{option}`: expected {expected}")]
    InvalidOption { option: String, expected: String },
}

impl PluginError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    pub fn invalid_option(option: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            expected: expected.into(),
        }
    }
}

/// Core trait for configuration plugins
///
/// `transform` receives the configuration produced by the previous plugin
/// (paths already absolute) and returns the next one. It may add, override
/// or annotate values, but keys that existed before the call must still
/// exist afterwards.
pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;
    fn transform(&self, config: ConfigDraft) -> std::result::Result<ConfigDraft, PluginError>;
}

/// Materializes plugins referenced by name in a config document.
pub trait PluginSource {
    /// Build the plugin called `name` with its document `options`
    /// (`Value::Null` when none were given).
    fn instantiate(&self, name: &str, options: &Value) -> Result<Arc<dyn Plugin>>;
}
