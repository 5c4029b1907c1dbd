//! Built-in plugin registrations

use crate::registry::PluginRegistration;
use crate::{DefinePlugin, LxrPlugin, VuePlugin};
use buildcfg_core::{Plugin, PluginError};
use serde_json::Value;
use std::sync::Arc;

/// Number of built-in plugins.
pub const BUILTIN_COUNT: usize = 3;

/// Returns all built-in plugin registrations.
pub fn builtin_registrations() -> Vec<PluginRegistration> {
    vec![
        PluginRegistration::new("vue", "Vue single-file components and framework flags", vue),
        PluginRegistration::new(
            "lxr",
            "Report bundle packaging: relative base and output directory",
            lxr,
        ),
        PluginRegistration::new("define", "Compile-time constants from options", define),
    ]
}

fn vue(options: &Value) -> Result<Arc<dyn Plugin>, PluginError> {
    Ok(Arc::new(VuePlugin::from_options(options)?))
}

fn lxr(options: &Value) -> Result<Arc<dyn Plugin>, PluginError> {
    Ok(Arc::new(LxrPlugin::from_options(options)?))
}

fn define(options: &Value) -> Result<Arc<dyn Plugin>, PluginError> {
    Ok(Arc::new(DefinePlugin::from_options(options)?))
}
