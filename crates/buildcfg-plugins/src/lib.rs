//! Plugin registry and built-in plugins for buildcfg.
//!
//! The [`PluginRegistry`] maps names used in config files to plugin
//! factories and implements [`buildcfg_core::PluginSource`].

mod builtins;
pub mod define;
pub mod lxr;
mod options;
pub mod registry;
pub mod vue;

pub use builtins::BUILTIN_COUNT;
pub use define::DefinePlugin;
pub use lxr::LxrPlugin;
pub use registry::{PluginFactory, PluginRegistration, PluginRegistry};
pub use vue::VuePlugin;
