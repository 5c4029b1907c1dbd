//! Plugin-composable build configuration resolver
//!
//! This crate turns a user-authored [`RawConfig`] into a frozen
//! [`ResolvedConfig`] that a build engine consumes:
//!
//! - **Shape validation**: documents and builder input are checked before
//!   anything touches the filesystem
//! - **Path normalization**: aliases, entry points, the root and the output
//!   directory become absolute, lexically normalized paths
//! - **Plugins**: an ordered list of [`Plugin`] transforms is applied under a
//!   non-destructive merge policy
//!
//! # Architecture
//!
//! ```text
//!        buildcfg-cli
//!             |
//!      buildcfg-plugins
//!             |
//!       buildcfg-core
//!             |
//!        buildcfg-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use buildcfg_core::{ConfigResolver, RawConfig};
//!
//! let raw = RawConfig::new()
//!     .with_alias("@", "./src")
//!     .with_entry_point("app", "./index.html");
//! let resolved = ConfigResolver::new("/proj").resolve(raw)?;
//! assert_eq!(resolved.alias()["@"].as_str(), "/proj/src");
//! # Ok::<(), buildcfg_core::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod plugin;

pub use config::{
    ConfigDraft, ConfigLoader, ConfigResolver, LoadedConfig, PathCheck, PluginFailurePolicy,
    RawConfig, ResolveOptions, ResolvedConfig, resolve,
};
pub use error::{Error, Result};
pub use plugin::{Plugin, PluginError, PluginSource};
