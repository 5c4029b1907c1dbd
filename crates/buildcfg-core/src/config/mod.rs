//! Configuration model and resolution
//!
//! # Lifecycle
//!
//! 1. A [`RawConfig`] is built in code or loaded from
//!    `buildcfg.{toml,json,yaml,yml}` by the [`ConfigLoader`]
//! 2. [`ConfigResolver::resolve`] validates it, normalizes paths and runs the
//!    plugins over a [`ConfigDraft`]
//! 3. The draft is frozen into a [`ResolvedConfig`]
//!
//! # File shape
//!
//! ```toml
//! plugins = ["vue", { name = "define", options = { MODE = "report" } }]
//!
//! [resolve.alias]
//! "@" = "./src"
//!
//! [build.entryPoints]
//! app = "./index.html"
//! ```

mod document;
mod draft;
mod env;
mod loader;
mod raw;
mod resolved;
mod resolver;

pub use draft::ConfigDraft;
pub use loader::{ConfigLoader, LoadedConfig};
pub use raw::RawConfig;
pub use resolved::ResolvedConfig;
pub use resolver::{ConfigResolver, PathCheck, PluginFailurePolicy, ResolveOptions, resolve};
