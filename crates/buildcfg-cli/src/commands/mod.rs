//! Command implementations for buildcfg-cli

pub mod check;
pub mod plugins;
pub mod resolve;

pub use check::run_check;
pub use plugins::run_plugins;
pub use resolve::run_resolve;

use std::path::Path;

use buildcfg_core::{
    ConfigLoader, ConfigResolver, LoadedConfig, PluginFailurePolicy, ResolveOptions,
    ResolvedConfig,
};
use buildcfg_plugins::PluginRegistry;

use crate::cli::SourceArgs;
use crate::error::{CliError, Result};

/// Load the config named by `source` (or discovered in `cwd`) and resolve it.
///
/// Environment variables of the current process feed `${NAME}` expansion.
pub(crate) fn load_and_resolve(
    cwd: &Path,
    source: &SourceArgs,
    plugin_failure: PluginFailurePolicy,
) -> Result<(LoadedConfig, ResolvedConfig)> {
    let registry = PluginRegistry::with_builtins();
    let loader = ConfigLoader::new(&registry);

    let loaded = match &source.config {
        Some(path) => {
            let path = cwd.join(path);
            if path.is_dir() {
                return Err(CliError::user(format!(
                    "{} is a directory; pass a config file or omit --config",
                    path.display()
                )));
            }
            loader.load(path)?
        }
        None => loader.discover(cwd)?,
    };
    tracing::debug!(path = %loaded.path, plugins = ?loaded.raw.plugin_names(), "Config loaded");

    let mut options = ResolveOptions::new()
        .with_plugin_failure(plugin_failure)
        .with_env(std::env::vars());
    if source.lazy {
        options = options.lazy();
    }

    let resolved = ConfigResolver::new(loaded.base_dir.clone())
        .with_options(options)
        .resolve(loaded.raw.clone())?;
    Ok((loaded, resolved))
}
