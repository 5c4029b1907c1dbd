//! The `resolve` command

use std::path::Path;

use buildcfg_core::PluginFailurePolicy;
use buildcfg_fs::{ConfigStore, NormalizedPath};
use colored::Colorize;

use super::load_and_resolve;
use crate::cli::SourceArgs;
use crate::error::Result;

/// Resolve the configuration and print it, or write it to `output`.
pub fn run_resolve(
    cwd: &Path,
    source: &SourceArgs,
    skip_failing_plugins: bool,
    output: Option<&Path>,
) -> Result<()> {
    let policy = if skip_failing_plugins {
        PluginFailurePolicy::Skip
    } else {
        PluginFailurePolicy::Fail
    };
    let (_, resolved) = load_and_resolve(cwd, source, policy)?;

    match output {
        Some(output) => {
            let target = NormalizedPath::new(cwd.join(output));
            ConfigStore::new().save(&target, &resolved)?;
            eprintln!("{} Wrote {}", "OK".green().bold(), target.as_str().cyan());
        }
        None => println!("{}", resolved.to_json_pretty()?),
    }
    Ok(())
}
