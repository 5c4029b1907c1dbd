//! The `check` command

use std::path::Path;

use buildcfg_core::PluginFailurePolicy;
use colored::Colorize;

use super::load_and_resolve;
use crate::cli::SourceArgs;
use crate::error::Result;

/// Resolve the configuration strictly and print a short summary.
pub fn run_check(cwd: &Path, source: &SourceArgs) -> Result<()> {
    let (loaded, resolved) = load_and_resolve(cwd, source, PluginFailurePolicy::Fail)?;

    println!("{} {}", "Config:".bold(), loaded.path.as_str().cyan());
    println!("  {:<13} {}", "root", resolved.root());
    println!("  {:<13} {}", "base", resolved.base());
    println!("  {:<13} {}", "plugins", resolved.plugins().join(", "));
    println!("  {:<13} {}", "aliases", resolved.alias().len());
    println!("  {:<13} {}", "entry points", resolved.entry_points().len());
    if let Some(out_dir) = resolved.out_dir() {
        println!("  {:<13} {}", "outDir", out_dir);
    }
    println!("  {:<13} {}", "defines", resolved.define().len());
    println!();
    println!(
        "{} {}",
        "OK".green().bold(),
        resolved.fingerprint()?.dimmed()
    );
    Ok(())
}
