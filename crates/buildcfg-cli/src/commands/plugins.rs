//! The `plugins` command

use buildcfg_plugins::PluginRegistry;
use colored::Colorize;

use crate::error::Result;

/// List the built-in plugins.
pub fn run_plugins(json: bool) -> Result<()> {
    let registry = PluginRegistry::with_builtins();

    if json {
        let entries: Vec<_> = registry
            .registrations()
            .into_iter()
            .map(|reg| serde_json::json!({ "name": reg.name, "description": reg.description }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("{}", "Available Plugins".bold());
    println!();
    for reg in registry.registrations() {
        println!("  {:<10} {}", reg.name.green(), reg.description);
    }
    println!();
    println!("{} {} plugins available.", "Total:".dimmed(), registry.len());
    Ok(())
}
