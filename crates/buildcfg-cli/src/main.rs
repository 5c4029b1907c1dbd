//! buildcfg CLI
//!
//! Loads a `buildcfg.{toml,json,yaml}` file, runs its plugins and prints
//! the resolved configuration.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        if let Some(field) = e.field() {
            eprintln!("  {} {}", "field:".dimmed(), field.yellow());
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} build configuration resolver", "buildcfg".green().bold());
            println!();
            println!("Run {} for available commands.", "buildcfg --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    let cwd = std::env::current_dir()?;
    match cmd {
        Commands::Resolve {
            source,
            skip_failing_plugins,
            output,
        } => commands::run_resolve(&cwd, &source, skip_failing_plugins, output.as_deref()),
        Commands::Check { source } => commands::run_check(&cwd, &source),
        Commands::Plugins { json } => commands::run_plugins(json),
    }
}
