//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// buildcfg - Resolve plugin-composable build configurations
#[derive(Parser, Debug)]
#[command(name = "buildcfg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Resolve the configuration and print it as JSON
    ///
    /// Examples:
    ///   buildcfg resolve                       # Discover buildcfg.* in the current directory
    ///   buildcfg resolve -c web/buildcfg.yaml  # Use a specific file
    ///   buildcfg resolve --output resolved.json
    Resolve {
        #[command(flatten)]
        source: SourceArgs,

        /// Continue past failing plugins instead of aborting
        #[arg(long)]
        skip_failing_plugins: bool,

        /// Write the resolved configuration to a file (format from extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate the configuration and print a summary
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// List available plugins
    Plugins {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

/// Where the configuration comes from and how paths are checked
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SourceArgs {
    /// Config file to load instead of discovering buildcfg.* in the current directory
    #[arg(short, long, env = "BUILDCFG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Do not require aliases and entry points to exist
    #[arg(long)]
    pub lazy: bool,
}
