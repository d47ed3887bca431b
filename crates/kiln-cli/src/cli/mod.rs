//! Command-line interface definition for Kiln.
//!
//! # Command Structure
//!
//! - `kiln resolve` - Print the resolved bundler configuration
//! - `kiln check` - Validate `kiln.toml` and the host base configuration

mod commands;

use clap::Parser;

pub use commands::{CheckArgs, Command, ProjectArgs, ResolveArgs};

/// Kiln - environment-specific bundler configuration
#[derive(Parser, Debug)]
#[command(
    name = "kiln",
    version,
    about = "Resolve environment-specific bundler configuration",
    long_about = "Kiln turns the build environment (NODE_ENV, KILN_CDN, KILN_GZIP, VUE_APP_ENV)\n\
                  into a fully resolved bundler configuration: aliases, asset rules,\n\
                  optimization plugins, CDN externals and dev-server overrides."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
