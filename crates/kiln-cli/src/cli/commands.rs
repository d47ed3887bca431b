use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Available Kiln subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved configuration for this environment
    ///
    /// Reads NODE_ENV, KILN_CDN, KILN_GZIP and VUE_APP_ENV from the
    /// environment; flags below override them for this invocation only.
    Resolve(ResolveArgs),

    /// Validate settings and the host base configuration
    Check(CheckArgs),
}

/// Where the project and its settings live
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project root; aliases and asset paths are resolved against it
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Settings file (defaults to kiln.toml in the project root)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Host base configuration exported as JSON (defaults to stock Vue CLI rules)
    #[arg(long, value_name = "FILE")]
    pub base: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Build mode, overriding NODE_ENV (production, prod, development, dev)
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Load runtime dependencies from the CDN (sets KILN_CDN)
    #[arg(long)]
    pub cdn: bool,

    /// Emit gzip copies of large assets (sets KILN_GZIP)
    #[arg(long)]
    pub gzip: bool,

    /// Add the bundle analyzer (sets VUE_APP_ENV=analyz)
    #[arg(long)]
    pub analyze: bool,

    /// Print single-line JSON
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}
