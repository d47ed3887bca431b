//! Check command implementation.
//!
//! Validates settings and the base configuration without printing anything
//! to stdout.

use kiln_config::settings::SETTINGS_FILE;
use kiln_config::{ConfigValidator, EnvironmentFlags, SchemaValidator, assemble_with_flags};

use crate::cli::CheckArgs;
use crate::commands::utils::load_project;
use crate::error::Result;
use crate::ui;

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Load `kiln.toml` (or `--config`) and validate it
/// 2. Load the base configuration
/// 3. Assemble once for production with CDN and gzip, and once for
///    development, so every rule and plugin the rewrites touch is present
pub fn execute(args: CheckArgs) -> Result<()> {
    ui::info("Checking configuration...");

    let project = load_project(&args.project)?;
    if args.project.config.is_none() && !project.paths.resolve(SETTINGS_FILE).is_file() {
        ui::warning(&format!("No {SETTINGS_FILE} found, using defaults"));
    }

    SchemaValidator.validate(&project.settings)?;
    ui::success("Settings are valid");

    let production = EnvironmentFlags {
        is_production: true,
        cdn_enabled: true,
        gzip_enabled: true,
        ..EnvironmentFlags::default()
    };
    let development = EnvironmentFlags {
        is_development: true,
        ..EnvironmentFlags::default()
    };

    for (label, flags) in [("production", production), ("development", development)] {
        if let Err(err) = assemble_with_flags(flags, &project.settings, &project.base, &project.paths)
        {
            ui::error(&format!("{label} build cannot be assembled"));
            return Err(err.into());
        }
        ui::success(&format!("  {label} build assembles"));
    }

    ui::success("Configuration is valid!");
    Ok(())
}
