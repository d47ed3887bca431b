//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use kiln_config::ConfigError;
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        _ => miette::miette!("{}", err),
    }
}

fn config_error_to_miette(err: ConfigError) -> Report {
    let prefix = if err.is_integrity_error() {
        "Build aborted"
    } else {
        "Configuration error"
    };
    match err.hint().map(str::to_string) {
        Some(hint) => miette::miette!(help = hint, "{}: {}", prefix, err),
        None => miette::miette!("{}: {}", prefix, err),
    }
}
