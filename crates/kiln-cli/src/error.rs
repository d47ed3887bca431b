//! Error handling for the Kiln CLI.
//!
//! Library errors from `kiln-config` are wrapped in [`CliError`]; `main`
//! renders them through miette via [`cli_error_to_miette`].

mod miette;

use std::path::PathBuf;
use thiserror::Error;

pub use self::miette::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Settings, base configuration, or assembly errors
    #[error("Configuration error: {0}")]
    Config(#[from] kiln_config::ConfigError),

    /// Base configuration file could not be read
    #[error("Failed to read base configuration {}: {source}", .path.display())]
    BaseUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
