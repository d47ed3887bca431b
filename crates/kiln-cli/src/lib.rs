//! Kiln CLI - resolve environment-specific bundler configuration.
//!
//! The binary reads the ambient environment, loads `kiln.toml`, and prints
//! the configuration [`kiln_config::assemble`] produces as JSON on stdout.
//!
//! - [`cli`] - Argument definitions
//! - [`commands`] - `resolve` and `check`
//! - [`error`] - Error types and diagnostic rendering
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Status messages on stderr

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
