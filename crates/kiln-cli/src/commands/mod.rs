//! Command implementations for the Kiln CLI.
//!
//! - [`resolve`] - Print the resolved configuration for one environment
//! - [`check`] - Validate settings and the host base configuration
//!
//! Each command provides an `execute` function that takes the parsed
//! arguments and returns a Result.

pub mod check;
pub mod resolve;
pub(crate) mod utils;

pub use check::execute as check_execute;
pub use resolve::execute as resolve_execute;
