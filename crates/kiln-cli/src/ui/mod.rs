//! Terminal status messages.
//!
//! Everything here writes to stderr; stdout is reserved for the resolved
//! configuration.

mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use messages::{error, info, success, warning};

static COLORS: AtomicBool = AtomicBool::new(true);

/// Decide once whether status messages are colored.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && crate::logger::should_use_colors();
    COLORS.store(enabled, Ordering::Relaxed);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}
