//! Settings validation
//!
//! Catches tables that would assemble into a broken build before any rule or
//! plugin is touched.

use crate::error::{ConfigError, Result};
use crate::settings::KilnSettings;

/// Trait for pluggable settings validation strategies
pub trait ConfigValidator {
    fn validate(&self, settings: &KilnSettings) -> Result<()>;
}

/// Structural checks that need no filesystem access.
///
/// # Example
///
/// ```
/// use kiln_config::{ConfigValidator, KilnSettings, SchemaValidator};
///
/// SchemaValidator.validate(&KilnSettings::default()).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, settings: &KilnSettings) -> Result<()> {
        let externals = &settings.externals;

        for (name, global) in &externals.externals {
            if name.trim().is_empty() || global.trim().is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: "externals entries need both an import name and a global".to_string(),
                    hint: Some(format!("Fix the entry `{name}` = `{global}`")),
                });
            }
        }

        let build = &externals.cdn.build;
        if build.js.len() != externals.externals.len() {
            return Err(ConfigError::SchemaValidation {
                message: format!(
                    "{} externalized dependencies but {} production CDN scripts",
                    externals.externals.len(),
                    build.js.len()
                ),
                hint: Some(
                    "Every external needs exactly one script in externals.cdn.build.js".to_string(),
                ),
            });
        }

        let lists = [
            &build.js,
            &build.css,
            &externals.cdn.dev.js,
            &externals.cdn.dev.css,
            &externals.dns_prefetch,
        ];
        if lists.iter().flat_map(|list| list.iter()).any(|url| url.trim().is_empty()) {
            return Err(ConfigError::SchemaValidation {
                message: "CDN and prefetch URLs cannot be empty".to_string(),
                hint: Some("Remove empty strings from the externals tables".to_string()),
            });
        }

        if settings.purge.content.is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: "purge content globs cannot be empty".to_string(),
                hint: Some(
                    "Without markup to scan every selector would be purged in production"
                        .to_string(),
                ),
            });
        }

        let whitelist = &settings.purge.whitelist;
        for pattern in whitelist
            .whitelist_patterns
            .iter()
            .chain(&whitelist.whitelist_patterns_children)
        {
            pattern.compile()?;
        }

        Ok(())
    }
}
