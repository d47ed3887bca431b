//! Environment classification.
//!
//! Turns the raw, free-form environment variable set into the handful of flags
//! every later step reads. Classification never fails: anything it does not
//! recognize is treated as "off".

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Build mode variable, e.g. `production` or `dev`.
pub const MODE_VAR: &str = "NODE_ENV";
/// Application environment; `analyz` turns on bundle analysis.
pub const APP_ENV_VAR: &str = "VUE_APP_ENV";
/// Load runtime dependencies from a CDN in production.
pub const CDN_VAR: &str = "KILN_CDN";
/// Emit gzip copies of large text assets in production.
pub const GZIP_VAR: &str = "KILN_GZIP";

const PRODUCTION_MODES: &[&str] = &["production", "prod"];
const DEVELOPMENT_MODES: &[&str] = &["development", "dev"];
const ANALYSIS_VALUES: &[&str] = &["analyz", "analyze", "analysis"];
const TRUTHY_VALUES: &[&str] = &["1", "true", "yes", "on"];

/// Build mode resolved from [`MODE_VAR`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Production,
    Development,
    /// Unset, misspelled, or something like `test`
    #[default]
    Unrecognized,
}

impl BuildMode {
    pub fn parse(raw: &str) -> Self {
        let value = raw.trim().to_ascii_lowercase();
        if PRODUCTION_MODES.contains(&value.as_str()) {
            BuildMode::Production
        } else if DEVELOPMENT_MODES.contains(&value.as_str()) {
            BuildMode::Development
        } else {
            BuildMode::Unrecognized
        }
    }
}

/// Flags computed once per build and passed explicitly to every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentFlags {
    pub is_production: bool,
    pub is_development: bool,
    pub cdn_enabled: bool,
    pub gzip_enabled: bool,
    pub analysis_enabled: bool,
}

impl EnvironmentFlags {
    /// Snapshot the process environment and classify it.
    pub fn from_process_env() -> Self {
        let raw: HashMap<String, String> = std::env::vars().collect();
        classify(&raw)
    }

    pub fn mode(&self) -> BuildMode {
        if self.is_production {
            BuildMode::Production
        } else if self.is_development {
            BuildMode::Development
        } else {
            BuildMode::Unrecognized
        }
    }

    /// Externals only apply to production builds with the CDN switched on.
    pub fn externalize(&self) -> bool {
        self.is_production && self.cdn_enabled
    }
}

/// Classify a raw environment map into [`EnvironmentFlags`].
pub fn classify(raw: &HashMap<String, String>) -> EnvironmentFlags {
    let mode = raw
        .get(MODE_VAR)
        .map(String::as_str)
        .map(BuildMode::parse)
        .unwrap_or_default();

    let analysis_enabled = raw
        .get(APP_ENV_VAR)
        .map(|value| ANALYSIS_VALUES.contains(&value.trim().to_ascii_lowercase().as_str()))
        .unwrap_or(false);

    EnvironmentFlags {
        is_production: mode == BuildMode::Production,
        is_development: mode == BuildMode::Development,
        cdn_enabled: is_truthy(raw.get(CDN_VAR)),
        gzip_enabled: is_truthy(raw.get(GZIP_VAR)),
        analysis_enabled,
    }
}

fn is_truthy(value: Option<&String>) -> bool {
    value
        .map(|v| TRUTHY_VALUES.contains(&v.trim().to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
