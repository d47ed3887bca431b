//! Project settings.
//!
//! Settings change the static tables the assembler works from (aliases, CDN
//! tables, purge content). They never change which steps run; that is decided
//! by the environment flags alone.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Toml},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cdn::ExternalsConfig;
use crate::css::CssOptions;
use crate::error::{ConfigError, Result};
use crate::project::ProjectPaths;
use crate::purge::PurgeWhitelist;

/// Settings file looked up in the project root.
pub const SETTINGS_FILE: &str = "kiln.toml";
/// Prefix for environment overrides, e.g. `KILN_SETTINGS_PUBLIC_PATH`.
pub const SETTINGS_ENV_PREFIX: &str = "KILN_SETTINGS_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KilnSettings {
    /// Base URL the emitted assets are served from
    pub public_path: String,

    /// Extra or replacement aliases, relative to the project root
    pub aliases: IndexMap<String, PathBuf>,

    pub externals: ExternalsConfig,

    pub purge: PurgeSettings,

    pub css: CssOptions,
}

impl Default for KilnSettings {
    fn default() -> Self {
        Self {
            public_path: "./".to_string(),
            aliases: IndexMap::new(),
            externals: ExternalsConfig::default(),
            purge: PurgeSettings::default(),
            css: CssOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurgeSettings {
    /// Globs, relative to the project root, of markup scanned for used selectors
    pub content: Vec<String>,

    #[serde(flatten)]
    pub whitelist: PurgeWhitelist,
}

impl Default for PurgeSettings {
    fn default() -> Self {
        Self {
            content: vec!["./**/*.vue".to_string()],
            whitelist: PurgeWhitelist::default(),
        }
    }
}

impl KilnSettings {
    /// Load settings for a project.
    /// Priority: environment variables > settings file > defaults
    ///
    /// `explicit` must exist when given; otherwise `kiln.toml` in the project
    /// root is used if present.
    pub fn load(project: &ProjectPaths, explicit: Option<&Path>) -> Result<Self> {
        let file = match explicit {
            Some(path) => {
                let path = project.resolve(path);
                if !path.is_file() {
                    return Err(ConfigError::NotFound(path));
                }
                Some(path)
            }
            None => {
                let default_path = project.resolve(SETTINGS_FILE);
                default_path.is_file().then_some(default_path)
            }
        };

        let mut figment = Figment::new();
        if let Some(path) = &file {
            debug!(path = %path.display(), "loading settings file");
            figment = figment.merge(Toml::file(path));
        }
        figment = figment.merge(Env::prefixed(SETTINGS_ENV_PREFIX).split("__"));

        Self::extract(figment)
    }

    /// Extract settings from an already assembled figment.
    pub fn extract(figment: Figment) -> Result<Self> {
        figment
            .extract()
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }
}
