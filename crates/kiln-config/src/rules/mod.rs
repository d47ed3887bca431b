//! File-transformation rules and the registry they live in.
//!
//! A rule pairs a match pattern with an ordered chain of named transformer
//! steps. The transformers themselves belong to the host bundler; a rule only
//! says which one runs on which files, and with what options.

mod pattern;
mod rewrite;

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{ConfigError, Result};

pub use pattern::{Exclusion, MatchPattern};
pub use rewrite::{
    IMAGE_COMPRESSOR, IMAGES_RULE, RASTER_TEST, SPRITE_LOADER, SVG_RULE, SVG_TEST,
    VENDOR_DIR_PATTERN, VENDOR_SVG_TEST, rewrite,
};

/// One stage of a rule's transformer chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformerStep {
    pub name: String,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub options: Value,
}

impl TransformerStep {
    pub fn new(name: impl Into<String>, options: Value) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformRule {
    pub test: MatchPattern,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<Exclusion>,

    #[serde(default)]
    pub uses: Vec<TransformerStep>,
}

impl TransformRule {
    pub fn new(test: impl Into<MatchPattern>) -> Self {
        Self {
            test: test.into(),
            exclude: Vec::new(),
            uses: Vec::new(),
        }
    }

    pub fn with_step(mut self, step: TransformerStep) -> Self {
        self.uses.push(step);
        self
    }

    /// Whether a file (optionally carrying a `?query` suffix) is routed to this rule.
    pub fn claims(&self, file: &Path) -> Result<bool> {
        if !self.test.is_match(&pattern::normalize(file))? {
            return Ok(false);
        }
        for exclusion in &self.exclude {
            if exclusion.excludes(file)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Named rules, in the order the host declared them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleRegistry(IndexMap<String, TransformRule>);

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, rule: TransformRule) {
        self.0.insert(name.into(), rule);
    }

    pub fn get(&self, name: &str) -> Option<&TransformRule> {
        self.0.get(name)
    }

    /// Look up a rule that must exist in the base configuration.
    pub(crate) fn require_mut(&mut self, name: &str) -> Result<&mut TransformRule> {
        self.0.get_mut(name).ok_or_else(|| ConfigError::MissingRule {
            name: name.to_string(),
        })
    }

    /// Names of every rule that would claim `file`.
    ///
    /// A well-formed registry returns at most one name for any asset.
    pub fn route(&self, file: impl AsRef<Path>) -> Result<Vec<&str>> {
        let file = file.as_ref();
        let mut claimed = Vec::new();
        for (name, rule) in &self.0 {
            if rule.claims(file)? {
                claimed.push(name.as_str());
            }
        }
        Ok(claimed)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TransformRule)> {
        self.0.iter()
    }

    /// The asset rules a stock Vue CLI project starts with.
    pub fn vue_cli_defaults() -> Self {
        let asset_name = |dir: &str| format!("{dir}/[name].[hash:8].[ext]");
        let url_loader = |dir: &str| {
            TransformerStep::new(
                "url-loader",
                json!({
                    "limit": 4096,
                    "fallback": {
                        "loader": "file-loader",
                        "options": { "name": asset_name(dir) }
                    }
                }),
            )
        };

        let mut registry = Self::new();
        registry.insert(
            "vue",
            TransformRule::new(r"\.vue$").with_step(TransformerStep::new(
                "vue-loader",
                json!({ "compilerOptions": { "preserveWhitespace": false } }),
            )),
        );
        registry.insert(
            IMAGES_RULE,
            TransformRule::new(r"\.(png|jpe?g|gif|webp)(\?.*)?$").with_step(url_loader("img")),
        );
        registry.insert(
            SVG_RULE,
            TransformRule::new(r"\.(svg)(\?.*)?$").with_step(TransformerStep::new(
                "file-loader",
                json!({ "name": asset_name("img") }),
            )),
        );
        registry.insert(
            "media",
            TransformRule::new(r"\.(mp4|webm|ogg|mp3|wav|flac|aac)(\?.*)?$")
                .with_step(url_loader("media")),
        );
        registry.insert(
            "fonts",
            TransformRule::new(r"(?i)\.(woff2?|eot|ttf|otf)(\?.*)?$")
                .with_step(url_loader("fonts")),
        );
        registry
    }
}
