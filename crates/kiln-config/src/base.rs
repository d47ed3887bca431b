//! The host bundler's default configuration.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{ConfigError, Result};
use crate::plugins::{HTML_PLUGIN, PluginList, PluginOptions, PluginSpec};
use crate::project::ProjectPaths;
use crate::rules::RuleRegistry;

/// Rules and plugins the host starts from, before this build's rewrites.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseConfig {
    #[serde(default)]
    pub rules: RuleRegistry,

    #[serde(default)]
    pub plugins: PluginList,
}

impl BaseConfig {
    /// Parse a base configuration exported by the host as JSON.
    ///
    /// # Example
    ///
    /// ```
    /// use kiln_config::BaseConfig;
    /// use serde_json::json;
    ///
    /// let base = BaseConfig::from_value(json!({
    ///     "rules": { "svg": { "test": "\\.svg$", "uses": [] } },
    ///     "plugins": [{ "name": "html" }]
    /// }))
    /// .unwrap();
    /// assert!(base.rules.get("svg").is_some());
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }

    /// Defaults of a stock Vue CLI project.
    pub fn vue_cli_defaults(project: &ProjectPaths) -> Self {
        let template = project.resolve("public/index.html");
        let plugins = [
            PluginSpec::new("vue-loader", PluginOptions::default()),
            PluginSpec::new("define", PluginOptions::default()),
            PluginSpec::new("case-sensitive-paths", PluginOptions::default()),
            PluginSpec::new(
                HTML_PLUGIN,
                PluginOptions::Raw(json!({ "template": template })),
            ),
            PluginSpec::new(
                "copy",
                PluginOptions::Raw(json!([{
                    "from": project.resolve("public"),
                    "to": project.resolve("dist"),
                    "ignore": [".DS_Store"]
                }])),
            ),
        ]
        .into_iter()
        .collect();

        Self {
            rules: RuleRegistry::vue_cli_defaults(),
            plugins,
        }
    }
}
