//! Top-level assembly: environment in, resolved bundler configuration out.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::alias::AliasTable;
use crate::base::BaseConfig;
use crate::cdn::CdnAssetList;
use crate::css::CssOptions;
use crate::dev::DevServerOverrides;
use crate::env::{BuildMode, EnvironmentFlags, classify};
use crate::error::{ConfigError, Result};
use crate::plugins::{HTML_PLUGIN, PluginList, PluginOptions, compose};
use crate::project::ProjectPaths;
use crate::rules::{RuleRegistry, rewrite};
use crate::settings::KilnSettings;
use crate::validation::{ConfigValidator, SchemaValidator};

/// Variables handed to the HTML template.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdn: Option<CdnAssetList>,

    pub dns_prefetch: Vec<String>,
}

/// The complete configuration handed back to the host bundler.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub mode: BuildMode,
    pub flags: EnvironmentFlags,
    pub public_path: String,
    pub alias: AliasTable,
    pub rules: RuleRegistry,
    pub plugins: PluginList,
    pub externals: IndexMap<String, String>,
    pub template: TemplateContext,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServerOverrides>,

    pub css: CssOptions,
}

impl ResolvedConfig {
    /// Serialize for the host.
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }
}

/// Classify `env` and assemble the configuration for it.
pub fn assemble(
    env: &HashMap<String, String>,
    settings: &KilnSettings,
    base: &BaseConfig,
    project: &ProjectPaths,
) -> Result<ResolvedConfig> {
    let flags = classify(env);
    assemble_with_flags(flags, settings, base, project)
}

/// Assemble with flags that were already classified.
pub fn assemble_with_flags(
    flags: EnvironmentFlags,
    settings: &KilnSettings,
    base: &BaseConfig,
    project: &ProjectPaths,
) -> Result<ResolvedConfig> {
    SchemaValidator.validate(settings)?;

    let mut alias = AliasTable::from_project(project);
    for (name, dir) in &settings.aliases {
        alias.set(project, name.clone(), dir.clone());
    }

    let rules = rewrite(&base.rules, &flags, project)?;
    let composition = compose(&flags, settings, project)?;

    let template = TemplateContext {
        cdn: composition.cdn,
        dns_prefetch: composition.dns_prefetch,
    };

    let mut plugins: PluginList = base.plugins.iter().cloned().collect();
    inject_template(&mut plugins, &template)?;
    plugins.extend(composition.plugins);

    info!(
        mode = ?flags.mode(),
        rules = rules.len(),
        plugins = plugins.len(),
        externals = composition.externals.len(),
        "assembled bundler configuration"
    );

    Ok(ResolvedConfig {
        mode: flags.mode(),
        flags,
        public_path: settings.public_path.clone(),
        alias,
        rules,
        plugins,
        externals: composition.externals,
        template,
        dev_server: composition.dev_server,
        css: settings.css.clone(),
    })
}

/// Write the template variables into the host's HTML plugin options.
///
/// Options may be an object, or a constructor argument list whose first entry
/// is the object. Absent options start from an empty object.
fn inject_template(plugins: &mut PluginList, template: &TemplateContext) -> Result<()> {
    let html = plugins
        .get_mut(HTML_PLUGIN)
        .ok_or_else(|| ConfigError::MissingPlugin {
            name: HTML_PLUGIN.to_string(),
        })?;

    let PluginOptions::Raw(raw) = &mut html.options else {
        return Err(ConfigError::InvalidValue(format!(
            "`{HTML_PLUGIN}` plugin options must be raw JSON"
        )));
    };
    if raw.is_null() {
        *raw = Value::Object(Map::new());
    }
    let options = match raw {
        Value::Object(map) => map,
        Value::Array(args) => match args.first_mut() {
            Some(Value::Object(map)) => map,
            _ => {
                return Err(ConfigError::InvalidValue(format!(
                    "`{HTML_PLUGIN}` plugin arguments must start with an options object"
                )));
            }
        },
        other => {
            return Err(ConfigError::InvalidValue(format!(
                "`{HTML_PLUGIN}` plugin options must be an object, got {other}"
            )));
        }
    };

    if let Some(cdn) = &template.cdn {
        options.insert(
            "cdn".to_string(),
            serde_json::to_value(cdn).map_err(|e| ConfigError::InvalidValue(e.to_string()))?,
        );
    }
    options.insert(
        "dnsPrefetch".to_string(),
        Value::from(template.dns_prefetch.clone()),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::{PluginSpec, PURGE_PLUGIN};
    use serde_json::json;
    use tempfile::TempDir;

    fn project() -> (TempDir, ProjectPaths) {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/App.vue"), "<template/>").unwrap();
        let project = ProjectPaths::new(dir.path());
        (dir, project)
    }

    fn base_with_html(options: Value, project: &ProjectPaths) -> BaseConfig {
        let mut base = BaseConfig::vue_cli_defaults(project);
        base.plugins = [PluginSpec::new(HTML_PLUGIN, PluginOptions::Raw(options))]
            .into_iter()
            .collect();
        base
    }

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn composed_plugins_follow_base_plugins() {
        let (_dir, project) = project();
        let base = BaseConfig::vue_cli_defaults(&project);
        let resolved = assemble(
            &env(&[("NODE_ENV", "production")]),
            &KilnSettings::default(),
            &base,
            &project,
        )
        .unwrap();

        let names = resolved.plugins.names();
        assert_eq!(names.len(), base.plugins.len() + 2);
        assert_eq!(names[base.plugins.len()], PURGE_PLUGIN);
        for (index, plugin) in resolved.plugins.iter().enumerate() {
            assert_eq!(plugin.order, index);
        }
    }

    #[test]
    fn html_plugin_receives_template_variables() {
        let (_dir, project) = project();
        let base = BaseConfig::vue_cli_defaults(&project);
        let resolved = assemble(
            &env(&[("NODE_ENV", "prod"), ("KILN_CDN", "1")]),
            &KilnSettings::default(),
            &base,
            &project,
        )
        .unwrap();

        let html = resolved.plugins.get(HTML_PLUGIN).unwrap();
        let PluginOptions::Raw(options) = &html.options else {
            panic!("html options should stay raw");
        };
        assert!(options["template"].is_string());
        assert_eq!(options["cdn"]["js"].as_array().unwrap().len(), 4);
        assert_eq!(options["dnsPrefetch"], json!(["http://sinacloud.net"]));
    }

    #[test]
    fn template_without_cdn_still_gets_prefetch() {
        let (_dir, project) = project();
        let base = BaseConfig::vue_cli_defaults(&project);
        let resolved = assemble(&HashMap::new(), &KilnSettings::default(), &base, &project)
            .unwrap();

        let value = resolved.to_value().unwrap();
        assert!(value["template"].get("cdn").is_none());
        assert_eq!(value["template"]["dnsPrefetch"], json!(["http://sinacloud.net"]));
        assert!(value.get("devServer").is_none());
    }

    #[test]
    fn missing_html_plugin_is_fatal() {
        let (_dir, project) = project();
        let mut base = BaseConfig::vue_cli_defaults(&project);
        base.plugins = [PluginSpec::new("define", PluginOptions::default())]
            .into_iter()
            .collect();

        let err = assemble(&HashMap::new(), &KilnSettings::default(), &base, &project)
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingPlugin { ref name } if name == HTML_PLUGIN));
    }

    #[test]
    fn html_argument_list_is_patched_in_place() {
        let (_dir, project) = project();
        let base = base_with_html(
            json!([{ "template": "public/index.html" }, "extra"]),
            &project,
        );
        let resolved = assemble(&HashMap::new(), &KilnSettings::default(), &base, &project)
            .unwrap();

        let PluginOptions::Raw(args) = &resolved.plugins.get(HTML_PLUGIN).unwrap().options else {
            panic!("html options should stay raw");
        };
        assert_eq!(args[0]["template"], "public/index.html");
        assert_eq!(args[0]["dnsPrefetch"], json!(["http://sinacloud.net"]));
        assert_eq!(args[1], "extra");
    }

    #[test]
    fn html_without_options_gets_an_object() {
        let (_dir, project) = project();
        let base = base_with_html(Value::Null, &project);
        let resolved = assemble(&HashMap::new(), &KilnSettings::default(), &base, &project)
            .unwrap();

        let value = serde_json::to_value(resolved.plugins.get(HTML_PLUGIN).unwrap()).unwrap();
        assert_eq!(value["options"], json!({ "dnsPrefetch": ["http://sinacloud.net"] }));
    }

    #[test]
    fn unusable_html_options_are_rejected() {
        let (_dir, project) = project();
        for options in [json!("public/index.html"), json!([]), json!(["public/index.html"])] {
            let base = base_with_html(options.clone(), &project);
            let err = assemble(&HashMap::new(), &KilnSettings::default(), &base, &project)
                .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue(_)), "{options}");
        }
    }

    #[test]
    fn settings_aliases_extend_defaults() {
        let (_dir, project) = project();
        let mut settings = KilnSettings::default();
        settings.aliases.insert("api".into(), "src/api".into());

        let resolved = assemble(
            &HashMap::new(),
            &settings,
            &BaseConfig::vue_cli_defaults(&project),
            &project,
        )
        .unwrap();
        assert_eq!(resolved.alias.get("api"), Some(&project.resolve("src/api")));
        assert!(resolved.alias.get("@").is_some());
    }
}
