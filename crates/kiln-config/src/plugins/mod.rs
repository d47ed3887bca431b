//! Plugin composition.
//!
//! Decides which build plugins are appended for this build and in what order,
//! which imports are externalized, and what the HTML template receives.

mod options;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::cdn::CdnAssetList;
use crate::dev::DevServerOverrides;
use crate::env::EnvironmentFlags;
use crate::error::{ConfigError, Result};
use crate::project::ProjectPaths;
use crate::purge::resolve_content;
use crate::settings::KilnSettings;

pub use options::{
    COMPRESSIBLE_TEST, COMPRESSION_MIN_RATIO, COMPRESSION_THRESHOLD, CompressOptions,
    CompressionOptions, ExtractorSpec, MinifyOptions, PurgeOptions, UglifyOptions,
};

pub const ANALYZER_PLUGIN: &str = "webpack-bundle-analyzer";
pub const PURGE_PLUGIN: &str = "purgecss-webpack-plugin";
pub const MINIFY_PLUGIN: &str = "uglifyjs-webpack-plugin";
pub const COMPRESSION_PLUGIN: &str = "compression-webpack-plugin";
pub const HTML_PLUGIN: &str = "html";

/// Constructor options for a plugin.
///
/// Plugins this crate adds carry typed options; plugins that come from the
/// host's base configuration are passed through as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PluginOptions {
    Purge(PurgeOptions),
    Minify(MinifyOptions),
    Compression(CompressionOptions),
    Raw(Value),
}

impl<'de> Deserialize<'de> for PluginOptions {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(PluginOptions::Raw)
    }
}

impl Default for PluginOptions {
    fn default() -> Self {
        PluginOptions::Raw(Value::Null)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginSpec {
    pub name: String,

    #[serde(default)]
    pub options: PluginOptions,

    /// Position in the final plugin list
    #[serde(default)]
    pub order: usize,
}

impl PluginSpec {
    pub fn new(name: impl Into<String>, options: PluginOptions) -> Self {
        Self {
            name: name.into(),
            options,
            order: 0,
        }
    }
}

/// Ordered plugin list; `order` always equals the index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginList(Vec<PluginSpec>);

impl PluginList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mut plugin: PluginSpec) {
        plugin.order = self.0.len();
        debug!(plugin = %plugin.name, order = plugin.order, "appended plugin");
        self.0.push(plugin);
    }

    pub fn extend(&mut self, plugins: PluginList) {
        for plugin in plugins.0 {
            self.push(plugin);
        }
    }

    pub fn get(&self, name: &str) -> Option<&PluginSpec> {
        self.0.iter().find(|p| p.name == name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut PluginSpec> {
        self.0.iter_mut().find(|p| p.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PluginSpec> {
        self.0.iter()
    }
}

impl FromIterator<PluginSpec> for PluginList {
    fn from_iter<I: IntoIterator<Item = PluginSpec>>(iter: I) -> Self {
        let mut list = PluginList::new();
        for plugin in iter {
            list.push(plugin);
        }
        list
    }
}

/// Everything the composer decides for one build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composition {
    pub plugins: PluginList,
    pub externals: IndexMap<String, String>,
    /// `None` when the template gets no CDN list at all (production without
    /// CDN, or an unrecognized mode)
    pub cdn: Option<CdnAssetList>,
    pub dns_prefetch: Vec<String>,
    pub dev_server: Option<DevServerOverrides>,
}

/// Compose plugins, externals and template data for this build.
///
/// Production builds fail when the purge content globs cannot be resolved or
/// match no files, since the purge step would then strip every selector.
pub fn compose(
    flags: &EnvironmentFlags,
    settings: &KilnSettings,
    project: &ProjectPaths,
) -> Result<Composition> {
    let mut composition = Composition {
        dns_prefetch: settings.externals.dns_prefetch.clone(),
        ..Composition::default()
    };

    if flags.analysis_enabled {
        composition
            .plugins
            .push(PluginSpec::new(ANALYZER_PLUGIN, PluginOptions::default()));
    }

    if flags.is_production {
        let paths = resolve_content(project.root(), &settings.purge.content)?;
        if paths.is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: format!(
                    "purge content matched no files: {:?} under {}",
                    settings.purge.content,
                    project.root().display()
                ),
                hint: Some(
                    "Point purge.content at the project's .vue/.html sources".to_string(),
                ),
            });
        }
        debug!(files = paths.len(), "resolved purge content");

        composition.plugins.push(PluginSpec::new(
            PURGE_PLUGIN,
            PluginOptions::Purge(PurgeOptions {
                paths,
                extractors: vec![ExtractorSpec::default()],
                whitelist: settings.purge.whitelist.clone(),
            }),
        ));
        composition.plugins.push(PluginSpec::new(
            MINIFY_PLUGIN,
            PluginOptions::Minify(MinifyOptions::default()),
        ));
        if flags.gzip_enabled {
            composition.plugins.push(PluginSpec::new(
                COMPRESSION_PLUGIN,
                PluginOptions::Compression(CompressionOptions::default()),
            ));
        }
    }

    if flags.externalize() {
        composition.externals = settings.externals.externals.clone();
        composition.cdn = Some(settings.externals.cdn.build.clone());
    } else if flags.is_development {
        composition.cdn = Some(settings.externals.cdn.dev.clone());
        composition.dev_server = Some(DevServerOverrides::for_local_development());
    }

    Ok(composition)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(production: bool, development: bool, cdn: bool, gzip: bool) -> EnvironmentFlags {
        EnvironmentFlags {
            is_production: production,
            is_development: development,
            cdn_enabled: cdn,
            gzip_enabled: gzip,
            analysis_enabled: false,
        }
    }

    fn project() -> (tempfile::TempDir, ProjectPaths) {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/App.vue"), "<template/>").unwrap();
        let project = ProjectPaths::new(dir.path());
        (dir, project)
    }

    fn run(flags: EnvironmentFlags) -> Composition {
        let (_dir, project) = project();
        compose(&flags, &KilnSettings::default(), &project).unwrap()
    }

    #[test]
    fn production_with_cdn_and_gzip() {
        let composition = run(flags(true, false, true, true));

        assert_eq!(
            composition.plugins.names(),
            vec![PURGE_PLUGIN, MINIFY_PLUGIN, COMPRESSION_PLUGIN]
        );
        let expected: IndexMap<String, String> = [
            ("vue", "Vue"),
            ("vue-router", "VueRouter"),
            ("vuex", "Vuex"),
            ("axios", "axios"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(composition.externals, expected);

        let cdn = composition.cdn.unwrap();
        assert_eq!(cdn.js.len(), composition.externals.len());
        assert!(cdn.css.is_empty());
        assert!(composition.dev_server.is_none());
    }

    #[test]
    fn compression_needs_production_and_gzip() {
        for production in [false, true] {
            for gzip in [false, true] {
                let composition = run(flags(production, !production, false, gzip));
                assert_eq!(
                    composition.plugins.contains(COMPRESSION_PLUGIN),
                    production && gzip,
                    "production={production} gzip={gzip}"
                );
            }
        }
    }

    #[test]
    fn compression_options_are_exact() {
        let composition = run(flags(true, false, false, true));
        let plugin = composition.plugins.get(COMPRESSION_PLUGIN).unwrap();
        let PluginOptions::Compression(options) = &plugin.options else {
            panic!("compression plugin carries {:?}", plugin.options);
        };
        assert_eq!(options.threshold, 10_240);
        assert_eq!(options.min_ratio, 0.8);

        let value = serde_json::to_value(plugin).unwrap();
        assert_eq!(value["options"]["threshold"], 10240);
        assert_eq!(value["options"]["minRatio"], 0.8);
    }

    #[test]
    fn development_never_externalizes() {
        let composition = run(flags(false, true, true, true));

        assert!(composition.externals.is_empty());
        assert!(composition.plugins.is_empty());
        let cdn = composition.cdn.unwrap();
        assert!(cdn.js.is_empty());
        assert!(cdn.css.is_empty());
        assert_eq!(
            composition.dev_server,
            Some(DevServerOverrides {
                disable_host_check: true
            })
        );
    }

    #[test]
    fn production_without_cdn_bundles_everything() {
        let composition = run(flags(true, false, false, false));

        assert!(composition.externals.is_empty());
        assert!(composition.cdn.is_none());
        assert_eq!(composition.plugins.names(), vec![PURGE_PLUGIN, MINIFY_PLUGIN]);
    }

    #[test]
    fn unrecognized_mode_adds_nothing() {
        let composition = run(flags(false, false, true, true));

        assert!(composition.plugins.is_empty());
        assert!(composition.externals.is_empty());
        assert!(composition.cdn.is_none());
        assert!(composition.dev_server.is_none());
        assert_eq!(composition.dns_prefetch, vec!["http://sinacloud.net"]);
    }

    #[test]
    fn analyzer_is_added_in_any_mode() {
        for (production, development) in [(true, false), (false, true), (false, false)] {
            let mut f = flags(production, development, false, false);
            f.analysis_enabled = true;
            let composition = run(f);
            assert_eq!(composition.plugins.names().first(), Some(&ANALYZER_PLUGIN));
        }
    }

    #[test]
    fn plugin_order_matches_position() {
        let composition = run(flags(true, false, false, true));
        for (index, plugin) in composition.plugins.iter().enumerate() {
            assert_eq!(plugin.order, index);
        }
    }

    #[test]
    fn purge_paths_are_resolved_from_content() {
        let (_dir, project) = project();
        let composition =
            compose(&flags(true, false, false, false), &KilnSettings::default(), &project)
                .unwrap();
        let PluginOptions::Purge(options) = &composition.plugins.get(PURGE_PLUGIN).unwrap().options
        else {
            panic!("purge plugin carries typed options");
        };
        assert_eq!(options.paths, vec![project.resolve("src/App.vue")]);
    }

    #[test]
    fn production_fails_when_content_matches_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let project = ProjectPaths::new(dir.path());

        let err = compose(&flags(true, false, false, false), &KilnSettings::default(), &project)
            .unwrap_err();
        assert!(matches!(err, ConfigError::SchemaValidation { .. }));
        assert!(err.hint().is_some());

        // Only production scans content.
        compose(&flags(false, true, false, false), &KilnSettings::default(), &project).unwrap();
    }

    #[test]
    fn production_fails_on_unresolvable_content_glob() {
        let (_dir, project) = project();
        let mut settings = KilnSettings::default();
        settings.purge.content = vec!["src/[unclosed".to_string()];

        let err = compose(&flags(true, false, false, false), &settings, &project).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }

    #[test]
    fn base_plugin_options_deserialize_as_raw() {
        let plugin: PluginSpec = serde_json::from_value(serde_json::json!({
            "name": "html",
            "options": { "template": "public/index.html" }
        }))
        .unwrap();
        assert!(matches!(plugin.options, PluginOptions::Raw(ref v) if v["template"] == "public/index.html"));
    }
}
