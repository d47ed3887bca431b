//! Runtime dependencies served from a CDN instead of the bundle.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Stylesheet and script URLs injected into the HTML template, in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdnAssetList {
    #[serde(default)]
    pub css: Vec<String>,

    #[serde(default)]
    pub js: Vec<String>,
}

/// Asset lists per build mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CdnTargets {
    pub dev: CdnAssetList,

    pub build: CdnAssetList,
}

impl Default for CdnTargets {
    fn default() -> Self {
        Self {
            dev: CdnAssetList::default(),
            build: CdnAssetList {
                css: Vec::new(),
                js: vec![
                    "https://cdn.jsdelivr.net/npm/vue@2.5.17/dist/vue.min.js".into(),
                    "https://cdn.jsdelivr.net/npm/vue-router@3.0.1/dist/vue-router.min.js".into(),
                    "https://cdn.jsdelivr.net/npm/vuex@3.0.1/dist/vuex.min.js".into(),
                    "https://cdn.jsdelivr.net/npm/axios@0.18.0/dist/axios.min.js".into(),
                ],
            },
        }
    }
}

/// Which imports are externalized, where they come from, and what to prefetch.
///
/// Missing fields fall back to the stock values, so overriding
/// `externals` usually means overriding `cdn.build` too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalsConfig {
    /// Hosts the template emits `dns-prefetch` hints for
    pub dns_prefetch: Vec<String>,

    /// Import name → global the CDN script defines
    pub externals: IndexMap<String, String>,

    pub cdn: CdnTargets,
}

impl Default for ExternalsConfig {
    fn default() -> Self {
        let externals = [
            ("vue", "Vue"),
            ("vue-router", "VueRouter"),
            ("vuex", "Vuex"),
            ("axios", "axios"),
        ]
        .into_iter()
        .map(|(name, global)| (name.to_string(), global.to_string()))
        .collect();

        Self {
            dns_prefetch: vec!["http://sinacloud.net".into()],
            externals,
            cdn: CdnTargets::default(),
        }
    }
}
