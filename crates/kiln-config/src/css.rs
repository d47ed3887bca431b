use serde::{Deserialize, Serialize};

/// Global imports prepended to every Sass compilation unit.
pub const DEFAULT_SASS_DATA: &str =
    "@import \"@/assets/scss/mixin.scss\";\n@import \"@/assets/scss/variable.scss\";";

/// Stylesheet handling handed to the host's CSS pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct CssOptions {
    /// Extract CSS into separate files instead of inlining it in JS
    #[serde(default = "default_true")]
    pub extract: bool,

    #[serde(default)]
    pub loader_options: LoaderOptions,
}

impl Default for CssOptions {
    fn default() -> Self {
        Self {
            extract: true,
            loader_options: LoaderOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderOptions {
    #[serde(default)]
    pub sass: SassOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SassOptions {
    /// Prepended verbatim; every statement needs its trailing `;`
    #[serde(default = "default_sass_data")]
    pub data: String,
}

impl Default for SassOptions {
    fn default() -> Self {
        Self {
            data: default_sass_data(),
        }
    }
}

pub(crate) fn default_true() -> bool {
    true
}

fn default_sass_data() -> String {
    DEFAULT_SASS_DATA.to_string()
}
