use std::path::PathBuf;

use serde::Serialize;

use crate::purge::{EXTRACTOR_EXTENSIONS, EXTRACTOR_NAME, PurgeWhitelist};
use crate::rules::MatchPattern;

/// Smallest asset (bytes) worth compressing.
pub const COMPRESSION_THRESHOLD: u64 = 10_240;
/// Keep the compressed copy only when it is at most this fraction of the original.
pub const COMPRESSION_MIN_RATIO: f64 = 0.8;
/// Text, script, style, markup and icon outputs.
pub const COMPRESSIBLE_TEST: &str = r"(?i)\.(js|css|json|txt|html|ico|svg)(\?.*)?$";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractorSpec {
    pub extractor: String,
    pub extensions: Vec<String>,
}

impl Default for ExtractorSpec {
    fn default() -> Self {
        Self {
            extractor: EXTRACTOR_NAME.to_string(),
            extensions: EXTRACTOR_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Unused-style elimination
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurgeOptions {
    /// Markup files scanned for used selectors
    pub paths: Vec<PathBuf>,

    pub extractors: Vec<ExtractorSpec>,

    #[serde(flatten)]
    pub whitelist: PurgeWhitelist,
}

/// Compressor switches, in the minifier's own naming.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompressOptions {
    pub warnings: bool,
    pub drop_console: bool,
    pub collapse_vars: bool,
    pub reduce_vars: bool,
    /// `debugger` statements survive production builds
    pub drop_debugger: bool,
    pub pure_funcs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UglifyOptions {
    pub compress: CompressOptions,
}

/// Minification and dead-code removal
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinifyOptions {
    pub uglify_options: UglifyOptions,
    pub source_map: bool,
    /// Ask the minifier to use its own worker pool
    pub parallel: bool,
}

impl Default for MinifyOptions {
    fn default() -> Self {
        Self {
            uglify_options: UglifyOptions {
                compress: CompressOptions {
                    warnings: false,
                    drop_console: true,
                    collapse_vars: true,
                    reduce_vars: true,
                    drop_debugger: false,
                    pure_funcs: vec!["console.log".into()],
                },
            },
            source_map: false,
            parallel: true,
        }
    }
}

/// Pre-compressed copies of large text assets
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionOptions {
    pub filename: String,
    pub algorithm: String,
    pub test: MatchPattern,
    pub threshold: u64,
    pub min_ratio: f64,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            filename: "[path].gz[query]".into(),
            algorithm: "gzip".into(),
            test: MatchPattern::new(COMPRESSIBLE_TEST),
            threshold: COMPRESSION_THRESHOLD,
            min_ratio: COMPRESSION_MIN_RATIO,
        }
    }
}

impl CompressionOptions {
    /// Whether an asset of `original` bytes that compressed to `compressed`
    /// bytes gets a `.gz` sibling.
    pub fn should_compress(&self, original: u64, compressed: u64) -> bool {
        if original <= self.threshold {
            return false;
        }
        (compressed as f64) / (original as f64) <= self.min_ratio
    }
}
