//! Unused-style elimination support.
//!
//! The purge plugin itself runs inside the host bundler. This module owns the
//! parts of its configuration that need real logic: the markup token
//! extractor, whitelist evaluation, and resolving the content globs to files.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{ConfigError, Result};
use crate::rules::MatchPattern;

/// Name the extractor is registered under in the plugin options.
pub const EXTRACTOR_NAME: &str = "markup-token-extractor";
/// Markup extensions the extractor is applied to.
pub const EXTRACTOR_EXTENSIONS: &[&str] = &["html", "vue"];

static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<style[\s\S]*?</style>+").expect("style block regex"));
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_:/-]+").expect("token regex"));

/// Candidate class/id tokens in a markup file.
///
/// `<style>` blocks are removed first so selectors written inside them do not
/// count as usages.
pub fn extract_candidates(markup: &str) -> Vec<String> {
    let visible = STYLE_BLOCK.replace_all(markup, "");
    TOKEN
        .find_iter(&visible)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Selectors the purge step must keep even when no markup references them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "camelCase"))]
pub struct PurgeWhitelist {
    /// Exact selector names
    pub whitelist: Vec<String>,

    /// Any selector with a part matching one of these is kept
    pub whitelist_patterns: Vec<MatchPattern>,

    /// Matching selectors are kept together with their descendants
    pub whitelist_patterns_children: Vec<MatchPattern>,
}

impl Default for PurgeWhitelist {
    fn default() -> Self {
        Self {
            whitelist: vec!["html".into(), "body".into()],
            whitelist_patterns: vec![MatchPattern::new("el-.*")],
            whitelist_patterns_children: vec![
                MatchPattern::new("^token"),
                MatchPattern::new("^pre"),
                MatchPattern::new("^code"),
            ],
        }
    }
}

impl PurgeWhitelist {
    /// Whether `selector` survives purging regardless of markup usage.
    pub fn keeps(&self, selector: &str) -> Result<bool> {
        let parts = selector_parts(selector);
        let Some(subject) = parts.last() else {
            return Ok(false);
        };

        // Anything at or below a children-whitelisted part is kept.
        for part in &parts {
            for pattern in &self.whitelist_patterns_children {
                if pattern.is_match(part)? {
                    return Ok(true);
                }
            }
        }

        if self.whitelist.iter().any(|name| name == subject) {
            return Ok(true);
        }
        for pattern in &self.whitelist_patterns {
            if pattern.is_match(subject)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Simple selector names in a (possibly compound) selector, outermost first.
///
/// `.card > pre code:hover` becomes `["card", "pre", "code"]`.
fn selector_parts(selector: &str) -> Vec<&str> {
    selector
        .split(|c: char| c.is_whitespace() || matches!(c, '>' | '+' | '~'))
        .flat_map(|compound| compound.split(['.', '#']))
        .map(|part| part.split(':').next().unwrap_or(part))
        .filter(|part| !part.is_empty() && *part != "*")
        .collect()
}

/// Compile the content globs into one set, matched against root-relative
/// forward-slash paths. `*` stops at `/`; braces and character classes work.
fn content_matcher(globs: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for glob in globs {
        let source = glob.trim_start_matches("./");
        let compiled = GlobBuilder::new(source)
            .literal_separator(true)
            .build()
            .map_err(|e| ConfigError::InvalidPattern {
                pattern: glob.clone(),
                message: e.to_string(),
            })?;
        builder.add(compiled);
    }
    builder.build().map_err(|e| ConfigError::InvalidPattern {
        pattern: globs.join(", "),
        message: e.to_string(),
    })
}

/// Files under `root` matching any of `globs`, sorted.
///
/// `node_modules` and dot-directories are never scanned. Unreadable entries are
/// skipped.
pub fn resolve_content(root: &Path, globs: &[String]) -> Result<Vec<PathBuf>> {
    let matcher = content_matcher(globs)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            e.depth() == 0 || (name != "node_modules" && !name.starts_with('.'))
        })
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative = relative.to_string_lossy().replace('\\', "/");
        if matcher.is_match(&relative) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn extractor_ignores_style_blocks() {
        let markup = r#"
<template>
  <div class="card card--active" id="main"></div>
</template>
<style scoped>
.ghost { color: red; }
</style>
"#;
        let tokens = extract_candidates(markup);
        assert!(tokens.contains(&"card".to_string()));
        assert!(tokens.contains(&"card--active".to_string()));
        assert!(tokens.contains(&"main".to_string()));
        assert!(!tokens.contains(&"ghost".to_string()));
    }

    #[test]
    fn extractor_strips_every_style_block_case_insensitively() {
        let markup = "<STYLE>.a{}</STYLE><p class=\"kept\"></p><style lang=\"scss\">.b{}</style>";
        let tokens = extract_candidates(markup);
        assert!(tokens.contains(&"kept".to_string()));
        assert!(!tokens.iter().any(|t| t == "a" || t == "b"));
    }

    #[test]
    fn extractor_keeps_prefixed_utility_tokens() {
        let tokens = extract_candidates(r#"<div class="md:w-1/2 hover:text_big"></div>"#);
        assert!(tokens.contains(&"md:w-1/2".to_string()));
        assert!(tokens.contains(&"hover:text_big".to_string()));
    }

    #[test]
    fn extractor_returns_empty_for_empty_input() {
        assert!(extract_candidates("").is_empty());
    }

    #[test]
    fn whitelist_keeps_exact_names() {
        let whitelist = PurgeWhitelist::default();
        assert!(whitelist.keeps("body").unwrap());
        assert!(whitelist.keeps("html").unwrap());
        assert!(!whitelist.keeps(".unused").unwrap());
    }

    #[test]
    fn whitelist_patterns_match_selector_subject() {
        let whitelist = PurgeWhitelist::default();
        assert!(whitelist.keeps(".el-button").unwrap());
        assert!(whitelist.keeps(".wrapper .el-dialog__header").unwrap());
        assert!(!whitelist.keeps(".el-button .label").unwrap());
    }

    #[test]
    fn children_patterns_keep_descendants() {
        let whitelist = PurgeWhitelist::default();
        assert!(whitelist.keeps("pre code").unwrap());
        assert!(whitelist.keeps(".token.comment").unwrap());
        assert!(whitelist.keeps(".markdown > pre .line").unwrap());
        assert!(!whitelist.keeps(".sidebar .item").unwrap());
    }

    #[test]
    fn content_globs_respect_separators() {
        let matcher = content_matcher(&["./**/*.vue".to_string()]).unwrap();
        assert!(matcher.is_match("App.vue"));
        assert!(matcher.is_match("src/components/Nav.vue"));
        assert!(!matcher.is_match("src/main.js"));

        let matcher = content_matcher(&["public/*.html".to_string()]).unwrap();
        assert!(matcher.is_match("public/index.html"));
        assert!(!matcher.is_match("public/nested/index.html"));
    }

    #[test]
    fn invalid_content_glob_is_reported() {
        let err = content_matcher(&["src/[unclosed".to_string()]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { ref pattern, .. } if pattern == "src/[unclosed"));
    }

    #[test]
    fn resolve_content_supports_braces_and_classes() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src/App.vue"), "<template/>").unwrap();
        fs::write(root.join("src/index.html"), "<html></html>").unwrap();
        fs::write(root.join("src/main.js"), "").unwrap();

        let files = resolve_content(root, &["./src/**/*.{vue,html}".to_string()]).unwrap();
        assert_eq!(files, vec![root.join("src/App.vue"), root.join("src/index.html")]);

        let files = resolve_content(root, &["./src/[A]pp.vue".to_string()]).unwrap();
        assert_eq!(files, vec![root.join("src/App.vue")]);
    }

    #[test]
    fn resolve_content_skips_node_modules() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/components")).unwrap();
        fs::create_dir_all(root.join("node_modules/lib")).unwrap();
        fs::write(root.join("src/App.vue"), "<template/>").unwrap();
        fs::write(root.join("src/components/Nav.vue"), "<template/>").unwrap();
        fs::write(root.join("src/main.js"), "").unwrap();
        fs::write(root.join("node_modules/lib/Widget.vue"), "").unwrap();

        let files = resolve_content(root, &["./**/*.vue".to_string()]).unwrap();
        assert_eq!(
            files,
            vec![root.join("src/App.vue"), root.join("src/components/Nav.vue")]
        );
    }
}
