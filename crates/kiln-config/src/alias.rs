//! Module-resolution aliases.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::project::ProjectPaths;

/// Aliases every project gets, relative to the project root.
pub const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("@", "src"),
    ("assets", "src/assets"),
    ("components", "src/components"),
    ("router", "src/router"),
    ("store", "src/store"),
    ("view", "src/view"),
];

/// Short import prefix → absolute directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable(IndexMap<String, PathBuf>);

impl AliasTable {
    /// Build the default table for a project.
    pub fn from_project(project: &ProjectPaths) -> Self {
        let entries = DEFAULT_ALIASES
            .iter()
            .map(|(alias, dir)| (alias.to_string(), project.resolve(dir)))
            .collect();
        Self(entries)
    }

    /// Add or replace an alias. Relative paths are joined to the project root.
    pub fn set(&mut self, project: &ProjectPaths, alias: impl Into<String>, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        let path = if dir.is_absolute() {
            dir
        } else {
            project.resolve(dir)
        };
        self.0.insert(alias.into(), path);
    }

    pub fn get(&self, alias: &str) -> Option<&PathBuf> {
        self.0.get(alias)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PathBuf)> {
        self.0.iter()
    }
}
