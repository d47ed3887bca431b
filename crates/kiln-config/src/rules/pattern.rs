use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Regular expression a rule's `test` is matched against.
///
/// Stored as source text so the registry stays serializable; compiled on
/// first use and reused after that.
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchPattern {
    source: String,

    #[serde(skip)]
    compiled: OnceLock<Regex>,
}

impl MatchPattern {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            compiled: OnceLock::new(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn compile(&self) -> Result<&Regex> {
        if let Some(regex) = self.compiled.get() {
            return Ok(regex);
        }
        let regex = Regex::new(&self.source).map_err(|e| ConfigError::InvalidPattern {
            pattern: self.source.clone(),
            message: e.to_string(),
        })?;
        Ok(self.compiled.get_or_init(|| regex))
    }

    pub fn is_match(&self, candidate: &str) -> Result<bool> {
        Ok(self.compile()?.is_match(candidate))
    }
}

impl fmt::Debug for MatchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MatchPattern").field(&self.source).finish()
    }
}

impl PartialEq for MatchPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for MatchPattern {}

impl From<&str> for MatchPattern {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

/// A condition that removes files from a rule even when its test matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exclusion {
    /// Regular expression matched anywhere in the path
    Pattern(MatchPattern),
    /// Everything under this directory
    Path(PathBuf),
}

impl Exclusion {
    pub fn pattern(source: impl Into<String>) -> Self {
        Exclusion::Pattern(MatchPattern::new(source))
    }

    pub fn path(dir: impl Into<PathBuf>) -> Self {
        Exclusion::Path(dir.into())
    }

    pub fn excludes(&self, file: &Path) -> Result<bool> {
        match self {
            Exclusion::Pattern(pattern) => pattern.is_match(&normalize(file)),
            Exclusion::Path(dir) => Ok(file.starts_with(dir)),
        }
    }
}

/// Forward-slash form of a path, so patterns read the same on every platform.
pub(crate) fn normalize(file: &Path) -> String {
    file.to_string_lossy().replace('\\', "/")
}
