//! Error types for configuration assembly and loading.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Integrity errors: the host's base configuration is missing something we rewrite
    #[error("base configuration has no rule named `{name}`")]
    MissingRule { name: String },

    #[error("base configuration has no plugin named `{name}`")]
    MissingPlugin { name: String },

    #[error("invalid match pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },

    // Settings parsing/loading errors
    #[error("settings file not found: {0}")]
    NotFound(PathBuf),

    #[error("invalid settings value: {0}")]
    InvalidValue(String),

    // Schema validation errors (no filesystem checks)
    #[error("schema validation failed: {message}")]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Whether this error means the host configuration itself is broken,
    /// as opposed to user-supplied settings.
    pub fn is_integrity_error(&self) -> bool {
        matches!(
            self,
            ConfigError::MissingRule { .. } | ConfigError::MissingPlugin { .. }
        )
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            ConfigError::SchemaValidation { hint, .. } => hint.as_deref(),
            ConfigError::MissingRule { .. } | ConfigError::MissingPlugin { .. } => {
                Some("The host bundler defaults changed; update the base configuration")
            }
            _ => None,
        }
    }
}
