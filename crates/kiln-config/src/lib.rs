//! Environment-driven bundler configuration for Vue CLI style projects.
//!
//! One call to [`assemble`] per build: the ambient environment is classified
//! into [`EnvironmentFlags`], the host's base rules are rewritten, build
//! plugins are composed, and the whole result comes back as a
//! [`ResolvedConfig`] the host bundler consumes as JSON.

pub mod alias;
pub mod assemble;
pub mod base;
pub mod cdn;
pub mod css;
pub mod dev;
pub mod env;
pub mod error;
pub mod plugins;
pub mod project;
pub mod purge;
pub mod rules;
pub mod settings;
pub mod validation;

// Re-export main types
pub use alias::AliasTable;
pub use assemble::{ResolvedConfig, TemplateContext, assemble, assemble_with_flags};
pub use base::BaseConfig;
pub use cdn::{CdnAssetList, CdnTargets, ExternalsConfig};
pub use css::CssOptions;
pub use dev::DevServerOverrides;
pub use env::{BuildMode, EnvironmentFlags, classify};
pub use error::*;
pub use plugins::{Composition, PluginList, PluginOptions, PluginSpec, compose};
pub use project::ProjectPaths;
pub use purge::{PurgeWhitelist, extract_candidates};
pub use rules::{Exclusion, MatchPattern, RuleRegistry, TransformRule, TransformerStep, rewrite};
pub use settings::{KilnSettings, PurgeSettings};
pub use validation::{ConfigValidator, SchemaValidator};
