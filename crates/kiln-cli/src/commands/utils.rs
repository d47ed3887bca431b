//! Project loading shared by the commands.

use std::path::Path;

use kiln_config::{BaseConfig, KilnSettings, ProjectPaths};
use tracing::debug;

use crate::cli::ProjectArgs;
use crate::error::{CliError, Result};

/// Everything a command needs to know about the project.
pub(crate) struct LoadedProject {
    pub paths: ProjectPaths,
    pub settings: KilnSettings,
    pub base: BaseConfig,
}

pub(crate) fn load_project(args: &ProjectArgs) -> Result<LoadedProject> {
    let paths = match &args.root {
        Some(root) => ProjectPaths::new(root),
        None => ProjectPaths::current_dir()?,
    };
    debug!(root = %paths.root().display(), "project root");

    let settings = KilnSettings::load(&paths, args.config.as_deref())?;
    let base = match &args.base {
        Some(path) => read_base(&paths.resolve(path))?,
        None => BaseConfig::vue_cli_defaults(&paths),
    };

    Ok(LoadedProject {
        paths,
        settings,
        base,
    })
}

fn read_base(path: &Path) -> Result<BaseConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::BaseUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    Ok(BaseConfig::from_value(value)?)
}
