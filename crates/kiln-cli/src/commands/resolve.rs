//! Resolve command implementation.

use std::collections::HashMap;
use std::io::Write;

use kiln_config::assemble;
use kiln_config::env::{APP_ENV_VAR, CDN_VAR, GZIP_VAR, MODE_VAR};

use crate::cli::ResolveArgs;
use crate::commands::utils::load_project;
use crate::error::Result;

/// Execute the resolve command.
///
/// The process environment is classified with the command-line switches
/// layered on top, and the assembled configuration is written to stdout.
pub fn execute(args: ResolveArgs) -> Result<()> {
    let project = load_project(&args.project)?;
    let env = environment(&args, std::env::vars());

    let resolved = assemble(&env, &project.settings, &project.base, &project.paths)?;
    let value = resolved.to_value()?;

    let rendered = if args.compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}

/// Apply the switches to a snapshot of the environment.
fn environment(
    args: &ResolveArgs,
    vars: impl IntoIterator<Item = (String, String)>,
) -> HashMap<String, String> {
    let mut env: HashMap<String, String> = vars.into_iter().collect();
    if let Some(mode) = &args.mode {
        env.insert(MODE_VAR.to_string(), mode.clone());
    }
    if args.cdn {
        env.insert(CDN_VAR.to_string(), "1".to_string());
    }
    if args.gzip {
        env.insert(GZIP_VAR.to_string(), "1".to_string());
    }
    if args.analyze {
        env.insert(APP_ENV_VAR.to_string(), "analyz".to_string());
    }
    env
}
