use serde_json::json;
use tracing::debug;

use super::{Exclusion, MatchPattern, RuleRegistry, TransformerStep};
use crate::env::EnvironmentFlags;
use crate::error::Result;
use crate::project::ProjectPaths;

pub const IMAGES_RULE: &str = "images";
pub const SVG_RULE: &str = "svg";

pub const IMAGE_COMPRESSOR: &str = "image-webpack-loader";
pub const SPRITE_LOADER: &str = "svg-sprite-loader";

/// Raster formats, with an optional cache-busting query suffix.
pub const RASTER_TEST: &str = r"(?i)\.(png|jpe?g|gif|webp)(\?.*)?$";
pub const SVG_TEST: &str = r"(?i)\.svg(\?.*)?$";
/// Third-party SVGs, which the sprite rule refuses.
pub const VENDOR_SVG_TEST: &str = r"node_modules/.*\.svg(\?.*)?$";
/// Directory the sprite rule never reaches into.
pub const VENDOR_DIR_PATTERN: &str = "node_modules/";

/// Rewrite the host's base rules for this build.
///
/// The base registry is left untouched; the rewritten copy is returned. Fails
/// only when `images` or `svg` is missing from the base.
pub fn rewrite(
    base: &RuleRegistry,
    flags: &EnvironmentFlags,
    project: &ProjectPaths,
) -> Result<RuleRegistry> {
    let mut rules = base.clone();

    // Compression is skipped by the loader itself in debug runs.
    let images = rules.require_mut(IMAGES_RULE)?;
    images.uses.push(TransformerStep::new(
        IMAGE_COMPRESSOR,
        json!({ "bypassOnDebug": true }),
    ));
    debug!(rule = IMAGES_RULE, step = IMAGE_COMPRESSOR, "attached image compression");

    if flags.analysis_enabled {
        debug!("analysis mode requested; analyzer plugin is added by the composer");
    }

    // Replace, don't append: the default file loader must not see SVGs.
    let svg = rules.require_mut(SVG_RULE)?;
    svg.uses.clear();
    svg.exclude.push(Exclusion::pattern(VENDOR_DIR_PATTERN));
    svg.test = MatchPattern::new(SVG_TEST);
    svg.uses.push(TransformerStep::new(
        SPRITE_LOADER,
        json!({ "symbolId": "[name]" }),
    ));
    debug!(rule = SVG_RULE, step = SPRITE_LOADER, "replaced svg chain with sprite loader");

    let icons = project.icons_dir();
    let images = rules.require_mut(IMAGES_RULE)?;
    images.exclude.push(Exclusion::path(&icons));
    // Vendored SVGs stay on the plain asset chain.
    images.test = MatchPattern::new(format!("{RASTER_TEST}|{VENDOR_SVG_TEST}"));
    debug!(rule = IMAGES_RULE, icons = %icons.display(), "narrowed raster rule");

    Ok(rules)
}
