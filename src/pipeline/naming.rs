//! Artifact naming.
//!
//! Rendered artifacts are named by substituting into the output filename
//! template: `[name]` becomes the source file's stem, `[format]` the
//! resolved output format. The default template `[name].[format]` turns
//! `docs/deploy.puml` rendered as svg into `deploy.svg`.

use std::path::Path;

/// Fallback stem for sources with no usable file name.
const FALLBACK_STEM: &str = "diagram";

/// Derives an artifact file name from a source path and template.
#[must_use]
pub fn artifact_name(source: &Path, template: &str, format: &str) -> String {
    let stem = source.file_stem().map_or_else(
        || FALLBACK_STEM.to_string(),
        |stem| stem.to_string_lossy().into_owned(),
    );
    template.replace("[name]", &stem).replace("[format]", format)
}
