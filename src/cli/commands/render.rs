//! The `render` command: render one diagram file.
//!
//! Rendered bytes go to stdout by default so the command composes with
//! shell redirection; logs always go to stderr.

use std::io::Write;

use tracing::warn;

use crate::cli::args::RenderArgs;
use crate::config::{parse_query, resolve, ConfigLoader, Query, DEFAULT_OPTIONS_KEY};
use crate::error::{PipelineError, PlantPressError};
use crate::transform::{AssetTransformer, ProcessTransformer};

/// Resolves options from the optional config plus call-time overrides,
/// renders the input, and writes the result.
///
/// # Errors
///
/// Fails on configuration problems, on an unreadable input, on any
/// renderer failure, or when the output cannot be written.
pub async fn run(args: &RenderArgs) -> Result<(), PlantPressError> {
    let pipeline_config = match &args.config {
        Some(path) => {
            let loaded = ConfigLoader::new().load(path)?;
            for warning in &loaded.warnings {
                warn!(
                    location = warning.location.as_deref().unwrap_or("-"),
                    "{}", warning.message
                );
            }
            Some(loaded.config)
        }
        None => None,
    };

    let mut query: Query = args.query.as_deref().map(parse_query).unwrap_or_default();
    if let Some(format) = &args.format {
        // --format outranks even the query string.
        query.overrides.format = Some(format.clone());
    }

    let key = query.options_key.as_deref().unwrap_or(DEFAULT_OPTIONS_KEY);
    let scoped = pipeline_config
        .as_ref()
        .and_then(|config| config.options.get(key));
    let options = resolve(scoped, Some(&query.overrides))?;

    let transformer = ProcessTransformer::from_options(&options)?;

    let source = tokio::fs::read(&args.input)
        .await
        .map_err(|source| PipelineError::ReadSource {
            path: args.input.clone(),
            source,
        })?;

    let rendered = transformer.transform(source.into()).await?;

    match &args.out {
        Some(path) => {
            tokio::fs::write(path, &rendered)
                .await
                .map_err(|source| PipelineError::WriteArtifact {
                    path: path.clone(),
                    source,
                })?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&rendered)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
