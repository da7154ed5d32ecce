//! The `build` command: run the whole pipeline.

use std::path::PathBuf;

use tracing::warn;

use crate::cli::args::BuildArgs;
use crate::config::{ConfigLoader, DEFAULT_CONFIG_FILE};
use crate::error::PlantPressError;
use crate::pipeline::Pipeline;

/// Loads the configuration, applies CLI overrides, and runs the
/// pipeline.
///
/// # Errors
///
/// Fails on configuration problems, an unusable output directory, or
/// when any artifact failed to render.
pub async fn run(args: &BuildArgs) -> Result<(), PlantPressError> {
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    let loaded = ConfigLoader::new().load(&config_path)?;
    for warning in &loaded.warnings {
        warn!(
            location = warning.location.as_deref().unwrap_or("-"),
            "{}", warning.message
        );
    }

    let mut config = loaded.config;
    if let Some(out_dir) = &args.out_dir {
        config.output.dir.clone_from(out_dir);
    }
    if let Some(jobs) = args.jobs {
        config.jobs = Some(jobs);
    }

    let source_root = args.source.clone().unwrap_or_else(|| {
        let parent = config_path.parent().unwrap_or_else(|| std::path::Path::new("."));
        if parent.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            parent.to_path_buf()
        }
    });

    let report = Pipeline::new(config, source_root).build().await?;

    println!(
        "rendered {} of {} diagram(s)",
        report.rendered.len(),
        report.total()
    );

    report.into_result()?;
    Ok(())
}
