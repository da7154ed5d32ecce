//! Pipeline runner.
//!
//! Discovers diagram sources by rule, renders each one through the
//! transformer, and writes the results to derived artifact paths.
//! Artifacts render concurrently, bounded by a semaphore; every
//! invocation owns its own renderer process and buffers, so failures
//! stay per-artifact.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::config::{options_for_rule, PipelineConfig};
use crate::error::{PipelineError, PlantPressError};
use crate::pipeline::naming::artifact_name;
use crate::transform::{AssetTransformer, ProcessTransformer};

// ============================================================================
// Reports
// ============================================================================

/// One successfully rendered artifact.
#[derive(Debug)]
pub struct RenderedArtifact {
    /// The diagram source file.
    pub source: PathBuf,

    /// The written artifact.
    pub artifact: PathBuf,
}

/// Outcome of a pipeline build.
///
/// Per-artifact failures do not stop the build; they are collected here
/// and the build as a whole fails afterwards if any occurred.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Artifacts rendered and written.
    pub rendered: Vec<RenderedArtifact>,

    /// Per-artifact failures, in completion order.
    pub failures: Vec<PipelineError>,
}

impl BuildReport {
    /// Total number of artifacts attempted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.rendered.len() + self.failures.len()
    }

    /// Converts the report into a result, failing if any artifact failed.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::ArtifactsFailed`] when the report
    /// contains failures.
    pub fn into_result(self) -> Result<Self, PipelineError> {
        if self.failures.is_empty() {
            Ok(self)
        } else {
            Err(PipelineError::ArtifactsFailed {
                failed: self.failures.len(),
                total: self.total(),
            })
        }
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// A configured asset pipeline rooted at a source directory.
#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    source_root: PathBuf,
}

/// A discovered unit of work: one source file, its artifact path, and
/// the transformer to run it through.
struct WorkItem {
    source: PathBuf,
    artifact: PathBuf,
    transformer: Arc<dyn AssetTransformer>,
}

impl Pipeline {
    /// Creates a pipeline over `source_root`.
    pub fn new(config: PipelineConfig, source_root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            source_root: source_root.into(),
        }
    }

    /// Discovers, renders, and writes all matching artifacts.
    ///
    /// # Errors
    ///
    /// Fails fast on configuration problems and on an unusable output
    /// directory. Per-artifact render failures are collected in the
    /// returned [`BuildReport`] instead.
    pub async fn build(&self) -> Result<BuildReport, PlantPressError> {
        let out_dir = self.source_root.join(&self.config.output.dir);
        tokio::fs::create_dir_all(&out_dir)
            .await
            .map_err(|source| PipelineError::OutputDir {
                path: out_dir.clone(),
                source,
            })?;

        let work = self.discover(&out_dir)?;
        info!(
            artifacts = work.len(),
            out_dir = %out_dir.display(),
            "rendering diagrams"
        );

        let jobs = self.config.jobs.unwrap_or_else(default_jobs).max(1);
        let semaphore = Arc::new(Semaphore::new(jobs));
        let mut tasks = JoinSet::new();

        for item in work {
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                render_one(item).await
            });
        }

        let mut report = BuildReport::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(artifact)) => {
                    debug!(artifact = %artifact.artifact.display(), "wrote artifact");
                    report.rendered.push(artifact);
                }
                Ok(Err(failure)) => {
                    error!(error = %failure, "artifact failed");
                    report.failures.push(failure);
                }
                Err(join_error) => {
                    error!(error = %join_error, "render task aborted");
                }
            }
        }

        Ok(report)
    }

    /// Expands each rule's glob under the source root. A file is
    /// rendered by the first rule that matches it; later matches are
    /// skipped.
    fn discover(&self, out_dir: &Path) -> Result<Vec<WorkItem>, PlantPressError> {
        let mut seen = HashSet::new();
        let mut work = Vec::new();

        for rule in &self.config.rules {
            let options = options_for_rule(&self.config, rule)?;
            let transformer: Arc<dyn AssetTransformer> =
                Arc::new(ProcessTransformer::from_options(&options)?);

            let pattern = self.source_root.join(&rule.test);
            let matches = glob::glob(&pattern.to_string_lossy()).map_err(|e| {
                crate::error::ConfigError::InvalidValue {
                    field: "test".to_string(),
                    value: rule.test.clone(),
                    expected: format!("a valid glob pattern ({e})"),
                }
            })?;

            for entry in matches {
                let source = match entry {
                    Ok(path) => path,
                    Err(e) => {
                        warn!(error = %e, "skipping unreadable path");
                        continue;
                    }
                };
                if !source.is_file() || !seen.insert(source.clone()) {
                    continue;
                }
                let artifact =
                    out_dir.join(artifact_name(&source, &self.config.output.filename, &options.format));
                work.push(WorkItem {
                    source,
                    artifact,
                    transformer: Arc::clone(&transformer),
                });
            }
        }

        Ok(work)
    }
}

async fn render_one(item: WorkItem) -> Result<RenderedArtifact, PipelineError> {
    let source_bytes =
        tokio::fs::read(&item.source)
            .await
            .map_err(|source| PipelineError::ReadSource {
                path: item.source.clone(),
                source,
            })?;

    let rendered = item
        .transformer
        .transform(Bytes::from(source_bytes))
        .await
        .map_err(|source| PipelineError::Render {
            path: item.source.clone(),
            source,
        })?;

    tokio::fs::write(&item.artifact, &rendered)
        .await
        .map_err(|source| PipelineError::WriteArtifact {
            path: item.artifact.clone(),
            source,
        })?;

    Ok(RenderedArtifact {
        source: item.source,
        artifact: item.artifact,
    })
}

fn default_jobs() -> usize {
    std::thread::available_parallelism().map_or(4, std::num::NonZeroUsize::get)
}
