//! Configuration schema types.
//!
//! These types are deserialized from the pipeline's YAML configuration
//! file. Option sets are kept in insertion order so reports and
//! diagnostics read the way the file does.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Conventional name of the option set consulted when neither a rule nor
/// its query names one.
pub const DEFAULT_OPTIONS_KEY: &str = "plantuml";

// ============================================================================
// Top-Level Configuration
// ============================================================================

/// Root configuration for a `plantpress` pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PipelineConfig {
    /// Where rendered artifacts are written and how they are named
    #[serde(default)]
    pub output: OutputConfig,

    /// Asset rules, applied in order; a source file is rendered by the
    /// first rule whose pattern matches it
    #[serde(default)]
    pub rules: Vec<AssetRule>,

    /// Named render option sets, referenced by rules (or by a query's
    /// `config=` override)
    #[serde(default)]
    pub options: IndexMap<String, RenderOptions>,

    /// Maximum number of renderer processes in flight at once.
    /// Defaults to the machine's available parallelism.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
}

// ============================================================================
// Output
// ============================================================================

/// Output directory and artifact naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OutputConfig {
    /// Directory rendered artifacts are written into
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Artifact filename template; `[name]` is replaced with the source
    /// file's stem and `[format]` with the resolved output format
    #[serde(default = "default_filename")]
    pub filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            filename: default_filename(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("assets/diagrams")
}

fn default_filename() -> String {
    "[name].[format]".to_string()
}

// ============================================================================
// Rules
// ============================================================================

/// One asset rule: a glob pattern over the source root plus the render
/// options to apply to matching files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AssetRule {
    /// Glob pattern, relative to the source root (e.g. `docs/**/*.puml`)
    pub test: String,

    /// Name of the option set to use; defaults to `plantuml`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,

    /// Query-style call-time override, e.g. `format=png` or
    /// `config=ci&format=svg`; takes precedence over the option set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

// ============================================================================
// Render Options
// ============================================================================

/// One layer of render options. All fields are optional; unset fields
/// fall through to the next layer and finally to built-in defaults.
///
/// Unrecognized keys are collected rather than rejected, so configs
/// written for newer versions still load (validation reports them as
/// warnings).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RenderOptions {
    /// Output image format passed to the renderer as `-t<format>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Renderer command line; lexed shell-style, so wrappers like
    /// `java -jar plantuml.jar` work. Defaults to `plantuml`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renderer: Option<String>,

    /// Per-invocation render timeout as a humantime string (e.g. `30s`).
    /// Unset means the call runs to process exit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    /// Unrecognized option keys, preserved for diagnostics
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}
