//! Error types for `plantpress`.
//!
//! This module provides the error hierarchy for configuration loading,
//! diagram rendering, and pipeline execution, together with the exit
//! codes the CLI maps them to.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `plantpress` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid YAML, validation failure)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Renderer error (spawn failure, renderer diagnostics, stream failure)
    pub const RENDER_ERROR: i32 = 4;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `plantpress` operations.
///
/// Aggregates all domain-specific errors and provides a unified
/// interface for error handling and exit code mapping.
#[derive(Debug, Error)]
pub enum PlantPressError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Diagram rendering error
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Pipeline execution error
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl PlantPressError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Json(_) | Self::Yaml(_) => ExitCode::CONFIG_ERROR,
            Self::Transform(_) => ExitCode::RENDER_ERROR,
            Self::Pipeline(e) => e.exit_code(),
            Self::Io(_) => ExitCode::IO_ERROR,
        }
    }
}

// ============================================================================
// Transform Errors
// ============================================================================

/// Errors from a single renderer invocation.
///
/// Exactly one of these (or a success buffer) is produced per invocation;
/// none are retried.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The renderer program could not be started (missing binary,
    /// permission denied). Distinct from a renderer diagnostic failure.
    #[error("failed to spawn renderer '{program}': {source}")]
    Spawn {
        /// The program that failed to start
        program: String,
        /// The underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// The renderer ran and wrote to its error stream. The message is the
    /// concatenation of all error-stream chunks, in emission order, joined
    /// by `", "`. Any output-stream bytes are discarded.
    #[error("renderer reported errors: {message}")]
    Render {
        /// Concatenated error-stream content
        message: String,
    },

    /// Stream plumbing to or from the renderer failed (stdin write, pipe
    /// read, or process wait) while the error stream stayed empty.
    #[error("renderer stream I/O failed: {source}")]
    Stream {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The configured render timeout elapsed before the renderer exited.
    #[error("renderer timed out after {timeout:?}")]
    Timeout {
        /// The configured timeout
        timeout: Duration,
    },
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Configuration file exceeds the size limit
    #[error("{path} is {size} bytes, exceeding the {limit} byte limit")]
    TooLarge {
        /// Path to the oversized file
        path: PathBuf,
        /// Actual size in bytes
        size: usize,
        /// Configured limit in bytes
        limit: usize,
    },

    /// YAML parsing failed
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the configuration file
        path: PathBuf,
        /// Error message from the parser
        message: String,
    },

    /// Configuration validation failed
    #[error("validation failed for {path}")]
    ValidationError {
        /// Path to the configuration file
        path: String,
        /// List of validation issues found
        errors: Vec<ValidationIssue>,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },
}

// ============================================================================
// Pipeline Errors
// ============================================================================

/// Errors from pipeline execution over a set of source artifacts.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A source artifact could not be read
    #[error("failed to read {path}: {source}")]
    ReadSource {
        /// Path to the unreadable source
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A rendered artifact could not be written
    #[error("failed to write {path}: {source}")]
    WriteArtifact {
        /// Path to the artifact
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The output directory could not be created
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        /// The output directory
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Rendering one artifact failed
    #[error("rendering {path} failed: {source}")]
    Render {
        /// The source artifact
        path: PathBuf,
        /// The renderer failure
        #[source]
        source: TransformError,
    },

    /// Summary failure after all artifacts were attempted
    #[error("{failed} of {total} artifacts failed to render")]
    ArtifactsFailed {
        /// Number of artifacts that failed
        failed: usize,
        /// Total number of artifacts attempted
        total: usize,
    },
}

impl PipelineError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Render { .. } | Self::ArtifactsFailed { .. } => ExitCode::RENDER_ERROR,
            Self::ReadSource { .. } | Self::WriteArtifact { .. } | Self::OutputDir { .. } => {
                ExitCode::IO_ERROR
            }
        }
    }
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single validation issue found during configuration validation.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Path to the problematic field (e.g., `rules[2].test`)
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.path)
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The configuration cannot be used
    Error,
    /// The configuration is usable but suspicious
    Warning,
}
