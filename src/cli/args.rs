//! CLI argument definitions.
//!
//! All Clap derive structs for `plantpress` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

// ============================================================================
// Root CLI
// ============================================================================

/// Build-time PlantUML diagram rendering pipeline.
#[derive(Parser, Debug)]
#[command(name = "plantpress", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "PLANTPRESS_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human", global = true)]
    pub log_format: LogFormatChoice,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render every diagram matched by the pipeline configuration.
    Build(BuildArgs),

    /// Render a single diagram file.
    Render(RenderArgs),

    /// Validate a configuration file without rendering anything.
    Validate(ValidateArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

// ============================================================================
// Build
// ============================================================================

/// Arguments for `build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the YAML pipeline configuration.
    #[arg(short, long, env = "PLANTPRESS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Source root the rule patterns are expanded under.
    /// Defaults to the configuration file's directory.
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Override the configured output directory.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Maximum number of renderer processes in flight at once.
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

// ============================================================================
// Render
// ============================================================================

/// Arguments for `render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Diagram source file to render.
    pub input: PathBuf,

    /// Output image format (e.g. svg, png). Highest precedence.
    #[arg(short, long)]
    pub format: Option<String>,

    /// Query-style overrides, e.g. 'config=ci&format=png'.
    #[arg(long)]
    pub query: Option<String>,

    /// Optional pipeline configuration to take option sets from.
    #[arg(short, long, env = "PLANTPRESS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write the rendered bytes here instead of stdout.
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

// ============================================================================
// Validate
// ============================================================================

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Configuration file to validate.
    pub config: PathBuf,

    /// Report format.
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for `completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    pub shell: Shell,
}

/// Arguments for `version`.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Report format.
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// Value Enums
// ============================================================================

/// Color output control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when stderr is a terminal and `NO_COLOR` is unset.
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

/// Log format choice surfaced on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatChoice {
    /// Human-readable log lines.
    Human,
    /// Newline-delimited JSON.
    Json,
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report.
    Human,
    /// JSON report.
    Json,
}

/// Supported completion shells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bourne Again SHell
    Bash,
    /// Z SHell
    Zsh,
    /// Friendly Interactive SHell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish
    Elvish,
}
