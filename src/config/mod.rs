//! Configuration module.
//!
//! Handles loading and validation of `plantpress` pipeline configuration
//! files, and resolution of per-invocation render options from their
//! three layers (call-time query, pipeline option set, built-in
//! defaults).

pub mod loader;
pub mod resolve;
pub mod schema;
pub mod validation;

pub use loader::{ConfigLoader, LoadResult, LoadWarning, DEFAULT_CONFIG_FILE};
pub use resolve::{
    options_for_rule, parse_query, resolve, Query, ResolvedOptions, DEFAULT_FORMAT,
    DEFAULT_RENDERER,
};
pub use schema::{AssetRule, OutputConfig, PipelineConfig, RenderOptions, DEFAULT_OPTIONS_KEY};
pub use validation::{ValidationResult, Validator};
