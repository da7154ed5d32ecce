//! Option resolution.
//!
//! Effective render options are merged from three layers, highest
//! precedence first: call-time query overrides, the pipeline-scoped
//! option set, and built-in defaults. Resolution is a pure function so
//! the precedence rules are testable without touching a config file or
//! a process.

use std::time::Duration;

use crate::config::schema::{AssetRule, PipelineConfig, RenderOptions, DEFAULT_OPTIONS_KEY};
use crate::error::ConfigError;

/// Built-in default output format.
pub const DEFAULT_FORMAT: &str = "svg";

/// Built-in default renderer command line.
pub const DEFAULT_RENDERER: &str = "plantuml";

// ============================================================================
// Resolved Options
// ============================================================================

/// Fully resolved render options for one invocation. Read-only once
/// produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    /// Output image format (e.g. `svg`, `png`). Not validated against a
    /// whitelist; an unsupported value is passed through and surfaces as
    /// a renderer failure.
    pub format: String,

    /// Renderer command line, still unlexed.
    pub renderer: String,

    /// Optional per-invocation timeout.
    pub timeout: Option<Duration>,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            renderer: DEFAULT_RENDERER.to_string(),
            timeout: None,
        }
    }
}

/// Merges option layers into a resolved value.
///
/// `query` wins over `pipeline`, which wins over the defaults. Unknown
/// keys in either layer are ignored.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if the winning `timeout` string
/// is not a valid humantime duration.
pub fn resolve(
    pipeline: Option<&RenderOptions>,
    query: Option<&RenderOptions>,
) -> Result<ResolvedOptions, ConfigError> {
    let pick = |f: fn(&RenderOptions) -> Option<&String>| {
        query
            .and_then(f)
            .or_else(|| pipeline.and_then(f))
            .map(String::as_str)
    };

    let format = pick(|o| o.format.as_ref()).unwrap_or(DEFAULT_FORMAT);
    let renderer = pick(|o| o.renderer.as_ref()).unwrap_or(DEFAULT_RENDERER);
    let timeout = pick(|o| o.timeout.as_ref())
        .map(|raw| {
            humantime::parse_duration(raw).map_err(|_| ConfigError::InvalidValue {
                field: "timeout".to_string(),
                value: raw.to_string(),
                expected: "a duration such as '30s'".to_string(),
            })
        })
        .transpose()?;

    Ok(ResolvedOptions {
        format: format.to_string(),
        renderer: renderer.to_string(),
        timeout,
    })
}

/// Resolves the effective options for one rule against a pipeline
/// configuration.
///
/// The option set is chosen by the query's `config=` override, then the
/// rule's `options` field, then the conventional `plantuml` key. A named
/// set that does not exist resolves as an empty layer, so defaults still
/// apply.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] on an unparseable `timeout`.
pub fn options_for_rule(
    config: &PipelineConfig,
    rule: &AssetRule,
) -> Result<ResolvedOptions, ConfigError> {
    let query = rule.query.as_deref().map(parse_query);

    let key = query
        .as_ref()
        .and_then(|q| q.options_key.as_deref())
        .or(rule.options.as_deref())
        .unwrap_or(DEFAULT_OPTIONS_KEY);

    let scoped = config.options.get(key);
    resolve(scoped, query.as_ref().map(|q| &q.overrides))
}

// ============================================================================
// Query Parsing
// ============================================================================

/// A parsed call-time query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Redirects option lookup to a different named set.
    pub options_key: Option<String>,

    /// Inline option values, highest precedence.
    pub overrides: RenderOptions,
}

/// Parses a `key=value&key2=value2` query string.
///
/// A leading `?` is tolerated. A bare key reads as `"true"`. The
/// reserved key `config` selects the named option set; every other
/// unrecognized key lands in `overrides.extra` and is ignored by
/// resolution.
#[must_use]
pub fn parse_query(raw: &str) -> Query {
    let mut query = Query::default();

    for pair in raw.trim_start_matches('?').split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = pair.split_once('=').unwrap_or((pair, "true"));
        match key {
            "config" => query.options_key = Some(value.to_string()),
            "format" => query.overrides.format = Some(value.to_string()),
            "renderer" => query.overrides.renderer = Some(value.to_string()),
            "timeout" => query.overrides.timeout = Some(value.to_string()),
            _ => {
                query
                    .overrides
                    .extra
                    .insert(key.to_string(), serde_yaml::Value::String(value.to_string()));
            }
        }
    }

    query
}
