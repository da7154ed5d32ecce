//! Configuration loader.
//!
//! Loading a pipeline configuration runs through fixed stages:
//! 1. Size-limited read of the raw file
//! 2. Environment variable expansion on the raw text
//! 3. YAML parsing
//! 4. Deserialization to the typed config
//! 5. Validation
//!
//! Warnings (unknown option keys, missing option sets, unset environment
//! variables) are collected alongside the config rather than failing the
//! load.

use std::path::Path;

use crate::config::schema::PipelineConfig;
use crate::config::validation::Validator;
use crate::error::ConfigError;

/// Conventional configuration file name, looked for in the working
/// directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "plantpress.yaml";

// ============================================================================
// Public API
// ============================================================================

/// Result of loading a configuration file.
#[derive(Debug)]
pub struct LoadResult {
    /// The validated configuration.
    pub config: PipelineConfig,

    /// Non-fatal issues encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// A non-fatal issue encountered while loading configuration.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    /// Human-readable description of the issue.
    pub message: String,

    /// Where the issue was found, if known.
    pub location: Option<String>,
}

/// Configuration loader with size limits.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Maximum configuration file size in bytes.
    pub max_config_size: usize,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            max_config_size: env_or("PLANTPRESS_MAX_CONFIG_SIZE", 1024 * 1024),
        }
    }
}

impl ConfigLoader {
    /// Creates a loader with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads, expands, parses, and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if the path does not exist,
    /// [`ConfigError::TooLarge`] past the size limit,
    /// [`ConfigError::ParseError`] on malformed YAML, and
    /// [`ConfigError::ValidationError`] when validation finds errors.
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        if raw.len() > self.max_config_size {
            return Err(ConfigError::TooLarge {
                path: path.to_path_buf(),
                size: raw.len(),
                limit: self.max_config_size,
            });
        }

        let mut warnings = Vec::new();
        let expanded = expand_env(&raw, path, &mut warnings)?;

        let config: PipelineConfig =
            serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let result = Validator::new().validate(&config);
        for issue in &result.warnings {
            warnings.push(LoadWarning {
                message: issue.message.clone(),
                location: Some(issue.path.clone()),
            });
        }
        if result.has_errors() {
            return Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                errors: result.errors,
            });
        }

        Ok(LoadResult { config, warnings })
    }
}

// ============================================================================
// Environment Expansion
// ============================================================================

/// Substitutes environment variables in raw YAML text.
///
/// Supports:
/// - `${VAR}` - expand to value (empty string with a warning if unset)
/// - `${VAR:-default}` - expand to default if unset
/// - `$$` - literal `$`
fn expand_env(
    raw: &str,
    path: &Path,
    warnings: &mut Vec<LoadWarning>,
) -> Result<String, ConfigError> {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }
        match chars.peek() {
            Some('$') => {
                chars.next();
                result.push('$');
            }
            Some('{') => {
                chars.next();
                let mut spec = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => spec.push(c),
                        None => {
                            return Err(ConfigError::ParseError {
                                path: path.to_path_buf(),
                                message: format!("unterminated variable reference '${{{spec}'"),
                            });
                        }
                    }
                }
                let (name, default) = match spec.split_once(":-") {
                    Some((name, default)) => (name, Some(default)),
                    None => (spec.as_str(), None),
                };
                match std::env::var(name) {
                    Ok(value) => result.push_str(&value),
                    Err(_) => match default {
                        Some(default) => result.push_str(default),
                        None => warnings.push(LoadWarning {
                            message: format!(
                                "environment variable '{name}' is not set, using empty string"
                            ),
                            location: Some(path.display().to_string()),
                        }),
                    },
                }
            }
            _ => result.push(c),
        }
    }

    Ok(result)
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn load_str(yaml: &str) -> Result<LoadResult, ConfigError> {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        ConfigLoader::new().load(file.path())
    }

    #[test]
    fn loads_a_minimal_config() {
        let result = load_str(
            r"
rules:
  - test: '**/*.puml'
options:
  plantuml:
    format: svg
",
        )
        .unwrap();
        assert_eq!(result.config.rules.len(), 1);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn missing_file_is_classified() {
        let err = ConfigLoader::new()
            .load(Path::new("/nonexistent/plantpress.yaml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = load_str("rules: [").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn validation_errors_fail_the_load() {
        let err = load_str("jobs: 0").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn expands_env_with_default() {
        let mut warnings = Vec::new();
        let expanded = expand_env(
            "format: ${PLANTPRESS_TEST_UNSET_VAR:-png}",
            Path::new("test.yaml"),
            &mut warnings,
        )
        .unwrap();
        assert_eq!(expanded, "format: png");
        assert!(warnings.is_empty());
    }

    #[test]
    fn unset_env_without_default_warns() {
        let mut warnings = Vec::new();
        let expanded = expand_env(
            "dir: ${PLANTPRESS_TEST_UNSET_VAR}x",
            Path::new("test.yaml"),
            &mut warnings,
        )
        .unwrap();
        assert_eq!(expanded, "dir: x");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn double_dollar_escapes() {
        let mut warnings = Vec::new();
        let expanded = expand_env("cost: $$5", Path::new("test.yaml"), &mut warnings).unwrap();
        assert_eq!(expanded, "cost: $5");
    }
}
