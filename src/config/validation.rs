//! Configuration validation.
//!
//! Semantic validation of a fully deserialized [`PipelineConfig`].
//! Validation collects all issues rather than stopping at the first, so
//! a `validate` run gives comprehensive feedback.

use glob::Pattern;

use crate::config::schema::{PipelineConfig, RenderOptions, DEFAULT_OPTIONS_KEY};
use crate::error::{Severity, ValidationIssue};

// ============================================================================
// Public API
// ============================================================================

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Configuration validator.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a configuration and returns the result.
    pub fn validate(&mut self, config: &PipelineConfig) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        self.check_output(config);
        self.check_rules(config);
        self.check_option_sets(config);

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    fn check_output(&mut self, config: &PipelineConfig) {
        if !config.output.filename.contains("[name]") {
            self.warn(
                "output.filename",
                "template has no [name] placeholder; every artifact in a rule will share one path",
            );
        }
        if config.jobs == Some(0) {
            self.error("jobs", "must be at least 1");
        }
    }

    fn check_rules(&mut self, config: &PipelineConfig) {
        for (i, rule) in config.rules.iter().enumerate() {
            let at = |field: &str| format!("rules[{i}].{field}");

            if rule.test.is_empty() {
                self.error(&at("test"), "pattern must not be empty");
            } else if let Err(e) = Pattern::new(&rule.test) {
                self.error(&at("test"), &format!("invalid glob pattern: {e}"));
            }

            let key = rule.options.as_deref().unwrap_or(DEFAULT_OPTIONS_KEY);
            if rule.options.is_some() && !config.options.contains_key(key) {
                self.warn(
                    &at("options"),
                    &format!("option set '{key}' is not defined; built-in defaults apply"),
                );
            }
        }
    }

    fn check_option_sets(&mut self, config: &PipelineConfig) {
        for (name, set) in &config.options {
            let at = |field: &str| format!("options.{name}.{field}");
            self.check_render_options(set, &at);
        }
    }

    fn check_render_options(&mut self, set: &RenderOptions, at: &dyn Fn(&str) -> String) {
        if let Some(format) = &set.format {
            if format.is_empty() {
                self.error(&at("format"), "must not be empty");
            }
        }

        if let Some(renderer) = &set.renderer {
            if shlex::split(renderer).is_none_or(|tokens| tokens.is_empty()) {
                self.error(&at("renderer"), "command line does not lex");
            }
        }

        if let Some(timeout) = &set.timeout {
            if humantime::parse_duration(timeout).is_err() {
                self.error(
                    &at("timeout"),
                    &format!("'{timeout}' is not a duration (expected e.g. '30s')"),
                );
            }
        }

        for key in set.extra.keys() {
            self.warn(&at(key), "unrecognized option (ignored)");
        }
    }

    fn error(&mut self, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    fn warn(&mut self, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}
