//! The `validate` command: check a configuration without rendering.

use serde_json::json;

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::ConfigLoader;
use crate::error::{ConfigError, PlantPressError};

/// Loads and validates the configuration, printing a human or JSON
/// report.
///
/// # Errors
///
/// Returns the underlying [`ConfigError`] when the configuration does
/// not load or validate, after the report has been printed.
pub fn run(args: &ValidateArgs) -> Result<(), PlantPressError> {
    let outcome = ConfigLoader::new().load(&args.config);
    let path = args.config.display().to_string();

    match args.format {
        OutputFormat::Human => match &outcome {
            Ok(result) => {
                println!("{path}: ok ({} warning(s))", result.warnings.len());
                for warning in &result.warnings {
                    println!(
                        "  warning: {} at {}",
                        warning.message,
                        warning.location.as_deref().unwrap_or("-")
                    );
                }
            }
            Err(ConfigError::ValidationError { errors, .. }) => {
                println!("{path}: invalid");
                for issue in errors {
                    println!("  {issue}");
                }
            }
            Err(e) => println!("{path}: {e}"),
        },
        OutputFormat::Json => {
            let report = match &outcome {
                Ok(result) => json!({
                    "path": path,
                    "valid": true,
                    "errors": [],
                    "warnings": result
                        .warnings
                        .iter()
                        .map(|w| json!({
                            "message": w.message,
                            "location": w.location,
                        }))
                        .collect::<Vec<_>>(),
                }),
                Err(ConfigError::ValidationError { errors, .. }) => json!({
                    "path": path,
                    "valid": false,
                    "errors": errors
                        .iter()
                        .map(|issue| json!({
                            "path": issue.path,
                            "message": issue.message,
                        }))
                        .collect::<Vec<_>>(),
                    "warnings": [],
                }),
                Err(e) => json!({
                    "path": path,
                    "valid": false,
                    "errors": [json!({ "message": e.to_string() })],
                    "warnings": [],
                }),
            };
            println!("{report}");
        }
    }

    outcome.map(|_| ()).map_err(Into::into)
}
