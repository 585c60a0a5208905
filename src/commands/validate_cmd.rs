//! Implementation of the `flwr-manifest validate` command.

use super::require_manifest;
use crate::cli::{OutputFormat, ValidateArgs};
use flwr_manifest::error::{ManifestError, Result};
use flwr_manifest::manifest::{ValidationResult, validate_manifest};
use flwr_manifest::registry::Registry;
use std::path::PathBuf;

/// Execute the `validate` command.
///
/// # Exit Codes
///
/// - 0: Manifest is valid (warnings may still be printed)
/// - 1: No manifest found, or an export index is invalid
/// - 2: Validation failed
/// - 3: Manifest could not be read or parsed
pub fn cmd_validate(args: ValidateArgs) -> Result<()> {
    let result = run_validate(&args)?;

    match args.format {
        OutputFormat::Text => print!("{}", result.format_report()),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result).map_err(|e| {
                ManifestError::UserError(format!("failed to serialize report: {}", e))
            })?;
            println!("{}", json);
        }
    }

    if result.is_valid {
        Ok(())
    } else {
        Err(ManifestError::ValidationError(format!(
            "{} error(s) in manifest",
            result.errors.len()
        )))
    }
}

/// Load the manifest and registry, then validate without printing.
pub(crate) fn run_validate(args: &ValidateArgs) -> Result<ValidationResult> {
    let manifest = require_manifest(args.path.as_deref())?;
    let registry = build_registry(&args.indexes)?;
    Ok(validate_manifest(&manifest, &registry))
}

/// Built-in modules plus everything the given export indexes declare.
fn build_registry(indexes: &[PathBuf]) -> Result<Registry> {
    let mut registry = Registry::builtin();
    for index in indexes {
        registry.load_index(index)?;
    }
    tracing::debug!(
        modules = registry.module_names().count(),
        "registry ready"
    );
    Ok(registry)
}
