//! Combined manifest validation.

use super::Manifest;
use super::fields::validate_fields;
use super::reference::validate_object_reference;
use crate::registry::Registry;
use serde::Serialize;
use toml::Value;

/// Component keys under `[flower.components]`, in check order.
pub const COMPONENTS: [&str; 2] = ["serverapp", "clientapp"];

/// Outcome of validating a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// True iff `errors` is empty.
    pub is_valid: bool,
    pub errors: Vec<String>,
    /// Advisory findings; never affect `is_valid`.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Build a result; validity follows from `errors`.
    pub fn new(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// A passing result with no findings.
    pub fn pass() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// A failing result with a single error and no warnings.
    pub fn fail(error: impl Into<String>) -> Self {
        Self::new(vec![error.into()], Vec::new())
    }

    /// Format the result for terminal output.
    ///
    /// ```text
    /// Manifest is invalid
    ///
    /// Errors:
    ///   - Property "version" missing in [project]
    ///
    /// Warnings:
    ///   - Recommended property "license" missing in [project]
    /// ```
    pub fn format_report(&self) -> String {
        let mut msg = if self.is_valid {
            String::from("Manifest is valid\n")
        } else {
            String::from("Manifest is invalid\n")
        };

        if !self.errors.is_empty() {
            msg.push_str("\nErrors:\n");
            for error in &self.errors {
                msg.push_str(&format!("  - {}\n", error));
            }
        }

        if !self.warnings.is_empty() {
            msg.push_str("\nWarnings:\n");
            for warning in &self.warnings {
                msg.push_str(&format!("  - {}\n", warning));
            }
        }

        msg
    }
}

/// Validate a manifest's fields, then its component references.
///
/// A structurally invalid manifest is returned as-is, warnings included, and
/// references are not checked. Otherwise `serverapp` and then `clientapp`
/// are resolved; the first failure is the only error reported. When both
/// resolve the result carries no warnings, even if field checks produced
/// some.
pub fn validate_manifest(manifest: &Manifest, registry: &Registry) -> ValidationResult {
    let fields = validate_fields(manifest);
    if !fields.is_valid {
        tracing::info!(errors = fields.errors.len(), "manifest fields invalid");
        return fields;
    }

    for component in COMPONENTS {
        if let Err(reason) = check_component(manifest, registry, component) {
            tracing::info!(component, %reason, "component reference invalid");
            return ValidationResult::fail(reason);
        }
    }

    tracing::info!("manifest valid");
    ValidationResult::pass()
}

fn check_component(
    manifest: &Manifest,
    registry: &Registry,
    component: &str,
) -> Result<(), String> {
    match manifest.get_path(&["flower", "components", component]) {
        Some(Value::String(reference)) => {
            validate_object_reference(reference, registry).map_err(|e| e.to_string())
        }
        _ => Err(format!(
            "Property \"{}\" in [flower.components] must be a string",
            component
        )),
    }
}
