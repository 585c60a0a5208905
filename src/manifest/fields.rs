//! Required and recommended field checks.

use super::Manifest;
use super::validate::{COMPONENTS, ValidationResult};
use toml::{Table, Value};

const REQUIRED_PROJECT_FIELDS: [&str; 2] = ["name", "version"];
const RECOMMENDED_PROJECT_FIELDS: [&str; 3] = ["description", "license", "authors"];

/// Check that every required section and field is present.
///
/// Every check runs, so one pass reports all missing fields; checks under a
/// missing section are skipped. Missing recommended fields are warnings and
/// never make the result invalid.
pub fn validate_fields(manifest: &Manifest) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    match manifest.table().get("project") {
        None => errors.push("Missing [project] section".to_string()),
        Some(project) => {
            let project = keys_of(project);
            for field in REQUIRED_PROJECT_FIELDS {
                if !project.contains_key(field) {
                    errors.push(format!("Property \"{}\" missing in [project]", field));
                }
            }
            for field in RECOMMENDED_PROJECT_FIELDS {
                if !project.contains_key(field) {
                    warnings.push(format!(
                        "Recommended property \"{}\" missing in [project]",
                        field
                    ));
                }
            }
        }
    }

    match manifest.table().get("flower") {
        None => errors.push("Missing [flower] section".to_string()),
        Some(flower) => match keys_of(flower).get("components") {
            None => errors.push("Missing [flower.components] section".to_string()),
            Some(components) => {
                let components = keys_of(components);
                for component in COMPONENTS {
                    if !components.contains_key(component) {
                        errors.push(format!(
                            "Property \"{}\" missing in [flower.components]",
                            component
                        ));
                    }
                }
            }
        },
    }

    for error in &errors {
        tracing::debug!(%error, "manifest field error");
    }
    for warning in &warnings {
        tracing::debug!(%warning, "manifest field warning");
    }

    ValidationResult::new(errors, warnings)
}

/// The keys of a section; a non-table value has none.
fn keys_of(value: &Value) -> &Table {
    static EMPTY: std::sync::LazyLock<Table> = std::sync::LazyLock::new(Table::new);
    value.as_table().unwrap_or(&EMPTY)
}
