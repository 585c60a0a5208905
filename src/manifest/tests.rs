//! Tests for manifest loading, validation, and defaults.

use super::*;
use crate::error::ManifestError;
use crate::registry::{Module, Object, Registry};
use crate::test_support::{DirGuard, write_project};
use serial_test::serial;
use tempfile::TempDir;
use toml::Table;

const VALID_MANIFEST: &str = r#"
[project]
name = "quickstart"
version = "1.0.0"
description = "Federated learning quickstart"
license = "Apache-2.0"
authors = ["The Flower Authors <hello@flower.ai>"]

[flower.components]
serverapp = "os:getcwd"
clientapp = "os:path.join"
"#;

fn manifest(toml: &str) -> Manifest {
    Manifest::from_toml_str(toml).unwrap()
}

fn table(toml: &str) -> Table {
    toml.parse::<Table>().unwrap()
}

fn app_registry() -> Registry {
    let mut registry = Registry::builtin();
    registry
        .register_module(Module::new("app.server").with_attr("app", Object::Declared))
        .register_module(Module::new("app.client").with_attr("app", Object::Declared));
    registry
}

// ============================================================================
// Loader
// ============================================================================

#[test]
fn test_load_explicit_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("custom.toml");
    std::fs::write(&path, VALID_MANIFEST).unwrap();

    let loaded = load_manifest(Some(&path)).unwrap().unwrap();
    assert_eq!(loaded.get_str_path(&["project", "name"]), Some("quickstart"));
}

#[test]
fn test_load_missing_file_is_none() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("flower.toml");

    assert!(load_manifest(Some(&path)).unwrap().is_none());
}

#[test]
fn test_load_directory_is_none() {
    let temp_dir = TempDir::new().unwrap();
    assert!(load_manifest(Some(temp_dir.path())).unwrap().is_none());
}

#[test]
fn test_load_malformed_toml_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("flower.toml");
    std::fs::write(&path, "[project\nname = ").unwrap();

    let err = load_manifest(Some(&path)).unwrap_err();
    assert!(matches!(err, ManifestError::Parse { .. }));
}

#[test]
#[serial]
fn test_load_default_path_from_cwd() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_project(temp_dir.path(), VALID_MANIFEST);
    assert!(path.ends_with(DEFAULT_MANIFEST_FILE));
    let _guard = DirGuard::new(temp_dir.path());

    let loaded = load_manifest(None).unwrap().unwrap();
    assert_eq!(loaded.get_str_path(&["project", "version"]), Some("1.0.0"));
}

#[test]
#[serial]
fn test_load_default_path_absent() {
    let temp_dir = TempDir::new().unwrap();
    let _guard = DirGuard::new(temp_dir.path());

    assert!(load_manifest(None).unwrap().is_none());
}

#[test]
fn test_loads_are_independent() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("flower.toml");
    std::fs::write(&path, VALID_MANIFEST).unwrap();

    let mut first = load_manifest(Some(&path)).unwrap().unwrap();
    first.table_mut().remove("project");

    let second = load_manifest(Some(&path)).unwrap().unwrap();
    assert!(second.contains("project"));
}

// ============================================================================
// Accessors
// ============================================================================

#[test]
fn test_get_path() {
    let m = manifest(VALID_MANIFEST);

    assert_eq!(
        m.get_str_path(&["flower", "components", "serverapp"]),
        Some("os:getcwd")
    );
    assert!(m.get_path(&["flower", "missing", "serverapp"]).is_none());
    assert!(m.get_path(&["project", "name", "deeper"]).is_none());
    assert!(m.get_path(&[]).is_none());
    assert!(m.section("project").is_some());
    assert!(m.section("missing").is_none());
}

// ============================================================================
// Structural validation
// ============================================================================

#[test]
fn test_fields_complete_manifest() {
    let result = validate_fields(&manifest(VALID_MANIFEST));

    assert!(result.is_valid);
    assert!(result.errors.is_empty());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_fields_missing_project() {
    let result = validate_fields(&manifest(
        r#"
[flower.components]
serverapp = "a:b"
clientapp = "c:d"
"#,
    ));

    assert!(!result.is_valid);
    assert_eq!(result.errors, vec!["Missing [project] section"]);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_fields_only_required_project_fields() {
    let result = validate_fields(&manifest(
        r#"
[project]
name = "x"
version = "1.0"

[flower.components]
serverapp = "a:b"
clientapp = "c:d"
"#,
    ));

    assert!(result.is_valid);
    assert!(result.errors.is_empty());
    assert_eq!(
        result.warnings,
        vec![
            "Recommended property \"description\" missing in [project]",
            "Recommended property \"license\" missing in [project]",
            "Recommended property \"authors\" missing in [project]",
        ]
    );
}

#[test]
fn test_fields_empty_manifest_reports_everything() {
    let result = validate_fields(&Manifest::default());

    assert!(!result.is_valid);
    assert_eq!(
        result.errors,
        vec!["Missing [project] section", "Missing [flower] section"]
    );
}

#[test]
fn test_fields_empty_project_section() {
    let result = validate_fields(&manifest(
        r#"
[project]

[flower.components]
serverapp = "a:b"
clientapp = "c:d"
"#,
    ));

    assert_eq!(
        result.errors,
        vec![
            "Property \"name\" missing in [project]",
            "Property \"version\" missing in [project]",
        ]
    );
    assert_eq!(result.warnings.len(), 3);
}

#[test]
fn test_fields_missing_components_section() {
    let result = validate_fields(&manifest(
        r#"
[project]
name = "x"
version = "1.0"

[flower]
"#,
    ));

    assert_eq!(result.errors, vec!["Missing [flower.components] section"]);
}

#[test]
fn test_fields_missing_both_components() {
    let result = validate_fields(&manifest(
        r#"
[project]
name = "x"
version = "1.0"

[flower.components]
"#,
    ));

    assert_eq!(
        result.errors,
        vec![
            "Property \"serverapp\" missing in [flower.components]",
            "Property \"clientapp\" missing in [flower.components]",
        ]
    );
}

#[test]
fn test_fields_non_table_section_has_no_keys() {
    let result = validate_fields(&manifest(
        r#"
project = "not a table"
flower = 3
"#,
    ));

    assert_eq!(
        result.errors,
        vec![
            "Property \"name\" missing in [project]",
            "Property \"version\" missing in [project]",
            "Missing [flower.components] section",
        ]
    );
}

// ============================================================================
// Reference validation
// ============================================================================

#[test]
fn test_reference_resolves_builtin() {
    let registry = Registry::builtin();
    assert_eq!(validate_object_reference("os:getcwd", &registry), Ok(()));
    assert_eq!(validate_object_reference("os:path.exists", &registry), Ok(()));
}

#[test]
fn test_reference_missing_attribute_in_module() {
    let err = validate_object_reference("os:nonexistent_attr_xyz", &Registry::builtin())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unable to load attribute nonexistent_attr_xyz from module os"
    );
}

#[test]
fn test_reference_nested_attribute_failure_reports_full_path() {
    let err = validate_object_reference("os:getcwd.inner", &Registry::builtin()).unwrap_err();
    assert_eq!(
        err,
        ReferenceError::AttributeNotFound {
            module: "os".to_string(),
            attributes: "getcwd.inner".to_string(),
        }
    );
}

#[test]
fn test_reference_unknown_module() {
    let err = validate_object_reference("badmodule:fn", &Registry::builtin()).unwrap_err();
    assert_eq!(err.to_string(), "Unable to load module badmodule");
}

#[test]
fn test_reference_syntax_errors() {
    let registry = Registry::builtin();

    let err = validate_object_reference(":getcwd", &registry).unwrap_err();
    assert_eq!(err.to_string(), "Missing module in :getcwd");

    let err = validate_object_reference("os:", &registry).unwrap_err();
    assert_eq!(err.to_string(), "Missing attribute in os:");

    let err = validate_object_reference("os", &registry).unwrap_err();
    assert_eq!(err.to_string(), "Missing attribute in os");

    let err = validate_object_reference("", &registry).unwrap_err();
    assert_eq!(err.to_string(), "Missing module in ");
}

#[test]
fn test_reference_splits_on_first_colon() {
    let object_ref = ObjectRef::parse("app.server:run:main").unwrap();
    assert_eq!(object_ref.module, "app.server");
    assert_eq!(object_ref.attributes, "run:main");
    assert_eq!(object_ref.attribute_path().collect::<Vec<_>>(), vec!["run:main"]);

    let object_ref = ObjectRef::parse("os:path.join").unwrap();
    assert_eq!(object_ref.attribute_path().collect::<Vec<_>>(), vec!["path", "join"]);
}

#[test]
fn test_resolve_returns_handle() {
    let registry = Registry::builtin();
    let object = resolve_object_reference("os:sep", &registry).unwrap();
    assert_eq!(
        object.downcast_ref::<&str>(),
        Some(&std::path::MAIN_SEPARATOR_STR)
    );
}

// ============================================================================
// Combined validation
// ============================================================================

#[test]
fn test_validate_manifest_valid() {
    let result = validate_manifest(&manifest(VALID_MANIFEST), &Registry::builtin());
    assert_eq!(result, ValidationResult::pass());
}

#[test]
fn test_validate_manifest_structural_failure_keeps_warnings() {
    let result = validate_manifest(
        &manifest(
            r#"
[project]
name = "x"

[flower.components]
serverapp = "badmodule:fn"
clientapp = "badmodule:fn"
"#,
        ),
        &Registry::builtin(),
    );

    assert!(!result.is_valid);
    assert_eq!(result.errors, vec!["Property \"version\" missing in [project]"]);
    assert_eq!(result.warnings.len(), 3);
}

#[test]
fn test_validate_manifest_bad_serverapp_module() {
    let result = validate_manifest(
        &manifest(
            r#"
[project]
name = "x"
version = "1.0"

[flower.components]
serverapp = "badmodule:fn"
clientapp = "os:getcwd"
"#,
        ),
        &Registry::builtin(),
    );

    assert!(!result.is_valid);
    assert_eq!(result.errors, vec!["Unable to load module badmodule"]);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_manifest_serverapp_checked_before_clientapp() {
    let result = validate_manifest(
        &manifest(
            r#"
[project]
name = "x"
version = "1.0"

[flower.components]
serverapp = "os:missing"
clientapp = "other:missing"
"#,
        ),
        &Registry::builtin(),
    );

    assert_eq!(
        result.errors,
        vec!["Unable to load attribute missing from module os"]
    );
}

#[test]
fn test_validate_manifest_bad_clientapp() {
    let result = validate_manifest(
        &manifest(
            r#"
[project]
name = "x"
version = "1.0"

[flower.components]
serverapp = "app.server:app"
clientapp = "app.client"
"#,
        ),
        &app_registry(),
    );

    assert_eq!(result.errors, vec!["Missing attribute in app.client"]);
}

#[test]
fn test_validate_manifest_success_drops_field_warnings() {
    let result = validate_manifest(
        &manifest(
            r#"
[project]
name = "x"
version = "1.0"

[flower.components]
serverapp = "app.server:app"
clientapp = "app.client:app"
"#,
        ),
        &app_registry(),
    );

    assert!(result.is_valid);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_manifest_non_string_reference() {
    let result = validate_manifest(
        &manifest(
            r#"
[project]
name = "x"
version = "1.0"

[flower.components]
serverapp = 42
clientapp = "os:getcwd"
"#,
        ),
        &Registry::builtin(),
    );

    assert_eq!(
        result.errors,
        vec!["Property \"serverapp\" in [flower.components] must be a string"]
    );
}

#[test]
fn test_validate_manifest_runs_lazy_initializer() {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    let loaded = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&loaded);

    let mut registry = Registry::builtin();
    registry.register_lazy("app.server", move || {
        flag.store(true, Ordering::SeqCst);
        Module::new("app.server").with_attr("app", Object::Declared)
    });

    let result = validate_manifest(
        &manifest(
            r#"
[project]
name = "x"
version = "1.0"

[flower.components]
serverapp = "app.server:app"
clientapp = "os:getcwd"
"#,
        ),
        &registry,
    );

    assert!(result.is_valid);
    assert!(loaded.load(Ordering::SeqCst));
}

#[test]
fn test_format_report() {
    let result = ValidationResult::new(
        vec!["Missing [flower] section".to_string()],
        vec!["Recommended property \"license\" missing in [project]".to_string()],
    );

    assert_eq!(
        result.format_report(),
        "Manifest is invalid\n\
         \nErrors:\n  - Missing [flower] section\n\
         \nWarnings:\n  - Recommended property \"license\" missing in [project]\n"
    );
    assert_eq!(ValidationResult::pass().format_report(), "Manifest is valid\n");
}

#[test]
fn test_result_serializes_to_json() {
    let json = serde_json::to_value(ValidationResult::fail("Unable to load module x")).unwrap();
    assert_eq!(json["is_valid"], false);
    assert_eq!(json["errors"][0], "Unable to load module x");
    assert_eq!(json["warnings"].as_array().unwrap().len(), 0);
}

// ============================================================================
// Defaults
// ============================================================================

#[test]
fn test_defaults_fill_missing_keys() {
    let mut config = table("a = 1");
    apply_defaults(&mut config, &table("a = 2\nb = 3"));
    assert_eq!(config, table("a = 1\nb = 3"));
}

#[test]
fn test_defaults_deep_merge() {
    let mut config = table("[a]\nx = 1");
    apply_defaults(&mut config, &table("[a]\nx = 2\ny = 3"));
    assert_eq!(config, table("[a]\nx = 1\ny = 3"));
}

#[test]
fn test_defaults_keep_mismatched_types() {
    let mut config = table("a = \"explicit\"\n[b]\nx = 1");
    apply_defaults(&mut config, &table("b = 5\n[a]\nx = 2"));
    assert_eq!(config, table("a = \"explicit\"\n[b]\nx = 1"));
}

#[test]
fn test_defaults_are_idempotent() {
    let defaults = table("[project]\nlicense = \"Apache-2.0\"\n[flower.engine]\nname = \"simulation\"");
    let once = manifest("[project]\nname = \"x\"").with_defaults(&defaults);
    let twice = once.clone().with_defaults(&defaults);

    assert_eq!(once, twice);
    assert_eq!(once.get_str_path(&["project", "name"]), Some("x"));
    assert_eq!(once.get_str_path(&["project", "license"]), Some("Apache-2.0"));
    assert_eq!(
        once.get_str_path(&["flower", "engine", "name"]),
        Some("simulation")
    );
}

#[test]
fn test_load_defaults_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("defaults.toml");
    std::fs::write(&path, "[project]\nlicense = \"MIT\"\n").unwrap();

    let defaults = load_defaults(&path).unwrap();
    let merged = manifest("[project]\nname = \"x\"").with_defaults(&defaults);
    assert_eq!(merged.get_str_path(&["project", "license"]), Some("MIT"));
}

#[test]
fn test_to_toml_string_round_trips_merge() {
    let merged = manifest(VALID_MANIFEST).with_defaults(&table("[flower.engine]\nname = \"sim\""));
    let text = merged.to_toml_string().unwrap();
    assert_eq!(Manifest::from_toml_str(&text).unwrap(), merged);
}
