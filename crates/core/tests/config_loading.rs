//! Integration tests for loading a `.hydrator/` project.

mod common;

use common::fixtures::*;
use hk_core::config::loader::load_config;
use hk_protocol::descriptor_models::NoConfigReason;

#[test]
fn test_load_project_config() {
    let project = create_test_project().expect("Failed to create test project");

    let config = load_config(project.path()).expect("Failed to load config");

    assert_eq!(
        config.global.default_schema_types,
        vec!["string", "int", "long", "double"]
    );
    assert_eq!(config.global.fixed_schemas.fixed_schema_id("clf"), Some("clf"));
    assert_eq!(config.widgets.len(), 3);
}

#[test]
fn test_widget_lookup_by_plugin_type_and_name() {
    let project = create_test_project().expect("Failed to create test project");
    let config = load_config(project.path()).expect("Failed to load config");

    let stream = config
        .widgets
        .fetch("batchsource", "Stream")
        .expect("Stream widget should load");
    assert_eq!(stream.groups.position, vec!["general", "advanced"]);

    let table = config
        .widgets
        .fetch("batchsink", "Table")
        .expect("YAML widget should load");
    assert!(table
        .outputschema
        .as_ref()
        .and_then(|d| d.implicit_fields())
        .is_some());
}

#[test]
fn test_unusable_widgets_report_reason() {
    let project = create_test_project().expect("Failed to create test project");
    let config = load_config(project.path()).expect("Failed to load config");

    assert_eq!(
        config.widgets.fetch("transform", "Broken"),
        Err(NoConfigReason::SyntaxError)
    );
    assert_eq!(
        config.widgets.fetch("transform", "Missing"),
        Err(NoConfigReason::NoJsonFound)
    );
}

#[test]
fn test_invalid_global_config_fails_load() {
    let project = create_test_project().expect("Failed to create test project");
    std::fs::write(
        project.path().join(".hydrator/config.toml"),
        "default-schema-types = 5",
    )
    .expect("Failed to overwrite config");

    assert!(load_config(project.path()).is_err());
}
