//! Test fixtures for creating sample configurations and plugin nodes.

use hk_protocol::descriptor_models::{BackendProperties, BackendProperty, PluginPropertiesEntry};
use hk_protocol::node_models::PluginNode;
use std::collections::BTreeMap;
use tempfile::TempDir;

/// Widget configuration for the stream source, as shipped with a project.
#[allow(dead_code)]
pub const STREAM_WIDGET_JSON: &str = r#"{
  "groups": {
    "position": ["general", "advanced"],
    "general": {
      "display": "General",
      "position": ["name", "format"],
      "fields": {
        "name": {
          "widget": "textbox",
          "label": "Stream Name",
          "description": "Name of the stream to read"
        },
        "format": {
          "widget": "select",
          "label": "Format",
          "properties": { "values": ["csv", "clf", "syslog", "text"], "default": "text" }
        }
      }
    }
  },
  "outputschema": {
    "schema": {
      "schema-types": ["string", "int", "long", "boolean"],
      "schema-default-type": "string",
      "property-watch": "format"
    }
  }
}"#;

/// Create a temporary project directory with `.hydrator/` configuration.
///
/// This creates a complete test environment with:
/// - `.hydrator/config.toml` with the global schema settings
/// - `.hydrator/widgets/Stream-batchsource.json`
/// - `.hydrator/widgets/Table-batchsink.yaml`
/// - `.hydrator/widgets/Broken-transform.json` with a syntax error
///
/// Returns a TempDir that must be kept alive for the test duration.
#[allow(dead_code)]
pub fn create_test_project() -> std::io::Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    let root = temp_dir.path();

    std::fs::create_dir_all(root.join(".hydrator/widgets"))?;

    let config_toml = r#"
default-schema-types = ["string", "int", "long", "double"]
default-schema-type = "string"

[fixed-schemas]
clf = "clf"
syslog = "syslog"
"#;
    std::fs::write(root.join(".hydrator/config.toml"), config_toml)?;

    std::fs::write(
        root.join(".hydrator/widgets/Stream-batchsource.json"),
        STREAM_WIDGET_JSON,
    )?;

    let table_yaml = r#"
groups:
  position: [general]
  general:
    display: General
    position: [name, rowkey]
    fields:
      rowkey:
        widget: textbox
        label: Row Key
        properties:
          default: id
outputschema:
  implicit:
    id: long
    payload: [bytes, "null"]
"#;
    std::fs::write(root.join(".hydrator/widgets/Table-batchsink.yaml"), table_yaml)?;

    std::fs::write(
        root.join(".hydrator/widgets/Broken-transform.json"),
        r#"{ "groups": "#,
    )?;

    Ok(temp_dir)
}

#[allow(dead_code)]
fn backend(names: &[&str]) -> BackendProperties {
    names
        .iter()
        .map(|name| {
            let property = BackendProperty {
                name: (*name).to_string(),
                description: format!("Backend description of {name}"),
                required: *name == "name",
                ..Default::default()
            };
            ((*name).to_string(), property)
        })
        .collect()
}

/// Backend response for the stream source.
#[allow(dead_code)]
pub fn stream_properties_response() -> Vec<PluginPropertiesEntry> {
    vec![PluginPropertiesEntry {
        name: "Stream".to_string(),
        description: "Reads events from a stream".to_string(),
        plugin_type: "batchsource".to_string(),
        class_name: Some("co.hydrator.StreamSource".to_string()),
        properties: backend(&["name", "format", "schema", "duration"]),
    }]
}

/// A freshly dropped stream source node, before backend intake.
///
/// The host creates the `format` key with an empty value.
#[allow(dead_code)]
pub fn create_stream_node(id: &str) -> PluginNode {
    PluginNode {
        id: id.to_string(),
        name: "Stream".to_string(),
        plugin_type: "batchsource".to_string(),
        label: Some(id.to_string()),
        properties: BTreeMap::from([("format".to_string(), String::new())]),
        ..Default::default()
    }
}

/// A node with backend properties already in place.
#[allow(dead_code)]
pub fn create_node(id: &str, name: &str, plugin_type: &str, properties: &[&str]) -> PluginNode {
    PluginNode {
        id: id.to_string(),
        name: name.to_string(),
        plugin_type: plugin_type.to_string(),
        backend_properties: backend(properties),
        ..Default::default()
    }
}

/// A node whose output schema is already stored.
#[allow(dead_code)]
pub fn create_node_with_schema(id: &str, name: &str, schema: &str) -> PluginNode {
    PluginNode {
        id: id.to_string(),
        name: name.to_string(),
        plugin_type: "transform".to_string(),
        output_schema: Some(schema.to_string()),
        ..Default::default()
    }
}
