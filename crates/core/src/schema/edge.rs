//! Schema flowing out of a node onto a connection.
//!
//! Downstream nodes display the schema of their input edge. For most nodes
//! that is simply their own output schema. Stream sources are special: every
//! event carries a timestamp and headers ahead of the body fields, and some
//! formats fix the body fields entirely.

use crate::schema::builder::parse_fields;
use crate::schema::field_type::FieldType;
use crate::schema::fixed::FixedSchemas;
use hk_protocol::node_models::PluginNode;
use hk_protocol::schema_models::{RawField, SchemaField};
use serde_json::json;
use tracing::warn;

/// Plugin name of stream sources.
pub const STREAM_PLUGIN: &str = "Stream";

/// Stream property selecting the event format.
pub const STREAM_FORMAT_PROPERTY: &str = "format";

/// Output fields of `node` as seen by its downstream edge.
///
/// Returns `None` when a non-stream node has no readable schema.
pub fn edge_schema(node: &PluginNode, fixed: &FixedSchemas) -> Option<Vec<SchemaField>> {
    let is_stream = node.name == STREAM_PLUGIN;

    let fields = if is_stream {
        let fixed_schema = node
            .properties
            .get(STREAM_FORMAT_PROPERTY)
            .and_then(|format| fixed.schema_for(format));
        let schema = fixed_schema.as_deref().or(node.output_schema.as_deref());

        let mut fields = parse_fields(schema).unwrap_or_else(|| vec![raw("body", json!("string"))]);
        fields.splice(
            0..0,
            [
                raw("ts", json!("long")),
                raw(
                    "headers",
                    json!({ "type": "map", "keys": "string", "values": "string" }),
                ),
            ],
        );
        fields
    } else {
        parse_fields(node.output_schema.as_deref())?
    };

    Some(
        fields
            .iter()
            .filter_map(|field| match FieldType::try_from(&field.field_type) {
                Ok(field_type) => {
                    let (field_type, nullable) = field_type.normalize(false);
                    Some(SchemaField {
                        name: field.name.clone(),
                        field_type,
                        nullable,
                    })
                }
                Err(err) => {
                    warn!(node = %node.id, field = %field.name, %err, "skipping edge schema field");
                    None
                }
            })
            .collect(),
    )
}

/// Edge schema for the node with id `source_id` among `nodes`.
pub fn schema_on_edge(
    nodes: &[PluginNode],
    source_id: &str,
    fixed: &FixedSchemas,
) -> Option<Vec<SchemaField>> {
    let source = nodes.iter().find(|node| node.id == source_id)?;
    edge_schema(source, fixed)
}

fn raw(name: &str, field_type: serde_json::Value) -> RawField {
    RawField {
        name: name.to_string(),
        field_type,
        nullable: false,
    }
}
