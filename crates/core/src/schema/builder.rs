//! Output schema builder.
//!
//! Turns a raw field list into the rows shown by the schema editor and the
//! serialized record written back into the node:
//!
//! 1. Normalize each raw field's type ([`FieldType::normalize`])
//! 2. Pad the rows so the editor always shows free slots
//! 3. Drop placeholders and unnamed rows, wrap the rest in the record envelope

use crate::config::models::GlobalConfig;
use crate::schema::field_type::FieldType;
use crate::schema::fixed::FixedSchemas;
use hk_protocol::descriptor_models::SchemaTypeConfig;
use hk_protocol::schema_models::{
    PlaceholderMarker, RawField, RawSchema, RecordField, RecordSchema, RecordType,
    SchemaEditorState, SchemaField, SchemaRow,
};
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, error, warn};

/// Below this many real fields the editor is padded up to it.
pub const MIN_EDITOR_ROWS: usize = 15;

/// Builds output schemas for one plugin.
///
/// # Example
///
/// ```
/// use hk_core::config::models::GlobalConfig;
/// use hk_core::schema::OutputSchemaBuilder;
/// use hk_protocol::schema_models::RawField;
/// use std::collections::BTreeMap;
///
/// let global = GlobalConfig::default();
/// let builder = OutputSchemaBuilder::new(None, &global);
/// let raw = vec![RawField {
///     name: "age".to_string(),
///     field_type: serde_json::json!(["int"]),
///     nullable: false,
/// }];
///
/// let schema = builder.build(Some(&raw), &BTreeMap::new());
/// assert_eq!(
///     schema.as_deref(),
///     Some(r#"{"type":"record","name":"etlSchemaBody","fields":[{"name":"age","type":["int","null"]}]}"#)
/// );
/// ```
#[derive(Debug, Clone)]
pub struct OutputSchemaBuilder<'a> {
    options: Vec<String>,
    default_type: String,
    property_watch: Option<String>,
    fixed: &'a FixedSchemas,
}

impl<'a> OutputSchemaBuilder<'a> {
    /// Creates a builder from the plugin's editor config, if it has one.
    ///
    /// Without a config, or with one listing no types, the global type list
    /// applies. The seed type is the config's default, else its first listed
    /// type, else the global default.
    pub fn new(type_config: Option<&SchemaTypeConfig>, global: &'a GlobalConfig) -> Self {
        let declared = type_config
            .map(|config| config.schema_types.as_slice())
            .filter(|types| !types.is_empty());

        let options = declared.unwrap_or(&global.default_schema_types).to_vec();
        let default_type = type_config
            .and_then(|config| config.schema_default_type.clone())
            .or_else(|| declared.and_then(|types| types.first().cloned()))
            .unwrap_or_else(|| global.default_schema_type.clone());

        Self {
            options,
            default_type,
            property_watch: type_config.and_then(|config| config.property_watch.clone()),
            fixed: &global.fixed_schemas,
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn default_type(&self) -> &str {
        &self.default_type
    }

    /// Property whose value can imply a fixed schema.
    pub fn property_watch(&self) -> Option<&str> {
        self.property_watch.as_deref()
    }

    /// Normalizes raw fields. Fields with an unreadable type are skipped.
    pub fn normalize(&self, raw: &[RawField]) -> Vec<SchemaField> {
        raw.iter()
            .filter_map(|field| match FieldType::try_from(&field.field_type) {
                Ok(field_type) => {
                    let (field_type, nullable) = field_type.normalize(field.nullable);
                    Some(SchemaField {
                        name: field.name.clone(),
                        field_type,
                        nullable,
                    })
                }
                Err(err) => {
                    warn!(field = %field.name, %err, "skipping schema field");
                    None
                }
            })
            .collect()
    }

    /// Editor rows for a raw field list.
    ///
    /// With no fields one unnamed field of the default type is seeded. Fewer
    /// than [`MIN_EDITOR_ROWS`] fields are padded to exactly that many rows;
    /// otherwise a single trailing placeholder is added.
    pub fn rows(&self, raw: Option<&[RawField]>) -> Vec<SchemaRow> {
        let mut rows: Vec<SchemaRow> = self
            .normalize(raw.unwrap_or_default())
            .into_iter()
            .map(SchemaRow::Field)
            .collect();

        if rows.len() < MIN_EDITOR_ROWS {
            if rows.is_empty() {
                rows.push(SchemaRow::Field(SchemaField::new(
                    "",
                    self.default_type.as_str(),
                    false,
                )));
            }
            rows.resize(MIN_EDITOR_ROWS, SchemaRow::Placeholder(PlaceholderMarker));
        } else {
            rows.push(SchemaRow::Placeholder(PlaceholderMarker));
        }

        rows
    }

    /// Whether the watched property implies a fixed schema.
    pub fn is_suppressed(&self, properties: &BTreeMap<String, String>) -> bool {
        self.property_watch
            .as_ref()
            .and_then(|key| properties.get(key))
            .is_some_and(|value| self.fixed.fixed_schema_id(value).is_some())
    }

    /// Serialized schema for a raw field list.
    ///
    /// Returns `None` when the schema is fixed by a watched property or when
    /// no named field remains. Callers treat `None` as "no schema configured".
    pub fn build(&self, raw: Option<&[RawField]>, properties: &BTreeMap<String, String>) -> Option<String> {
        if self.is_suppressed(properties) {
            debug!(watch = ?self.property_watch, "output schema fixed by watched property");
            return None;
        }
        serialize_rows(&self.rows(raw))
    }

    /// Editor state, or `None` when the schema is not user-editable.
    pub fn editor(
        &self,
        raw: Option<&[RawField]>,
        properties: &BTreeMap<String, String>,
    ) -> Option<SchemaEditorState> {
        if self.is_suppressed(properties) {
            return None;
        }
        Some(SchemaEditorState {
            rows: self.rows(raw),
            options: self.options.clone(),
            default_type: self.default_type.clone(),
        })
    }
}

/// Record envelope for the named fields among `rows`.
pub fn to_record(rows: &[SchemaRow]) -> Option<RecordSchema> {
    let fields: Vec<RecordField> = rows
        .iter()
        .filter_map(SchemaRow::as_field)
        .filter(|field| !field.name.is_empty())
        .map(|field| {
            let record_type = field.field_type.to_record_type();
            RecordField {
                name: field.name.clone(),
                field_type: if field.nullable {
                    RecordType::nullable(record_type)
                } else {
                    record_type
                },
            }
        })
        .collect();

    if fields.is_empty() {
        return None;
    }
    Some(RecordSchema::new(fields))
}

/// Serializes the named fields among `rows`, or `None` if there are none.
pub fn serialize_rows(rows: &[SchemaRow]) -> Option<String> {
    let record = to_record(rows)?;
    match serde_json::to_string(&record) {
        Ok(json) => Some(json),
        Err(err) => {
            error!(%err, "failed to serialize output schema");
            None
        }
    }
}

/// Reads the raw fields of a serialized schema.
///
/// Malformed JSON is treated as an absent schema.
pub fn parse_fields(schema: Option<&str>) -> Option<Vec<RawField>> {
    let schema = schema?;
    match serde_json::from_str::<RawSchema>(schema) {
        Ok(parsed) => Some(parsed.fields),
        Err(err) => {
            debug!(%err, "ignoring unparseable output schema");
            None
        }
    }
}

/// Raw fields for an implicit schema declaration, `name -> type`, in
/// declaration order.
pub fn implicit_fields(implicit: &IndexMap<String, Value>) -> Vec<RawField> {
    implicit
        .iter()
        .map(|(name, field_type)| RawField {
            name: name.clone(),
            field_type: field_type.clone(),
            nullable: false,
        })
        .collect()
}
