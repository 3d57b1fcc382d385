//! Output schema models.
//!
//! A node's output schema appears in three shapes:
//! - Raw fields, as found in a previously serialized schema or an implicit
//!   declaration (`RawField`)
//! - Editor rows: normalized fields plus placeholder rows (`SchemaRow`)
//! - The serialized record envelope written back to the node (`RecordSchema`)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use ts_rs::TS;

/// Name of the record envelope wrapping every serialized output schema.
pub const RECORD_NAME: &str = "etlSchemaBody";

/// A field as it appears in a serialized schema, before normalization.
///
/// `field_type` is kept as raw JSON: a type name, a nullable union array,
/// or a nested type object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RawField {
    #[serde(default)]
    pub name: String,

    #[serde(rename = "type", default)]
    pub field_type: Value,

    #[serde(default)]
    pub nullable: bool,
}

/// Raw schema document; only `fields` is read.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RawSchema {
    #[serde(default)]
    pub fields: Vec<RawField>,
}

/// A normalized column type.
///
/// Serialized by its editor option name, e.g. `"int"` or
/// `"map<string, string>"`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(into = "String", from = "String")]
pub enum SchemaType {
    Scalar(String),
    Map { keys: String, values: String },
}

impl SchemaType {
    /// The canonical map type, `map<string, string>`.
    pub fn string_map() -> Self {
        Self::Map {
            keys: "string".to_string(),
            values: "string".to_string(),
        }
    }

    /// Representation inside a serialized record.
    pub fn to_record_type(&self) -> RecordType {
        match self {
            Self::Scalar(name) => RecordType::Named(name.clone()),
            Self::Map { keys, values } => RecordType::Map(MapType {
                kind: "map".to_string(),
                keys: keys.clone(),
                values: values.clone(),
            }),
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(name) => f.write_str(name),
            Self::Map { keys, values } => write!(f, "map<{keys}, {values}>"),
        }
    }
}

impl From<String> for SchemaType {
    fn from(name: String) -> Self {
        let inner = name
            .trim()
            .strip_prefix("map<")
            .and_then(|rest| rest.strip_suffix('>'))
            .and_then(|args| args.split_once(','));
        match inner {
            Some((keys, values)) => Self::Map {
                keys: keys.trim().to_string(),
                values: values.trim().to_string(),
            },
            None => Self::Scalar(name),
        }
    }
}

impl From<&str> for SchemaType {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<SchemaType> for String {
    fn from(schema_type: SchemaType) -> Self {
        schema_type.to_string()
    }
}

/// One output-schema entry as edited by the user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct SchemaField {
    pub name: String,

    #[serde(rename = "type")]
    #[ts(type = "string")]
    pub field_type: SchemaType,

    #[serde(default)]
    pub nullable: bool,
}

impl SchemaField {
    pub fn new(name: impl Into<String>, field_type: impl Into<SchemaType>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            nullable,
        }
    }
}

/// Marker type for an empty editor row, serialized as `{"empty": true}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderMarker;

impl<'de> Deserialize<'de> for PlaceholderMarker {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Row {
            empty: bool,
        }

        let row = Row::deserialize(deserializer)?;
        if row.empty {
            Ok(PlaceholderMarker)
        } else {
            Err(serde::de::Error::custom("expected empty: true"))
        }
    }
}

impl Serialize for PlaceholderMarker {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut row = serializer.serialize_struct("PlaceholderMarker", 1)?;
        row.serialize_field("empty", &true)?;
        row.end()
    }
}

/// A row in the schema editor.
///
/// Placeholder rows keep the editor's empty entry slots visible and are
/// never serialized into the schema.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum SchemaRow {
    Field(SchemaField),
    Placeholder(PlaceholderMarker),
}

impl SchemaRow {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }

    pub fn as_field(&self) -> Option<&SchemaField> {
        match self {
            Self::Field(field) => Some(field),
            Self::Placeholder(_) => None,
        }
    }
}

/// State handed to the schema editor widget.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
pub struct SchemaEditorState {
    #[ts(type = "Array<SchemaField | { empty: true }>")]
    pub rows: Vec<SchemaRow>,

    /// Types offered in the type dropdown.
    pub options: Vec<String>,

    /// Type given to a new row.
    pub default_type: String,
}

/// Nested map type inside a serialized record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MapType {
    #[serde(rename = "type")]
    pub kind: String,
    pub keys: String,
    pub values: String,
}

/// A field type inside a serialized record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum RecordType {
    Named(String),
    Map(MapType),
    Union(Vec<RecordType>),
}

impl RecordType {
    /// Wraps `inner` as a nullable union, `[inner, "null"]`.
    pub fn nullable(inner: RecordType) -> Self {
        Self::Union(vec![inner, Self::Named("null".to_string())])
    }
}

/// A field inside a serialized record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RecordField {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: RecordType,
}

/// The serialized output schema envelope.
///
/// ```json
/// {
///   "type": "record",
///   "name": "etlSchemaBody",
///   "fields": [{ "name": "age", "type": ["int", "null"] }]
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    #[serde(rename = "type")]
    pub kind: String,

    pub name: String,

    pub fields: Vec<RecordField>,
}

impl RecordSchema {
    pub fn new(fields: Vec<RecordField>) -> Self {
        Self {
            kind: "record".to_string(),
            name: RECORD_NAME.to_string(),
            fields,
        }
    }
}
