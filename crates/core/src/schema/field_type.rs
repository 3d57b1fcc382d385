//! Raw field types.
//!
//! A serialized schema spells a field's type in several shapes. They are
//! parsed once into [`FieldType`] so normalization is a plain match.

use crate::schema::error::{SchemaError, SchemaResult};
use hk_protocol::schema_models::SchemaType;
use serde_json::{Map, Value};

/// A field type as written in a serialized schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// `"int"`
    Scalar(String),
    /// `["int", "null"]`; only the first member is kept.
    NullableUnion(Box<FieldType>),
    /// `{"type": "map", "keys": "string", "values": "string"}`
    Map { keys: String, values: String },
    /// `{"type": "array", "items": "string"}`, or any other nested object
    /// carrying `items`.
    ArrayOf(Box<FieldType>),
}

impl FieldType {
    /// Reduces the type to what the schema editor can show.
    ///
    /// `nullable` is the raw field's own flag; a union forces it on.
    pub fn normalize(&self, nullable: bool) -> (SchemaType, bool) {
        match self {
            Self::Scalar(name) => (SchemaType::from(name.as_str()), nullable),
            Self::NullableUnion(inner) => (inner.normalize(nullable).0, true),
            Self::Map { .. } => (SchemaType::string_map(), nullable),
            Self::ArrayOf(items) => items.normalize(nullable),
        }
    }
}

impl TryFrom<&Value> for FieldType {
    type Error = SchemaError;

    fn try_from(value: &Value) -> SchemaResult<Self> {
        match value {
            Value::String(name) => Ok(Self::Scalar(name.clone())),
            Value::Array(members) => {
                let first = members.first().ok_or(SchemaError::EmptyUnion)?;
                Ok(Self::NullableUnion(Box::new(Self::try_from(first)?)))
            }
            Value::Object(object) if object.get("type").and_then(Value::as_str) == Some("map") => {
                Ok(Self::Map {
                    keys: member_name(object, "keys"),
                    values: member_name(object, "values"),
                })
            }
            Value::Object(object) => {
                let items = object
                    .get("items")
                    .ok_or_else(|| SchemaError::MissingItems(value.to_string()))?;
                Ok(Self::ArrayOf(Box::new(Self::try_from(items)?)))
            }
            other => Err(SchemaError::UnsupportedType(other.to_string())),
        }
    }
}

fn member_name(object: &Map<String, Value>, key: &str) -> String {
    object
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("string")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> FieldType {
        FieldType::try_from(&value).expect("type should parse")
    }

    #[test]
    fn test_scalar_keeps_raw_nullable() {
        let field_type = parse(json!("long"));
        assert_eq!(field_type, FieldType::Scalar("long".to_string()));
        assert_eq!(field_type.normalize(false), (SchemaType::from("long"), false));
        assert_eq!(field_type.normalize(true), (SchemaType::from("long"), true));
    }

    #[test]
    fn test_union_takes_first_member_and_is_nullable() {
        let field_type = parse(json!(["int"]));
        assert_eq!(
            field_type,
            FieldType::NullableUnion(Box::new(FieldType::Scalar("int".to_string())))
        );
        assert_eq!(field_type.normalize(false), (SchemaType::from("int"), true));
    }

    #[test]
    fn test_map_is_canonicalized() {
        let field_type = parse(json!({ "type": "map", "keys": "string", "values": "int" }));
        assert_eq!(
            field_type,
            FieldType::Map {
                keys: "string".to_string(),
                values: "int".to_string()
            }
        );
        assert_eq!(field_type.normalize(false), (SchemaType::string_map(), false));
    }

    #[test]
    fn test_nullable_map_union() {
        let field_type = parse(json!([{ "type": "map", "keys": "string", "values": "string" }, "null"]));
        assert_eq!(field_type.normalize(false), (SchemaType::string_map(), true));
    }

    #[test]
    fn test_nested_object_reduces_to_items() {
        let field_type = parse(json!({ "type": "array", "items": "string" }));
        assert_eq!(field_type.normalize(true), (SchemaType::from("string"), true));
    }

    #[test]
    fn test_map_option_name_scalar_becomes_map() {
        let field_type = parse(json!("map<string, string>"));
        assert_eq!(field_type.normalize(false).0, SchemaType::string_map());
    }

    #[test]
    fn test_malformed_types_are_errors() {
        assert_eq!(FieldType::try_from(&json!([])), Err(SchemaError::EmptyUnion));
        assert!(matches!(
            FieldType::try_from(&json!({ "type": "record" })),
            Err(SchemaError::MissingItems(_))
        ));
        assert!(matches!(
            FieldType::try_from(&json!(42)),
            Err(SchemaError::UnsupportedType(_))
        ));
    }
}
