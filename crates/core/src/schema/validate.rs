//! Validation of a serialized output schema.
//!
//! Problems found here are shown to the user but never block editing.

use hk_protocol::schema_models::{RawField, RawSchema};
use std::collections::HashSet;

pub const DUPLICATE_FIELDS_MESSAGE: &str = "There are two or more fields with the same name.";

type Rule = fn(&[RawField], &mut Vec<String>);

const RULES: &[Rule] = &[has_unique_fields];

/// Runs every rule against a serialized schema.
///
/// An absent or unparseable schema has nothing to validate.
pub fn validate_schema(schema: Option<&str>) -> Vec<String> {
    let Some(parsed) = schema.and_then(|s| serde_json::from_str::<RawSchema>(s).ok()) else {
        return Vec::new();
    };

    let mut errors = Vec::new();
    for rule in RULES {
        rule(&parsed.fields, &mut errors);
    }
    errors
}

fn has_unique_fields(fields: &[RawField], errors: &mut Vec<String>) {
    let mut seen = HashSet::new();
    if !fields.iter().all(|field| seen.insert(field.name.as_str())) {
        errors.push(DUPLICATE_FIELDS_MESSAGE.to_string());
    }
}
