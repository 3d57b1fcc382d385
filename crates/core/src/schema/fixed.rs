//! Built-in fixed schemas.
//!
//! Some property values imply a schema the user must not edit: a stream read
//! in `clf` format always yields the common log format fields. The mapping
//! from watched value to schema id is configurable; the schemas themselves
//! are embedded in the binary with `rust-embed`.

use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Embedded schema files from the crate's `assets/schemas/` directory.
///
/// Each file is a serialized record envelope named `<id>.json`.
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/assets/schemas"]
struct SchemaAssets;

/// Watched property value to fixed schema id.
///
/// Defaults to `{clf -> clf, syslog -> syslog}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct FixedSchemas(BTreeMap<String, String>);

impl Default for FixedSchemas {
    fn default() -> Self {
        Self::from_pairs([("clf", "clf"), ("syslog", "syslog")])
    }
}

impl FixedSchemas {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(value, id)| (value.to_string(), id.to_string()))
                .collect(),
        )
    }

    /// Schema id implied by a watched property value.
    pub fn fixed_schema_id(&self, value: &str) -> Option<&str> {
        self.0.get(value).map(String::as_str)
    }

    /// Serialized schema implied by a watched property value.
    ///
    /// `None` when the value implies nothing or the id has no embedded file.
    pub fn schema_for(&self, value: &str) -> Option<String> {
        self.fixed_schema_id(value).and_then(builtin_schema)
    }
}

/// Embedded schema by id, e.g. `clf`.
pub fn builtin_schema(id: &str) -> Option<String> {
    SchemaAssets::get(&format!("{id}.json"))
        .map(|file| String::from_utf8_lossy(file.data.as_ref()).to_string())
}

/// Ids of all embedded schemas.
pub fn list_builtin_schemas() -> Vec<String> {
    SchemaAssets::iter()
        .filter_map(|path| path.strip_suffix(".json").map(str::to_string))
        .collect()
}
