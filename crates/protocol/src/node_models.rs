//! Pipeline node models.
//!
//! A node is one plugin instance placed on the pipeline canvas. The editor
//! works on a single node at a time and writes its results back into the
//! node's property bag.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::descriptor_models::BackendProperties;

/// A plugin instance in an authored pipeline.
///
/// # Example
///
/// ```json
/// {
///   "id": "Stream-1",
///   "name": "Stream",
///   "type": "batchsource",
///   "properties": { "name": "purchases", "format": "csv" },
///   "outputSchema": "{\"type\":\"record\",\"name\":\"etlSchemaBody\",\"fields\":[]}",
///   "_backendProperties": { "name": { "description": "Stream name", "required": true } }
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct PluginNode {
    /// Canvas-unique identifier.
    #[serde(default)]
    pub id: String,

    /// Plugin name, e.g. `Stream` or `Table`.
    pub name: String,

    /// Plugin type, e.g. `batchsource` or `transform`.
    #[serde(rename = "type", default)]
    pub plugin_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Submitted property values.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,

    /// Serialized output schema, if one is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<String>,

    /// Properties the backend accepts for this plugin version.
    #[serde(rename = "_backendProperties", default)]
    pub backend_properties: BackendProperties,

    /// Set when the output schema is fixed by the plugin.
    #[serde(default)]
    pub implicit_schema: bool,
}

/// Property assignments produced by reconciliation.
///
/// The patch is returned to the caller instead of being written into the
/// node directly, so that applying it stays an explicit, undoable step.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, TS)]
pub struct PropertyPatch {
    /// Property key to value to assign.
    pub set: BTreeMap<String, String>,
}

impl PropertyPatch {
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.set.insert(key.into(), value.into());
    }

    /// Writes every assignment into `properties`.
    ///
    /// Returns `true` if at least one value changed.
    pub fn apply_to(&self, properties: &mut BTreeMap<String, String>) -> bool {
        let mut changed = false;
        for (key, value) in &self.set {
            if properties.get(key) != Some(value) {
                properties.insert(key.clone(), value.clone());
                changed = true;
            }
        }
        changed
    }
}
