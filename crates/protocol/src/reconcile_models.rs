//! Reconciliation output models.
//!
//! These are the presentation-ready structures the host renders: groups of
//! fields with all display metadata resolved.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::node_models::PropertyPatch;

/// A field with its display metadata fully resolved.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct ReconciledField {
    /// Widget kind, e.g. `textbox` or `dropdown`.
    pub widget: String,

    pub label: String,

    pub info: String,

    pub description: String,

    /// Widget properties copied from the configuration.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Value>,

    /// Remaining widget attributes, passed through to the renderer.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Value>,
}

/// A group of fields as rendered by the editor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct ReconciledGroup {
    /// Group key, `generic` for the synthetic group.
    pub name: String,

    /// Group heading.
    pub display: String,

    /// Field names in display order.
    pub position: Vec<String>,

    /// Resolved metadata keyed by field name.
    pub fields: BTreeMap<String, ReconciledField>,
}

/// The node property that holds an explicitly declared output schema.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct OutputSchemaProperty {
    /// Property key.
    pub key: String,

    /// Whether the backend accepts this property at all.
    pub exists: bool,

    /// Whether the backend requires it.
    pub required: bool,
}

/// Result of reconciling a widget configuration with backend properties.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
pub struct Reconciliation {
    /// Groups in display order; the synthetic `generic` group comes last.
    pub groups: Vec<ReconciledGroup>,

    /// Defaults to write into unset node properties.
    pub patch: PropertyPatch,

    /// Present when the plugin stores its schema in a node property.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<OutputSchemaProperty>,
}

impl Reconciliation {
    /// All field names across every group, in display order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|group| group.position.iter().map(String::as_str))
    }

    pub fn group(&self, name: &str) -> Option<&ReconciledGroup> {
        self.groups.iter().find(|group| group.name == name)
    }
}
