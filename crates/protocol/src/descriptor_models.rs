//! Plugin descriptor models.
//!
//! Two sources describe a plugin's properties:
//! - The backend, which declares every property the plugin accepts
//!   (`BackendProperty`), fetched per plugin version.
//! - The widget configuration (`PluginConfig`), which groups properties and
//!   attaches display metadata. It lives in `.hydrator/widgets/*.json`.

use serde::{Deserialize, Serialize};
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::BTreeMap;
use ts_rs::TS;

/// A property declared by the backend for a plugin.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, TS)]
pub struct BackendProperty {
    /// Property name. The backend repeats the map key here.
    #[serde(default)]
    pub name: String,

    /// Human-readable description supplied by the plugin author.
    #[serde(default)]
    pub description: String,

    /// Whether the backend rejects a configuration lacking this property.
    #[serde(default)]
    pub required: bool,

    /// Declared Java-side type, e.g. `string` or `int`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Backend properties keyed by property name, in the order the backend
/// declared them.
pub type BackendProperties = IndexMap<String, BackendProperty>;

/// One entry of the backend's plugin-properties response.
///
/// The backend answers with a list; only the first entry is meaningful for
/// a given plugin name and artifact version.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PluginPropertiesEntry {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(rename = "type", default)]
    pub plugin_type: String,

    #[serde(default)]
    pub class_name: Option<String>,

    #[serde(default)]
    pub properties: BackendProperties,
}

/// Display metadata for a single property inside a widget group.
///
/// Every attribute is optional: reconciliation falls back to backend data or
/// fixed strings for anything missing. Attributes this crate does not
/// interpret (dropdown values, placeholders, ...) are kept in `attributes`
/// and handed to the renderer untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct WidgetField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Widget properties. `default` seeds an unset node property.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Value>,

    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl WidgetField {
    /// Returns the configured default value, if any.
    pub fn default_value(&self) -> Option<&Value> {
        self.properties.get("default")
    }
}

/// A named, ordered bundle of fields shown together in the editor.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct GroupConfig {
    /// Group heading.
    #[serde(default)]
    pub display: String,

    /// Field names in display order.
    #[serde(default)]
    pub position: Vec<String>,

    /// Widget metadata keyed by field name.
    #[serde(default)]
    pub fields: BTreeMap<String, WidgetField>,
}

/// The `groups` section of a widget configuration.
///
/// ```json
/// {
///   "position": ["general", "advanced"],
///   "general": { "display": "General", "position": ["name"], "fields": {} },
///   "advanced": { "display": "Advanced", "position": [], "fields": {} }
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Groups {
    /// Group names in display order. Authoritative.
    #[serde(default)]
    pub position: Vec<String>,

    /// Group definitions keyed by group name.
    #[serde(flatten)]
    pub definitions: BTreeMap<String, GroupConfig>,
}

/// Type configuration for a plugin's output-schema editor.
///
/// # Example
///
/// ```json
/// {
///   "schema-types": ["string", "int"],
///   "schema-default-type": "string",
///   "property-watch": "format"
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct SchemaTypeConfig {
    /// Types offered by the editor. Empty means the built-in list.
    #[serde(default)]
    pub schema_types: Vec<String>,

    /// Type of a freshly seeded field. Falls back to the first listed type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_default_type: Option<String>,

    /// Node property whose value may imply a fixed, non-editable schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_watch: Option<String>,
}

/// How a plugin declares its output schema.
///
/// Either the schema is implicit (fixed by the plugin, not editable) or it is
/// stored in one of the node's properties, named by the first map key in
/// declaration order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum OutputSchemaDeclaration {
    /// Fixed field list: field name to raw type.
    Implicit { implicit: IndexMap<String, Value> },

    /// Property key to editor configuration.
    Explicit(IndexMap<String, SchemaTypeConfig>),
}

impl OutputSchemaDeclaration {
    /// The node property that stores an explicit schema, with its editor config.
    pub fn explicit_property(&self) -> Option<(&str, &SchemaTypeConfig)> {
        match self {
            Self::Explicit(map) => map.first().map(|(k, v)| (k.as_str(), v)),
            Self::Implicit { .. } => None,
        }
    }

    /// The implicit field list, when the schema is fixed by the plugin.
    pub fn implicit_fields(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Self::Implicit { implicit } => Some(implicit),
            Self::Explicit(_) => None,
        }
    }
}

/// Widget configuration for one plugin.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PluginConfig {
    #[serde(default)]
    pub groups: Groups,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputschema: Option<OutputSchemaDeclaration>,
}

/// Why a widget configuration could not be obtained for a plugin.
///
/// Without a configuration the editor falls back to plain text boxes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, TS)]
pub enum NoConfigReason {
    /// No configuration file exists for the plugin.
    #[serde(rename = "NO_JSON_FOUND")]
    NoJsonFound,

    /// The configuration file is not valid JSON.
    #[serde(rename = "CONFIG_SYNTAX_JSON_ERROR")]
    SyntaxError,

    /// The configuration parses but has the wrong structure.
    #[serde(rename = "CONFIG_SEMANTICS_JSON_ERROR")]
    SemanticsError,
}

impl NoConfigReason {
    /// Message shown above the fallback text boxes.
    pub fn message(self) -> &'static str {
        match self {
            Self::NoJsonFound => {
                "No widget configuration found for this plugin. All properties are shown as text boxes."
            }
            Self::SyntaxError => {
                "The widget configuration for this plugin is not valid JSON. All properties are shown as text boxes."
            }
            Self::SemanticsError => {
                "The widget configuration for this plugin has an unexpected structure. All properties are shown as text boxes."
            }
        }
    }
}
