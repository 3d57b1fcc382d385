//! Schema reconciler implementation.

use hk_protocol::descriptor_models::{BackendProperties, GroupConfig, PluginConfig, WidgetField};
use hk_protocol::node_models::{PluginNode, PropertyPatch};
use hk_protocol::reconcile_models::{
    OutputSchemaProperty, ReconciledField, ReconciledGroup, Reconciliation,
};
use serde_json::Value;
use indexmap::IndexSet;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Name of the synthetic group collecting ungrouped backend properties.
pub const GENERIC_GROUP: &str = "generic";
const GENERIC_GROUP_DISPLAY: &str = "Generic";

const DEFAULT_WIDGET: &str = "textbox";
const DEFAULT_INFO: &str = "Info";
const NO_DESCRIPTION: &str = "No Description Available";

/// Merges a plugin's widget configuration with the properties its backend
/// declares.
///
/// Reconciliation never fails and never touches the node: defaults to apply
/// are returned as a [`PropertyPatch`].
///
/// # Example
///
/// ```
/// use hk_core::reconcile::{SchemaReconciler, GENERIC_GROUP};
/// use hk_protocol::descriptor_models::{BackendProperty, PluginConfig};
/// use hk_protocol::node_models::PluginNode;
///
/// let mut node = PluginNode { name: "Projection".to_string(), ..Default::default() };
/// node.backend_properties.insert("drop".to_string(), BackendProperty::default());
///
/// let reconciliation = SchemaReconciler::new(&node).reconcile(&PluginConfig::default());
/// assert_eq!(reconciliation.groups[0].name, GENERIC_GROUP);
/// ```
pub struct SchemaReconciler<'a> {
    backend: &'a BackendProperties,
    properties: &'a BTreeMap<String, String>,
}

impl<'a> SchemaReconciler<'a> {
    pub fn new(node: &'a PluginNode) -> Self {
        Self {
            backend: &node.backend_properties,
            properties: &node.properties,
        }
    }

    /// Reconciles the node's backend properties with `config`.
    ///
    /// A property used to store an explicit output schema is left out of the
    /// groups; it is edited through the schema editor instead.
    pub fn reconcile(&self, config: &PluginConfig) -> Reconciliation {
        let mut pending: IndexSet<String> = self.backend.keys().cloned().collect();

        let output_schema = config
            .outputschema
            .as_ref()
            .and_then(|declaration| declaration.explicit_property())
            .map(|(key, _)| {
                let exists = pending.shift_remove(key);
                OutputSchemaProperty {
                    key: key.to_string(),
                    exists,
                    required: self.backend.get(key).is_some_and(|p| p.required),
                }
            });

        let mut patch = PropertyPatch::default();
        let mut groups = Vec::with_capacity(config.groups.position.len() + 1);

        for name in &config.groups.position {
            match config.groups.definitions.get(name) {
                Some(group) => groups.push(self.reconcile_group(name, group, &mut pending, &mut patch)),
                None => warn!(group = %name, "group listed in position has no definition"),
            }
        }

        groups.extend(self.generic_group(&pending));

        debug!(
            groups = groups.len(),
            defaults = patch.set.len(),
            "reconciled plugin properties"
        );

        Reconciliation {
            groups,
            patch,
            output_schema,
        }
    }

    /// Reconciliation without any widget configuration: every backend
    /// property lands in the `generic` group.
    pub fn without_config(&self) -> Reconciliation {
        let pending: IndexSet<String> = self.backend.keys().cloned().collect();
        Reconciliation {
            groups: self.generic_group(&pending).into_iter().collect(),
            ..Default::default()
        }
    }

    fn reconcile_group(
        &self,
        name: &str,
        group: &GroupConfig,
        pending: &mut IndexSet<String>,
        patch: &mut PropertyPatch,
    ) -> ReconciledGroup {
        let mut reconciled = ReconciledGroup {
            name: name.to_string(),
            display: group.display.clone(),
            position: Vec::new(),
            fields: BTreeMap::new(),
        };

        for field in &group.position {
            if !pending.shift_remove(field) {
                continue;
            }

            let widget = group.fields.get(field).cloned().unwrap_or_default();

            if let Some(default) = widget.default_value().and_then(truthy_string) {
                if self.is_unset(field) {
                    patch.insert(field.clone(), default);
                }
            }

            reconciled.position.push(field.clone());
            reconciled.fields.insert(field.clone(), self.resolve(field, widget));
        }

        reconciled
    }

    fn resolve(&self, field: &str, widget: WidgetField) -> ReconciledField {
        let description = widget
            .description
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| self.backend_description(field));

        ReconciledField {
            widget: widget.widget.unwrap_or_else(|| DEFAULT_WIDGET.to_string()),
            label: widget.label.unwrap_or_else(|| field.to_string()),
            info: widget.info.unwrap_or_else(|| DEFAULT_INFO.to_string()),
            description,
            properties: widget.properties,
            attributes: widget.attributes,
        }
    }

    /// Ungrouped fields, in the order the backend declared them.
    fn generic_group(&self, pending: &IndexSet<String>) -> Option<ReconciledGroup> {
        if pending.is_empty() {
            return None;
        }

        let fields = pending
            .iter()
            .map(|field| {
                let resolved = ReconciledField {
                    widget: DEFAULT_WIDGET.to_string(),
                    label: field.clone(),
                    info: DEFAULT_INFO.to_string(),
                    description: self.backend_description(field),
                    properties: BTreeMap::new(),
                    attributes: BTreeMap::new(),
                };
                (field.clone(), resolved)
            })
            .collect();

        Some(ReconciledGroup {
            name: GENERIC_GROUP.to_string(),
            display: GENERIC_GROUP_DISPLAY.to_string(),
            position: pending.iter().cloned().collect(),
            fields,
        })
    }

    fn backend_description(&self, field: &str) -> String {
        self.backend
            .get(field)
            .map(|p| p.description.as_str())
            .filter(|d| !d.is_empty())
            .unwrap_or(NO_DESCRIPTION)
            .to_string()
    }

    /// Present in the bag with an empty value. A missing key is left alone.
    fn is_unset(&self, field: &str) -> bool {
        self.properties.get(field).is_some_and(String::is_empty)
    }
}

/// String form of a default value, or `None` for null, false, zero and "".
fn truthy_string(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
