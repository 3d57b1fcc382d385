//! Intake of the backend's plugin-properties response.

use hk_protocol::descriptor_models::PluginPropertiesEntry;
use hk_protocol::node_models::PluginNode;

/// Stores the backend's declared properties on `node`.
///
/// Only the first entry is used. An empty response leaves the node with no
/// backend properties. The node description is filled from the backend when
/// the node has none.
pub fn apply_backend_properties(node: &mut PluginNode, entries: &[PluginPropertiesEntry]) {
    let Some(entry) = entries.first() else {
        node.backend_properties.clear();
        return;
    };

    node.backend_properties = entry.properties.clone();

    if node.description.as_deref().map_or(true, str::is_empty) {
        node.description = Some(entry.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hk_protocol::descriptor_models::BackendProperty;

    fn entry(description: &str) -> PluginPropertiesEntry {
        PluginPropertiesEntry {
            name: "Stream".to_string(),
            description: description.to_string(),
            properties: [("name".to_string(), BackendProperty::default())].into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_first_entry_supplies_properties_and_description() {
        let mut node = PluginNode::default();

        apply_backend_properties(&mut node, &[entry("Reads a stream"), entry("ignored")]);

        assert!(node.backend_properties.contains_key("name"));
        assert_eq!(node.description.as_deref(), Some("Reads a stream"));
    }

    #[test]
    fn test_existing_description_is_kept() {
        let mut node = PluginNode {
            description: Some("My stream".to_string()),
            ..Default::default()
        };

        apply_backend_properties(&mut node, &[entry("Reads a stream")]);

        assert_eq!(node.description.as_deref(), Some("My stream"));
    }

    #[test]
    fn test_empty_response_clears_properties() {
        let mut node = PluginNode::default();
        node.backend_properties
            .insert("stale".to_string(), BackendProperty::default());

        apply_backend_properties(&mut node, &[]);

        assert!(node.backend_properties.is_empty());
        assert!(node.description.is_none());
    }
}
