//! Custom assertion helpers for session events.
#![allow(dead_code)]

use hk_protocol::ipc::Event;
use hk_protocol::reconcile_models::ReconciledGroup;
use std::collections::BTreeMap;

/// Groups from the first `GroupsReconciled` event.
pub fn reconciled_groups(events: &[Event]) -> &[ReconciledGroup] {
    events
        .iter()
        .find_map(|e| match e {
            Event::GroupsReconciled { groups, .. } => Some(groups.as_slice()),
            _ => None,
        })
        .unwrap_or_else(|| panic!("No GroupsReconciled event in {events:?}"))
}

/// Property bag from the last `PropertiesChanged` event, if any.
pub fn last_properties(events: &[Event]) -> Option<&BTreeMap<String, String>> {
    events.iter().rev().find_map(|e| match e {
        Event::PropertiesChanged { properties, .. } => Some(properties),
        _ => None,
    })
}

/// Schema from the last `OutputSchemaChanged` event.
pub fn last_schema(events: &[Event]) -> Option<&str> {
    events
        .iter()
        .rev()
        .find_map(|e| match e {
            Event::OutputSchemaChanged { schema, .. } => Some(schema.as_deref()),
            _ => None,
        })
        .unwrap_or_else(|| panic!("No OutputSchemaChanged event in {events:?}"))
}

/// Assert that every schema change is followed by its validation result.
pub fn assert_schema_events_paired(events: &[Event]) {
    for (index, event) in events.iter().enumerate() {
        if matches!(event, Event::OutputSchemaChanged { .. }) {
            assert!(
                matches!(events.get(index + 1), Some(Event::SchemaValidated { .. })),
                "OutputSchemaChanged at {index} not followed by SchemaValidated: {events:?}"
            );
        }
    }
}

/// Display positions of every group, flattened.
pub fn field_layout(groups: &[ReconciledGroup]) -> String {
    groups
        .iter()
        .map(|g| format!("{}: {}", g.name, g.position.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}
