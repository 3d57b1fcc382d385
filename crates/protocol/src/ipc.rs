//! Edit-session protocol.
//!
//! This module defines the messages exchanged between the browser host and
//! a node-edit session:
//! - `Op`: Inputs from the host (fetched descriptors, user edits)
//! - `Event`: State changes the host should render
//!
//! The host delivers every `Op` on its single event loop, so a session
//! processes them one at a time and the last write wins.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;
use uuid::Uuid;

use crate::descriptor_models::{NoConfigReason, PluginConfig};
use crate::reconcile_models::ReconciledGroup;
use crate::schema_models::SchemaRow;

/// Operations sent from the host to an edit session.
///
/// Uses tagged enum serialization for TypeScript compatibility:
/// ```json
/// {
///   "type": "setProperty",
///   "payload": { "key": "format", "value": "clf" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Op {
    /// The widget configuration for the node's plugin has arrived.
    ConfigLoaded {
        #[ts(type = "unknown")]
        config: Box<PluginConfig>,
    },

    /// The widget configuration could not be fetched.
    ConfigUnavailable { reason: NoConfigReason },

    /// The user changed a plain property value.
    SetProperty { key: String, value: String },

    /// The user edited the output schema rows.
    EditSchema {
        #[ts(type = "Array<SchemaField | { empty: true }>")]
        rows: Vec<SchemaRow>,
    },

    /// The user cleared the output schema.
    ClearSchema,

    /// The editor was closed.
    Close,
}

/// Events sent from an edit session to the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// Groups are ready to render.
    GroupsReconciled {
        #[ts(type = "string")]
        session_id: Uuid,
        groups: Vec<ReconciledGroup>,
    },

    /// No widget configuration; all properties fall back to text boxes.
    ConfigUnavailable {
        #[ts(type = "string")]
        session_id: Uuid,
        message: String,
    },

    /// The node's property bag changed.
    PropertiesChanged {
        #[ts(type = "string")]
        session_id: Uuid,
        properties: BTreeMap<String, String>,
    },

    /// The node's serialized output schema changed.
    ///
    /// `schema` is `None` when no schema is configured.
    OutputSchemaChanged {
        #[ts(type = "string")]
        session_id: Uuid,
        schema: Option<String>,
    },

    /// Validation result for the current schema; empty `errors` means valid.
    ///
    /// Problems are reported, never enforced: editing continues.
    SchemaValidated {
        #[ts(type = "string")]
        session_id: Uuid,
        errors: Vec<String>,
    },

    /// The session was closed; later operations are ignored.
    SessionClosed {
        #[ts(type = "string")]
        session_id: Uuid,
    },
}
