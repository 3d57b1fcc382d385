//! Edit session state machine.
//!
//! An `EditSession` owns the node being edited. The host feeds it `Op`s on
//! its event loop and renders the returned `Event`s. Everything runs
//! synchronously; the session is dropped when the editor closes and only the
//! node's property bag outlives it.

use crate::config::models::{GlobalConfig, WidgetRegistry};
use crate::reconcile::SchemaReconciler;
use crate::schema::builder::{implicit_fields, parse_fields, serialize_rows, OutputSchemaBuilder};
use crate::schema::validate::validate_schema;
use hk_protocol::descriptor_models::{NoConfigReason, PluginConfig, SchemaTypeConfig};
use hk_protocol::ipc::{Event, Op};
use hk_protocol::node_models::PluginNode;
use hk_protocol::reconcile_models::OutputSchemaProperty;
use hk_protocol::schema_models::{SchemaEditorState, SchemaRow};
use tracing::debug;
use uuid::Uuid;

/// State of one node-edit session.
#[derive(Debug, Clone)]
pub struct EditSession {
    id: Uuid,
    node: PluginNode,
    global: GlobalConfig,
    config: Option<PluginConfig>,
    schema_property: Option<OutputSchemaProperty>,
    closed: bool,
}

impl EditSession {
    /// Create a session for `node`. Nothing is reconciled until a
    /// configuration operation arrives.
    pub fn new(node: PluginNode, global: GlobalConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            node,
            global,
            config: None,
            schema_property: None,
            closed: false,
        }
    }

    /// Create a session and feed it the node's widget configuration from
    /// `registry`, or the reason there is none.
    ///
    /// Returns the session along with the events of that first operation.
    pub fn open(node: PluginNode, global: GlobalConfig, registry: &WidgetRegistry) -> (Self, Vec<Event>) {
        let op = match registry.fetch(&node.plugin_type, &node.name) {
            Ok(config) => Op::ConfigLoaded {
                config: Box::new(config.clone()),
            },
            Err(reason) => Op::ConfigUnavailable { reason },
        };

        let mut session = Self::new(node, global);
        let events = session.handle(op);
        (session, events)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn node(&self) -> &PluginNode {
        &self.node
    }

    /// Ends the session, handing back the edited node.
    pub fn into_node(self) -> PluginNode {
        self.node
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Where the explicit output schema is stored, once known.
    pub fn schema_property(&self) -> Option<&OutputSchemaProperty> {
        self.schema_property.as_ref()
    }

    /// Current state for the schema editor widget.
    ///
    /// `None` when the schema is fixed by the plugin or by a watched property.
    pub fn editor_state(&self) -> Option<SchemaEditorState> {
        if self.node.implicit_schema {
            return None;
        }
        let raw = parse_fields(self.node.output_schema.as_deref());
        self.builder().editor(raw.as_deref(), &self.node.properties)
    }

    /// Process one operation from the host.
    ///
    /// Operations after `Close` are ignored and produce no events.
    pub fn handle(&mut self, op: Op) -> Vec<Event> {
        if self.closed {
            debug!(session = %self.id, ?op, "ignoring operation on closed session");
            return Vec::new();
        }

        match op {
            Op::ConfigLoaded { config } => self.config_loaded(*config),
            Op::ConfigUnavailable { reason } => self.config_unavailable(reason),
            Op::SetProperty { key, value } => self.set_property(key, value),
            Op::EditSchema { rows } => self.edit_schema(&rows),
            Op::ClearSchema => {
                let changed = self.store_schema(None);
                self.schema_events(changed)
            }
            Op::Close => {
                self.closed = true;
                vec![Event::SessionClosed { session_id: self.id }]
            }
        }
    }

    fn config_loaded(&mut self, config: PluginConfig) -> Vec<Event> {
        if self.node.backend_properties.is_empty() {
            debug!(session = %self.id, plugin = %self.node.name, "plugin declares no properties");
            self.config = Some(config);
            return vec![Event::GroupsReconciled {
                session_id: self.id,
                groups: Vec::new(),
            }];
        }

        let reconciliation = SchemaReconciler::new(&self.node).reconcile(&config);
        let mut changed = reconciliation.patch.apply_to(&mut self.node.properties);
        self.schema_property = reconciliation.output_schema;

        let implicit = config
            .outputschema
            .as_ref()
            .and_then(|declaration| declaration.implicit_fields())
            .map(implicit_fields);
        self.config = Some(config);

        let schema = match &implicit {
            Some(fields) => {
                self.node.implicit_schema = true;
                OutputSchemaBuilder::new(None, &self.global).build(Some(fields.as_slice()), &self.node.properties)
            }
            None => {
                let raw = parse_fields(self.node.output_schema.as_deref());
                self.builder().build(raw.as_deref(), &self.node.properties)
            }
        };
        changed |= self.store_schema(schema);

        let mut events = vec![Event::GroupsReconciled {
            session_id: self.id,
            groups: reconciliation.groups,
        }];
        events.extend(self.schema_events(changed));
        events
    }

    fn config_unavailable(&mut self, reason: NoConfigReason) -> Vec<Event> {
        let reconciliation = SchemaReconciler::new(&self.node).without_config();
        vec![
            Event::GroupsReconciled {
                session_id: self.id,
                groups: reconciliation.groups,
            },
            Event::ConfigUnavailable {
                session_id: self.id,
                message: reason.message().to_string(),
            },
        ]
    }

    fn set_property(&mut self, key: String, value: String) -> Vec<Event> {
        if self.is_schema_key(&key) {
            let changed = self.store_schema(Some(value));
            return self.schema_events(changed);
        }

        let watched = self.type_config().and_then(|c| c.property_watch.as_deref()) == Some(key.as_str());
        self.node.properties.insert(key, value);

        if !watched || self.node.implicit_schema {
            return vec![self.properties_changed()];
        }

        let raw = parse_fields(self.node.output_schema.as_deref());
        let schema = self.builder().build(raw.as_deref(), &self.node.properties);
        self.store_schema(schema);
        self.schema_events(true)
    }

    fn edit_schema(&mut self, rows: &[SchemaRow]) -> Vec<Event> {
        if self.node.implicit_schema {
            debug!(session = %self.id, "ignoring edit of implicit schema");
            return Vec::new();
        }

        let schema = if self.builder().is_suppressed(&self.node.properties) {
            None
        } else {
            serialize_rows(rows)
        };
        let changed = self.store_schema(schema);
        self.schema_events(changed)
    }

    /// Writes `schema` to the node and mirrors it into the schema property.
    ///
    /// Returns `true` if the property bag changed.
    fn store_schema(&mut self, schema: Option<String>) -> bool {
        self.node.output_schema = schema;

        let Some(property) = self.schema_property.as_ref().filter(|p| p.exists) else {
            return false;
        };
        if self.node.properties.get(&property.key) == self.node.output_schema.as_ref() {
            return false;
        }

        match &self.node.output_schema {
            Some(schema) => {
                self.node
                    .properties
                    .insert(property.key.clone(), schema.clone());
            }
            None => {
                self.node.properties.remove(&property.key);
            }
        }
        true
    }

    fn schema_events(&self, properties_changed: bool) -> Vec<Event> {
        let mut events = Vec::with_capacity(3);
        if properties_changed {
            events.push(self.properties_changed());
        }
        events.push(Event::OutputSchemaChanged {
            session_id: self.id,
            schema: self.node.output_schema.clone(),
        });
        events.push(Event::SchemaValidated {
            session_id: self.id,
            errors: validate_schema(self.node.output_schema.as_deref()),
        });
        events
    }

    fn properties_changed(&self) -> Event {
        Event::PropertiesChanged {
            session_id: self.id,
            properties: self.node.properties.clone(),
        }
    }

    fn is_schema_key(&self, key: &str) -> bool {
        self.schema_property
            .as_ref()
            .is_some_and(|p| p.exists && p.key == key)
    }

    fn type_config(&self) -> Option<&SchemaTypeConfig> {
        self.config
            .as_ref()?
            .outputschema
            .as_ref()?
            .explicit_property()
            .map(|(_, config)| config)
    }

    fn builder(&self) -> OutputSchemaBuilder<'_> {
        OutputSchemaBuilder::new(self.type_config(), &self.global)
    }
}
