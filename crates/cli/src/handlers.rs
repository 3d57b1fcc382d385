//! Command handlers.

use color_eyre::eyre::{eyre, Result, WrapErr};
use colored::Colorize;
use hk_core::config::loader::load_config;
use hk_core::reconcile::SchemaReconciler;
use hk_core::schema::{schema_on_edge, validate_schema};
use hk_core::session::EditSession;
use hk_protocol::node_models::PluginNode;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).wrap_err_with(|| format!("Failed to parse {}", path.display()))
}

/// Reconcile a node against its widget configuration.
pub fn reconcile(node_path: &Path, root: &Path) -> Result<()> {
    let config = load_config(root)?;
    let node: PluginNode = read_json(node_path)?;
    let reconciler = SchemaReconciler::new(&node);

    let reconciliation = match config.widgets.fetch(&node.plugin_type, &node.name) {
        Ok(widget) => reconciler.reconcile(widget),
        Err(reason) => {
            debug!(plugin = %node.name, ?reason, "reconciling without widget configuration");
            eprintln!("{} {}", "!".yellow(), reason.message());
            reconciler.without_config()
        }
    };

    println!("{}", serde_json::to_string_pretty(&reconciliation)?);
    Ok(())
}

/// Open an edit session on a node and print the resulting output schema.
pub fn schema(node_path: &Path, root: &Path) -> Result<()> {
    let config = load_config(root)?;
    let node: PluginNode = read_json(node_path)?;

    let (session, events) = EditSession::open(node, config.global, &config.widgets);
    debug!(session = %session.id(), events = events.len(), "opened edit session");

    match session.node().output_schema.as_deref() {
        Some(schema) => {
            println!("{schema}");
            for error in validate_schema(Some(schema)) {
                eprintln!("{} {error}", "!".yellow());
            }
        }
        None => println!("{}", "no schema configured".dimmed()),
    }
    Ok(())
}

/// Validate a serialized schema. Returns `false` when problems were found.
pub fn validate(schema_path: &Path) -> Result<bool> {
    let content = std::fs::read_to_string(schema_path)
        .wrap_err_with(|| format!("Failed to read {}", schema_path.display()))?;

    let errors = validate_schema(Some(&content));
    if errors.is_empty() {
        println!("{} Schema is valid", "✓".green());
        return Ok(true);
    }

    for error in &errors {
        println!("{} {error}", "✗".red());
    }
    Ok(false)
}

/// Print the edge schema of one node among a canvas of nodes.
pub fn edge(nodes_path: &Path, source: &str, root: &Path) -> Result<()> {
    let config = load_config(root)?;
    let nodes: Vec<PluginNode> = read_json(nodes_path)?;

    let fields = schema_on_edge(&nodes, source, &config.global.fixed_schemas)
        .ok_or_else(|| eyre!("Node {source} not found or has no readable output schema"))?;

    println!("{}", serde_json::to_string_pretty(&fields)?);
    Ok(())
}
