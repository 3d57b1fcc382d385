//! Configuration models that aggregate all settings.
//!
//! This module provides the unified `AppConfig` structure that combines
//! global schema settings and per-plugin widget configurations into a
//! single configuration object.

use crate::schema::fixed::FixedSchemas;
use hk_protocol::descriptor_models::{NoConfigReason, PluginConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Types offered by the schema editor when a plugin declares none.
pub const DEFAULT_SCHEMA_TYPES: [&str; 8] = [
    "boolean",
    "int",
    "long",
    "float",
    "double",
    "bytes",
    "string",
    "map<string, string>",
];

/// Type of a freshly seeded schema field when a plugin declares none.
pub const DEFAULT_SCHEMA_TYPE: &str = "string";

/// Global settings from `.hydrator/config.toml`.
///
/// # Example
///
/// ```toml
/// # .hydrator/config.toml
/// default-schema-types = ["string", "int", "long"]
/// default-schema-type = "string"
///
/// [fixed-schemas]
/// clf = "clf"
/// syslog = "syslog"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct GlobalConfig {
    /// Schema editor types used when a plugin's config lists none.
    pub default_schema_types: Vec<String>,

    /// Seed type used when a plugin's config names none.
    pub default_schema_type: String,

    /// Watched property values that imply a fixed, non-editable schema.
    pub fixed_schemas: FixedSchemas,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            default_schema_types: DEFAULT_SCHEMA_TYPES.iter().map(|t| (*t).to_string()).collect(),
            default_schema_type: DEFAULT_SCHEMA_TYPE.to_string(),
            fixed_schemas: FixedSchemas::default(),
        }
    }
}

/// A widget file as found on disk.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEntry {
    Loaded(PluginConfig),
    /// The file exists but could not be used.
    Invalid(NoConfigReason),
}

/// Widget configurations keyed by `<plugin>-<type>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetRegistry {
    entries: BTreeMap<String, WidgetEntry>,
}

impl WidgetRegistry {
    /// Registry key for a plugin, matching the widget file stem.
    pub fn key(plugin_type: &str, plugin_name: &str) -> String {
        format!("{plugin_name}-{plugin_type}")
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: WidgetEntry) {
        self.entries.insert(key.into(), entry);
    }

    /// Looks up the widget configuration for a plugin.
    ///
    /// # Errors
    ///
    /// Returns the reason the editor must fall back to plain text boxes.
    pub fn fetch(&self, plugin_type: &str, plugin_name: &str) -> Result<&PluginConfig, NoConfigReason> {
        match self.entries.get(&Self::key(plugin_type, plugin_name)) {
            Some(WidgetEntry::Loaded(config)) => Ok(config),
            Some(WidgetEntry::Invalid(reason)) => Err(*reason),
            None => Err(NoConfigReason::NoJsonFound),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Unified application configuration loaded from the `.hydrator/` directory.
///
/// # Example
///
/// ```rust,no_run
/// use hk_core::config::loader::load_config;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("."))?;
/// println!("Loaded {} widget configs", config.widgets.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Global settings from `config.toml`.
    pub global: GlobalConfig,

    /// Widget configurations from `widgets/*`.
    pub widgets: WidgetRegistry,
}
