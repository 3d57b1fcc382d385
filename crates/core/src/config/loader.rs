//! Configuration file loader for `.hydrator/` directory structure.
//!
//! This module provides functionality to load and parse all configuration files
//! from the `.hydrator/` directory, including:
//! - `config.toml`: Global schema settings
//! - `widgets/*.json`, `widgets/*.yaml`: Per-plugin widget configurations

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::{AppConfig, GlobalConfig, WidgetEntry, WidgetRegistry};
use hk_protocol::descriptor_models::PluginConfig;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Loads all configuration from the `.hydrator/` directory.
///
/// # Arguments
///
/// * `root` - Root directory containing the `.hydrator/` folder
///
/// # Returns
///
/// An `AppConfig` containing all loaded configuration. If directories or files
/// are missing (but the root exists), returns an empty/default configuration
/// rather than an error.
///
/// Widget files with bad content do not fail the load. They are recorded in
/// the registry as invalid so the editor can explain the fallback.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - Files exist but cannot be read
/// - `config.toml` has invalid syntax or fields
pub fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    let hk_dir = root.join(".hydrator");

    // If .hydrator doesn't exist, return default config
    if !hk_dir.exists() {
        return Ok(AppConfig::default());
    }

    let global = load_global_config(&hk_dir)?;
    let widgets = load_widgets(&hk_dir)?;

    debug!(widgets = widgets.len(), "loaded hydrator configuration");

    Ok(AppConfig { global, widgets })
}

/// Loads global configuration from `config.toml`.
fn load_global_config(hk_dir: &Path) -> ConfigResult<GlobalConfig> {
    let config_path = hk_dir.join("config.toml");

    if !config_path.exists() {
        return Ok(GlobalConfig::default());
    }

    let content =
        std::fs::read_to_string(&config_path).map_err(|source| ConfigError::FileRead {
            path: config_path.clone(),
            source,
        })?;

    let config: GlobalConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path,
            source,
        })?;

    Ok(config)
}

/// Loads all widget configurations from `widgets/`.
fn load_widgets(hk_dir: &Path) -> ConfigResult<WidgetRegistry> {
    let widgets_dir = hk_dir.join("widgets");
    let mut registry = WidgetRegistry::default();

    if !widgets_dir.exists() {
        return Ok(registry);
    }

    for entry in WalkDir::new(&widgets_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
    {
        let entry = entry.map_err(|source| ConfigError::DirectoryWalk {
            path: widgets_dir.clone(),
            source,
        })?;

        let path = entry.path();
        let ext = path.extension().and_then(|s| s.to_str());
        if !matches!(ext, Some("json" | "yaml" | "yml")) {
            continue;
        }
        let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let widget = match parse_widget(path, &content) {
            Ok(config) => WidgetEntry::Loaded(config),
            Err(err) => match err.no_config_reason() {
                Some(reason) => {
                    warn!(%err, "widget configuration unusable");
                    WidgetEntry::Invalid(reason)
                }
                None => return Err(err),
            },
        };

        registry.insert(key, widget);
    }

    Ok(registry)
}

/// Parses one widget file, telling syntax errors apart from structural ones.
pub fn parse_widget(path: &Path, content: &str) -> ConfigResult<PluginConfig> {
    let is_json = path.extension().and_then(|s| s.to_str()) == Some("json");

    if is_json {
        let value: serde_json::Value =
            serde_json::from_str(content).map_err(|source| ConfigError::JsonSyntax {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    } else {
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|source| ConfigError::YamlParse {
                path: path.to_path_buf(),
                source,
            })?;
        serde_yaml::from_value(value).map_err(|e| ConfigError::InvalidConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
