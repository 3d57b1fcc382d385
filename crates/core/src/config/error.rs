//! Error types for configuration loading.
//!
//! This module defines all errors that can occur during configuration file
//! parsing and loading operations.

use hk_protocol::descriptor_models::NoConfigReason;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read a configuration file from disk.
    #[error("Failed to read config file at {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("Failed to parse TOML file at {path}: {source}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A widget file is not valid JSON.
    #[error("Failed to parse JSON file at {path}: {source}")]
    JsonSyntax {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A widget file is not valid YAML.
    #[error("Failed to parse YAML file at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// Failed to walk directory structure.
    #[error("Failed to traverse directory {path}: {source}")]
    DirectoryWalk {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// Invalid configuration structure or missing required fields.
    #[error("Invalid configuration in {path}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },
}

impl ConfigError {
    /// How the editor should explain a widget file that failed to load.
    ///
    /// Returns `None` for errors unrelated to widget content.
    pub fn no_config_reason(&self) -> Option<NoConfigReason> {
        match self {
            Self::JsonSyntax { .. } | Self::YamlParse { .. } => Some(NoConfigReason::SyntaxError),
            Self::InvalidConfig { .. } => Some(NoConfigReason::SemanticsError),
            Self::FileRead { .. } | Self::TomlParse { .. } | Self::DirectoryWalk { .. } => None,
        }
    }
}

/// Type alias for Result with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;
