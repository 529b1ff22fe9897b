//! Configuration module for Waldzell.
//!
//! The only setting the metagame subsystem needs is the root of the document
//! tree. It is resolved once at startup and handed to the library explicitly.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable selecting the metagame root.
pub const METAGAMES_PATH_ENV: &str = "WALDZELL_METAGAMES_PATH";

/// Root used when nothing else is configured.
pub const DEFAULT_METAGAMES_PATH: &str = "./metagames";

/// Name the server reports during `initialize`.
pub const DEFAULT_SERVER_NAME: &str = "waldzell-metagames";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    /// Failed to read configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Metagame tree settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetagamesConfig {
    /// Root directory of the metagame tree.
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

fn default_root() -> PathBuf {
    PathBuf::from(DEFAULT_METAGAMES_PATH)
}

impl Default for MetagamesConfig {
    fn default() -> Self {
        Self { root: default_root() }
    }
}

/// Server identity settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_server_name")]
    pub name: String,
    #[serde(default = "default_server_version")]
    pub version: String,
}

fn default_server_name() -> String {
    DEFAULT_SERVER_NAME.to_string()
}

fn default_server_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { name: default_server_name(), version: default_server_version() }
    }
}

/// Root configuration for Waldzell.
///
/// ```toml
/// [metagames]
/// root = "/srv/metagames"
///
/// [server]
/// name = "waldzell-metagames"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub metagames: MetagamesConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid configuration TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError { path: path.to_path_buf(), source: e })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration: the optional file first, then the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file was given and cannot be loaded.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_root_override(std::env::var_os(METAGAMES_PATH_ENV)))
    }

    /// Replace the metagame root when `root` is set and non-empty.
    #[must_use]
    pub fn with_root_override(mut self, root: Option<impl Into<OsString>>) -> Self {
        if let Some(root) = root.map(Into::into).filter(|r| !r.is_empty()) {
            self.metagames.root = PathBuf::from(root);
        }
        self
    }
}
