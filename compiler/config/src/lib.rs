#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Protogen Configuration
//!
//! This crate provides configuration management for Protogen.
//! It handles loading, saving, and managing configuration files that specify:
//! - Where the CDP schema documents live
//! - Logging configuration
//! - Code generation parameters
//!
//! Configuration is stored in TOML format. Every section is optional in the file;
//! missing sections and keys fall back to [`Config::default`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    /// Failed to parse the TOML configuration file
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize configuration to TOML format
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Could not locate the user's configuration directory
    #[error("Could not find user config directory")]
    ConfigDirUnavailable,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Schema input locations
    pub schema: SchemaConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Code generation settings
    pub codegen: CodegenConfig,
}

/// Locations of the two CDP schema documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Browser protocol document, loaded first
    pub browser_protocol: PathBuf,
    /// JavaScript engine protocol document, loaded second
    pub js_protocol: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or filter directive (debug, info, warn, error)
    pub level: String,
    /// Log file path (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

/// Code generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Where to write generated modules
    pub output_dir: PathBuf,
    /// Run `rustfmt` over each generated file
    pub rustfmt: bool,
    /// Write `manifest.json` next to the generated modules
    pub manifest: bool,
}

impl Config {
    /// Load configuration from a TOML file at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save this configuration as a pretty-printed TOML file at `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Returns the default config file path:
    /// `{config_dir()}/protogen/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir =
            dirs::config_dir().ok_or(ConfigError::ConfigDirUnavailable)?.join("protogen");
        Ok(config_dir.join("config.toml"))
    }

    /// Load from [`Config::default_path`] if that file exists, else defaults.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Ok(path) if path.exists() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }

    /// Schema documents in load order: browser protocol, then JS protocol.
    pub fn schema_paths(&self) -> [PathBuf; 2] {
        [self.schema.browser_protocol.clone(), self.schema.js_protocol.clone()]
    }

    /// Get the default output directory for generated code
    pub fn default_output_dir() -> PathBuf {
        Self::default_output_dir_internal(
            std::env::var("OUT_DIR").ok(),
            std::env::current_dir().ok(),
        )
    }

    /// Internal function for testing - allows injection of environment values
    fn default_output_dir_internal(
        out_dir: Option<String>,
        current_dir: Option<PathBuf>,
    ) -> PathBuf {
        if let Some(out_dir) = out_dir {
            return PathBuf::from(out_dir).join("cdp");
        }
        if let Some(current_dir) = current_dir {
            return current_dir.join("generated").join("cdp");
        }
        PathBuf::from("generated").join("cdp")
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            browser_protocol: PathBuf::from("resources/browser_protocol.json"),
            js_protocol: PathBuf::from("resources/js_protocol.json"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self { Self { level: "info".to_string(), file: None } }
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self { output_dir: Config::default_output_dir(), rustfmt: false, manifest: true }
    }
}
