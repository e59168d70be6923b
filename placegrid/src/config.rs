//! User configuration file handling for ~/.placegrid/config.ini.
//!
//! Loads and saves user configuration with sensible defaults. The CLI reads
//! this for the provider API key and search defaults so they do not have to
//! be repeated on every invocation.

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use crate::search::DEFAULT_MAX_DENSITY_DEPTH;
use crate::service::DEFAULT_DIVISIONS;

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(std::io::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Provider settings
    pub provider: ProviderSettings,
    /// Search settings
    pub search: SearchSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Provider configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    /// Places API key
    pub api_key: Option<String>,
    /// HTTP timeout in seconds
    pub timeout: u64,
}

/// Search configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    /// Initial grid divisions per axis
    pub divisions: u32,
    /// Density-subdivision depth guard
    pub max_density_depth: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Directory for log files
    pub directory: String,
    /// Log file name
    pub file: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            divisions: DEFAULT_DIVISIONS,
            max_density_depth: DEFAULT_MAX_DENSITY_DEPTH,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: crate::logging::default_log_dir().to_string(),
            file: crate::logging::default_log_file().to_string(),
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            provider: ProviderSettings::default(),
            search: SearchSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

/// Returns the default config file path (~/.placegrid/config.ini).
pub fn config_file_path() -> PathBuf {
    let home = std::env::var_os("HOME").unwrap_or_else(|| ".".into());
    PathBuf::from(home).join(".placegrid").join("config.ini")
}

impl ConfigFile {
    /// Load configuration from the default path (~/.placegrid/config.ini).
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        let mut config = Self::default();

        if let Some(section) = ini.section(Some("provider")) {
            if let Some(key) = section.get("api_key") {
                if !key.is_empty() {
                    config.provider.api_key = Some(key.to_string());
                }
            }
            if let Some(timeout) = section.get("timeout") {
                config.provider.timeout =
                    parse_value("provider", "timeout", timeout, "expected seconds as integer")?;
            }
        }

        if let Some(section) = ini.section(Some("search")) {
            if let Some(divisions) = section.get("divisions") {
                config.search.divisions = parse_value(
                    "search",
                    "divisions",
                    divisions,
                    "expected a positive integer",
                )?;
                if config.search.divisions == 0 {
                    return Err(ConfigError::InvalidValue {
                        section: "search".to_string(),
                        key: "divisions".to_string(),
                        value: divisions.to_string(),
                        reason: "must be at least 1".to_string(),
                    });
                }
            }
            if let Some(depth) = section.get("max_density_depth") {
                config.search.max_density_depth = parse_value(
                    "search",
                    "max_density_depth",
                    depth,
                    "expected a non-negative integer",
                )?;
            }
        }

        if let Some(section) = ini.section(Some("logging")) {
            if let Some(directory) = section.get("directory") {
                config.logging.directory = directory.to_string();
            }
            if let Some(file) = section.get("file") {
                config.logging.file = file.to_string();
            }
        }

        Ok(config)
    }

    /// Save configuration to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::WriteError)?;
        }

        let mut ini = Ini::new();
        let mut provider = ini.with_section(Some("provider"));
        provider.set("timeout", self.provider.timeout.to_string());
        if let Some(key) = &self.provider.api_key {
            provider.set("api_key", key.clone());
        }
        ini.with_section(Some("search"))
            .set("divisions", self.search.divisions.to_string())
            .set(
                "max_density_depth",
                self.search.max_density_depth.to_string(),
            );
        ini.with_section(Some("logging"))
            .set("directory", self.logging.directory.clone())
            .set("file", self.logging.file.clone());

        ini.write_to_file(path).map_err(ConfigError::WriteError)
    }
}

fn parse_value<T: std::str::FromStr>(
    section: &str,
    key: &str,
    value: &str,
    reason: &str,
) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    })
}
