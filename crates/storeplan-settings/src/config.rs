//! Configuration for StorePlan
//!
//! Supports JSON and TOML files stored in platform-specific directories.
//!
//! Configuration is organized into sections:
//! - Editor defaults (fixture flavor, spawn point, auto-select)
//! - Storage (layout directory, store name)
//! - Logging (level)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use storeplan_core::EditorFlavor;

use crate::error::{ConfigError, SettingsError, SettingsResult};

const APP_DIR: &str = "storeplan";
const CONFIG_FILE: &str = "config.toml";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Editor defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Template for new fixtures
    pub flavor: EditorFlavor,
    /// Where new fixtures are placed
    pub spawn_x: f64,
    pub spawn_y: f64,
    /// Select new fixtures immediately
    pub auto_select_new: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            flavor: EditorFlavor::Triangle,
            spawn_x: 500.0,
            spawn_y: 500.0,
            auto_select_new: false,
        }
    }
}

/// Layout storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding one `<store>.json` per store
    pub layout_directory: PathBuf,
    /// Store opened at startup
    pub store_name: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            layout_directory: dirs::data_dir()
                .map(|dir| dir.join(APP_DIR).join("layouts"))
                .unwrap_or_else(|| PathBuf::from("layouts")),
            store_name: "default".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// One of trace, debug, info, warn, error
    pub level: String,
    /// Emit JSON lines instead of the pretty console format
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub editor: EditorSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

/// Platform config file location, e.g. `~/.config/storeplan/config.toml`.
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or_else(|| ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()).into())
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;
        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e)))?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        for (key, value) in [
            ("editor.spawn_x", self.editor.spawn_x),
            ("editor.spawn_y", self.editor.spawn_y),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::ValueOutOfRange {
                    key: key.to_string(),
                    value: value.to_string(),
                }
                .into());
            }
        }

        let store = &self.storage.store_name;
        if store.is_empty() {
            return Err(SettingsError::InvalidSetting {
                key: "storage.store_name".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if store.starts_with('.')
            || !store
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(SettingsError::InvalidSetting {
                key: "storage.store_name".to_string(),
                reason: format!("'{}' is not usable as a file name", store),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(SettingsError::InvalidSetting {
                key: "logging.level".to_string(),
                reason: format!("unknown level '{}'", self.logging.level),
            });
        }

        Ok(())
    }
}
