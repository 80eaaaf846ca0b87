//! StorePlan Settings Crate
//!
//! Handles application configuration: editor defaults, layout storage and
//! logging, loaded from JSON or TOML.

pub mod config;
pub mod error;

pub use config::{default_config_path, Config, EditorSettings, LoggingSettings, StorageSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
