use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::sync::{APP_PATH_ENV, DEFAULT_APP_PATH};

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Settings for the tooling itself, not the host application's config sections.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PluginTypesConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub sync: SyncSettings,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json_format: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSettings {
    #[serde(default = "default_app_path")]
    pub electron_app_path: String,

    #[serde(default = "default_target_dir")]
    pub target_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_app_path() -> String {
    DEFAULT_APP_PATH.to_string()
}

fn default_target_dir() -> String {
    "src".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            electron_app_path: default_app_path(),
            target_dir: default_target_dir(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl PluginTypesConfig {
    pub fn load() -> Result<Self, ConfigLoadError> {
        Self::load_from_paths(get_config_paths())
    }

    pub fn load_from_paths(paths: Vec<PathBuf>) -> Result<Self, ConfigLoadError> {
        load_dotenv_files();

        let mut builder = ConfigBuilder::builder();

        for path in paths {
            if path.exists() {
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("PLUGIN_TYPES")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let mut settings: PluginTypesConfig = config.try_deserialize()?;

        if let Ok(path) = std::env::var(APP_PATH_ENV) {
            settings.sync.electron_app_path = path;
        }

        if let Ok(level) = std::env::var("PLUGIN_TYPES_LOG_LEVEL") {
            settings.logging.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            settings.logging.level = level;
        }

        settings.validate()?;

        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.sync.electron_app_path.trim().is_empty() {
            return Err(ConfigLoadError::MissingRequired(
                "sync.electron_app_path".to_string(),
            ));
        }

        if self.sync.target_dir.trim().is_empty() {
            return Err(ConfigLoadError::MissingRequired("sync.target_dir".to_string()));
        }

        if let Some(directive) = invalid_log_directive(&self.logging.level) {
            return Err(ConfigLoadError::InvalidValue {
                key: "logging.level".to_string(),
                message: format!(
                    "Invalid log directive '{}'. Use a level ({}) or target=level",
                    directive,
                    LOG_LEVELS.join(", ")
                ),
            });
        }

        Ok(())
    }

    pub fn log_level(&self) -> &str {
        &self.logging.level
    }

    pub fn app_path(&self) -> PathBuf {
        PathBuf::from(&self.sync.electron_app_path)
    }

    pub fn target_dir(&self) -> PathBuf {
        PathBuf::from(&self.sync.target_dir)
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join("config").join("default.toml"));
        paths.push(cwd.join("config").join("local.toml"));
        paths.push(cwd.join("plugin-types.toml"));
    }

    if let Some(config_dir) = get_config_dir() {
        paths.push(config_dir.join("config.toml"));
    }

    paths
}

fn load_dotenv_files() {
    let mut paths = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".env"));
        paths.push(cwd.join(".env.local"));
    }

    if let Some(config_dir) = get_config_dir() {
        paths.push(config_dir.join(".env"));
    }

    for path in paths {
        if path.exists() {
            let _ = dotenvy::from_path(&path);
        }
    }
}

pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("plugin-types"))
}

/// First directive of a `RUST_LOG`-style list that is neither a level nor `target=level`.
fn invalid_log_directive(filter: &str) -> Option<&str> {
    filter
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .find(|directive| {
            let level = match directive.rsplit_once('=') {
                Some((target, level)) if !target.is_empty() => level,
                Some(_) => return true,
                None => *directive,
            };
            !LOG_LEVELS.iter().any(|l| l.eq_ignore_ascii_case(level))
        })
}
