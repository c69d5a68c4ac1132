//! Host application configuration schemas.
//!
//! Each section lives in its own JSON file (see [`ConfigFile`]); [`CompleteConfig`] is
//! the merged view the host hands to plugins.

mod api;
mod app;
mod common;
mod defaults;
mod machine;
mod state;
mod ui;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::error::PluginTypesError;

pub use api::{
    ApiConfig, ApiLogging, AuthType, AuthenticationConfig, CorsConfig, Credentials,
    EndpointsConfig, Protocol, RateLimitConfig, ServerConfig,
};
pub use app::{AppConfig, AppLogging, AppPaths, Environment, LogLevel, PerformanceConfig};
pub use common::{
    AxisColors, AxisLimits, AxisLimitsSet, Breakpoints, CameraPosition, CanvasSize, ColorScheme,
    Dimensions, Position, Size,
};
pub use defaults::{
    DefaultsConfig, FileDefaults, MachineDefaultsConfig, NetworkingDefaults, PluginDefaults,
    ThemeMode, UiPreferenceDefaults,
};
pub use machine::{
    ConnectionConfig, CoolantControl, CoordinateDisplay, FeedRates, GCodeDefaultSettings,
    GCodeSettings, HomingConfig, Interpolation, JogSettings, LimitsConfig, MachineCapabilities,
    MachineConfig, MachineDefaults, MachineFeatures, MachineScaling, ModalGroups,
    MovementSettings, ProbeCommands, Probing, Resolution, SafetyFeatures, SpindleCommandCodes,
    SpindleControl, ToolDirection, WorkCoordinateSystems,
};
pub use state::{MachineUnits, ModalState, StateConfig};
pub use ui::{
    AnimationConfig, AnimationDefaults, CameraConfig, LayoutConfig, LightingConfig,
    LightingVisualizationConfig, MaterialsConfig, Preview2DConfig, Preview2DDefaults,
    Preview3DConfig, Preview3DDefaults, ResponsivenessConfig, ThemeConfig, UiConfig, UiDefaults,
    UiThemeDefaults, VisualizationConfig, VisualizationDefaults,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteConfig {
    pub machine: MachineConfig,
    pub state: StateConfig,
    pub app: AppConfig,
    pub ui: UiConfig,
    pub api: ApiConfig,
    pub defaults: DefaultsConfig,
    pub visualization: VisualizationConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigLoadingState {
    pub is_loading: bool,
    pub is_loaded: bool,
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl ConfigLoadingState {
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }

    pub fn loaded() -> Self {
        Self {
            is_loaded: true,
            last_updated: Some(Utc::now()),
            ..Self::default()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigEventType {
    Loaded,
    Error,
    Updated,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigEvent {
    #[serde(rename = "type")]
    pub kind: ConfigEventType,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConfigEvent {
    pub fn new(kind: ConfigEventType) -> Self {
        Self {
            kind,
            timestamp: Utc::now(),
            data: None,
            error: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::new(ConfigEventType::Error)
        }
    }
}

/// Top-level keys of [`CompleteConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSection {
    Machine,
    State,
    App,
    Ui,
    Api,
    Defaults,
    Visualization,
}

impl ConfigSection {
    pub const ALL: [ConfigSection; 7] = [
        ConfigSection::Machine,
        ConfigSection::State,
        ConfigSection::App,
        ConfigSection::Ui,
        ConfigSection::Api,
        ConfigSection::Defaults,
        ConfigSection::Visualization,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigSection::Machine => "machine",
            ConfigSection::State => "state",
            ConfigSection::App => "app",
            ConfigSection::Ui => "ui",
            ConfigSection::Api => "api",
            ConfigSection::Defaults => "defaults",
            ConfigSection::Visualization => "visualization",
        }
    }

    pub fn file(&self) -> ConfigFile {
        match self {
            ConfigSection::Machine => ConfigFile::Machine,
            ConfigSection::State => ConfigFile::State,
            ConfigSection::App => ConfigFile::App,
            ConfigSection::Ui => ConfigFile::Ui,
            ConfigSection::Api => ConfigFile::Api,
            ConfigSection::Defaults => ConfigFile::Defaults,
            ConfigSection::Visualization => ConfigFile::Visualization,
        }
    }
}

impl std::fmt::Display for ConfigSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConfigSection {
    type Err = PluginTypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigSection::ALL
            .iter()
            .copied()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| PluginTypesError::InvalidConfigValue {
                key: "section".to_string(),
                message: format!("Unknown config section: {}", s),
            })
    }
}

/// The per-section configuration files the host reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigFile {
    Machine,
    State,
    App,
    Ui,
    Api,
    Defaults,
    Visualization,
}

impl ConfigFile {
    pub const ALL: [ConfigFile; 7] = [
        ConfigFile::Machine,
        ConfigFile::State,
        ConfigFile::App,
        ConfigFile::Ui,
        ConfigFile::Api,
        ConfigFile::Defaults,
        ConfigFile::Visualization,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ConfigFile::Machine => "machine.json",
            ConfigFile::State => "state.json",
            ConfigFile::App => "app.json",
            ConfigFile::Ui => "ui.json",
            ConfigFile::Api => "api.json",
            ConfigFile::Defaults => "defaults.json",
            ConfigFile::Visualization => "visualization.json",
        }
    }

    pub fn section(&self) -> ConfigSection {
        match self {
            ConfigFile::Machine => ConfigSection::Machine,
            ConfigFile::State => ConfigSection::State,
            ConfigFile::App => ConfigSection::App,
            ConfigFile::Ui => ConfigSection::Ui,
            ConfigFile::Api => ConfigSection::Api,
            ConfigFile::Defaults => ConfigSection::Defaults,
            ConfigFile::Visualization => ConfigSection::Visualization,
        }
    }
}
