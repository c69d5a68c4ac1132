use serde::{Deserialize, Serialize};

use super::state::MachineUnits;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineDefaultsConfig {
    pub units: MachineUnits,
    pub work_coordinate_system: String,
    pub feed_rate: f64,
    pub spindle_speed: f64,
    pub jog_speed: f64,
    pub jog_increment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    Auto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiPreferenceDefaults {
    pub theme: ThemeMode,
    pub language: String,
    pub show_grid: bool,
    pub show_coordinates: bool,
    pub auto_connect: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDefaults {
    pub default_directory: String,
    pub supported_formats: Vec<String>,
    pub max_file_size: u64,
    pub auto_backup: bool,
    pub backup_interval: u64,
}

impl FileDefaults {
    /// Case-insensitive extension check, with or without a leading dot.
    pub fn supports(&self, extension: &str) -> bool {
        let ext = extension.trim_start_matches('.');
        self.supported_formats
            .iter()
            .any(|f| f.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkingDefaults {
    pub timeout: u64,
    pub retries: u32,
    pub check_interval: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginDefaults {
    pub auto_load: bool,
    pub auto_update: bool,
    pub update_check_interval: u64,
    pub allow_beta: bool,
}

/// Contents of `defaults.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub machine: MachineDefaultsConfig,
    pub ui: UiPreferenceDefaults,
    pub files: FileDefaults,
    pub networking: NetworkingDefaults,
    pub plugins: PluginDefaults,
}
