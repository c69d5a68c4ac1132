use anyhow::Result;
use plugin_types_core::{PluginTypesConfig, PluginTypesError};
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub settings: PluginTypesConfig,
}

impl CliConfig {
    pub fn load() -> Result<Self> {
        let settings = PluginTypesConfig::load().map_err(PluginTypesError::from)?;

        if !settings.display.color {
            colored::control::set_override(false);
        }

        Ok(Self { settings })
    }

    pub fn log_level(&self) -> &str {
        self.settings.log_level()
    }

    pub fn json_logs(&self) -> bool {
        self.settings.logging.json_format
    }

    pub fn app_path(&self) -> PathBuf {
        self.settings.app_path()
    }

    pub fn target_dir(&self) -> PathBuf {
        self.settings.target_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CliConfig::default();
        assert_eq!(config.log_level(), "warn");
        assert!(!config.json_logs());
        assert_eq!(config.app_path(), PathBuf::from("../electron-app"));
        assert_eq!(config.target_dir(), PathBuf::from("src"));
    }
}
