use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
    Test,
}

/// Log level names shared by the app and api sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppLogging {
    pub level: LogLevel,
    pub file: String,
    pub max_size: u64,
    pub max_files: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppPaths {
    pub user_data: String,
    pub logs: String,
    pub temp: String,
    pub plugins: String,
    pub config: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceConfig {
    #[serde(rename = "enableGPU")]
    pub enable_gpu: bool,
    #[serde(rename = "enableWebGL")]
    pub enable_webgl: bool,
    pub max_memory_usage: u64,
}

/// Contents of `app.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
    pub homepage: String,
    pub repository: String,
    pub license: String,
    pub environment: Environment,
    pub debug: bool,
    pub auto_update: bool,
    pub telemetry: bool,
    pub error_reporting: bool,
    pub crash_reporting: bool,
    pub analytics: bool,
    pub logging: AppLogging,
    pub paths: AppPaths,
    pub performance: PerformanceConfig,
}
