use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::plugins::{PluginPlacement, PluginScreen};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginType {
    Utility,
    Visualization,
    Control,
    Productivity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginSource {
    Local,
    Marketplace,
    Registry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginStatus {
    Active,
    Inactive,
}

impl std::fmt::Display for PluginStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PluginStatus::Active => write!(f, "active"),
            PluginStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// An installed plugin as stored by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginRecord {
    pub id: String,
    pub plugin_id: String,
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub plugin_type: PluginType,
    pub source: PluginSource,
    pub status: PluginStatus,
    pub installed_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_checked_at: Option<DateTime<Utc>>,
    pub update_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<PluginStateRecord>,
}

impl PluginRecord {
    pub fn new(
        plugin_id: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        plugin_type: PluginType,
        source: PluginSource,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            plugin_id: plugin_id.into(),
            name: name.into(),
            version: version.into(),
            description: None,
            plugin_type,
            source,
            status: PluginStatus::Inactive,
            installed_at: now,
            updated_at: now,
            last_checked_at: None,
            update_available: false,
            latest_version: None,
            registry_id: None,
            publisher_id: None,
            checksum: None,
            state: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == PluginStatus::Active
    }

    /// Records the latest published version and whether it differs from the installed one.
    pub fn mark_checked(&mut self, latest_version: impl Into<String>) {
        let latest = latest_version.into();
        self.update_available = latest != self.version;
        self.latest_version = Some(latest);
        self.last_checked_at = Some(Utc::now());
    }
}

/// Per-installation display and permission state of a plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginStateRecord {
    pub id: String,
    pub plugin_id: String,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<PluginPlacement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen: Option<PluginScreen>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    pub priority: i64,
    pub auto_start: bool,
    /// Raw permission names as granted; not restricted to the known set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_settings: Option<Map<String, Value>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PluginStateRecord {
    pub fn new(plugin_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            plugin_id: plugin_id.into(),
            enabled: false,
            placement: None,
            screen: None,
            width: None,
            height: None,
            priority: 0,
            auto_start: false,
            permissions: None,
            menu_title: None,
            menu_icon: None,
            route_path: None,
            custom_settings: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginDependencyRecord {
    pub id: String,
    pub plugin_id: String,
    pub dependency_id: String,
    pub version_range: String,
}

impl PluginDependencyRecord {
    pub fn new(
        plugin_id: impl Into<String>,
        dependency_id: impl Into<String>,
        version_range: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            plugin_id: plugin_id.into(),
            dependency_id: dependency_id.into(),
            version_range: version_range.into(),
        }
    }
}
