use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::app_config::{MachineUnits, Position};

/// Persisted application session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStateRecord {
    pub id: String,
    pub machine_connected: bool,
    pub machine_units: MachineUnits,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_offset: Option<Position>,
    pub theme: String,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_connected_at: Option<DateTime<Utc>>,
    pub session_started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_grid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_coordinates: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_connect: Option<bool>,
    // Stored as JSON text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_settings: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jog_settings: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_settings: Option<String>,
}

impl AppStateRecord {
    /// Decodes one of the JSON-text settings columns.
    pub fn decode_settings(raw: Option<&str>) -> Option<Value> {
        raw.and_then(|s| serde_json::from_str(s).ok())
    }

    pub fn machine_settings(&self) -> Option<Value> {
        Self::decode_settings(self.machine_settings.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangedBy {
    User,
    System,
    Plugin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingHistoryRecord {
    pub id: String,
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Value>,
    pub new_value: Value,
    pub changed_by: ChangedBy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_id: Option<String>,
    pub changed_at: DateTime<Utc>,
}

impl SettingHistoryRecord {
    pub fn new(
        key: impl Into<String>,
        old_value: Option<Value>,
        new_value: Value,
        changed_by: ChangedBy,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            key: key.into(),
            old_value,
            new_value,
            changed_by,
            plugin_id: None,
            changed_at: Utc::now(),
        }
    }

    pub fn is_change(&self) -> bool {
        self.old_value.as_ref() != Some(&self.new_value)
    }
}
