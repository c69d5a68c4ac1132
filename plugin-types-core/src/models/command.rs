use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app_config::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandType {
    Gcode,
    Jog,
    Macro,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandSource {
    User,
    Plugin,
    System,
    Macro,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Success,
    Error,
    Cancelled,
}

impl std::fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandStatus::Success => write!(f, "success"),
            CommandStatus::Error => write!(f, "error"),
            CommandStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// One command sent to the machine, with its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandRecord {
    pub id: String,
    pub command: String,
    #[serde(rename = "type")]
    pub command_type: CommandType,
    pub source: CommandSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_id: Option<String>,
    pub executed_at: DateTime<Utc>,
    /// Milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    pub status: CommandStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_before: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_after: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spindle_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl CommandRecord {
    pub fn success(
        command: impl Into<String>,
        command_type: CommandType,
        source: CommandSource,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            command: command.into(),
            command_type,
            source,
            plugin_id: None,
            executed_at: Utc::now(),
            duration: None,
            status: CommandStatus::Success,
            error: None,
            position_before: None,
            position_after: None,
            feed_rate: None,
            spindle_speed: None,
            response: None,
        }
    }

    pub fn failed(
        command: impl Into<String>,
        command_type: CommandType,
        source: CommandSource,
        error: impl Into<String>,
    ) -> Self {
        Self {
            status: CommandStatus::Error,
            error: Some(error.into()),
            ..Self::success(command, command_type, source)
        }
    }

    pub fn by_plugin(mut self, plugin_id: impl Into<String>) -> Self {
        self.source = CommandSource::Plugin;
        self.plugin_id = Some(plugin_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_command() {
        let record =
            CommandRecord::failed("G0 X999", CommandType::Gcode, CommandSource::User, "soft limit");
        assert_eq!(record.status, CommandStatus::Error);
        assert_eq!(record.error.as_deref(), Some("soft limit"));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "gcode");
        assert_eq!(json["status"], "error");
    }

    #[test]
    fn test_by_plugin() {
        let record = CommandRecord::success("$H", CommandType::System, CommandSource::User)
            .by_plugin("machine-monitor");
        assert_eq!(record.source, CommandSource::Plugin);
        assert_eq!(record.plugin_id.as_deref(), Some("machine-monitor"));
    }
}
