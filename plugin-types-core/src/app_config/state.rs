use serde::{Deserialize, Serialize};

use super::common::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineUnits {
    Metric,
    Imperial,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalState {
    pub motion: String,
    pub coordinate: String,
    pub plane: String,
    pub units: String,
    pub distance: String,
    pub feed_rate: String,
}

/// Contents of `state.json`: the machine state the host starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateConfig {
    pub machine_connected: bool,
    pub current_position: Position,
    pub work_offset: Position,
    pub machine_units: MachineUnits,
    pub coordinate_system: String,
    pub feed_rate: f64,
    pub spindle_speed: f64,
    pub tool_number: u32,
    pub modal_state: ModalState,
    pub active_states: Vec<String>,
    pub alarm_state: bool,
    pub error_state: bool,
    pub paused_state: bool,
    pub running_state: bool,
}

impl StateConfig {
    /// Position in work coordinates.
    pub fn work_position(&self) -> Position {
        Position::new(
            self.current_position.x - self.work_offset.x,
            self.current_position.y - self.work_offset.y,
            self.current_position.z - self.work_offset.z,
        )
    }

    pub fn is_faulted(&self) -> bool {
        self.alarm_state || self.error_state
    }
}
