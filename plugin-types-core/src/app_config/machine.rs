use serde::{Deserialize, Serialize};

use super::common::{AxisLimitsSet, Dimensions, Position};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JogSettings {
    pub default_speed: f64,
    pub max_speed: f64,
    pub min_speed: f64,
    pub metric_increments: Vec<f64>,
    pub imperial_increments: Vec<f64>,
}

impl JogSettings {
    /// Clamps a requested jog speed into the configured range.
    pub fn clamp_speed(&self, speed: f64) -> f64 {
        speed.max(self.min_speed).min(self.max_speed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineScaling {
    pub machine_scale_factor: f64,
    pub visual_scale: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementSettings {
    pub min_speed: f64,
    pub max_speed: f64,
    pub default_speed: f64,
    pub acceleration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkCoordinateSystems {
    pub enabled: bool,
    pub supported_systems: Vec<String>,
    pub default_system: String,
    pub max_systems: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpindleCommandCodes {
    pub clockwise: String,
    pub counterclockwise: String,
    pub stop: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDirection {
    pub enabled: bool,
    pub default_direction: String,
    pub supported_directions: Vec<String>,
    pub command_codes: SpindleCommandCodes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoolantControl {
    pub enabled: bool,
    pub flood_coolant: String,
    pub mist_coolant: String,
    pub coolant_off: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpindleControl {
    pub enabled: bool,
    #[serde(rename = "minRPM")]
    pub min_rpm: f64,
    #[serde(rename = "maxRPM")]
    pub max_rpm: f64,
    #[serde(rename = "defaultRPM")]
    pub default_rpm: f64,
    pub step_size: f64,
    pub has_variable_speed: bool,
    pub coolant_control: CoolantControl,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeCommands {
    pub straight_probe: String,
    pub probe_toward_workpiece: String,
    pub probe_away_from_workpiece: String,
    pub probe_away_no_error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Probing {
    pub enabled: bool,
    pub probe_commands: ProbeCommands,
    pub default_feed_rate: f64,
    pub retract_distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinateDisplay {
    pub show_machine_coordinates: bool,
    pub show_work_coordinates: bool,
    pub default_coordinate_display: String,
    pub precision: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyFeatures {
    pub soft_limits: bool,
    pub hard_limits: bool,
    pub emergency_stop: bool,
    pub feed_hold: bool,
    pub cycle_start: bool,
    pub door_safety: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineFeatures {
    pub work_coordinate_systems: WorkCoordinateSystems,
    pub tool_direction: ToolDirection,
    pub spindle_control: SpindleControl,
    pub probing: Probing,
    pub coordinate_display: CoordinateDisplay,
    pub safety_features: SafetyFeatures,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalGroups {
    pub motion_modes: Vec<String>,
    pub coordinate_systems: Vec<String>,
    pub plane_selection: Vec<String>,
    pub units: Vec<String>,
    pub distance_mode: Vec<String>,
    pub feed_rate_mode: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GCodeDefaultSettings {
    pub motion_mode: String,
    pub coordinate_system: String,
    pub plane_selection: String,
    pub units: String,
    pub distance_mode: String,
    pub feed_rate_mode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GCodeSettings {
    pub modal_groups: ModalGroups,
    pub default_settings: GCodeDefaultSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpolation {
    pub linear: bool,
    pub circular: bool,
    pub helical: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRates {
    pub rapid: f64,
    pub max_feed: f64,
    pub min_feed: f64,
}

/// Step resolution per axis. Keys are upper-case on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    #[serde(rename = "Z")]
    pub z: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineCapabilities {
    pub axes: Vec<String>,
    pub simultaneous_axes: u32,
    pub interpolation: Interpolation,
    pub feed_rates: FeedRates,
    pub resolution: Resolution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionConfig {
    pub default_port: String,
    pub baud_rate: u32,
    pub timeout: u64,
    pub auto_reconnect: bool,
    pub reconnect_delay: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub soft: AxisLimitsSet,
    pub hard: AxisLimitsSet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomingConfig {
    pub sequence: Vec<String>,
    pub speed: f64,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineDefaults {
    pub connection: ConnectionConfig,
    pub limits: LimitsConfig,
    pub homing: HomingConfig,
}

/// Contents of `machine.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineConfig {
    pub default_dimensions: Dimensions,
    pub default_position: Position,
    pub jog_settings: JogSettings,
    pub scaling: MachineScaling,
    pub movement: MovementSettings,
    pub features: MachineFeatures,
    pub g_code_settings: GCodeSettings,
    pub machine_capabilities: MachineCapabilities,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_spindle_control_wire_names() {
        let spindle: SpindleControl = serde_json::from_value(json!({
            "enabled": true,
            "minRPM": 0,
            "maxRPM": 24000,
            "defaultRPM": 12000,
            "stepSize": 100,
            "hasVariableSpeed": true,
            "coolantControl": {
                "enabled": true,
                "floodCoolant": "M8",
                "mistCoolant": "M7",
                "coolantOff": "M9"
            }
        }))
        .unwrap();

        assert_eq!(spindle.max_rpm, 24000.0);
        let back = serde_json::to_value(&spindle).unwrap();
        assert_eq!(back["defaultRPM"], json!(12000.0));
        assert_eq!(back["coolantControl"]["mistCoolant"], "M7");
    }

    #[test]
    fn test_resolution_upper_case_keys() {
        let res: Resolution =
            serde_json::from_value(json!({"X": 0.001, "Y": 0.001, "Z": 0.0005})).unwrap();
        assert_eq!(res.z, 0.0005);
    }

    #[test]
    fn test_jog_clamp() {
        let jog = JogSettings {
            default_speed: 1000.0,
            max_speed: 5000.0,
            min_speed: 10.0,
            metric_increments: vec![0.1, 1.0, 10.0],
            imperial_increments: vec![0.001, 0.01, 0.1],
        };
        assert_eq!(jog.clamp_speed(9000.0), 5000.0);
        assert_eq!(jog.clamp_speed(1.0), 10.0);
    }
}
