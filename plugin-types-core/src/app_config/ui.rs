//! UI, visualization and preview defaults (`ui.json`, `visualization.json`).

use serde::{Deserialize, Serialize};

use super::common::{AxisColors, Breakpoints, CameraPosition, CanvasSize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    pub primary_color: String,
    pub axis_colors: AxisColors,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    pub default_card_size: String,
    /// Horizontal and vertical gutter.
    pub default_gutter: (f64, f64),
    pub container_padding: String,
    pub max_width: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationConfig {
    pub transition_duration: String,
    pub easing_function: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    pub theme: ThemeConfig,
    pub layout: LayoutConfig,
    pub animations: AnimationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview2DConfig {
    pub canvas_size: CanvasSize,
    pub grid_lines: bool,
    pub show_axes: bool,
    pub background_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub fov: f64,
    pub near: f64,
    pub far: f64,
    pub position: [f64; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightingVisualizationConfig {
    pub ambient_intensity: f64,
    pub directional_intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialsConfig {
    pub machine_color: String,
    pub tool_color: String,
    pub grid_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preview3DConfig {
    pub camera: CameraConfig,
    pub lighting: LightingVisualizationConfig,
    pub materials: MaterialsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationConfig {
    #[serde(rename = "preview2D")]
    pub preview_2d: Preview2DConfig,
    #[serde(rename = "preview3D")]
    pub preview_3d: Preview3DConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiThemeDefaults {
    pub primary_color: String,
    pub border_radius: f64,
    pub spacing: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationDefaults {
    pub enabled: bool,
    pub duration: f64,
    pub easing: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsivenessConfig {
    pub breakpoints: Breakpoints,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiDefaults {
    pub theme: UiThemeDefaults,
    pub animations: AnimationDefaults,
    pub responsiveness: ResponsivenessConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightingConfig {
    pub ambient: f64,
    pub directional: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview2DDefaults {
    pub background_color: String,
    pub grid_color: String,
    pub axis_colors: AxisColors,
    pub tool_color: String,
    pub refresh_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview3DDefaults {
    pub background_color: String,
    pub camera_position: CameraPosition,
    pub lighting: LightingConfig,
    pub refresh_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationDefaults {
    #[serde(rename = "preview2D")]
    pub preview_2d: Preview2DDefaults,
    #[serde(rename = "preview3D")]
    pub preview_3d: Preview3DDefaults,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_visualization_wire_shape() {
        let vis: VisualizationConfig = serde_json::from_value(json!({
            "preview2D": {
                "canvasSize": { "width": 800, "height": 600 },
                "gridLines": true,
                "showAxes": true,
                "backgroundColor": "#1f1f1f"
            },
            "preview3D": {
                "camera": { "fov": 75, "near": 0.1, "far": 1000, "position": [100, 100, 100] },
                "lighting": { "ambientIntensity": 0.4, "directionalIntensity": 0.8 },
                "materials": { "machineColor": "#888", "toolColor": "#f00", "gridColor": "#333" }
            }
        }))
        .unwrap();

        assert_eq!(vis.preview_2d.canvas_size.width, 800);
        assert_eq!(vis.preview_3d.camera.position, [100.0, 100.0, 100.0]);
    }

    #[test]
    fn test_layout_gutter_is_pair() {
        let layout: LayoutConfig = serde_json::from_value(json!({
            "defaultCardSize": "small",
            "defaultGutter": [16, 16],
            "containerPadding": "24px",
            "maxWidth": "1200px"
        }))
        .unwrap();
        assert_eq!(layout.default_gutter, (16.0, 16.0));
        assert!(serde_json::from_value::<LayoutConfig>(json!({
            "defaultCardSize": "small",
            "defaultGutter": [16],
            "containerPadding": "24px",
            "maxWidth": "1200px"
        }))
        .is_err());
    }
}
