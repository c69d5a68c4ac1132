use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use crate::error::{PluginTypesError, PluginTypesResult};
use crate::permissions::Permission;
use crate::validation::Violation;

use super::document::{load_document, parse_document, DocumentFormat};
use super::rules::host_manifest_rule_set;
use super::types::{DependencyKind, PluginCategory, PluginPlacement, PluginScreen};

/// The manifest a plugin ships with, as read by the host application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginManifest {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    pub placement: PluginPlacement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen: Option<PluginScreen>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<PluginConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<PluginUiConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<PluginDependency>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<PluginCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<Map<String, Value>>,
    /// JSON Schema for the plugin's settings. Carried, never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_configurable: Option<bool>,
}

/// A UI dimension: pixels or any CSS length such as `"100%"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UiDimension {
    Pixels(u32),
    Css(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiSize {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<UiDimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<UiDimension>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginUiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<UiSize>,
    /// Higher is more prominent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resizable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_size: Option<SizeBounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<SizeBounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<MenuConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginDependency {
    pub name: String,
    /// Semver range.
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<DependencyKind>,
}

impl PluginDependency {
    /// Dependencies are required unless marked otherwise.
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(true)
    }
}

impl PluginManifest {
    pub const FILENAME: &'static str = "plugin.json";

    pub async fn load_from_file(path: &Path) -> PluginTypesResult<Self> {
        Self::from_value(load_document(path).await?)
    }

    pub fn parse(content: &str, format: DocumentFormat) -> PluginTypesResult<Self> {
        Self::from_value(parse_document(content, format)?)
    }

    pub fn from_value(value: Value) -> PluginTypesResult<Self> {
        serde_json::from_value(value).map_err(|e| {
            PluginTypesError::ManifestParseError(format!("Failed to parse manifest: {}", e))
        })
    }

    pub fn to_value(&self) -> PluginTypesResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn violations(&self) -> PluginTypesResult<Vec<Violation>> {
        Ok(host_manifest_rule_set().validate(&self.to_value()?))
    }

    pub fn validate(&self) -> PluginTypesResult<()> {
        let violations = self.violations()?;
        if violations.is_empty() {
            return Ok(());
        }
        Err(PluginTypesError::ManifestInvalid {
            id: self.id.clone(),
            count: violations.len(),
        })
    }

    pub fn plugin_id(&self) -> String {
        format!("{}@{}", self.id, self.version)
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.iter().any(|p| p.implies(&permission))
    }

    pub fn required_dependencies(&self) -> impl Iterator<Item = &PluginDependency> {
        self.dependencies
            .iter()
            .flatten()
            .filter(|d| d.is_required())
    }
}

pub fn create_example_manifest() -> PluginManifest {
    let mut defaults = Map::new();
    defaults.insert("refreshInterval".to_string(), Value::from(1000));
    defaults.insert("showAlarms".to_string(), Value::from(true));

    PluginManifest {
        id: "example-plugin".to_string(),
        name: "Example Plugin".to_string(),
        version: "0.1.0".to_string(),
        description: "An example CNC control plugin".to_string(),
        author: "Your Name".to_string(),
        license: Some("MIT".to_string()),
        homepage: Some("https://example.com".to_string()),
        repository: Some("https://github.com/example/plugin".to_string()),
        placement: PluginPlacement::Dashboard,
        screen: Some(PluginScreen::Main),
        permissions: vec![Permission::MachineRead, Permission::StatusRead],
        config: Some(PluginConfig {
            defaults: Some(defaults),
            schema: Some(serde_json::json!({
                "type": "object",
                "properties": {
                    "refreshInterval": { "type": "number", "default": 1000 },
                    "showAlarms": { "type": "boolean", "default": true }
                }
            })),
            user_configurable: Some(true),
        }),
        ui: Some(PluginUiConfig {
            size: Some(UiSize {
                width: Some(UiDimension::Pixels(400)),
                height: Some(UiDimension::Css("auto".to_string())),
            }),
            priority: Some(100),
            resizable: Some(true),
            min_size: Some(SizeBounds {
                width: Some(200),
                height: Some(150),
            }),
            max_size: None,
            menu: None,
        }),
        dependencies: None,
        keywords: Some(vec!["monitoring".to_string(), "status".to_string()]),
        category: Some(PluginCategory::Monitoring),
    }
}
