use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{PluginTypesError, PluginTypesResult};
use crate::permissions::Permission;
use crate::validation::{Violation, ViolationCode};

use super::rules::{registry_document_rule_set, registry_entry_rule_set, registry_manifest_rule_set};
use super::types::{Dimension, PluginCategory, PluginPlacement, PluginScreen, RepositoryType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    #[serde(rename = "type")]
    pub kind: RepositoryType,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compatibility {
    pub min_app_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_app_version: Option<String>,
}

/// A plugin manifest as published in the plugin registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginRegistryManifest {
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
    pub repository: Option<RepositoryInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<PluginCategory>,
    pub placement: PluginPlacement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen: Option<PluginScreen>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeConfig>,
    /// Display priority, 1 is highest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_start: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<Permission>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_title: Option<String>,
    /// Ant Design icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility: Option<Compatibility>,
    /// npm-style `name -> version range`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshots: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changelog: Option<String>,
}

impl PluginRegistryManifest {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
        author: impl Into<String>,
        placement: PluginPlacement,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
            description: description.into(),
            author: author.into(),
            license: None,
            homepage: None,
            repository: None,
            keywords: None,
            category: None,
            placement,
            screen: None,
            size: None,
            priority: None,
            auto_start: None,
            permissions: None,
            menu_title: None,
            menu_icon: None,
            route_path: None,
            compatibility: None,
            dependencies: None,
            screenshots: None,
            changelog: None,
        }
    }

    pub fn with_category(mut self, category: PluginCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_screen(mut self, screen: PluginScreen) -> Self {
        self.screen = Some(screen);
        self
    }

    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permissions.get_or_insert_with(Vec::new).push(permission);
        self
    }

    pub fn with_homepage(mut self, homepage: impl Into<String>) -> Self {
        self.homepage = Some(homepage.into());
        self
    }

    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    pub fn with_route(
        mut self,
        route_path: impl Into<String>,
        menu_title: impl Into<String>,
    ) -> Self {
        self.route_path = Some(route_path.into());
        self.menu_title = Some(menu_title.into());
        self
    }

    pub fn with_compatibility(mut self, min: impl Into<String>, max: Option<&str>) -> Self {
        self.compatibility = Some(Compatibility {
            min_app_version: min.into(),
            max_app_version: max.map(str::to_string),
        });
        self
    }

    /// Builds a typed manifest from an untyped tree. Does not run the rule set.
    pub fn from_value(value: Value) -> PluginTypesResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| PluginTypesError::ManifestParseError(e.to_string()))
    }

    pub fn to_value(&self) -> PluginTypesResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Every rule violation of this manifest.
    pub fn violations(&self) -> PluginTypesResult<Vec<Violation>> {
        Ok(registry_manifest_rule_set().validate(&self.to_value()?))
    }

    pub fn validate(&self) -> PluginTypesResult<()> {
        let violations = self.violations()?;
        if violations.is_empty() {
            Ok(())
        } else {
            Err(PluginTypesError::ManifestInvalid {
                id: self.id.clone(),
                count: violations.len(),
            })
        }
    }

    pub fn requires(&self, permission: Permission) -> bool {
        self.permissions
            .as_ref()
            .is_some_and(|perms| perms.iter().any(|p| p.implies(&permission)))
    }
}

/// One plugin as listed in the registry index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginRegistryEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub author: String,
    pub version: String,
    pub download_url: String,
    pub manifest_url: String,
    pub category: PluginCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_app_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_app_version: Option<String>,
    /// ISO 8601 timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl PluginRegistryEntry {
    pub fn from_value(value: Value) -> PluginTypesResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| PluginTypesError::ManifestParseError(e.to_string()))
    }

    pub fn violations(&self) -> PluginTypesResult<Vec<Violation>> {
        Ok(registry_entry_rule_set().validate(&serde_json::to_value(self)?))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_plugins: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_downloads: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_plugins: Option<u64>,
}

/// The registry index document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginRegistry {
    pub version: String,
    pub plugins: Vec<PluginRegistryEntry>,
    pub categories: Vec<PluginCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RegistryMetadata>,
}

impl PluginRegistry {
    pub fn find(&self, id: &str) -> Option<&PluginRegistryEntry> {
        self.plugins.iter().find(|p| p.id == id)
    }

    pub fn by_category(&self, category: PluginCategory) -> Vec<&PluginRegistryEntry> {
        self.plugins
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    pub fn featured(&self) -> Vec<&PluginRegistryEntry> {
        self.plugins
            .iter()
            .filter(|p| p.featured.unwrap_or(false))
            .collect()
    }
}

/// Validates a registry document and every entry in it.
///
/// Entry violations are re-rooted under `plugins[i]`, so a bad id in the third entry
/// reports at `plugins[2].id`. Duplicate ids are reported at the later entry.
pub fn validate_registry(candidate: &Value) -> Vec<Violation> {
    let mut violations = registry_document_rule_set().validate(candidate);

    let Some(entries) = candidate.get("plugins").and_then(Value::as_array) else {
        return violations;
    };

    let entry_rules = registry_entry_rule_set();
    let mut seen: Vec<&str> = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let prefix = format!("plugins[{}]", index);
        if !entry.is_object() {
            // already reported by the document rule set
            continue;
        }
        violations.extend(
            entry_rules
                .validate(entry)
                .into_iter()
                .map(|v| v.nested_under(&prefix)),
        );

        if let Some(id) = entry.get("id").and_then(Value::as_str) {
            if seen.contains(&id) {
                violations.push(Violation::new(
                    format!("{}.id", prefix),
                    ViolationCode::NestedFailure,
                    format!("Duplicate plugin id in registry: {}", id),
                ));
            } else {
                seen.push(id);
            }
        }
    }

    debug!(
        entries = entries.len(),
        violations = violations.len(),
        "Validated registry"
    );
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(id: &str) -> Value {
        json!({
            "id": id,
            "name": "Machine Monitor",
            "description": "Real-time machine status monitoring",
            "author": "CNC Controls Team",
            "version": "1.0.0",
            "downloadUrl": format!("https://example.com/{}.zip", id),
            "manifestUrl": format!("https://example.com/{}/plugin.json", id),
            "category": "monitoring",
            "lastUpdated": "2024-01-15T10:30:00Z",
            "downloads": 1250,
            "rating": 4.5,
            "featured": true
        })
    }

    #[test]
    fn test_manifest_builder_validates() {
        let manifest = PluginRegistryManifest::new(
            "test-plugin",
            "Test Plugin",
            "1.0.0",
            "Test plugin for compatibility testing",
            "Test Author",
            PluginPlacement::Dashboard,
        )
        .with_permission(Permission::MachineRead);

        assert!(manifest.validate().is_ok());
        assert!(manifest.requires(Permission::MachineRead));
        assert!(!manifest.requires(Permission::MachineWrite));
    }

    #[test]
    fn test_manifest_validate_reports_count() {
        let mut manifest = PluginRegistryManifest::new(
            "Bad Id",
            "Bad",
            "1.0",
            "d",
            "a",
            PluginPlacement::Modal,
        );
        manifest.homepage = Some("example.com".to_string());

        let violations = manifest.violations().unwrap();
        assert_eq!(violations.len(), 3);

        match manifest.validate() {
            Err(PluginTypesError::ManifestInvalid { id, count }) => {
                assert_eq!(id, "Bad Id");
                assert_eq!(count, 3);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_manifest_serializes_camel_case_without_nulls() {
        let manifest = PluginRegistryManifest::new(
            "tool-library",
            "Tool Library",
            "1.0.0",
            "Tool management",
            "CNC Controls Team",
            PluginPlacement::Standalone,
        )
        .with_route("/tool-library", "Tool Library");

        let value = manifest.to_value().unwrap();
        assert_eq!(value["routePath"], "/tool-library");
        assert_eq!(value["menuTitle"], "Tool Library");
        assert!(value.get("homepage").is_none());
    }

    #[test]
    fn test_validate_registry_prefixes_entry_paths() {
        let mut bad = entry("bad-one");
        bad["downloadUrl"] = json!("ftp://example.com/x.zip");
        let registry = json!({
            "version": "1.0.0",
            "plugins": [entry("machine-monitor"), bad, entry("machine-monitor")],
            "categories": ["monitoring", "utility"]
        });

        let violations = validate_registry(&registry);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].field_path, "plugins[1].downloadUrl");
        assert_eq!(violations[0].code, ViolationCode::InvalidUrl);
        assert_eq!(violations[1].field_path, "plugins[2].id");
        assert!(violations[1].message.contains("Duplicate"));
    }

    #[test]
    fn test_registry_typed_queries() {
        let registry: PluginRegistry = serde_json::from_value(json!({
            "version": "1.0.0",
            "plugins": [entry("machine-monitor")],
            "categories": ["monitoring"]
        }))
        .unwrap();

        assert!(registry.find("machine-monitor").is_some());
        assert_eq!(registry.by_category(PluginCategory::Monitoring).len(), 1);
        assert_eq!(registry.featured().len(), 1);
        assert!(registry.plugins[0].violations().unwrap().is_empty());
    }
}
