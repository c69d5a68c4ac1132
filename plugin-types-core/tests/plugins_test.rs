use plugin_types_core::compat::fixtures;
use plugin_types_core::plugins::{
    registry_manifest_rule_set, validate_registry, DocumentFormat, PluginCategory,
    PluginManifest, PluginPlacement, PluginRegistry, PluginRegistryManifest, PluginScreen,
};
use plugin_types_core::validation::ViolationCode;
use plugin_types_core::Permission;
use serde_json::{json, Value};

fn registry_entry(id: &str, category: &str) -> Value {
    json!({
        "id": id,
        "name": "Some Plugin",
        "description": "Does things",
        "author": "CNC Controls Team",
        "version": "1.0.0",
        "downloadUrl": format!("https://plugins.example.com/{}.zip", id),
        "manifestUrl": format!("https://plugins.example.com/{}/manifest.json", id),
        "category": category
    })
}

mod registry_manifest_tests {
    use super::*;

    #[test]
    fn test_existing_plugins_still_validate() {
        let rules = registry_manifest_rule_set();
        for manifest in fixtures::existing_plugins() {
            let violations = rules.validate(&manifest);
            assert!(violations.is_empty(), "{}: {:?}", manifest["id"], violations);
            assert!(PluginRegistryManifest::from_value(manifest).is_ok());
        }
    }

    #[test]
    fn test_builder_produces_valid_manifest() {
        let manifest = PluginRegistryManifest::new(
            "tool-library",
            "Tool Library",
            "2.1.0",
            "Manage cutting tools",
            "CNC Controls Team",
            PluginPlacement::Standalone,
        )
        .with_category(PluginCategory::Utility)
        .with_screen(PluginScreen::New)
        .with_permission(Permission::FilesRead)
        .with_homepage("https://example.com/tool-library")
        .with_route("/tool-library", "Tools")
        .with_compatibility("1.0.0", Some("2.0.0"));

        assert!(manifest.validate().is_ok());
        assert!(manifest.requires(Permission::FilesRead));
        assert!(!manifest.requires(Permission::MachineControl));
    }

    #[test]
    fn test_inverted_compatibility_range() {
        let manifest = PluginRegistryManifest::new(
            "range-check",
            "Range",
            "1.0.0",
            "d",
            "a",
            PluginPlacement::Dashboard,
        )
        .with_compatibility("2.0.0", Some("1.5.0"));

        let violations = manifest.violations().unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field_path, "compatibility.maxAppVersion");
        assert_eq!(violations[0].code, ViolationCode::NestedFailure);
    }

    #[test]
    fn test_unknown_permission_is_reported_per_index() {
        let mut manifest = fixtures::minimal_manifest();
        manifest["permissions"] = json!(["machine.read", "machine.explode", "config.read"]);

        let violations = registry_manifest_rule_set().validate(&manifest);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field_path, "permissions[1]");
    }
}

mod host_manifest_tests {
    use super::*;

    #[test]
    fn test_host_manifest_requires_permissions() {
        let json = r#"{
            "id": "no-perms",
            "name": "No Permissions",
            "version": "1.0.0",
            "description": "d",
            "author": "a",
            "placement": "sidebar"
        }"#;

        let manifest = PluginManifest::parse(json, DocumentFormat::Json).unwrap();
        let violations = manifest.violations().unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field_path, "permissions");
        assert_eq!(violations[0].code, ViolationCode::MissingRequired);
    }

    #[test]
    fn test_host_manifest_from_toml() {
        let toml = r#"
id = "spindle-panel"
name = "Spindle Panel"
version = "0.3.0"
description = "Spindle speed controls"
author = "CNC Controls Team"
placement = "dashboard"
permissions = ["machine.control"]

[ui]
priority = 5
resizable = false
"#;

        let manifest = PluginManifest::parse(toml, DocumentFormat::Toml).unwrap();
        assert!(manifest.validate().is_ok());
        assert!(manifest.has_permission(Permission::MachineControl));
        assert_eq!(manifest.ui.as_ref().and_then(|ui| ui.priority), Some(5));
    }

    #[tokio::test]
    async fn test_load_manifest_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PluginManifest::FILENAME);
        let manifest = plugin_types_core::create_example_manifest();
        tokio::fs::write(&path, serde_json::to_string_pretty(&manifest).unwrap())
            .await
            .unwrap();

        let loaded = PluginManifest::load_from_file(&path).await.unwrap();
        assert_eq!(loaded, manifest);
    }
}

mod registry_document_tests {
    use super::*;

    #[test]
    fn test_valid_registry() {
        let mut featured = registry_entry("machine-monitor", "monitoring");
        featured["featured"] = json!(true);
        featured["rating"] = json!(4.5);

        let document = json!({
            "version": "1.0.0",
            "lastUpdated": "2024-05-01T12:00:00Z",
            "categories": ["monitoring", "utility"],
            "plugins": [featured, registry_entry("gcode-snippets", "utility")]
        });

        assert!(validate_registry(&document).is_empty());

        let registry: PluginRegistry = serde_json::from_value(document).unwrap();
        assert!(registry.find("gcode-snippets").is_some());
        assert_eq!(registry.by_category(PluginCategory::Monitoring).len(), 1);
        assert_eq!(registry.featured()[0].id, "machine-monitor");
    }

    #[test]
    fn test_entry_violations_are_rerooted() {
        let document = json!({
            "version": "1.0.0",
            "categories": ["utility"],
            "plugins": [
                registry_entry("fine", "utility"),
                registry_entry("Not Fine", "utility")
            ]
        });

        let violations = validate_registry(&document);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field_path, "plugins[1].id");
        assert_eq!(violations[0].code, ViolationCode::PatternMismatch);
    }

    #[test]
    fn test_duplicate_ids_reported_on_later_entry() {
        let document = json!({
            "version": "1.0.0",
            "categories": ["utility"],
            "plugins": [
                registry_entry("dup", "utility"),
                registry_entry("other", "utility"),
                registry_entry("dup", "utility")
            ]
        });

        let violations = validate_registry(&document);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field_path, "plugins[2].id");
        assert!(violations[0].message.contains("dup"));
    }

    #[test]
    fn test_bad_categories_and_missing_plugins() {
        let violations = validate_registry(&json!({
            "version": "1",
            "categories": ["utility", "games"]
        }));

        let paths: Vec<&str> = violations.iter().map(|v| v.field_path.as_str()).collect();
        assert_eq!(paths, vec!["version", "plugins", "categories[1]"]);
    }
}
