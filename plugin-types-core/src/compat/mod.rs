//! Compatibility checks between the declared types and what is already in the field.
//!
//! Each check is independent and collects its own errors; [`run_all`] runs them in a
//! fixed order and summarises the outcome.

pub mod fixtures;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::app_config::{ConfigFile, ConfigSection};
use crate::models::{PluginRecord, PluginStateRecord};
use crate::permissions::{Permission, VALID_PERMISSIONS};
use crate::plugins::{registry_manifest_rule_set, PluginRegistryManifest};

/// Permission names plugins in the field were built against.
pub const EXPECTED_PERMISSIONS: [&str; 9] = [
    "machine.read",
    "machine.write",
    "machine.control",
    "status.read",
    "files.read",
    "files.write",
    "config.read",
    "config.write",
    "network.access",
];

/// Permissions whose removal breaks every published plugin.
pub const CRITICAL_PERMISSIONS: [&str; 2] = ["machine.read", "config.read"];

pub const REQUIRED_MANIFEST_FIELDS: [&str; 6] =
    ["id", "name", "version", "description", "author", "placement"];

pub const EXPECTED_CONFIG_FILES: [&str; 7] = [
    "machine.json",
    "state.json",
    "app.json",
    "ui.json",
    "api.json",
    "defaults.json",
    "visualization.json",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatCheck {
    pub name: String,
    pub passed: bool,
    pub errors: Vec<String>,
}

impl CompatCheck {
    fn from_errors(name: &str, errors: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: errors.is_empty(),
            errors,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatReport {
    pub checks: Vec<CompatCheck>,
}

impl CompatReport {
    pub fn total(&self) -> usize {
        self.checks.len()
    }

    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    pub fn total_errors(&self) -> usize {
        self.checks.iter().map(|c| c.errors.len()).sum()
    }

    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }
}

/// Validates each manifest against the registry rules and the typed shape.
///
/// Errors are prefixed with the manifest id (or its index when the id is unusable).
pub fn check_manifests(manifests: &[Value]) -> Vec<String> {
    let rules = registry_manifest_rule_set();
    let mut errors = Vec::new();

    for (index, manifest) in manifests.iter().enumerate() {
        let label = manifest
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", index));

        let violations = rules.validate(manifest);
        debug!(plugin = %label, violations = violations.len(), "Checked manifest");
        errors.extend(violations.iter().map(|v| format!("{}: {}", label, v)));

        if let Err(e) = PluginRegistryManifest::from_value(manifest.clone()) {
            errors.push(format!("{}: type mismatch: {}", label, e));
        }
    }

    errors
}

pub fn check_fixture_compatibility() -> CompatCheck {
    CompatCheck::from_errors(
        "fixture_compatibility",
        check_manifests(&fixtures::existing_plugins()),
    )
}

pub fn check_permission_consistency() -> CompatCheck {
    let mut errors = Vec::new();

    for expected in EXPECTED_PERMISSIONS {
        if !VALID_PERMISSIONS.contains(&expected) {
            errors.push(format!("Missing permission in VALID_PERMISSIONS: {}", expected));
        }
    }
    for actual in VALID_PERMISSIONS {
        if !EXPECTED_PERMISSIONS.contains(actual) {
            errors.push(format!("Unexpected permission in VALID_PERMISSIONS: {}", actual));
        }
        if actual.parse::<Permission>().ok().map(|p| p.as_str()) != Some(*actual) {
            errors.push(format!("Permission does not round-trip: {}", actual));
        }
    }

    CompatCheck::from_errors("permission_consistency", errors)
}

/// Host records and a bare manifest still deserialize into the typed shapes.
pub fn check_type_structure() -> CompatCheck {
    let mut errors = Vec::new();

    if let Err(e) = serde_json::from_value::<PluginRecord>(fixtures::sample_plugin_record()) {
        errors.push(format!("PluginRecord: {}", e));
    }
    if let Err(e) = serde_json::from_value::<PluginStateRecord>(fixtures::sample_plugin_state()) {
        errors.push(format!("PluginStateRecord: {}", e));
    }
    let mut manifest = fixtures::minimal_manifest();
    manifest["permissions"] = serde_json::json!(["machine.read"]);
    if let Err(e) = PluginRegistryManifest::from_value(manifest) {
        errors.push(format!("PluginRegistryManifest: {}", e));
    }

    CompatCheck::from_errors("type_structure", errors)
}

pub fn check_breaking_changes() -> CompatCheck {
    let mut errors = Vec::new();

    for permission in CRITICAL_PERMISSIONS {
        if !VALID_PERMISSIONS.contains(&permission) {
            errors.push(format!("Critical permission removed: {}", permission));
        }
    }

    let required: Vec<&str> = registry_manifest_rule_set().required_paths().collect();
    for field in REQUIRED_MANIFEST_FIELDS {
        if !required.contains(&field) {
            errors.push(format!("Required manifest field no longer required: {}", field));
        }
    }
    for field in &required {
        if !REQUIRED_MANIFEST_FIELDS.contains(field) {
            errors.push(format!("New required manifest field: {}", field));
        }
    }

    let files: Vec<&str> = ConfigFile::ALL.iter().map(|f| f.file_name()).collect();
    for expected in EXPECTED_CONFIG_FILES {
        if !files.contains(&expected) {
            errors.push(format!("Config file removed: {}", expected));
        }
    }
    if ConfigSection::ALL.len() != ConfigFile::ALL.len() {
        errors.push("Config sections and config files are out of step".to_string());
    }

    CompatCheck::from_errors("breaking_changes", errors)
}

/// The minimal and the full manifest validate, deserialize and serialize back unchanged.
pub fn check_schema_consistency() -> CompatCheck {
    let mut errors = Vec::new();

    for (label, manifest) in [
        ("minimal", fixtures::minimal_manifest()),
        ("full", fixtures::full_manifest()),
    ] {
        errors.extend(
            check_manifests(std::slice::from_ref(&manifest))
                .into_iter()
                .map(|e| format!("{} manifest: {}", label, e)),
        );

        let round_trip =
            PluginRegistryManifest::from_value(manifest.clone()).and_then(|m| m.to_value());
        match round_trip {
            Ok(value) if value == manifest => {}
            Ok(_) => errors.push(format!("{} manifest changes shape on round trip", label)),
            Err(_) => {} // reported by check_manifests
        }
    }

    CompatCheck::from_errors("schema_consistency", errors)
}

pub fn run_all() -> CompatReport {
    let checks = vec![
        check_fixture_compatibility(),
        check_permission_consistency(),
        check_type_structure(),
        check_breaking_changes(),
        check_schema_consistency(),
    ];

    for check in checks.iter().filter(|c| !c.passed) {
        warn!(check = %check.name, errors = check.errors.len(), "Compatibility check failed");
    }

    let report = CompatReport { checks };
    info!(
        total = report.total(),
        passed = report.passed(),
        errors = report.total_errors(),
        "Compatibility checks complete"
    );
    report
}
