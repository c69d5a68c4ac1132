//! Built-in rule sets for manifests and registry documents.
//!
//! Each `*_rules()` function returns the declarative rules; the matching
//! `*_rule_set()` accessor hands out a lazily compiled, process-wide [`RuleSet`].

use std::sync::LazyLock;

use serde_json::Value;

use crate::permissions::VALID_PERMISSIONS;
use crate::validation::{resolve_path, Check, FieldRule, RuleSet};

use super::types::{
    parse_version, ISO_TIMESTAMP_PATTERN, PLUGIN_ID_PATTERN, ROUTE_PATH_PATTERN,
    VALID_DEPENDENCY_KINDS, VALID_PLUGIN_CATEGORIES, VALID_PLUGIN_PLACEMENTS,
    VALID_PLUGIN_SCREENS, VALID_REPOSITORY_TYPES, VERSION_PATTERN,
};

const ID_HINT: &str = "must be lowercase, numbers, hyphens only";
const VERSION_HINT: &str = "must be semantic version";
const BOOLEAN_LITERALS: [&str; 2] = ["true", "false"];
const NON_EMPTY_PATTERN: &str = r"\S";
const NON_EMPTY_HINT: &str = "must not be empty";
const TIMESTAMP_HINT: &str = "must be an ISO 8601 UTC timestamp";
const INTEGER_PATTERN: &str = r"^\d+$";
const INTEGER_HINT: &str = "must be a non-negative integer";
const DIMENSION_PATTERN: &str = r"^(\d+|auto)$";
const DIMENSION_HINT: &str = "must be pixels or auto";
const ROUTE_HINT: &str = "must start with / and use lowercase, numbers, hyphens";

static REGISTRY_MANIFEST: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::compile(registry_manifest_rules()).expect("registry manifest rules compile")
});

static HOST_MANIFEST: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::compile(host_manifest_rules()).expect("host manifest rules compile")
});

static REGISTRY_ENTRY: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::compile(registry_entry_rules()).expect("registry entry rules compile")
});

static REGISTRY_DOCUMENT: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::compile(registry_document_rules()).expect("registry document rules compile")
});

pub fn registry_manifest_rule_set() -> &'static RuleSet {
    &REGISTRY_MANIFEST
}

pub fn host_manifest_rule_set() -> &'static RuleSet {
    &HOST_MANIFEST
}

pub fn registry_entry_rule_set() -> &'static RuleSet {
    &REGISTRY_ENTRY
}

pub fn registry_document_rule_set() -> &'static RuleSet {
    &REGISTRY_DOCUMENT
}

/// A required free-text field. Blank text is rejected like the host does.
fn required_text(path: &str) -> FieldRule {
    FieldRule::required(path).pattern_with_hint(NON_EMPTY_PATTERN, NON_EMPTY_HINT)
}

/// Identity fields every manifest shape requires.
fn identity_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::required("id").pattern_with_hint(PLUGIN_ID_PATTERN, ID_HINT),
        required_text("name"),
        FieldRule::required("version").pattern_with_hint(VERSION_PATTERN, VERSION_HINT),
        required_text("description"),
        required_text("author"),
        FieldRule::required("placement").one_of(VALID_PLUGIN_PLACEMENTS.iter().copied()),
    ]
}

fn permission_check() -> Check {
    Check::one_of(VALID_PERMISSIONS.iter().copied())
}

/// Passes when the version at `min_path` is absent or unparseable, or is not
/// greater than the field value. Malformed versions are left to the pattern checks.
fn not_below(min_path: &'static str) -> impl Fn(&Value, &Value) -> bool + Send + Sync + 'static {
    move |candidate, value| {
        let max = value.as_str().and_then(parse_version);
        let min = resolve_path(candidate, min_path)
            .and_then(Value::as_str)
            .and_then(parse_version);
        match (min, max) {
            (Some(min), Some(max)) => max >= min,
            _ => true,
        }
    }
}

fn is_string(_: &Value, value: &Value) -> bool {
    value.is_string()
}

fn is_object(_: &Value, value: &Value) -> bool {
    value.is_object()
}

fn keyword_check() -> Check {
    Check::custom("Keyword must be a string", is_string)
}

/// Rules for a manifest published to the plugin registry.
pub fn registry_manifest_rules() -> Vec<FieldRule> {
    let mut rules = identity_rules();
    rules.extend([
        FieldRule::optional("category").one_of(VALID_PLUGIN_CATEGORIES.iter().copied()),
        FieldRule::optional("screen").one_of(VALID_PLUGIN_SCREENS.iter().copied()),
        FieldRule::optional("permissions").array_of(permission_check()),
        FieldRule::optional("homepage").url(),
        FieldRule::optional("repository.type").one_of(VALID_REPOSITORY_TYPES.iter().copied()),
        FieldRule::optional("repository.url").url(),
        FieldRule::optional("keywords").array_of(keyword_check()),
        FieldRule::optional("screenshots").array_of(Check::Url),
        FieldRule::optional("changelog").url(),
        FieldRule::optional("routePath").pattern_with_hint(ROUTE_PATH_PATTERN, ROUTE_HINT),
        FieldRule::optional("priority").pattern_with_hint(INTEGER_PATTERN, INTEGER_HINT),
        FieldRule::optional("size.width").pattern_with_hint(DIMENSION_PATTERN, DIMENSION_HINT),
        FieldRule::optional("size.height").pattern_with_hint(DIMENSION_PATTERN, DIMENSION_HINT),
        FieldRule::optional("autoStart").one_of(BOOLEAN_LITERALS),
        FieldRule::optional("compatibility.minAppVersion")
            .pattern_with_hint(VERSION_PATTERN, VERSION_HINT),
        FieldRule::optional("compatibility.maxAppVersion")
            .pattern_with_hint(VERSION_PATTERN, VERSION_HINT)
            .custom(
                "compatibility.maxAppVersion must not be lower than compatibility.minAppVersion",
                not_below("compatibility.minAppVersion"),
            ),
    ]);
    rules
}

/// Rules for the manifest a plugin ships to the host application.
pub fn host_manifest_rules() -> Vec<FieldRule> {
    let mut rules = identity_rules();
    rules.extend([
        FieldRule::required("permissions").array_of(permission_check()),
        FieldRule::optional("category").one_of(VALID_PLUGIN_CATEGORIES.iter().copied()),
        FieldRule::optional("screen").one_of(VALID_PLUGIN_SCREENS.iter().copied()),
        FieldRule::optional("homepage").url(),
        FieldRule::optional("repository").url(),
        FieldRule::optional("keywords").array_of(keyword_check()),
        FieldRule::optional("config.userConfigurable").one_of(BOOLEAN_LITERALS),
        FieldRule::optional("ui.priority").pattern_with_hint(INTEGER_PATTERN, INTEGER_HINT),
        FieldRule::optional("ui.resizable").one_of(BOOLEAN_LITERALS),
        FieldRule::optional("dependencies").array_of(Check::custom(
            "Dependency needs a string name and version",
            |_, dep| {
                dep.get("name").is_some_and(Value::is_string)
                    && dep.get("version").is_some_and(Value::is_string)
            },
        )),
        FieldRule::optional("dependencies").array_of(Check::custom(
            format!("Dependency type must be one of: {}", VALID_DEPENDENCY_KINDS.join(", ")),
            |_, dep| match dep.get("type") {
                None | Some(Value::Null) => true,
                Some(kind) => kind
                    .as_str()
                    .is_some_and(|k| VALID_DEPENDENCY_KINDS.contains(&k)),
            },
        )),
    ]);
    rules
}

/// Rules for one entry of the registry index.
pub fn registry_entry_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::required("id").pattern_with_hint(PLUGIN_ID_PATTERN, ID_HINT),
        required_text("name"),
        required_text("description"),
        required_text("author"),
        FieldRule::required("version").pattern_with_hint(VERSION_PATTERN, VERSION_HINT),
        FieldRule::required("downloadUrl").url(),
        FieldRule::required("manifestUrl").url(),
        FieldRule::required("category").one_of(VALID_PLUGIN_CATEGORIES.iter().copied()),
        FieldRule::optional("tags").array_of(Check::custom("Tag must be a string", is_string)),
        FieldRule::optional("minAppVersion").pattern_with_hint(VERSION_PATTERN, VERSION_HINT),
        FieldRule::optional("maxAppVersion")
            .pattern_with_hint(VERSION_PATTERN, VERSION_HINT)
            .custom(
                "maxAppVersion must not be lower than minAppVersion",
                not_below("minAppVersion"),
            ),
        FieldRule::optional("lastUpdated").pattern_with_hint(ISO_TIMESTAMP_PATTERN, TIMESTAMP_HINT),
        FieldRule::optional("downloads").pattern_with_hint(INTEGER_PATTERN, INTEGER_HINT),
        FieldRule::optional("rating").custom("rating must be a number between 0 and 5", |_, v| {
            v.as_f64().is_some_and(|r| (0.0..=5.0).contains(&r))
        }),
        FieldRule::optional("featured").one_of(BOOLEAN_LITERALS),
    ]
}

/// Rules for the registry index document itself. Entries are checked separately.
pub fn registry_document_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::required("version").pattern_with_hint(VERSION_PATTERN, VERSION_HINT),
        FieldRule::required("plugins")
            .array_of(Check::custom("Registry entry must be an object", is_object)),
        FieldRule::required("categories")
            .array_of(Check::one_of(VALID_PLUGIN_CATEGORIES.iter().copied())),
        FieldRule::optional("lastUpdated").pattern_with_hint(ISO_TIMESTAMP_PATTERN, TIMESTAMP_HINT),
    ]
}
