mod document;
mod manifest;
mod registry;
pub mod rules;
mod types;

pub use document::{load_document, parse_document, DocumentFormat};

pub use manifest::{
    create_example_manifest, MenuConfig, PluginConfig, PluginDependency, PluginManifest,
    PluginUiConfig, SizeBounds, UiDimension, UiSize,
};

pub use registry::{
    validate_registry, Compatibility, PluginRegistry, PluginRegistryEntry, PluginRegistryManifest,
    RegistryMetadata, RepositoryInfo, SizeConfig,
};

pub use rules::{
    host_manifest_rule_set, registry_document_rule_set, registry_entry_rule_set,
    registry_manifest_rule_set,
};

pub use types::{
    parse_version, DependencyKind, Dimension, DimensionKeyword, PluginCategory, PluginPlacement,
    PluginScreen, RepositoryType, ISO_TIMESTAMP_PATTERN, PLUGIN_ID_PATTERN, ROUTE_PATH_PATTERN,
    URL_PATTERN, VALID_DEPENDENCY_KINDS, VALID_PLUGIN_CATEGORIES, VALID_PLUGIN_PLACEMENTS,
    VALID_PLUGIN_SCREENS, VALID_REPOSITORY_TYPES, VERSION_PATTERN,
};
