#![allow(
    clippy::needless_borrows_for_generic_args,
    clippy::derivable_impls,
    clippy::type_complexity,
    clippy::len_zero,
    dead_code
)]

pub mod api;
pub mod app_config;
pub mod compat;
pub mod config;
pub mod error;
pub mod models;
pub mod permissions;
pub mod plugins;
pub mod sync;
pub mod validation;

pub use api::{ConfigApi, FileConfigStore, PluginApi, StaticConfigStore};
pub use app_config::{
    ApiConfig, AppConfig, CompleteConfig, ConfigEvent, ConfigEventType, ConfigFile,
    ConfigLoadingState, ConfigSection, DefaultsConfig, MachineConfig, StateConfig, UiConfig,
    VisualizationConfig,
};
pub use compat::{run_all as run_compat_checks, CompatCheck, CompatReport};
pub use config::{
    get_config_dir, ConfigLoadError, DisplayConfig, LoggingConfig, PluginTypesConfig, SyncSettings,
};
pub use error::{CliErrorDisplay, PluginTypesError, PluginTypesResult};
pub use models::{
    AppStateRecord, ChangedBy, CommandRecord, CommandSource, CommandStatus, CommandType,
    PluginDependencyRecord, PluginRecord, PluginSource, PluginStateRecord, PluginStatus,
    PluginType, SettingHistoryRecord,
};
pub use permissions::{
    GrantedBy, Permission, PermissionGrant, PermissionRequest, VALID_PERMISSIONS,
};
pub use plugins::{
    create_example_manifest, host_manifest_rule_set, load_document, parse_document,
    parse_version, registry_document_rule_set, registry_entry_rule_set,
    registry_manifest_rule_set, validate_registry, Compatibility, Dimension, DocumentFormat,
    PluginCategory, PluginDependency, PluginManifest, PluginPlacement, PluginRegistry,
    PluginRegistryEntry, PluginRegistryManifest, PluginScreen,
};
pub use sync::{SyncMapping, SyncOptions, SyncReport, TypeSyncer};
pub use validation::{
    validate, Check, CustomCheck, FieldRule, RuleSet, RuleSetError, ValidationReport, Violation,
    ViolationCode,
};
