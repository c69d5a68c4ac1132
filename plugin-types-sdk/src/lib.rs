#![allow(clippy::needless_borrows_for_generic_args)]

pub mod macros;
mod prelude;

pub use prelude::*;

pub use plugin_types_core::error::{PluginTypesError, PluginTypesResult};

pub use plugin_types_core::api::StaticConfigStore;

pub use plugin_types_core::app_config::{
    ApiConfig, AppConfig, CompleteConfig, ConfigEvent, ConfigEventType, DefaultsConfig,
    MachineConfig, StateConfig, UiConfig, VisualizationConfig,
};

pub use plugin_types_core::permissions::{
    GrantedBy, PermissionGrant, PermissionRequest, VALID_PERMISSIONS,
};

pub use plugin_types_core::plugins::{
    create_example_manifest, Compatibility, Dimension, MenuConfig, PluginConfig,
    PluginDependency, PluginUiConfig, RepositoryInfo, SizeBounds, SizeConfig, UiDimension,
    UiSize,
};

pub use plugin_types_core::validation::{Violation, ViolationCode};

pub mod version {
    use plugin_types_core::plugins::{parse_version, Compatibility};

    pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const MIN_APP_VERSION: &str = "1.0.0";

    /// Whether plugins built with this SDK can run on `app_version`.
    pub fn is_compatible(app_version: &str) -> bool {
        match (parse_version(app_version), parse_version(MIN_APP_VERSION)) {
            (Some(version), Some(min)) => version >= min,
            _ => false,
        }
    }

    /// Whether `app_version` falls inside a manifest's declared range. Both ends inclusive.
    pub fn supports(compatibility: &Compatibility, app_version: &str) -> bool {
        let Some(version) = parse_version(app_version) else {
            return false;
        };

        let above_min =
            parse_version(&compatibility.min_app_version).is_some_and(|min| version >= min);
        let below_max = match compatibility.max_app_version.as_deref() {
            None => true,
            Some(max) => parse_version(max).is_some_and(|max| version <= max),
        };

        above_min && below_max
    }

    pub fn default_compatibility() -> Compatibility {
        Compatibility {
            min_app_version: MIN_APP_VERSION.to_string(),
            max_app_version: None,
        }
    }
}

pub mod helpers {
    use plugin_types_core::api::ConfigApi;
    use plugin_types_core::error::PluginTypesResult;
    use plugin_types_core::plugins::PluginConfig;
    use serde::de::DeserializeOwned;
    use serde_json::{json, Map, Value};

    pub fn create_config_schema(properties: Value) -> Value {
        json!({
            "type": "object",
            "properties": properties
        })
    }

    pub fn string_property(description: &str, default: Option<&str>) -> Value {
        let mut prop = json!({
            "type": "string",
            "description": description
        });
        if let Some(d) = default {
            prop["default"] = json!(d);
        }
        prop
    }

    pub fn number_property(description: &str, default: Option<f64>) -> Value {
        let mut prop = json!({
            "type": "number",
            "description": description
        });
        if let Some(d) = default {
            prop["default"] = json!(d);
        }
        prop
    }

    pub fn integer_property(description: &str, default: Option<i64>) -> Value {
        let mut prop = json!({
            "type": "integer",
            "description": description
        });
        if let Some(d) = default {
            prop["default"] = json!(d);
        }
        prop
    }

    pub fn boolean_property(description: &str, default: Option<bool>) -> Value {
        let mut prop = json!({
            "type": "boolean",
            "description": description
        });
        if let Some(d) = default {
            prop["default"] = json!(d);
        }
        prop
    }

    pub fn enum_property(description: &str, values: &[&str], default: Option<&str>) -> Value {
        let mut prop = json!({
            "type": "string",
            "description": description,
            "enum": values
        });
        if let Some(d) = default {
            prop["default"] = json!(d);
        }
        prop
    }

    pub fn array_property(description: &str, item_type: &str) -> Value {
        json!({
            "type": "array",
            "description": description,
            "items": {
                "type": item_type
            }
        })
    }

    /// Collects each property's `default` into a defaults map.
    pub fn defaults_from_schema(schema: &Value) -> Map<String, Value> {
        schema
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| {
                props
                    .iter()
                    .filter_map(|(name, prop)| {
                        prop.get("default").map(|d| (name.clone(), d.clone()))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// A user-configurable plugin config whose defaults come from the schema.
    pub fn plugin_config(schema: Value) -> PluginConfig {
        let defaults = defaults_from_schema(&schema);
        PluginConfig {
            defaults: (!defaults.is_empty()).then_some(defaults),
            schema: Some(schema),
            user_configurable: Some(true),
        }
    }

    /// Typed read from the host configuration, falling back when absent or malformed.
    pub async fn read_config<T: DeserializeOwned>(
        config: &(dyn ConfigApi + 'static),
        path: &str,
        fallback: T,
    ) -> T {
        config.get_as_or(path, fallback).await
    }

    /// Typed read that surfaces a wrongly shaped value as an error.
    pub async fn try_read_config<T: DeserializeOwned>(
        config: &(dyn ConfigApi + 'static),
        path: &str,
    ) -> PluginTypesResult<Option<T>> {
        config.get_as(path).await
    }
}
