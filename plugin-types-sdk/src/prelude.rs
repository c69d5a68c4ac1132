pub use async_trait::async_trait;
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use serde_json::{json, Value as JsonValue};
pub use std::sync::Arc;
pub use tracing::{debug, error, info, trace, warn};

pub use plugin_types_core::api::{ConfigApi, PluginApi};
pub use plugin_types_core::app_config::ConfigSection;
pub use plugin_types_core::permissions::Permission;
pub use plugin_types_core::plugins::{
    PluginCategory, PluginManifest, PluginPlacement, PluginRegistryManifest, PluginScreen,
};
