use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::app_config::ConfigSection;
use crate::error::{PluginTypesError, PluginTypesResult};

/// Read access to the host configuration, as handed to plugins.
///
/// Paths are dot-separated and rooted at the section name, for example
/// `machine.jogSettings.defaultSpeed`.
#[async_trait]
pub trait ConfigApi: Send + Sync {
    /// Value at `path`, or `None` when any segment is missing or the leaf is null.
    async fn get(&self, path: &str) -> Option<Value>;

    async fn get_section(&self, section: ConfigSection) -> Option<Value>;

    async fn get_with_fallback(&self, path: &str, fallback: Value) -> Value {
        self.get(path).await.unwrap_or(fallback)
    }

    fn is_loaded(&self) -> bool;

    async fn reload(&self) -> PluginTypesResult<()>;
}

impl dyn ConfigApi {
    /// Typed lookup. A present value of the wrong shape is an error, not `None`.
    pub async fn get_as<T: DeserializeOwned>(&self, path: &str) -> PluginTypesResult<Option<T>> {
        match self.get(path).await {
            None => Ok(None),
            Some(value) => serde_json::from_value(value).map(Some).map_err(|e| {
                PluginTypesError::InvalidConfigValue {
                    key: path.to_string(),
                    message: e.to_string(),
                }
            }),
        }
    }

    pub async fn get_as_or<T: DeserializeOwned>(&self, path: &str, fallback: T) -> T {
        self.get_as(path).await.ok().flatten().unwrap_or(fallback)
    }
}
