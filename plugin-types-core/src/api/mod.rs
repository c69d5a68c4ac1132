//! The API surface the host hands to plugins.

mod config_api;
mod store;

use std::sync::Arc;

pub use config_api::ConfigApi;
pub use store::{FileConfigStore, StaticConfigStore};

/// Everything a plugin receives from the host. Only configuration access exists today.
#[derive(Clone)]
pub struct PluginApi {
    pub config: Arc<dyn ConfigApi>,
}

impl PluginApi {
    pub fn new(config: Arc<dyn ConfigApi>) -> Self {
        Self { config }
    }
}

impl std::fmt::Debug for PluginApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginApi")
            .field("config_loaded", &self.config.is_loaded())
            .finish()
    }
}
