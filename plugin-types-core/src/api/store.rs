use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

use crate::app_config::{
    ConfigEvent, ConfigEventType, ConfigFile, ConfigLoadingState, ConfigSection,
};
use crate::error::{PluginTypesError, PluginTypesResult};
use crate::validation::resolve_path;

use super::config_api::ConfigApi;

const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Configuration read from the per-section JSON files in one directory.
///
/// A missing file leaves its section absent. A malformed file fails the whole
/// reload and keeps the previously loaded sections.
pub struct FileConfigStore {
    dir: PathBuf,
    sections: RwLock<Map<String, Value>>,
    state: RwLock<ConfigLoadingState>,
    loaded: AtomicBool,
    events: broadcast::Sender<ConfigEvent>,
}

impl FileConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            dir: dir.into(),
            sections: RwLock::new(Map::new()),
            state: RwLock::new(ConfigLoadingState::default()),
            loaded: AtomicBool::new(false),
            events,
        }
    }

    /// Creates a store and performs the first load.
    pub async fn open(dir: impl Into<PathBuf>) -> PluginTypesResult<Self> {
        let store = Self::new(dir);
        store.reload().await?;
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConfigEvent> {
        self.events.subscribe()
    }

    pub async fn loading_state(&self) -> ConfigLoadingState {
        self.state.read().await.clone()
    }

    /// Sections that were present on the last successful load.
    pub async fn loaded_sections(&self) -> Vec<ConfigSection> {
        let sections = self.sections.read().await;
        ConfigSection::ALL
            .into_iter()
            .filter(|s| sections.contains_key(s.as_str()))
            .collect()
    }

    async fn read_sections(&self) -> PluginTypesResult<Map<String, Value>> {
        let mut sections = Map::new();

        for file in ConfigFile::ALL {
            let path = self.dir.join(file.file_name());
            let content = match tokio::fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!(file = file.file_name(), "Config file not present, section left absent");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let value: Value = serde_json::from_str(&content).map_err(|e| {
                PluginTypesError::ConfigParseError(format!("{}: {}", path.display(), e))
            })?;
            sections.insert(file.section().as_str().to_string(), value);
        }

        Ok(sections)
    }

    fn emit(&self, event: ConfigEvent) {
        // No receivers is fine.
        let _ = self.events.send(event);
    }
}

#[async_trait]
impl ConfigApi for FileConfigStore {
    async fn get(&self, path: &str) -> Option<Value> {
        let (section, rest) = match path.split_once('.') {
            Some((section, rest)) => (section, Some(rest)),
            None => (path, None),
        };

        let sections = self.sections.read().await;
        let value = sections.get(section)?;
        match rest {
            Some(rest) => resolve_path(value, rest).cloned(),
            None => (!value.is_null()).then(|| value.clone()),
        }
    }

    async fn get_section(&self, section: ConfigSection) -> Option<Value> {
        self.sections.read().await.get(section.as_str()).cloned()
    }

    fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    async fn reload(&self) -> PluginTypesResult<()> {
        *self.state.write().await = ConfigLoadingState {
            is_loaded: self.is_loaded(),
            ..ConfigLoadingState::loading()
        };

        match self.read_sections().await {
            Ok(sections) => {
                let count = sections.len();
                *self.sections.write().await = sections;
                *self.state.write().await = ConfigLoadingState::loaded();
                self.loaded.store(true, Ordering::Release);
                info!(dir = %self.dir.display(), sections = count, "Loaded configuration");
                self.emit(ConfigEvent::new(ConfigEventType::Loaded));
                Ok(())
            }
            Err(e) => {
                warn!(dir = %self.dir.display(), error = %e, "Configuration reload failed");
                *self.state.write().await = ConfigLoadingState {
                    is_loaded: self.is_loaded(),
                    ..ConfigLoadingState::failed(e.to_string())
                };
                self.emit(ConfigEvent::error(e.to_string()));
                Err(e)
            }
        }
    }
}

/// A fixed configuration tree, for tests and embedding.
pub struct StaticConfigStore {
    root: Value,
}

impl StaticConfigStore {
    pub fn new(root: Value) -> Self {
        Self { root }
    }
}

#[async_trait]
impl ConfigApi for StaticConfigStore {
    async fn get(&self, path: &str) -> Option<Value> {
        resolve_path(&self.root, path).cloned()
    }

    async fn get_section(&self, section: ConfigSection) -> Option<Value> {
        self.root.get(section.as_str()).filter(|v| !v.is_null()).cloned()
    }

    fn is_loaded(&self) -> bool {
        true
    }

    async fn reload(&self) -> PluginTypesResult<()> {
        Ok(())
    }
}
