//! Copies type sources from the host application checkout into this package.

mod transform;

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::{PluginTypesError, PluginTypesResult};

pub use transform::{
    generated_header, rewrite_relative_imports, strip_function_bodies, transform_type_source,
};

/// Environment variable naming the host application checkout.
pub const APP_PATH_ENV: &str = "ELECTRON_APP_PATH";
pub const DEFAULT_APP_PATH: &str = "../electron-app";

/// File name used when a single source file is synced into a target directory.
pub const DIRECTORY_INDEX: &str = "index.ts";

/// One source in the application mapped to one target under the package's `src`.
///
/// A `target` ending in `/` is a directory. When the source is a single file, it is
/// written as [`DIRECTORY_INDEX`] inside that directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncMapping {
    pub target: String,
    pub source: String,
}

impl SyncMapping {
    pub fn new(target: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            source: source.into(),
        }
    }

    pub fn defaults() -> Vec<SyncMapping> {
        vec![
            SyncMapping::new("config/", "src/services/config/types/"),
            SyncMapping::new("database/", "src/services/database/types.ts"),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub app_path: PathBuf,
    pub target_dir: PathBuf,
    pub mappings: Vec<SyncMapping>,
    pub dry_run: bool,
}

impl SyncOptions {
    pub fn new(app_path: impl Into<PathBuf>, target_dir: impl Into<PathBuf>) -> Self {
        Self {
            app_path: app_path.into(),
            target_dir: target_dir.into(),
            mappings: SyncMapping::defaults(),
            dry_run: false,
        }
    }

    /// Application path from `ELECTRON_APP_PATH`, falling back to `../electron-app`.
    pub fn from_env(target_dir: impl Into<PathBuf>) -> Self {
        let app_path = std::env::var(APP_PATH_ENV).unwrap_or_else(|_| DEFAULT_APP_PATH.to_string());
        Self::new(app_path, target_dir)
    }

    pub fn with_mappings(mut self, mappings: Vec<SyncMapping>) -> Self {
        self.mappings = mappings;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncAction {
    /// Transformed and written.
    Transformed,
    /// Copied byte for byte.
    Copied,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncedFile {
    pub source: PathBuf,
    pub target: PathBuf,
    pub action: SyncAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncFailure {
    pub mapping: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl SyncFailure {
    pub fn new(mapping: &str, message: impl Into<String>) -> Self {
        Self {
            mapping: mapping.to_string(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    /// Mappings synced successfully.
    pub synced: usize,
    /// Mappings whose source did not exist.
    pub skipped: usize,
    pub errors: Vec<SyncFailure>,
    pub files: Vec<SyncedFile>,
    pub dry_run: bool,
    pub duration_ms: u64,
}

impl SyncReport {
    fn new(dry_run: bool) -> Self {
        Self {
            synced: 0,
            skipped: 0,
            errors: Vec::new(),
            files: Vec::new(),
            dry_run,
            duration_ms: 0,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

pub struct TypeSyncer {
    options: SyncOptions,
}

impl TypeSyncer {
    pub fn new(options: SyncOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Runs every mapping. A missing application checkout fails the whole run; a
    /// failing mapping is recorded in the report and the remaining mappings still run.
    pub async fn run(&self) -> PluginTypesResult<SyncReport> {
        let start = Instant::now();
        let app_path = &self.options.app_path;

        if !tokio::fs::try_exists(app_path).await.unwrap_or(false) {
            return Err(PluginTypesError::SyncSourceNotFound(
                app_path.display().to_string(),
            ));
        }

        info!(
            app_path = %app_path.display(),
            target = %self.options.target_dir.display(),
            dry_run = self.options.dry_run,
            "Syncing types"
        );

        let mut report = SyncReport::new(self.options.dry_run);

        for mapping in &self.options.mappings {
            let source = app_path.join(&mapping.source);
            let target = self.options.target_dir.join(&mapping.target);

            let metadata = match tokio::fs::metadata(&source).await {
                Ok(metadata) => metadata,
                Err(_) => {
                    warn!(source = %source.display(), "Sync source not found, skipping");
                    report.skipped += 1;
                    continue;
                }
            };

            let result = if metadata.is_dir() {
                self.sync_directory(&source, &target, &mut report.files).await
            } else {
                let target = if mapping.target.ends_with('/') {
                    target.join(DIRECTORY_INDEX)
                } else {
                    target
                };
                self.sync_file(&source, &target, &mut report.files).await
            };

            match result {
                Ok(()) => report.synced += 1,
                Err(e) => {
                    error!(mapping = %mapping.target, error = %e, "Sync failed");
                    report.errors.push(SyncFailure::new(&mapping.target, e.to_string()));
                }
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            synced = report.synced,
            skipped = report.skipped,
            errors = report.errors.len(),
            files = report.files.len(),
            "Sync complete"
        );
        Ok(report)
    }

    /// Walks `source_dir` and syncs every `.ts` file except tests, keeping the layout.
    async fn sync_directory(
        &self,
        source_dir: &Path,
        target_dir: &Path,
        files: &mut Vec<SyncedFile>,
    ) -> PluginTypesResult<()> {
        let mut pending = vec![(source_dir.to_path_buf(), target_dir.to_path_buf())];

        while let Some((source, target)) = pending.pop() {
            let mut entries = Vec::new();
            let mut dir = tokio::fs::read_dir(&source)
                .await
                .map_err(|e| sync_failed(&source, e))?;
            while let Some(entry) = dir.next_entry().await.map_err(|e| sync_failed(&source, e))? {
                entries.push(entry.path());
            }
            entries.sort();

            for path in entries {
                let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string)
                else {
                    continue;
                };
                if path.is_dir() {
                    pending.push((path, target.join(&name)));
                } else if is_type_source(&name) {
                    self.sync_file(&path, &target.join(&name), files).await?;
                } else {
                    debug!(file = %path.display(), "Skipping non-type file");
                }
            }
        }

        Ok(())
    }

    async fn sync_file(
        &self,
        source: &Path,
        target: &Path,
        files: &mut Vec<SyncedFile>,
    ) -> PluginTypesResult<()> {
        let is_ts = source.extension().is_some_and(|ext| ext == "ts");
        let action = if is_ts {
            SyncAction::Transformed
        } else {
            SyncAction::Copied
        };

        if !self.options.dry_run {
            if let Some(parent) = target.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| sync_failed(parent, e))?;
            }

            if is_ts {
                let content = tokio::fs::read_to_string(source)
                    .await
                    .map_err(|e| sync_failed(source, e))?;
                let file_name = source
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or_default();
                let transformed = transform_type_source(&content, file_name);
                tokio::fs::write(target, transformed)
                    .await
                    .map_err(|e| sync_failed(target, e))?;
            } else {
                tokio::fs::copy(source, target)
                    .await
                    .map_err(|e| sync_failed(target, e))?;
            }
        }

        debug!(source = %source.display(), target = %target.display(), ?action, "Synced file");
        files.push(SyncedFile {
            source: source.to_path_buf(),
            target: target.to_path_buf(),
            action,
        });
        Ok(())
    }
}

fn is_type_source(file_name: &str) -> bool {
    file_name.ends_with(".ts") && !file_name.ends_with(".test.ts")
}

fn sync_failed(path: &Path, err: std::io::Error) -> PluginTypesError {
    PluginTypesError::SyncFailed {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}
