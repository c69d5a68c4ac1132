use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{PluginTypesError, PluginTypesResult};

/// Text formats a manifest or registry document may arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Toml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> PluginTypesResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(DocumentFormat::Json),
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            "toml" => Ok(DocumentFormat::Toml),
            other => Err(PluginTypesError::UnsupportedFormat(if other.is_empty() {
                path.display().to_string()
            } else {
                other.to_string()
            })),
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFormat::Json => write!(f, "json"),
            DocumentFormat::Yaml => write!(f, "yaml"),
            DocumentFormat::Toml => write!(f, "toml"),
        }
    }
}

/// Parses document text into an untyped JSON tree for validation.
pub fn parse_document(content: &str, format: DocumentFormat) -> PluginTypesResult<Value> {
    let value = match format {
        DocumentFormat::Json => serde_json::from_str(content)
            .map_err(|e| PluginTypesError::ManifestParseError(e.to_string()))?,
        DocumentFormat::Yaml => serde_yaml::from_str(content)?,
        DocumentFormat::Toml => toml::from_str(content)?,
    };
    Ok(value)
}

/// Reads and parses a document, picking the format from the file extension.
pub async fn load_document(path: &Path) -> PluginTypesResult<Value> {
    let format = DocumentFormat::from_path(path)?;
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        PluginTypesError::ManifestParseError(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))
    })?;
    debug!(path = %path.display(), %format, "Loaded document");
    parse_document(&content, format)
}
