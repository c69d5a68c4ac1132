//! Error types for the plugin-types core library.
//!
//! Validation findings are *not* errors: a manifest that breaks its rules yields a
//! list of [`Violation`](crate::validation::Violation)s. The variants below cover the
//! conditions that stop an operation outright, such as a malformed rule set, an
//! unreadable manifest file or a missing sync source.
//!
//! # Error Codes Reference
//!
//! | Code Range | Category | Description |
//! |------------|----------|-------------|
//! | E1001-E1099 | Config | Config file and config value errors |
//! | E2001-E2099 | Rule set | Structurally invalid validation rule sets |
//! | E3001-E3099 | Manifest | Manifest parsing and validation failures |
//! | E4001-E4099 | Sync | Type synchronization from the host application |
//! | E9001-E9099 | General | IO and serialization errors |

use std::fmt;
use thiserror::Error;
use tracing::error;

use crate::validation::RuleSetError;

/// The main error type for the plugin-types core library.
#[derive(Debug, Error)]
pub enum PluginTypesError {
    // ========================================================================
    // Configuration Errors (E1001-E1099)
    // ========================================================================
    /// Configuration file parse error
    #[error("[E1001] Failed to parse configuration: {0}")]
    ConfigParseError(String),

    /// Invalid configuration value
    #[error("[E1002] Invalid configuration value for '{key}': {message}")]
    InvalidConfigValue { key: String, message: String },

    // ========================================================================
    // Rule Set Errors (E2001-E2099)
    // ========================================================================
    /// The rule set itself is malformed
    #[error("[E2001] Invalid rule set: {0}")]
    RuleSet(#[from] RuleSetError),

    // ========================================================================
    // Manifest Errors (E3001-E3099)
    // ========================================================================
    /// Manifest text could not be parsed
    #[error("[E3001] Failed to parse manifest: {0}")]
    ManifestParseError(String),

    /// Manifest parsed but broke one or more rules
    #[error("[E3002] Manifest '{id}' has {count} violation(s)")]
    ManifestInvalid { id: String, count: usize },

    /// Manifest file extension is not one we can read
    #[error("[E3003] Unsupported manifest format: {0}")]
    UnsupportedFormat(String),

    // ========================================================================
    // Sync Errors (E4001-E4099)
    // ========================================================================
    /// The host application checkout does not exist
    #[error("[E4001] Sync source not found: {0}")]
    SyncSourceNotFound(String),

    /// A single file or directory failed to sync
    #[error("[E4002] Failed to sync '{path}': {message}")]
    SyncFailed { path: String, message: String },

    // ========================================================================
    // General Errors (E9001-E9099)
    // ========================================================================
    /// IO error
    #[error("[E9001] IO error: {0}")]
    IoError(String),

    /// Serialization/deserialization error
    #[error("[E9002] Serialization error: {0}")]
    SerializationError(String),
}

/// Result type alias for plugin-types operations.
pub type PluginTypesResult<T> = Result<T, PluginTypesError>;

// ============================================================================
// From trait implementations for seamless error propagation
// ============================================================================

impl From<serde_json::Error> for PluginTypesError {
    fn from(err: serde_json::Error) -> Self {
        PluginTypesError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for PluginTypesError {
    fn from(err: serde_yaml::Error) -> Self {
        PluginTypesError::ManifestParseError(err.to_string())
    }
}

impl From<toml::de::Error> for PluginTypesError {
    fn from(err: toml::de::Error) -> Self {
        PluginTypesError::ManifestParseError(err.to_string())
    }
}

impl From<std::io::Error> for PluginTypesError {
    fn from(err: std::io::Error) -> Self {
        PluginTypesError::IoError(err.to_string())
    }
}

impl From<config::ConfigError> for PluginTypesError {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::NotFound(key) => PluginTypesError::InvalidConfigValue {
                key,
                message: "Key not found".to_string(),
            },
            config::ConfigError::FileParse { uri, cause } => PluginTypesError::ConfigParseError(
                format!("Failed to parse {}: {}", uri.unwrap_or_default(), cause),
            ),
            config::ConfigError::Type {
                origin,
                unexpected,
                expected,
                key,
            } => PluginTypesError::InvalidConfigValue {
                key: key.unwrap_or_else(|| origin.map(|o| o.to_string()).unwrap_or_default()),
                message: format!("Expected {}, got {}", expected, unexpected),
            },
            _ => PluginTypesError::ConfigParseError(err.to_string()),
        }
    }
}

impl From<crate::config::ConfigLoadError> for PluginTypesError {
    fn from(err: crate::config::ConfigLoadError) -> Self {
        match err {
            crate::config::ConfigLoadError::Config(e) => e.into(),
            crate::config::ConfigLoadError::MissingRequired(key) => {
                PluginTypesError::InvalidConfigValue {
                    key,
                    message: "Missing required value".to_string(),
                }
            }
            crate::config::ConfigLoadError::InvalidValue { key, message } => {
                PluginTypesError::InvalidConfigValue { key, message }
            }
        }
    }
}

// ============================================================================
// Error categorization helpers
// ============================================================================

impl PluginTypesError {
    /// Returns true if this error is related to configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            PluginTypesError::ConfigParseError(_) | PluginTypesError::InvalidConfigValue { .. }
        )
    }

    /// Returns true if the rule set, rather than the data, is at fault.
    pub fn is_rule_set_error(&self) -> bool {
        matches!(self, PluginTypesError::RuleSet(_))
    }

    /// Returns true if this error is related to manifest handling.
    pub fn is_manifest_error(&self) -> bool {
        matches!(
            self,
            PluginTypesError::ManifestParseError(_)
                | PluginTypesError::ManifestInvalid { .. }
                | PluginTypesError::UnsupportedFormat(_)
        )
    }

    /// Returns true if this error came from the sync tool.
    pub fn is_sync_error(&self) -> bool {
        matches!(
            self,
            PluginTypesError::SyncSourceNotFound(_) | PluginTypesError::SyncFailed { .. }
        )
    }

    /// Returns an error code suitable for logging or external reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            PluginTypesError::ConfigParseError(_) => "E1001",
            PluginTypesError::InvalidConfigValue { .. } => "E1002",
            PluginTypesError::RuleSet(_) => "E2001",
            PluginTypesError::ManifestParseError(_) => "E3001",
            PluginTypesError::ManifestInvalid { .. } => "E3002",
            PluginTypesError::UnsupportedFormat(_) => "E3003",
            PluginTypesError::SyncSourceNotFound(_) => "E4001",
            PluginTypesError::SyncFailed { .. } => "E4002",
            PluginTypesError::IoError(_) => "E9001",
            PluginTypesError::SerializationError(_) => "E9002",
        }
    }

    /// Returns a user-friendly suggestion for how to resolve this error.
    pub fn user_suggestion(&self) -> Option<&'static str> {
        match self {
            PluginTypesError::SyncSourceNotFound(_) => Some(
                "Set ELECTRON_APP_PATH or make sure ../electron-app exists next to this package",
            ),
            PluginTypesError::UnsupportedFormat(_) => {
                Some("Manifests must be .json, .yaml/.yml or .toml files")
            }
            PluginTypesError::ManifestInvalid { .. } => {
                Some("Run 'plugin-types validate <file>' to list every violation")
            }
            PluginTypesError::RuleSet(_) => {
                Some("The rule set is a programming error; fix its definition, not the data")
            }
            _ => None,
        }
    }

    /// Log this error with its code and suggestion.
    pub fn log(&self) {
        let code = self.error_code();
        let suggestion = self.user_suggestion();

        error!(
            error_code = %code,
            suggestion = suggestion,
            "Error occurred: {}",
            self
        );
    }
}

// ============================================================================
// User-friendly error formatting for CLI
// ============================================================================

/// Format an error for CLI display with an optional suggestion.
pub struct CliErrorDisplay<'a> {
    error: &'a PluginTypesError,
    show_suggestion: bool,
}

impl<'a> CliErrorDisplay<'a> {
    pub fn new(error: &'a PluginTypesError) -> Self {
        Self {
            error,
            show_suggestion: true,
        }
    }

    pub fn without_suggestion(mut self) -> Self {
        self.show_suggestion = false;
        self
    }
}

impl<'a> fmt::Display for CliErrorDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.error)?;

        if self.show_suggestion {
            if let Some(suggestion) = self.error.user_suggestion() {
                writeln!(f)?;
                writeln!(f, "  Suggestion: {}", suggestion)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PluginTypesError::ConfigParseError("plugin-types.toml".to_string());
        assert!(err.to_string().contains("E1001"));
        assert!(err.to_string().contains("plugin-types.toml"));

        let err = PluginTypesError::ManifestInvalid {
            id: "quick-settings".to_string(),
            count: 3,
        };
        assert!(err.to_string().contains("E3002"));
        assert!(err.to_string().contains("quick-settings"));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_error_categorization() {
        let config_err = PluginTypesError::ConfigParseError("bad toml".to_string());
        assert!(config_err.is_config_error());
        assert!(!config_err.is_sync_error());

        let sync_err = PluginTypesError::SyncSourceNotFound("../electron-app".to_string());
        assert!(sync_err.is_sync_error());
        assert!(!sync_err.is_manifest_error());

        let rule_err: PluginTypesError = RuleSetError::EmptyFieldPath { index: 0 }.into();
        assert!(rule_err.is_rule_set_error());
        assert_eq!(rule_err.error_code(), "E2001");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            PluginTypesError::InvalidConfigValue {
                key: "logging.level".to_string(),
                message: "bad".to_string()
            }
            .error_code(),
            "E1002"
        );
        assert_eq!(
            PluginTypesError::UnsupportedFormat("xml".to_string()).error_code(),
            "E3003"
        );
        assert_eq!(
            PluginTypesError::SyncFailed {
                path: "a.ts".to_string(),
                message: "denied".to_string()
            }
            .error_code(),
            "E4002"
        );
        assert_eq!(
            PluginTypesError::SerializationError("err".to_string()).error_code(),
            "E9002"
        );
    }

    #[test]
    fn test_user_suggestions() {
        assert!(PluginTypesError::SyncSourceNotFound("x".to_string())
            .user_suggestion()
            .is_some());
        assert!(PluginTypesError::IoError("err".to_string())
            .user_suggestion()
            .is_none());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PluginTypesError = io_err.into();
        assert!(matches!(err, PluginTypesError::IoError(_)));
    }

    #[test]
    fn test_from_config_load_error() {
        let err: PluginTypesError = crate::config::ConfigLoadError::InvalidValue {
            key: "logging.level".to_string(),
            message: "bad".to_string(),
        }
        .into();
        assert!(err.is_config_error());
        assert_eq!(err.error_code(), "E1002");

        let err: PluginTypesError =
            crate::config::ConfigLoadError::MissingRequired("sync.target_dir".to_string()).into();
        assert!(err.to_string().contains("sync.target_dir"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: PluginTypesError = json_err.into();
        assert!(matches!(err, PluginTypesError::SerializationError(_)));
    }

    #[test]
    fn test_cli_error_display() {
        let err = PluginTypesError::SyncSourceNotFound("../electron-app".to_string());
        let output = CliErrorDisplay::new(&err).to_string();
        assert!(output.contains("../electron-app"));
        assert!(output.contains("Suggestion"));

        let output = CliErrorDisplay::new(&err).without_suggestion().to_string();
        assert!(!output.contains("Suggestion"));
    }
}
