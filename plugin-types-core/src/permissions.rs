use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::PluginTypesError;

/// A capability a plugin must be granted before the host lets it act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// Read machine status and configuration
    #[serde(rename = "machine.read")]
    MachineRead,
    /// Send commands to the machine
    #[serde(rename = "machine.write")]
    MachineWrite,
    /// Full machine control (includes read/write)
    #[serde(rename = "machine.control")]
    MachineControl,
    #[serde(rename = "status.read")]
    StatusRead,
    #[serde(rename = "files.read")]
    FilesRead,
    #[serde(rename = "files.write")]
    FilesWrite,
    #[serde(rename = "config.read")]
    ConfigRead,
    #[serde(rename = "config.write")]
    ConfigWrite,
    /// Make external network requests
    #[serde(rename = "network.access")]
    NetworkAccess,
}

/// Wire names of every permission, in declaration order.
pub const VALID_PERMISSIONS: &[&str] = &[
    "machine.read",
    "machine.write",
    "machine.control",
    "status.read",
    "files.read",
    "files.write",
    "config.read",
    "config.write",
    "network.access",
];

impl Permission {
    pub const ALL: [Permission; 9] = [
        Permission::MachineRead,
        Permission::MachineWrite,
        Permission::MachineControl,
        Permission::StatusRead,
        Permission::FilesRead,
        Permission::FilesWrite,
        Permission::ConfigRead,
        Permission::ConfigWrite,
        Permission::NetworkAccess,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::MachineRead => "machine.read",
            Permission::MachineWrite => "machine.write",
            Permission::MachineControl => "machine.control",
            Permission::StatusRead => "status.read",
            Permission::FilesRead => "files.read",
            Permission::FilesWrite => "files.write",
            Permission::ConfigRead => "config.read",
            Permission::ConfigWrite => "config.write",
            Permission::NetworkAccess => "network.access",
        }
    }

    /// Whether holding `self` also grants `other`.
    pub fn implies(&self, other: &Permission) -> bool {
        match self {
            Permission::MachineControl => matches!(
                other,
                Permission::MachineControl | Permission::MachineRead | Permission::MachineWrite
            ),
            _ => self == other,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Permission::MachineRead => "Read machine status and configuration",
            Permission::MachineWrite => "Send commands to machine",
            Permission::MachineControl => "Full machine control (includes read/write)",
            Permission::StatusRead => "Read system status information",
            Permission::FilesRead => "Read file system and project files",
            Permission::FilesWrite => "Write/modify files",
            Permission::ConfigRead => "Read application configuration",
            Permission::ConfigWrite => "Modify application configuration",
            Permission::NetworkAccess => "Make external network requests",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Permission {
    type Err = PluginTypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                PluginTypesError::ManifestParseError(format!("Unknown permission: {}", s))
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionRequest {
    pub permission: Permission,
    pub reason: String,
    pub required: bool,
}

impl PermissionRequest {
    pub fn required(permission: Permission, reason: impl Into<String>) -> Self {
        Self {
            permission,
            reason: reason.into(),
            required: true,
        }
    }

    pub fn optional(permission: Permission, reason: impl Into<String>) -> Self {
        Self {
            permission,
            reason: reason.into(),
            required: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantedBy {
    User,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionGrant {
    pub permission: Permission,
    pub granted: bool,
    pub granted_at: DateTime<Utc>,
    pub granted_by: GrantedBy,
}

impl PermissionGrant {
    pub fn grant(permission: Permission, granted_by: GrantedBy) -> Self {
        Self {
            permission,
            granted: true,
            granted_at: Utc::now(),
            granted_by,
        }
    }

    pub fn deny(permission: Permission, granted_by: GrantedBy) -> Self {
        Self {
            granted: false,
            ..Self::grant(permission, granted_by)
        }
    }

    /// True when this grant is active and covers `permission`.
    pub fn covers(&self, permission: &Permission) -> bool {
        self.granted && self.permission.implies(permission)
    }
}
