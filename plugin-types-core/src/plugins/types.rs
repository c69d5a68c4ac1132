use serde::{Deserialize, Serialize};

/// Plugin id: lowercase letters, digits and hyphens.
pub const PLUGIN_ID_PATTERN: &str = r"^[a-z0-9-]+$";

/// Semantic version, major.minor.patch.
pub const VERSION_PATTERN: &str = r"^\d+\.\d+\.\d+$";

pub use crate::validation::URL_PATTERN;

/// ISO 8601 UTC timestamp with optional milliseconds.
pub const ISO_TIMESTAMP_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d{3})?Z$";

/// Route path for standalone plugins.
pub const ROUTE_PATH_PATTERN: &str = r"^/[a-z0-9-/]*$";

/// Declares a string-literal enum with its ordered wire names.
macro_rules! literal_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $list:ident {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        pub const $list: &[&str] = &[$($wire),+];

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            pub fn parse(s: &str) -> Option<Self> {
                match s {
                    $($wire => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

literal_enum! {
    PluginCategory, VALID_PLUGIN_CATEGORIES {
        Monitoring => "monitoring",
        Control => "control",
        Visualization => "visualization",
        Utility => "utility",
        Automation => "automation",
        Management => "management",
    }
}

literal_enum! {
    /// Where the plugin is displayed in the host UI.
    PluginPlacement, VALID_PLUGIN_PLACEMENTS {
        Dashboard => "dashboard",
        Standalone => "standalone",
        Modal => "modal",
        Sidebar => "sidebar",
    }
}

literal_enum! {
    PluginScreen, VALID_PLUGIN_SCREENS {
        Main => "main",
        Controls => "controls",
        Settings => "settings",
        New => "new",
    }
}

literal_enum! {
    RepositoryType, VALID_REPOSITORY_TYPES {
        Git => "git",
        Svn => "svn",
        Hg => "hg",
    }
}

literal_enum! {
    DependencyKind, VALID_DEPENDENCY_KINDS {
        Plugin => "plugin",
        Npm => "npm",
        System => "system",
    }
}

/// A width or height that is either a pixel count or `"auto"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Pixels(u32),
    Keyword(DimensionKeyword),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionKeyword {
    Auto,
}

impl Dimension {
    pub fn auto() -> Self {
        Dimension::Keyword(DimensionKeyword::Auto)
    }

    pub fn pixels(&self) -> Option<u32> {
        match self {
            Dimension::Pixels(px) => Some(*px),
            Dimension::Keyword(_) => None,
        }
    }
}

/// Parses `major.minor.patch` into a comparable tuple.
pub fn parse_version(version: &str) -> Option<(u64, u64, u64)> {
    let mut parts = version.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    let patch = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((major, minor, patch))
}
