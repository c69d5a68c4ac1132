pub mod compat;
pub mod config;
pub mod permissions;
pub mod rules;
pub mod sync;
pub mod validate;

use clap::ValueEnum;
use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table,
};

pub use compat::handle_compat_command;
pub use config::{handle_config_command, ConfigCommand};
pub use permissions::handle_permissions_command;
pub use rules::handle_rules_command;
pub use sync::handle_sync_command;
pub use validate::handle_validate_command;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Which document shape a file is checked as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocumentKind {
    /// Manifest published to the plugin registry
    Manifest,
    /// Manifest a plugin ships to the host application
    HostManifest,
    /// Single registry index entry
    Entry,
    /// Whole registry index
    Registry,
}

impl DocumentKind {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Manifest => "registry manifest",
            DocumentKind::HostManifest => "host manifest",
            DocumentKind::Entry => "registry entry",
            DocumentKind::Registry => "registry",
        }
    }
}

pub(crate) fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(comfy_table::Color::Cyan))
                .collect::<Vec<_>>(),
        );
    table
}
