use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use comfy_table::Cell;
use plugin_types_core::{ConfigSection, FileConfigStore, PluginApi};
use std::path::PathBuf;
use std::sync::Arc;

use super::new_table;
use crate::config::CliConfig;

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Show the effective plugin-types settings")]
    Show,

    #[command(about = "Read a value from the host application's config directory")]
    Get {
        #[arg(help = "Dot-separated path, e.g. machine.connection.port")]
        path: String,

        #[arg(short, long, help = "Directory holding machine.json, app.json, ...")]
        dir: PathBuf,
    },

    #[command(about = "List which config sections a directory provides")]
    Sections {
        #[arg(short, long)]
        dir: PathBuf,
    },
}

pub async fn handle_config_command(
    config: &CliConfig,
    action: Option<ConfigCommand>,
) -> Result<bool> {
    match action {
        Some(ConfigCommand::Show) | None => cmd_config_show(config),
        Some(ConfigCommand::Get { path, dir }) => cmd_config_get(&path, dir).await,
        Some(ConfigCommand::Sections { dir }) => cmd_config_sections(dir).await,
    }
}

fn cmd_config_show(config: &CliConfig) -> Result<bool> {
    println!("{}", serde_json::to_string_pretty(&config.settings)?);
    Ok(true)
}

async fn cmd_config_get(path: &str, dir: PathBuf) -> Result<bool> {
    let store = FileConfigStore::open(dir).await?;
    let api = PluginApi::new(Arc::new(store));

    match api.config.get(path).await {
        Some(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(true)
        }
        None => {
            eprintln!("{} {} is not set", "!".yellow().bold(), path.bold());
            Ok(false)
        }
    }
}

async fn cmd_config_sections(dir: PathBuf) -> Result<bool> {
    let store = FileConfigStore::open(dir).await?;
    let loaded = store.loaded_sections().await;

    let mut table = new_table(&["Section", "File", "Loaded"]);
    for section in ConfigSection::ALL {
        let present = loaded.contains(&section);
        table.add_row(vec![
            Cell::new(section.as_str()),
            Cell::new(section.file().file_name()),
            Cell::new(if present {
                "✓".green().to_string()
            } else {
                "✗".dimmed().to_string()
            }),
        ]);
    }
    println!("{}", table);

    Ok(true)
}
