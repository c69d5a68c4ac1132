#![allow(
    clippy::needless_borrows_for_generic_args,
    clippy::useless_format,
    clippy::len_zero
)]

use clap::{Parser, Subcommand};
use colored::Colorize;
use plugin_types_core::{CliErrorDisplay, ConfigSection, PluginTypesError, VALID_PERMISSIONS};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;

use commands::{
    handle_compat_command, handle_config_command, handle_permissions_command,
    handle_rules_command, handle_sync_command, handle_validate_command, ConfigCommand,
    DocumentKind, OutputFormat,
};
use config::CliConfig;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Parser)]
#[command(name = "plugin-types")]
#[command(version = VERSION)]
#[command(about = "Validate plugin manifests and keep shared plugin types in sync")]
#[command(long_about = r#"
plugin-types checks plugin manifests and registry documents for the CNC controls
application, runs the compatibility suite against already published plugins, and
copies type sources from the application checkout into this package.

Use 'plugin-types validate <file>' to check a manifest, 'plugin-types compat' to
run the compatibility suite and 'plugin-types sync' to refresh the shared types.
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Validate a manifest or registry document (.json, .yaml, .toml)")]
    Validate {
        file: PathBuf,

        #[arg(short, long, value_enum, default_value = "manifest")]
        kind: DocumentKind,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    #[command(about = "Run the compatibility suite against published plugins")]
    Compat {
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    #[command(about = "Sync type sources from the application checkout")]
    Sync {
        #[arg(short, long, help = "Application checkout (defaults to ELECTRON_APP_PATH)")]
        app_path: Option<PathBuf>,

        #[arg(short, long, help = "Directory the types are written into")]
        target: Option<PathBuf>,

        #[arg(long, help = "Report what would be written without writing")]
        dry_run: bool,
    },

    #[command(about = "List the permissions a plugin can request")]
    Permissions {
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    #[command(about = "Show the built-in validation rules")]
    Rules {
        #[arg(short, long, value_enum, default_value = "manifest")]
        kind: DocumentKind,
    },

    #[command(about = "Show tool settings or read host configuration")]
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommand>,
    },

    #[command(about = "Show version information")]
    Version {
        #[arg(short, long)]
        detailed: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = CliConfig::load();
    let (level, json) = config
        .as_ref()
        .map(|c| (c.log_level().to_string(), c.json_logs()))
        .unwrap_or_else(|_| ("warn".to_string(), false));
    init_logging(cli.verbose, &level, json);

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            match e.downcast_ref::<PluginTypesError>() {
                Some(err) => {
                    err.log();
                    eprint!("{}: {}", "Error".red().bold(), CliErrorDisplay::new(err));
                }
                None => eprintln!("{}: {:#}", "Error".red().bold(), e),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool, level: &str, json: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env()
            .ok()
            .or_else(|| EnvFilter::try_new(level).ok())
            .unwrap_or_else(|| EnvFilter::new("warn"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

/// `Ok(false)` means the command ran but found problems.
async fn run(cli: Cli, config: CliConfig) -> anyhow::Result<bool> {
    match cli.command {
        Commands::Validate { file, kind, format } => {
            handle_validate_command(&file, kind, format).await
        }
        Commands::Compat { format } => handle_compat_command(format),
        Commands::Sync {
            app_path,
            target,
            dry_run,
        } => handle_sync_command(&config, app_path, target, dry_run).await,
        Commands::Permissions { format } => handle_permissions_command(format),
        Commands::Rules { kind } => handle_rules_command(kind),
        Commands::Config { action } => handle_config_command(&config, action).await,
        Commands::Version { detailed } => cmd_version(detailed),
    }
}

fn cmd_version(detailed: bool) -> anyhow::Result<bool> {
    if detailed {
        println!("{}", "plugin-types Version Information".cyan().bold());
        println!("{}", "═".repeat(40).dimmed());
        println!("  {:<15} {}", "Version:".bold(), VERSION);
        println!("  {:<15} {}", "Name:".bold(), NAME);
        println!("  {:<15} MIT", "License:".bold());
        println!(
            "  {:<15} https://github.com/whttlr/plugin-types",
            "Repository:".bold()
        );
        println!();
        println!("  {}", "Schema:".bold());
        println!("    Permissions:     {}", VALID_PERMISSIONS.len());
        println!("    Config sections: {}", ConfigSection::ALL.len());
        println!();
        println!("  {}", "Build Information:".bold());
        println!("    Rust Edition: 2021");
        #[cfg(debug_assertions)]
        println!("    Build:        Debug");
        #[cfg(not(debug_assertions))]
        println!("    Build:        Release");
    } else {
        println!("plugin-types {}", VERSION);
    }

    Ok(true)
}
