use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;
use comfy_table::Cell;
use plugin_types_core::sync::{SyncAction, SyncOptions, SyncReport, TypeSyncer};
use std::path::PathBuf;

use super::new_table;
use crate::config::CliConfig;

pub async fn handle_sync_command(
    config: &CliConfig,
    app_path: Option<PathBuf>,
    target: Option<PathBuf>,
    dry_run: bool,
) -> Result<bool> {
    let app_path = app_path.unwrap_or_else(|| config.app_path());
    let target = target.unwrap_or_else(|| config.target_dir());

    println!(
        "{} {} {} {} {}",
        "→".blue(),
        "Syncing types from".cyan(),
        app_path.display().to_string().yellow(),
        "into".cyan(),
        target.display().to_string().yellow()
    );
    if dry_run {
        println!("  {} Dry run, nothing will be written", "!".yellow());
    }

    let options = SyncOptions::new(app_path, target).with_dry_run(dry_run);
    let report = TypeSyncer::new(options).run().await?;

    print_report(&report);
    Ok(!report.has_errors())
}

fn print_report(report: &SyncReport) {
    println!();

    if !report.files.is_empty() {
        let mut table = new_table(&["Source", "Target", "Action"]);
        for file in &report.files {
            let action = match file.action {
                SyncAction::Transformed => "transformed",
                SyncAction::Copied => "copied",
            };
            table.add_row(vec![
                Cell::new(file.source.display()),
                Cell::new(file.target.display()),
                Cell::new(action),
            ]);
        }
        println!("{}", table);
        println!();
    }

    if report.has_errors() {
        println!("  {}", "Errors:".red().bold());
        for failure in &report.errors {
            println!(
                "    {} [{}] {}: {}",
                "✗".red(),
                format_datetime(&failure.timestamp),
                failure.mapping,
                failure.message
            );
        }
        println!();
    }

    let status = if report.has_errors() {
        "!".yellow().bold()
    } else {
        "✓".green().bold()
    };
    println!(
        "  {} {} synced, {} skipped, {} failed, {} file(s) in {}ms{}",
        status,
        report.synced,
        report.skipped,
        report.errors.len(),
        report.files.len(),
        report.duration_ms,
        if report.dry_run { " (dry run)" } else { "" }
    );
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
