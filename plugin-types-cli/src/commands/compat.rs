use anyhow::Result;
use colored::Colorize;
use comfy_table::Cell;
use plugin_types_core::compat::{self, CompatReport};

use super::{new_table, OutputFormat};

pub fn handle_compat_command(format: OutputFormat) -> Result<bool> {
    let report = compat::run_all();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_report(&report),
    }

    Ok(report.all_passed())
}

fn print_report(report: &CompatReport) {
    println!("{}", "Compatibility Checks".cyan().bold());
    println!("{}", "═".repeat(50).dimmed());
    println!();

    let mut table = new_table(&["Check", "Status", "Errors"]);
    for check in &report.checks {
        let status = if check.passed {
            "✓ Passed".green().to_string()
        } else {
            "✗ Failed".red().to_string()
        };
        table.add_row(vec![
            Cell::new(&check.name),
            Cell::new(status),
            Cell::new(check.errors.len().to_string()),
        ]);
    }
    println!("{}", table);

    for check in report.checks.iter().filter(|c| !c.passed) {
        println!();
        println!("  {}", check.name.red().bold());
        for error in &check.errors {
            println!("    {} {}", "✗".red(), error);
        }
    }

    println!();
    let summary = format!(
        "{} of {} checks passed, {} error(s)",
        report.passed(),
        report.total(),
        report.total_errors()
    );
    if report.all_passed() {
        println!("  {} {}", "✓".green().bold(), summary.green());
    } else {
        println!("  {} {}", "✗".red().bold(), summary.red());
    }
}
