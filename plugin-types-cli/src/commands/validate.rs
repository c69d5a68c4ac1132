use anyhow::Result;
use colored::Colorize;
use comfy_table::Cell;
use plugin_types_core::plugins::{
    host_manifest_rule_set, load_document, registry_entry_rule_set, registry_manifest_rule_set,
    validate_registry,
};
use plugin_types_core::validation::{ValidationReport, Violation, ViolationCode};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use super::{new_table, DocumentKind, OutputFormat};

pub async fn handle_validate_command(
    file: &Path,
    kind: DocumentKind,
    format: OutputFormat,
) -> Result<bool> {
    let document = load_document(file).await?;
    let violations = check_document(&document, kind);
    debug!(
        file = %file.display(),
        kind = kind.label(),
        violations = violations.len(),
        "Validated document"
    );

    let report = ValidationReport::new(file.display().to_string(), violations);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_report(&report, kind),
    }

    Ok(report.is_valid())
}

pub fn check_document(document: &Value, kind: DocumentKind) -> Vec<Violation> {
    match kind {
        DocumentKind::Manifest => registry_manifest_rule_set().validate(document),
        DocumentKind::HostManifest => host_manifest_rule_set().validate(document),
        DocumentKind::Entry => registry_entry_rule_set().validate(document),
        DocumentKind::Registry => validate_registry(document),
    }
}

fn print_report(report: &ValidationReport, kind: DocumentKind) {
    if report.is_valid() {
        println!(
            "{} {} is a valid {}",
            "✓".green().bold(),
            report.subject.bold(),
            kind.label()
        );
        return;
    }

    println!(
        "{} {} has {} violation(s) as a {}",
        "✗".red().bold(),
        report.subject.bold(),
        report.violations.len().to_string().red(),
        kind.label()
    );
    println!();

    let mut table = new_table(&["Field", "Code", "Message"]);
    for violation in &report.violations {
        table.add_row(vec![
            Cell::new(&violation.field_path),
            Cell::new(violation.code.to_string()).fg(code_color(violation.code)),
            Cell::new(&violation.message),
        ]);
    }
    println!("{}", table);
}

fn code_color(code: ViolationCode) -> comfy_table::Color {
    match code {
        ViolationCode::MissingRequired => comfy_table::Color::Red,
        ViolationCode::NestedFailure => comfy_table::Color::Magenta,
        _ => comfy_table::Color::Yellow,
    }
}
