use anyhow::Result;
use colored::Colorize;
use comfy_table::Cell;
use plugin_types_core::plugins::rules::{
    host_manifest_rules, registry_document_rules, registry_entry_rules, registry_manifest_rules,
};
use plugin_types_core::validation::{Check, FieldRule};

use super::{new_table, DocumentKind};

pub fn handle_rules_command(kind: DocumentKind) -> Result<bool> {
    let rules = rules_for(kind);

    println!("{} {}", "Rules for".cyan().bold(), kind.label().cyan().bold());
    if kind == DocumentKind::Registry {
        println!(
            "  {} each entry is also checked with the registry entry rules",
            "→".blue()
        );
    }
    println!();

    let mut table = new_table(&["Field", "Required", "Checks"]);
    for rule in &rules {
        let checks: Vec<String> = rule.checks.iter().map(describe_check).collect();
        table.add_row(vec![
            Cell::new(&rule.path),
            Cell::new(if rule.required { "✓" } else { "" }),
            Cell::new(checks.join("\n")),
        ]);
    }
    println!("{}", table);

    Ok(true)
}

fn rules_for(kind: DocumentKind) -> Vec<FieldRule> {
    match kind {
        DocumentKind::Manifest => registry_manifest_rules(),
        DocumentKind::HostManifest => host_manifest_rules(),
        DocumentKind::Entry => registry_entry_rules(),
        DocumentKind::Registry => registry_document_rules(),
    }
}

fn describe_check(check: &Check) -> String {
    match check {
        Check::Pattern {
            hint: Some(hint), ..
        } => format!("pattern ({})", hint),
        Check::Pattern { pattern, .. } => format!("pattern {}", pattern),
        Check::OneOf(values) => format!("one of: {}", values.join(", ")),
        Check::Url => "url".to_string(),
        Check::ArrayOf(Some(nested)) => format!("each item: {}", describe_check(nested)),
        Check::ArrayOf(None) => "array".to_string(),
        Check::Custom(custom) => custom.message.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_check() {
        assert_eq!(describe_check(&Check::Url), "url");
        assert_eq!(
            describe_check(&Check::array_of(Check::one_of(["a", "b"]))),
            "each item: one of: a, b"
        );
        assert_eq!(
            describe_check(&Check::pattern_with_hint("^x$", "must be x")),
            "pattern (must be x)"
        );
    }

    #[test]
    fn test_rules_for_each_kind() {
        assert!(rules_for(DocumentKind::HostManifest)
            .iter()
            .any(|r| r.path == "permissions" && r.required));
        assert!(rules_for(DocumentKind::Registry)
            .iter()
            .any(|r| r.path == "plugins"));
    }
}
