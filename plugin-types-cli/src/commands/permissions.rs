use anyhow::Result;
use colored::Colorize;
use comfy_table::Cell;
use plugin_types_core::compat::CRITICAL_PERMISSIONS;
use plugin_types_core::Permission;
use serde_json::json;

use super::{new_table, OutputFormat};

pub fn handle_permissions_command(format: OutputFormat) -> Result<bool> {
    match format {
        OutputFormat::Json => {
            let output: Vec<_> = Permission::ALL
                .iter()
                .map(|p| {
                    json!({
                        "name": p.as_str(),
                        "description": p.description(),
                        "critical": CRITICAL_PERMISSIONS.contains(&p.as_str()),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("{}", "Plugin Permissions".cyan().bold());
            println!();

            let mut table = new_table(&["Permission", "Description", "Implies"]);
            for permission in Permission::ALL {
                let implied: Vec<&str> = Permission::ALL
                    .iter()
                    .filter(|other| **other != permission && permission.implies(other))
                    .map(|other| other.as_str())
                    .collect();

                let name = if CRITICAL_PERMISSIONS.contains(&permission.as_str()) {
                    format!("{} *", permission.as_str())
                } else {
                    permission.as_str().to_string()
                };

                table.add_row(vec![
                    Cell::new(name),
                    Cell::new(permission.description()),
                    Cell::new(implied.join(", ")),
                ]);
            }
            println!("{}", table);
            println!();
            println!("  {} every published plugin relies on this permission", "*".dimmed());
        }
    }

    Ok(true)
}
