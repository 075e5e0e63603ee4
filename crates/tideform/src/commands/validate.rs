use crate::files;
use colored::Colorize;
use std::path::Path;

pub fn handle(config: &Path) -> anyhow::Result<()> {
    println!("{}", format!("Validating {}...", config.display()).blue());

    let (data, diagnostics) = files::load_config(config)?;
    if !diagnostics.is_empty() {
        for diagnostic in &diagnostics {
            eprintln!("  {} {}", "✗".red(), diagnostic);
        }
        anyhow::bail!("{} validation error(s)", diagnostics.len());
    }

    println!("{}", "✓ configuration is valid".green().bold());
    let spec = tideform_apps::to_wire(data.get("spec").unwrap_or(&serde_json::Value::Null));
    println!("  app: {} ({})", spec.name.cyan(), or_unset(&spec.region));
    for (kind, name) in spec.component_names() {
        println!("    - {} {}", kind.host_key(), name.cyan());
    }
    for database in &spec.databases {
        println!("    - database {}", database.name.cyan());
    }
    Ok(())
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() { "(unset)" } else { value }
}
