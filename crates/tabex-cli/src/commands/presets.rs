//! Presets command
//!
//! List the built-in and configured column presets.

use anyhow::Result;
use clap::Args;

use tabex_core::config::Config;
use tabex_core::presets;

/// Arguments for the presets command
#[derive(Debug, Args)]
pub struct PresetsArgs {
    /// Show the columns of each preset
    #[arg(long)]
    pub detailed: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the presets command
pub fn execute(args: PresetsArgs, config: &Config) -> Result<()> {
    use colored::Colorize;

    let catalog = catalog(config)?;

    if args.json {
        let json: serde_json::Map<String, serde_json::Value> = catalog
            .iter()
            .map(|(name, _, columns)| {
                let columns = columns
                    .iter()
                    .map(|c| serde_json::json!({ "key": c.key, "label": c.label }))
                    .collect();
                (name.clone(), serde_json::Value::Array(columns))
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    println!("{}", "Column presets:".bold().underline());
    println!();

    for (name, source, columns) in &catalog {
        println!(
            "  {} {} ({} columns)",
            name.cyan(),
            format!("[{}]", source).dimmed(),
            columns.len()
        );
        if args.detailed {
            for column in columns {
                println!("      {} = {}", column.key, column.label);
            }
        }
    }

    println!();
    println!(
        "Use '{}' to export with a preset",
        "tabex export --preset <name>".cyan()
    );

    Ok(())
}

/// Every preset name with its origin and resolved columns. Configured sets
/// shadow built-ins of the same name.
fn catalog(config: &Config) -> Result<Vec<(String, &'static str, Vec<tabex_core::ColumnSpec>)>> {
    let mut entries = Vec::new();

    for name in presets::names() {
        let shadowed = config.columns.keys().any(|custom| presets::same_name(custom, name));
        if !shadowed {
            entries.push((name.to_string(), "built-in", presets::get(name, &config.columns)?));
        }
    }

    for name in config.columns.keys() {
        entries.push((name.clone(), "config", presets::get(name, &config.columns)?));
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabex_core::column::ColumnDef;

    #[test]
    fn test_catalog_builtins() {
        let catalog = catalog(&Config::default()).unwrap();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.iter().all(|(_, source, _)| *source == "built-in"));
    }

    #[test]
    fn test_catalog_config_shadows_builtin() {
        let mut config = Config::default();
        config
            .columns
            .insert("groups".to_string(), vec![ColumnDef::new("domain", "Domain")]);
        config
            .columns
            .insert("hosts".to_string(), vec![ColumnDef::new("host", "Host")]);

        let catalog = catalog(&config).unwrap();
        assert_eq!(catalog.len(), 6);

        let groups = catalog.iter().find(|(name, _, _)| name == "groups").unwrap();
        assert_eq!(groups.1, "config");
        assert_eq!(groups.2.len(), 1);
    }
}
