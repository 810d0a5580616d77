//! Formats command
//!
//! List the export format names the engine accepts.

use anyhow::Result;

use tabex_core::config::Config;
use tabex_core::export::{EncoderRegistry, ExportFormat};

/// Execute the formats command
pub fn execute(config: &Config) -> Result<()> {
    use colored::Colorize;

    let registry = config.export.encoder_registry();
    let default = ExportFormat::parse(&config.export.default_format);

    println!("{}", "Export formats:".bold().underline());
    for format in ExportFormat::ALL {
        let Some(encoder) = registry.get(format.as_str()) else {
            continue;
        };

        let aliases = if format.aliases().is_empty() {
            String::new()
        } else {
            format!(" (aliases: {})", format.aliases().join(", "))
        };
        let marker = if default == Some(format) {
            " [default]".green().to_string()
        } else {
            String::new()
        };

        println!(
            "  {:<6} -> .{} {}{}{}",
            format.as_str().cyan(),
            encoder.file_extension(),
            encoder.mime_type().dimmed(),
            aliases,
            marker
        );
    }

    for name in extra_formats(&registry) {
        println!("  {}", name.cyan());
    }

    Ok(())
}

/// Registered names that are neither a built-in format nor one of its aliases
fn extra_formats(registry: &EncoderRegistry) -> Vec<String> {
    registry
        .available_formats()
        .into_iter()
        .filter(|name| ExportFormat::parse(name).is_none())
        .collect()
}
