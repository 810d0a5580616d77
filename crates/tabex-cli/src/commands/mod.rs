//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod config;
pub mod export;
pub mod formats;
pub mod presets;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tabex_core::config::Config;

/// Default configuration location, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = ".tabex/config.toml";

/// tabex - export JSON rows as CSV, JSON or Excel tables
#[derive(Debug, Parser)]
#[command(name = "tabex")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Export rows to a file
    Export(export::ExportArgs),

    /// List column presets
    Presets(presets::PresetsArgs),

    /// List accepted export formats
    Formats,

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    // Dispatch to command handler
    match cli.command {
        Commands::Export(args) => export::execute(args, &load_config(&config_path)?),
        Commands::Presets(args) => presets::execute(args, &load_config(&config_path)?),
        Commands::Formats => formats::execute(&load_config(&config_path)?),
        Commands::Config(cmd) => config::execute(cmd, &config_path),
    }
}

/// Load configuration, using defaults when the file does not exist
fn load_config(path: &Path) -> Result<Config> {
    let config = Config::load_or_default(path)?;
    config.validate()?;
    Ok(config)
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // stdout may carry export content
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_text() {
        let cmd = Cli::command();
        assert!(cmd.get_about().is_some());
    }

    #[test]
    fn test_parse_export_args() {
        let cli = Cli::try_parse_from([
            "tabex",
            "-vv",
            "export",
            "--input",
            "rows.json",
            "--column",
            "host=Host",
            "--column",
            "user.name=Owner",
            "--format",
            "XLS",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.columns, vec!["host=Host", "user.name=Owner"]);
                assert_eq!(args.format.as_deref(), Some("XLS"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
