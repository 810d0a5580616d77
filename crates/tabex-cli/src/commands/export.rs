//! Export command
//!
//! Export a JSON array of rows to CSV, JSON or Excel.

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::Value;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use tabex_core::config::Config;
use tabex_core::{presets, BlobSink, ColumnSpec, DataExporter, ExportOutcome, Row};
use tabex_storage::FileSystemSink;

/// Arguments for the export command
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// JSON file holding an array of row objects ("-" reads stdin)
    #[arg(long, short, default_value = "-")]
    pub input: PathBuf,

    /// Export format: csv, json, excel, xls or xlsx
    #[arg(long, short)]
    pub format: Option<String>,

    /// Filename prefix
    #[arg(long, short)]
    pub prefix: Option<String>,

    /// Directory to save the export in
    #[arg(long, short)]
    pub output_dir: Option<PathBuf>,

    /// Column to export as key=label; nested keys use dots (repeatable)
    #[arg(long = "column", value_name = "KEY=LABEL")]
    pub columns: Vec<String>,

    /// Named column preset
    #[arg(long, conflicts_with = "columns")]
    pub preset: Option<String>,

    /// Write the export to stdout instead of a file
    #[arg(long, conflicts_with = "output_dir")]
    pub stdout: bool,
}

/// Sink that prints the artifact to stdout
struct StdoutSink;

impl BlobSink for StdoutSink {
    fn emit(&self, content: &[u8], filename: &str, mime_type: &str) -> tabex_core::Result<()> {
        let mut out = std::io::stdout().lock();
        out.write_all(content)?;
        out.flush()?;
        debug!("Wrote {} ({}) to stdout", filename, mime_type);
        Ok(())
    }
}

/// Execute the export command
pub fn execute(args: ExportArgs, config: &Config) -> Result<()> {
    use colored::Colorize;

    let rows = read_rows(&args.input)?;
    let columns = select_columns(&args, config, &rows)?;

    let format = args
        .format
        .clone()
        .unwrap_or_else(|| config.export.default_format.clone());
    let prefix = args
        .prefix
        .clone()
        .unwrap_or_else(|| config.export.filename_prefix.clone());
    let registry = config.export.encoder_registry();

    let outcome = if args.stdout {
        DataExporter::new(StdoutSink)
            .with_registry(registry)
            .export_data(&rows, &columns, &format, &prefix)?
    } else {
        let sink = match args.output_dir.clone().or_else(|| config.export.output_dir.clone()) {
            Some(dir) => FileSystemSink::new(dir),
            None => FileSystemSink::default_location(),
        };
        let output_dir = sink.output_dir().to_path_buf();
        let outcome = DataExporter::new(sink)
            .with_registry(registry)
            .export_data(&rows, &columns, &format, &prefix)?;

        if let ExportOutcome::Exported { filename, bytes, .. } = &outcome {
            eprintln!(
                "{} Exported {} rows to {} ({} bytes)",
                "✓".green(),
                rows.len().to_string().yellow(),
                output_dir.join(filename).display().to_string().cyan(),
                bytes
            );
        }
        outcome
    };

    match outcome {
        ExportOutcome::Exported { .. } => Ok(()),
        ExportOutcome::EmptyInput => bail!("Nothing exported: the input has no rows"),
        ExportOutcome::UnsupportedFormat(format) => bail!(
            "Unsupported export format '{}' (expected one of: csv, json, excel, xls, xlsx)",
            format
        ),
    }
}

/// Read rows from a file or stdin. `null` counts as no rows.
fn read_rows(input: &Path) -> Result<Vec<Row>> {
    let content = if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read rows from stdin")?;
        buf
    } else {
        fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?
    };

    parse_rows(&content)
}

fn parse_rows(content: &str) -> Result<Vec<Row>> {
    let value: Value = serde_json::from_str(content).context("Input is not valid JSON")?;

    match value {
        Value::Array(rows) => Ok(rows),
        Value::Null => Ok(Vec::new()),
        other => bail!(
            "Expected a JSON array of rows, found {}",
            match other {
                Value::Object(_) => "an object",
                Value::String(_) => "a string",
                Value::Number(_) => "a number",
                _ => "a boolean",
            }
        ),
    }
}

/// Columns from `--column`, else `--preset`, else the first row's keys.
/// First-row keys are field names, so dots in them are not paths.
fn select_columns(args: &ExportArgs, config: &Config, rows: &[Row]) -> Result<Vec<ColumnSpec>> {
    if !args.columns.is_empty() {
        return args
            .columns
            .iter()
            .map(|def| ColumnSpec::parse(def).map_err(anyhow::Error::from))
            .collect();
    }

    if let Some(name) = &args.preset {
        return Ok(presets::get(name, &config.columns)?);
    }

    let columns = rows
        .first()
        .and_then(Value::as_object)
        .map(|first| {
            first
                .keys()
                .map(|key| ColumnSpec::literal(key.clone(), key.clone()))
                .collect()
        })
        .unwrap_or_default();

    Ok(columns)
}
