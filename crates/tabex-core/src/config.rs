//! Configuration management for tabex

use crate::column::ColumnDef;
use crate::error::{ExportError, Result};
use crate::export::{CsvEncoder, EncoderRegistry, ExcelHtmlEncoder, ExportFormat, JsonEncoder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Export settings
    pub export: ExportConfig,
    /// User-defined column sets, keyed by preset name
    pub columns: BTreeMap<String, Vec<ColumnDef>>,
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ExportError::Toml(e.to_string()))
    }

    /// Render configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ExportError::Toml(e.to_string()))
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ExportError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| e.with_context(format!("Failed to parse {}", path.display())))?;

        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is missing
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(ExportError::FileNotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if ExportFormat::parse(&self.export.default_format).is_none() {
            return Err(ExportError::Config(format!(
                "Unsupported default_format: {}",
                self.export.default_format
            )));
        }

        if self.export.filename_prefix.trim().is_empty() {
            return Err(ExportError::Config(
                "filename_prefix must not be empty".to_string(),
            ));
        }

        for (name, columns) in &self.columns {
            if columns.is_empty() {
                return Err(ExportError::Config(format!(
                    "Column set '{}' has no columns",
                    name
                )));
            }
            if let Some(col) = columns.iter().find(|c| c.key.trim().is_empty()) {
                return Err(ExportError::Config(format!(
                    "Column set '{}' has a column with an empty key (label '{}')",
                    name, col.label
                )));
            }
        }

        Ok(())
    }
}

/// Export-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Default export format
    pub default_format: String,
    /// Default filename prefix
    pub filename_prefix: String,
    /// Directory exports are written to
    pub output_dir: Option<PathBuf>,
    /// Prepend a UTF-8 BOM to CSV output
    pub csv_bom: bool,
    /// Worksheet name in Excel output
    pub sheet_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: "csv".to_string(),
            filename_prefix: "export".to_string(),
            output_dir: None,
            csv_bom: true,
            sheet_name: "Sheet1".to_string(),
        }
    }
}

impl ExportConfig {
    /// Build the encoder registry these settings describe
    pub fn encoder_registry(&self) -> EncoderRegistry {
        let mut registry = EncoderRegistry::empty();

        let csv = if self.csv_bom {
            CsvEncoder::new()
        } else {
            CsvEncoder::without_bom()
        };
        registry.register(Box::new(csv));
        registry.register(Box::new(JsonEncoder::new()));
        registry.register(Box::new(
            ExcelHtmlEncoder::new().with_sheet_name(self.sheet_name.clone()),
        ));

        registry
    }
}
