//! Built-in export formats

use crate::error::ExportError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Formats the engine ships encoders for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
    /// HTML table saved with a spreadsheet extension
    Excel,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Json, ExportFormat::Excel];

    /// Parse a format name, case-insensitively, accepting aliases
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            "excel" | "xls" | "xlsx" => Some(ExportFormat::Excel),
            _ => None,
        }
    }

    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "excel",
        }
    }

    /// Extra names that select this format
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            ExportFormat::Excel => &["xls", "xlsx"],
            _ => &[],
        }
    }

    /// Extension used for generated filenames
    pub fn file_extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "xls",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Json => "application/json;charset=utf-8",
            ExportFormat::Excel => "application/vnd.ms-excel;charset=utf-8",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExportFormat::parse(s)
            .ok_or_else(|| ExportError::Validation(format!("Unsupported export format: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(ExportFormat::parse("CSV"), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::parse("Json"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::parse(" excel "), Some(ExportFormat::Excel));
    }

    #[test]
    fn test_excel_aliases() {
        assert_eq!(ExportFormat::parse("XLS"), Some(ExportFormat::Excel));
        assert_eq!(ExportFormat::parse("xlsx"), Some(ExportFormat::Excel));
        assert_eq!(ExportFormat::Excel.file_extension(), "xls");
    }

    #[test]
    fn test_unknown_format() {
        assert_eq!(ExportFormat::parse("pdf"), None);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ExportFormat::Excel).unwrap();
        assert_eq!(json, "\"excel\"");
    }
}
