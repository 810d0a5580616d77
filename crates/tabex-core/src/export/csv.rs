//! CSV encoder

use super::encoder::Encoder;
use super::format::ExportFormat;
use crate::column::ColumnSpec;
use crate::error::Result;
use crate::resolve::resolve_table;
use crate::types::Row;
use std::borrow::Cow;
use tracing::debug;

/// Byte order mark so spreadsheet tools detect UTF-8
pub const UTF8_BOM: char = '\u{FEFF}';

/// Quote a field iff it contains a comma, newline or double quote,
/// doubling any internal quotes
pub fn escape_csv_value(value: &str) -> Cow<'_, str> {
    if value.contains(',') || value.contains('\n') || value.contains('"') {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// CSV encoder: header row of labels, then one line per row
#[derive(Debug, Clone)]
pub struct CsvEncoder {
    /// Whether to prepend the UTF-8 BOM
    bom: bool,
}

impl CsvEncoder {
    pub fn new() -> Self {
        Self { bom: true }
    }

    /// Create an encoder that omits the BOM
    pub fn without_bom() -> Self {
        Self { bom: false }
    }
}

impl Default for CsvEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for CsvEncoder {
    fn encode(&self, rows: &[Row], columns: &[ColumnSpec]) -> Result<String> {
        let table = resolve_table(rows, columns)?;

        let mut lines = Vec::with_capacity(table.len() + 1);
        lines.push(
            table
                .headers
                .iter()
                .map(|label| escape_csv_value(label))
                .collect::<Vec<_>>()
                .join(","),
        );

        for cells in &table.rows {
            let line = cells
                .iter()
                .map(|cell| escape_csv_value(&cell.to_text()).into_owned())
                .collect::<Vec<_>>()
                .join(",");
            lines.push(line);
        }

        let mut out = String::new();
        if self.bom {
            out.push(UTF8_BOM);
        }
        out.push_str(&lines.join("\n"));

        debug!("Encoded {} rows as CSV ({} bytes)", table.len(), out.len());
        Ok(out)
    }

    fn format_name(&self) -> &str {
        ExportFormat::Csv.as_str()
    }

    fn file_extension(&self) -> &str {
        ExportFormat::Csv.file_extension()
    }

    fn mime_type(&self) -> &str {
        ExportFormat::Csv.mime_type()
    }
}
