//! JSON encoder
//!
//! Dumps the rows as given. The column projection does not apply here, so
//! a JSON export always carries every field of every row.

use super::encoder::Encoder;
use super::format::ExportFormat;
use crate::column::ColumnSpec;
use crate::error::Result;
use crate::types::Row;
use tracing::debug;

/// Pretty-printing (2-space indent) JSON encoder
#[derive(Debug, Clone, Default)]
pub struct JsonEncoder;

impl JsonEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, rows: &[Row], _columns: &[ColumnSpec]) -> Result<String> {
        let json = serde_json::to_string_pretty(rows)?;
        debug!("Encoded {} rows as JSON ({} bytes)", rows.len(), json.len());
        Ok(json)
    }

    fn format_name(&self) -> &str {
        ExportFormat::Json.as_str()
    }

    fn file_extension(&self) -> &str {
        ExportFormat::Json.file_extension()
    }

    fn mime_type(&self) -> &str {
        ExportFormat::Json.mime_type()
    }
}
