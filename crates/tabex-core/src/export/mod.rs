//! Tabular export
//!
//! This module turns a row set plus a column projection into a
//! downloadable artifact.
//!
//! # Overview
//!
//! Export functionality supports:
//! - CSV (UTF-8 with BOM, RFC 4180 style quoting)
//! - JSON (the raw rows, pretty-printed, ignoring the column projection)
//! - Excel (an HTML table Excel and LibreOffice open as a worksheet),
//!   reachable as `excel`, `xls` or `xlsx`
//!
//! # Example
//!
//! ```ignore
//! use tabex_core::{ColumnSpec, DataExporter, MemorySink};
//!
//! let exporter = DataExporter::new(MemorySink::new());
//! let columns = vec![ColumnSpec::new("host", "Host"), ColumnSpec::new("user.name", "Owner")];
//! let outcome = exporter.export_data(&rows, &columns, "csv", "assets")?;
//! assert!(outcome.is_exported());
//! ```

mod csv;
mod dispatch;
mod encoder;
mod excel;
mod format;
mod json;
mod sink;

pub use csv::{escape_csv_value, CsvEncoder, UTF8_BOM};
pub use dispatch::{DataExporter, ExportOutcome};
pub use encoder::{Encoder, EncoderRegistry};
pub use excel::{escape_html, ExcelHtmlEncoder, DEFAULT_SHEET_NAME};
pub use format::ExportFormat;
pub use json::JsonEncoder;
pub use sink::{BlobSink, ExportArtifact, MemorySink};
