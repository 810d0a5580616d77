//! Export dispatcher

use super::encoder::{Encoder, EncoderRegistry};
use super::format::ExportFormat;
use super::sink::BlobSink;
use crate::column::ColumnSpec;
use crate::error::Result;
use crate::filename::{generate_filename_at, Clock, LocalClock};
use crate::types::Row;
use tracing::{debug, error, info, warn};

/// Result of an export request that did not fail outright
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The artifact was handed to the sink
    Exported {
        filename: String,
        format: String,
        bytes: usize,
    },
    /// No rows; nothing was encoded or emitted
    EmptyInput,
    /// No encoder answers to this name; nothing was encoded or emitted
    UnsupportedFormat(String),
}

impl ExportOutcome {
    /// Whether a download was triggered
    pub fn is_exported(&self) -> bool {
        matches!(self, ExportOutcome::Exported { .. })
    }

    /// Name of the emitted file, if any
    pub fn filename(&self) -> Option<&str> {
        match self {
            ExportOutcome::Exported { filename, .. } => Some(filename),
            _ => None,
        }
    }
}

/// Routes export requests to an encoder and emits the result to a sink
pub struct DataExporter<S: BlobSink> {
    registry: EncoderRegistry,
    sink: S,
    clock: Box<dyn Clock>,
}

impl<S: BlobSink> DataExporter<S> {
    /// Create an exporter with the built-in encoders and the local clock
    pub fn new(sink: S) -> Self {
        Self {
            registry: EncoderRegistry::new(),
            sink,
            clock: Box::new(LocalClock),
        }
    }

    /// Replace the clock used for filename timestamps
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replace the encoder registry
    pub fn with_registry(mut self, registry: EncoderRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &EncoderRegistry {
        &self.registry
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Export rows in the named format.
    ///
    /// Unknown formats and empty row sets are reported through the
    /// returned [`ExportOutcome`] and logged; formatter and sink failures
    /// come back as errors.
    pub fn export_data(
        &self,
        rows: &[Row],
        columns: &[ColumnSpec],
        format: &str,
        filename_prefix: &str,
    ) -> Result<ExportOutcome> {
        let Some(encoder) = self.registry.get(format) else {
            error!("Unsupported export format: {}", format);
            return Ok(ExportOutcome::UnsupportedFormat(format.to_string()));
        };

        if rows.is_empty() {
            warn!("No data to export");
            return Ok(ExportOutcome::EmptyInput);
        }

        self.run(encoder, rows, columns, filename_prefix)
    }

    /// Export rows as CSV
    pub fn export_csv(
        &self,
        rows: &[Row],
        columns: &[ColumnSpec],
        filename_prefix: &str,
    ) -> Result<ExportOutcome> {
        self.export_data(rows, columns, ExportFormat::Csv.as_str(), filename_prefix)
    }

    /// Export the raw rows as JSON
    pub fn export_json(&self, rows: &[Row], filename_prefix: &str) -> Result<ExportOutcome> {
        self.export_data(rows, &[], ExportFormat::Json.as_str(), filename_prefix)
    }

    /// Export rows as an Excel-readable HTML table
    pub fn export_excel(
        &self,
        rows: &[Row],
        columns: &[ColumnSpec],
        filename_prefix: &str,
    ) -> Result<ExportOutcome> {
        self.export_data(rows, columns, ExportFormat::Excel.as_str(), filename_prefix)
    }

    fn run(
        &self,
        encoder: &dyn Encoder,
        rows: &[Row],
        columns: &[ColumnSpec],
        filename_prefix: &str,
    ) -> Result<ExportOutcome> {
        let content = encoder.encode(rows, columns)?;
        let filename =
            generate_filename_at(filename_prefix, encoder.file_extension(), self.clock.now());

        debug!(
            "Emitting {} as {} ({} bytes)",
            filename,
            encoder.mime_type(),
            content.len()
        );
        self.sink
            .emit(content.as_bytes(), &filename, encoder.mime_type())?;

        info!("Exported {} rows to {}", rows.len(), filename);
        Ok(ExportOutcome::Exported {
            filename,
            format: encoder.format_name().to_string(),
            bytes: content.len(),
        })
    }
}
