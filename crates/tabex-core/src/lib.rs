//! tabex-core - Core library for tabex
//!
//! This crate provides the tabular export engine: column projection,
//! cell value resolution, the CSV/JSON/Excel encoders and the dispatcher
//! that hands finished artifacts to a [`BlobSink`].

pub mod error;
pub mod types;
pub mod config;
pub mod column;
pub mod formatters;
pub mod presets;
pub mod resolve;
pub mod filename;
pub mod export;

pub use column::{ColumnSpec, Formatter};
pub use error::{ExportError, Result};
pub use export::{BlobSink, DataExporter, ExportArtifact, ExportOutcome, MemorySink};
pub use types::*;
