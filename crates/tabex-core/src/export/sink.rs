//! Download sinks

use crate::error::{ExportError, Result};
use std::borrow::Cow;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Host capability that turns encoded content into a user-facing file.
///
/// `emit` is called exactly once per successful export. Implementations
/// must release whatever transient resource they acquire before
/// returning, on success and on failure alike.
pub trait BlobSink: Send + Sync {
    fn emit(&self, content: &[u8], filename: &str, mime_type: &str) -> Result<()>;
}

impl<T: BlobSink + ?Sized> BlobSink for Arc<T> {
    fn emit(&self, content: &[u8], filename: &str, mime_type: &str) -> Result<()> {
        (**self).emit(content, filename, mime_type)
    }
}

impl<T: BlobSink + ?Sized> BlobSink for Box<T> {
    fn emit(&self, content: &[u8], filename: &str, mime_type: &str) -> Result<()> {
        (**self).emit(content, filename, mime_type)
    }
}

/// An emitted file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

impl ExportArtifact {
    /// Content as text, lossily
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }
}

/// Sink that keeps artifacts in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    artifacts: Mutex<Vec<ExportArtifact>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far
    pub fn artifacts(&self) -> Vec<ExportArtifact> {
        self.artifacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Most recent artifact
    pub fn last(&self) -> Option<ExportArtifact> {
        self.artifacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.artifacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlobSink for MemorySink {
    fn emit(&self, content: &[u8], filename: &str, mime_type: &str) -> Result<()> {
        let mut artifacts = self
            .artifacts
            .lock()
            .map_err(|_| ExportError::Sink("memory sink lock poisoned".to_string()))?;

        artifacts.push(ExportArtifact {
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
            content: content.to_vec(),
        });

        debug!("Captured {} ({} bytes) in memory", filename, content.len());
        Ok(())
    }
}
