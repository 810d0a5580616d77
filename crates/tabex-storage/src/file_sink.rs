//! File system sink for export artifacts

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tabex_core::error::{ExportError, Result};
use tabex_core::BlobSink;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Sink that saves artifacts into a directory, like a browser download.
///
/// The directory is created on the first emit, so an export that is
/// rejected before emitting leaves the file system untouched.
pub struct FileSystemSink {
    /// Directory artifacts are written to
    output_dir: PathBuf,
}

impl FileSystemSink {
    /// Create a sink writing into `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Create a sink writing into the user's download directory
    pub fn default_location() -> Self {
        let output_dir = directories::UserDirs::new()
            .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
            .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
            .unwrap_or_else(|| PathBuf::from("."));

        Self::new(output_dir)
    }

    /// Get the output directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Final location of an artifact
    pub fn path_for(&self, filename: &str) -> Result<PathBuf> {
        let is_plain_name = Path::new(filename)
            .file_name()
            .map(|name| name == filename)
            .unwrap_or(false);

        if !is_plain_name {
            return Err(ExportError::Validation(format!(
                "Export filename must not contain a path: {}",
                filename
            )));
        }

        Ok(self.output_dir.join(filename))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.output_dir.exists() {
            fs::create_dir_all(&self.output_dir).map_err(|e| {
                ExportError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create output directory: {}", e),
                ))
            })?;
            debug!("Created output directory: {:?}", self.output_dir);
        }
        Ok(())
    }
}

impl BlobSink for FileSystemSink {
    fn emit(&self, content: &[u8], filename: &str, mime_type: &str) -> Result<()> {
        let final_path = self.path_for(filename)?;
        self.ensure_dir()?;
        let temp = TempFile::create(&self.output_dir, filename)?;

        {
            let mut writer = BufWriter::new(temp.file()?);
            writer.write_all(content)?;
            writer.flush()?;
        }

        temp.persist(&final_path)?;

        info!(
            "Saved {} ({}, {} bytes) to {:?}",
            filename,
            mime_type,
            content.len(),
            final_path
        );
        Ok(())
    }
}

/// Temp file next to the destination; removed on drop unless persisted
struct TempFile {
    path: PathBuf,
    persisted: bool,
}

impl TempFile {
    fn create(dir: &Path, filename: &str) -> Result<Self> {
        let path = dir.join(format!(".{}.{}.tmp", filename, Uuid::new_v4().simple()));

        fs::File::create(&path).map_err(|e| {
            ExportError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create temp file: {}", e),
            ))
        })?;

        Ok(Self {
            path,
            persisted: false,
        })
    }

    fn file(&self) -> Result<fs::File> {
        Ok(fs::OpenOptions::new().write(true).open(&self.path)?)
    }

    fn persist(mut self, final_path: &Path) -> Result<()> {
        fs::rename(&self.path, final_path).map_err(|e| {
            ExportError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to rename temp file: {}", e),
            ))
        })?;
        self.persisted = true;
        Ok(())
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if self.persisted {
            return;
        }
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to remove temp file {:?}: {}", self.path, e);
            }
        }
    }
}
