//! tabex-storage - File system sinks for tabex
//!
//! This crate provides the [`BlobSink`](tabex_core::BlobSink) that saves
//! export artifacts into a download directory.

mod file_sink;

pub use file_sink::FileSystemSink;
