//! Encoder trait and registry

use super::csv::CsvEncoder;
use super::excel::ExcelHtmlEncoder;
use super::json::JsonEncoder;
use crate::column::ColumnSpec;
use crate::error::Result;
use crate::types::Row;
use std::collections::HashMap;
use std::sync::Arc;

/// Trait for row-set encoders
pub trait Encoder: Send + Sync {
    /// Encode rows projected through `columns`
    fn encode(&self, rows: &[Row], columns: &[ColumnSpec]) -> Result<String>;

    /// Get the canonical format name
    fn format_name(&self) -> &str;

    /// Other names that select this encoder
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// Get the file extension
    fn file_extension(&self) -> &str;

    /// Get the MIME type handed to the sink
    fn mime_type(&self) -> &str;
}

/// Registry resolving format names to encoders
///
/// Lookups are case-insensitive and ignore surrounding whitespace.
pub struct EncoderRegistry {
    encoders: HashMap<String, Arc<dyn Encoder>>,
}

impl EncoderRegistry {
    /// Create a registry with the CSV, JSON and Excel encoders
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register(Box::new(CsvEncoder::new()));
        registry.register(Box::new(JsonEncoder::new()));
        registry.register(Box::new(ExcelHtmlEncoder::new()));

        registry
    }

    /// Create a registry with no encoders
    pub fn empty() -> Self {
        Self {
            encoders: HashMap::new(),
        }
    }

    /// Register an encoder under its name and aliases, replacing any
    /// previous holder of those names
    pub fn register(&mut self, encoder: Box<dyn Encoder>) {
        let encoder: Arc<dyn Encoder> = Arc::from(encoder);

        for alias in encoder.aliases() {
            self.encoders
                .insert(normalize(alias), Arc::clone(&encoder));
        }
        self.encoders
            .insert(normalize(encoder.format_name()), encoder);
    }

    /// Get an encoder by format name or alias
    pub fn get(&self, format: &str) -> Option<&dyn Encoder> {
        self.encoders.get(&normalize(format)).map(|e| e.as_ref())
    }

    /// Check if a format is available
    pub fn has_format(&self, format: &str) -> bool {
        self.encoders.contains_key(&normalize(format))
    }

    /// Get list of every accepted format name, aliases included
    pub fn available_formats(&self) -> Vec<String> {
        let mut formats: Vec<_> = self.encoders.keys().cloned().collect();
        formats.sort();
        formats
    }
}

impl Default for EncoderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(format: &str) -> String {
    format.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestEncoder;

    impl Encoder for TestEncoder {
        fn encode(&self, rows: &[Row], _columns: &[ColumnSpec]) -> Result<String> {
            Ok(format!("{} rows", rows.len()))
        }

        fn format_name(&self) -> &str {
            "test"
        }

        fn aliases(&self) -> &[&str] {
            &["txt"]
        }

        fn file_extension(&self) -> &str {
            "txt"
        }

        fn mime_type(&self) -> &str {
            "text/plain"
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = EncoderRegistry::new();
        assert!(registry.has_format("csv"));
        assert!(registry.has_format("json"));
        assert!(registry.has_format("excel"));
        assert!(registry.has_format("xls"));
        assert!(registry.has_format("xlsx"));
        assert!(!registry.has_format("pdf"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = EncoderRegistry::new();
        let encoder = registry.get("XLS").unwrap();
        assert_eq!(encoder.format_name(), "excel");
        assert_eq!(registry.get("Csv").unwrap().format_name(), "csv");
    }

    #[test]
    fn test_register_encoder() {
        let mut registry = EncoderRegistry::new();
        registry.register(Box::new(TestEncoder));
        assert!(registry.has_format("test"));
        assert!(registry.has_format("TXT"));
        let out = registry.get("test").unwrap().encode(&[], &[]).unwrap();
        assert_eq!(out, "0 rows");
    }

    #[test]
    fn test_available_formats() {
        let registry = EncoderRegistry::new();
        assert_eq!(
            registry.available_formats(),
            vec!["csv", "excel", "json", "xls", "xlsx"]
        );
    }

    #[test]
    fn test_empty_registry() {
        let registry = EncoderRegistry::empty();
        assert!(registry.get("csv").is_none());
    }
}
