//! Column projection

use crate::error::{ExportError, Result};
use crate::types::{CellValue, Row};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Caller-supplied cell transform.
///
/// Receives the resolved raw value and the whole row. Errors are not
/// handled by the engine; they surface as [`ExportError::Formatter`].
pub type Formatter = Arc<dyn Fn(&CellValue, &Row) -> anyhow::Result<CellValue> + Send + Sync>;

/// One projected output column
#[derive(Clone)]
pub struct ColumnSpec {
    /// Field name, or a dotted path such as `user.name`
    pub key: String,
    /// Header text
    pub label: String,
    /// Read `key` as one field name even when it contains `.`
    literal: bool,
    formatter: Option<Formatter>,
}

impl ColumnSpec {
    /// Create a column without a formatter
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            literal: false,
            formatter: None,
        }
    }

    /// Create a column whose key names a single field, dots included
    pub fn literal(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            literal: true,
            ..Self::new(key, label)
        }
    }

    /// Attach a formatter
    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&CellValue, &Row) -> anyhow::Result<CellValue> + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Attach an already shared formatter
    pub fn with_shared_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Get the formatter, if any
    pub fn formatter(&self) -> Option<&Formatter> {
        self.formatter.as_ref()
    }

    /// Whether the key is a dotted path
    pub fn is_nested(&self) -> bool {
        !self.literal && self.key.contains('.')
    }

    /// Parse a `key=label` column definition. A bare `key` uses the key as
    /// its label.
    pub fn parse(def: &str) -> Result<Self> {
        let (key, label) = match def.split_once('=') {
            Some((key, label)) => (key.trim(), label.trim()),
            None => (def.trim(), def.trim()),
        };

        if key.is_empty() {
            return Err(ExportError::Validation(format!(
                "Column definition '{}' has an empty key",
                def
            )));
        }

        Ok(Self::new(key, label))
    }
}

impl fmt::Debug for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("literal", &self.literal)
            .field("formatter", &self.formatter.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Serializable column definition, as stored in config files and presets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub key: String,
    pub label: String,
}

impl ColumnDef {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

impl From<ColumnDef> for ColumnSpec {
    fn from(def: ColumnDef) -> Self {
        ColumnSpec::new(def.key, def.label)
    }
}

impl From<&ColumnDef> for ColumnSpec {
    fn from(def: &ColumnDef) -> Self {
        ColumnSpec::new(def.key.clone(), def.label.clone())
    }
}
