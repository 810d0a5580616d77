//! Cell value resolution
//!
//! Turns a row plus a column spec into the [`CellValue`] that encoders
//! consume. Missing data never fails here; only formatters can.

use crate::column::ColumnSpec;
use crate::error::{ExportError, Result};
use crate::types::{CellValue, Row};
use serde_json::Value;
use tracing::trace;

/// Look up a key in a row.
///
/// Dotted keys are walked segment by segment and stop at the first
/// missing, null or non-container value. Numeric segments index into
/// arrays.
pub fn lookup<'a>(row: &'a Row, key: &str) -> Option<&'a Value> {
    if !key.contains('.') {
        return row.get(key);
    }

    key.split('.').try_fold(row, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Resolve one cell: path lookup, then the column's formatter if present
pub fn resolve_cell(row: &Row, column: &ColumnSpec) -> Result<CellValue> {
    let value = if column.is_nested() {
        lookup(row, &column.key)
    } else {
        row.get(&column.key)
    };
    let raw = CellValue::from_json(value);

    match column.formatter() {
        Some(formatter) => {
            formatter(&raw, row).map_err(|e| ExportError::formatter(&column.key, e))
        }
        None => Ok(raw),
    }
}

/// Column-projected view of a row set, every cell resolved exactly once
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedTable {
    /// Column labels, in column order
    pub headers: Vec<String>,
    /// One entry per input row, one cell per column
    pub rows: Vec<Vec<CellValue>>,
}

impl ResolvedTable {
    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if there are no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.headers.len()
    }
}

/// Resolve every row against every column
pub fn resolve_table(rows: &[Row], columns: &[ColumnSpec]) -> Result<ResolvedTable> {
    let headers = columns.iter().map(|c| c.label.clone()).collect();

    let rows = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| resolve_cell(row, column))
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    trace!("Resolved {} rows x {} columns", rows.len(), columns.len());

    Ok(ResolvedTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Scalar;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_plain_key() {
        let row = json!({"host": "example.com", "port": 443});
        let cell = resolve_cell(&row, &ColumnSpec::new("host", "Host")).unwrap();
        assert_eq!(cell, CellValue::text("example.com"));
    }

    #[test]
    fn test_missing_key_is_absent() {
        let row = json!({"host": "example.com"});
        let cell = resolve_cell(&row, &ColumnSpec::new("title", "Title")).unwrap();
        assert_eq!(cell, CellValue::Absent);
    }

    #[test]
    fn test_nested_key() {
        let row = json!({"user": {"name": "Bob"}});
        let cell = resolve_cell(&row, &ColumnSpec::new("user.name", "Name")).unwrap();
        assert_eq!(cell.to_text(), "Bob");
    }

    #[test]
    fn test_nested_key_through_null() {
        let row = json!({"user": null});
        let cell = resolve_cell(&row, &ColumnSpec::new("user.name", "Name")).unwrap();
        assert_eq!(cell, CellValue::Absent);
        assert_eq!(cell.to_text(), "");
    }

    #[test]
    fn test_nested_key_through_scalar() {
        let row = json!({"user": "bob"});
        assert!(lookup(&row, "user.name").is_none());
    }

    #[test]
    fn test_nested_key_missing_intermediate() {
        let row = json!({});
        assert!(lookup(&row, "a.b.c").is_none());
    }

    #[test]
    fn test_nested_array_index() {
        let row = json!({"ports": [{"n": 80}, {"n": 443}]});
        assert_eq!(lookup(&row, "ports.1.n"), Some(&json!(443)));
        assert!(lookup(&row, "ports.x.n").is_none());
    }

    #[test]
    fn test_lookup_walks_dotted_key() {
        let row = json!({"a.b": 1});
        assert!(lookup(&row, "a.b").is_none());
    }

    #[test]
    fn test_literal_column_reads_dotted_field() {
        let row = json!({"a.b": "kept", "a": {"b": "nested"}});
        let cell = resolve_cell(&row, &ColumnSpec::literal("a.b", "a.b")).unwrap();
        assert_eq!(cell.to_text(), "kept");

        let cell = resolve_cell(&row, &ColumnSpec::new("a.b", "a.b")).unwrap();
        assert_eq!(cell.to_text(), "nested");
    }

    #[test]
    fn test_formatter_sees_raw_value_and_row() {
        let row = json!({"port": 8080, "host": "h"});
        let column = ColumnSpec::new("port", "Port").with_formatter(|value, row| {
            Ok(CellValue::text(format!(
                "{}:{}",
                row["host"].as_str().unwrap_or_default(),
                value
            )))
        });
        let cell = resolve_cell(&row, &column).unwrap();
        assert_eq!(cell.to_text(), "h:8080");
    }

    #[test]
    fn test_formatter_can_return_list() {
        let row = json!({"tags": "a,b"});
        let column = ColumnSpec::new("tags", "Tags").with_formatter(|value, _| {
            Ok(CellValue::List(
                value
                    .to_text()
                    .split(',')
                    .map(|s| Scalar::Text(s.to_string()))
                    .collect(),
            ))
        });
        assert_eq!(resolve_cell(&row, &column).unwrap().to_text(), "a; b");
    }

    #[test]
    fn test_formatter_error_propagates() {
        let row = json!({"port": "x"});
        let column = ColumnSpec::new("port", "Port")
            .with_formatter(|_, _| Err(anyhow::anyhow!("not a number")));
        let err = resolve_cell(&row, &column).unwrap_err();
        match err {
            ExportError::Formatter { column, source } => {
                assert_eq!(column, "port");
                assert_eq!(source.to_string(), "not a number");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_table_calls_formatter_once_per_row() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let columns = vec![
            ColumnSpec::new("a", "A").with_formatter(move |v, _| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(v.clone())
            }),
            ColumnSpec::new("b", "B"),
        ];
        let rows = vec![json!({"a": 1, "b": 2}), json!({"a": 3})];

        let table = resolve_table(&rows, &columns).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.width(), 2);
        assert_eq!(table.rows[1][1], CellValue::Absent);
    }
}
