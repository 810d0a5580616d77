//! Ready-made column formatters

use crate::column::Formatter;
use crate::types::{CellValue, Row, Scalar};
use anyhow::{anyhow, Context};
use chrono::DateTime;
use std::sync::Arc;

fn formatter<F>(f: F) -> Formatter
where
    F: Fn(&CellValue, &Row) -> anyhow::Result<CellValue> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Join list cells with a custom separator instead of `"; "`
pub fn join_with(separator: impl Into<String>) -> Formatter {
    let separator = separator.into();
    formatter(move |value, _row| {
        Ok(match value {
            CellValue::List(items) => CellValue::text(
                items
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(&separator),
            ),
            other => other.clone(),
        })
    })
}

/// Upper-case text cells and the text items of list cells
pub fn uppercase() -> Formatter {
    fn upper(scalar: &Scalar) -> Scalar {
        match scalar {
            Scalar::Text(s) => Scalar::Text(s.to_uppercase()),
            other => other.clone(),
        }
    }

    formatter(|value, _row| {
        Ok(match value {
            CellValue::Scalar(s) => CellValue::Scalar(upper(s)),
            CellValue::List(items) => CellValue::List(items.iter().map(upper).collect()),
            other => other.clone(),
        })
    })
}

/// Substitute a placeholder for absent and null cells
pub fn default_value(placeholder: impl Into<String>) -> Formatter {
    let placeholder = placeholder.into();
    formatter(move |value, _row| {
        Ok(if value.is_blank() {
            CellValue::text(placeholder.clone())
        } else {
            value.clone()
        })
    })
}

/// Render epoch seconds (number or numeric text) as UTC time using a
/// chrono format string. Blank cells pass through.
pub fn unix_timestamp(format: impl Into<String>) -> Formatter {
    let format = format.into();
    formatter(move |value, _row| {
        let secs = match value {
            CellValue::Absent | CellValue::Null => return Ok(value.clone()),
            CellValue::Scalar(Scalar::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .ok_or_else(|| anyhow!("timestamp {} out of range", n))?,
            CellValue::Scalar(Scalar::Text(s)) => s
                .trim()
                .parse::<i64>()
                .with_context(|| format!("'{}' is not a unix timestamp", s))?,
            other => return Err(anyhow!("cannot read '{}' as a unix timestamp", other)),
        };

        let at = DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| anyhow!("timestamp {} out of range", secs))?;
        Ok(CellValue::text(at.format(&format).to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnSpec;
    use crate::resolve::resolve_cell;
    use serde_json::json;

    fn apply(formatter: Formatter, row: serde_json::Value, key: &str) -> anyhow::Result<String> {
        let column = ColumnSpec::new(key, key).with_shared_formatter(formatter);
        Ok(resolve_cell(&row, &column)?.to_text())
    }

    #[test]
    fn test_join_with() {
        let out = apply(join_with(" | "), json!({"t": ["a", "b"]}), "t").unwrap();
        assert_eq!(out, "a | b");
        let out = apply(join_with(" | "), json!({"t": "solo"}), "t").unwrap();
        assert_eq!(out, "solo");
    }

    #[test]
    fn test_uppercase() {
        assert_eq!(apply(uppercase(), json!({"s": "high"}), "s").unwrap(), "HIGH");
        assert_eq!(
            apply(uppercase(), json!({"s": ["a", 1]}), "s").unwrap(),
            "A; 1"
        );
        assert_eq!(apply(uppercase(), json!({"s": 5}), "s").unwrap(), "5");
    }

    #[test]
    fn test_default_value() {
        assert_eq!(apply(default_value("-"), json!({}), "x").unwrap(), "-");
        assert_eq!(apply(default_value("-"), json!({"x": null}), "x").unwrap(), "-");
        assert_eq!(apply(default_value("-"), json!({"x": 0}), "x").unwrap(), "0");
    }

    #[test]
    fn test_unix_timestamp() {
        let fmt = "%Y-%m-%d %H:%M";
        assert_eq!(
            apply(unix_timestamp(fmt), json!({"t": 1_700_000_000}), "t").unwrap(),
            "2023-11-14 22:13"
        );
        assert_eq!(
            apply(unix_timestamp(fmt), json!({"t": "0"}), "t").unwrap(),
            "1970-01-01 00:00"
        );
        assert_eq!(apply(unix_timestamp(fmt), json!({}), "t").unwrap(), "");
    }

    #[test]
    fn test_unix_timestamp_rejects_text() {
        let err = apply(unix_timestamp("%Y"), json!({"t": "yesterday"}), "t").unwrap_err();
        assert!(err.to_string().contains("Formatter for column 't' failed"));
    }
}
