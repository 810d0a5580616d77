//! Core type definitions for tabex

use serde_json::{Number, Value};
use std::fmt;

/// One exportable record. Expected to be a JSON object; anything else
/// simply resolves every column to [`CellValue::Absent`].
pub type Row = Value;

/// Separator used when a list-valued cell is flattened into one field
pub const LIST_SEPARATOR: &str = "; ";

/// A single primitive cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(Number),
    Bool(bool),
}

impl Scalar {
    /// Convert a JSON value into a scalar.
    ///
    /// Returns `None` for `null`. Objects and arrays have no scalar form and
    /// are kept as their compact JSON text.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(Scalar::Text(s.clone())),
            Value::Number(n) => Some(Scalar::Number(n.clone())),
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Array(_) | Value::Object(_) => Some(Scalar::Text(value.to_string())),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Number(n) => f.write_str(&format_number(n)),
            Scalar::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Integral floats below this magnitude render as plain digits
const PLAIN_INTEGER_LIMIT: f64 = 1e21;

/// Render a number the way a spreadsheet user expects: integral floats
/// lose their `.0` and stay in plain notation up to 1e21.
fn format_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < PLAIN_INTEGER_LIMIT => {
            if f == 0.0 {
                // Also folds -0.0
                "0".to_string()
            } else {
                format!("{:.0}", f)
            }
        }
        _ => n.to_string(),
    }
}

/// Value of one cell after path resolution and formatting, before escaping
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Field missing from the row, or a nested path that short-circuited
    #[default]
    Absent,
    /// Field present but explicitly null
    Null,
    /// Single primitive
    Scalar(Scalar),
    /// List of primitives, flattened with [`LIST_SEPARATOR`] on encode
    List(Vec<Scalar>),
}

impl CellValue {
    /// Convert an optional JSON value (as found in a row) into a cell value
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            None => CellValue::Absent,
            Some(Value::Null) => CellValue::Null,
            Some(Value::Array(items)) => CellValue::List(
                items
                    .iter()
                    .map(|item| Scalar::from_json(item).unwrap_or(Scalar::Text(String::new())))
                    .collect(),
            ),
            Some(other) => Scalar::from_json(other)
                .map(CellValue::Scalar)
                .unwrap_or(CellValue::Null),
        }
    }

    /// Create a text cell
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Scalar(Scalar::Text(s.into()))
    }

    /// Check if the cell holds nothing (absent or null)
    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Absent | CellValue::Null)
    }

    /// String form used by every encoder before format-specific escaping.
    ///
    /// Absent and null become the empty string, lists are joined.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Absent | CellValue::Null => String::new(),
            CellValue::Scalar(s) => s.to_string(),
            CellValue::List(items) => items
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(LIST_SEPARATOR),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::text(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::text(s)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Scalar(Scalar::Number(n.into()))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Scalar(Scalar::Bool(b))
    }
}

impl From<Vec<String>> for CellValue {
    fn from(items: Vec<String>) -> Self {
        CellValue::List(items.into_iter().map(Scalar::Text).collect())
    }
}

impl From<Option<&Value>> for CellValue {
    fn from(value: Option<&Value>) -> Self {
        CellValue::from_json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_and_null_render_empty() {
        assert_eq!(CellValue::Absent.to_text(), "");
        assert_eq!(CellValue::Null.to_text(), "");
        assert_eq!(CellValue::from_json(Some(&Value::Null)), CellValue::Null);
        assert_eq!(CellValue::from_json(None), CellValue::Absent);
    }

    #[test]
    fn test_list_joins_with_separator() {
        let cell = CellValue::from_json(Some(&json!(["a", "b", 3])));
        assert_eq!(cell.to_text(), "a; b; 3");
    }

    #[test]
    fn test_list_with_null_element() {
        let cell = CellValue::from_json(Some(&json!([1, null, 2])));
        assert_eq!(cell.to_text(), "1; ; 2");
    }

    #[test]
    fn test_number_rendering() {
        assert_eq!(CellValue::from_json(Some(&json!(443))).to_text(), "443");
        assert_eq!(CellValue::from_json(Some(&json!(2.0))).to_text(), "2");
        assert_eq!(CellValue::from_json(Some(&json!(0.5))).to_text(), "0.5");
        assert_eq!(CellValue::from_json(Some(&json!(-7))).to_text(), "-7");
    }

    #[test]
    fn test_large_integral_float_stays_plain() {
        assert_eq!(CellValue::from_json(Some(&json!(1e16))).to_text(), "10000000000000000");
        assert_eq!(
            CellValue::from_json(Some(&json!(-1.5e20))).to_text(),
            "-150000000000000000000"
        );
        assert_eq!(CellValue::from_json(Some(&json!(-0.0))).to_text(), "0");
        assert_eq!(
            CellValue::from_json(Some(&json!(u64::MAX))).to_text(),
            u64::MAX.to_string()
        );
    }

    #[test]
    fn test_bool_rendering() {
        assert_eq!(CellValue::from(true).to_text(), "true");
    }

    #[test]
    fn test_object_kept_as_json_text() {
        let cell = CellValue::from_json(Some(&json!({"a": 1})));
        assert_eq!(cell.to_text(), r#"{"a":1}"#);
    }

    #[test]
    fn test_is_blank() {
        assert!(CellValue::Absent.is_blank());
        assert!(CellValue::Null.is_blank());
        assert!(!CellValue::text("").is_blank());
    }
}
