//! Excel-compatible encoder
//!
//! Emits an HTML table wrapped in Office namespaces. Excel and LibreOffice
//! import it as a single worksheet; it is not an OOXML workbook.

use super::encoder::Encoder;
use super::format::ExportFormat;
use crate::column::ColumnSpec;
use crate::error::Result;
use crate::resolve::resolve_table;
use crate::types::Row;
use std::fmt::Write as _;
use tracing::debug;

/// Worksheet tab name
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

const HEADER_CELL_STYLE: &str = "background-color:#f0f0f0;font-weight:bold;";

/// Replace `& < > " '` with their entities, and nothing else
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}

/// HTML-table encoder registered as `excel`, `xls` and `xlsx`
#[derive(Debug, Clone)]
pub struct ExcelHtmlEncoder {
    sheet_name: String,
}

impl ExcelHtmlEncoder {
    pub fn new() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }

    /// Set the worksheet tab name
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    fn document_head(&self) -> String {
        format!(
            concat!(
                "<html xmlns:o=\"urn:schemas-microsoft-com:office:office\" ",
                "xmlns:x=\"urn:schemas-microsoft-com:office:excel\" ",
                "xmlns=\"http://www.w3.org/TR/REC-html40\">\n",
                "<head>\n",
                "<meta charset=\"UTF-8\">\n",
                "<!--[if gte mso 9]><xml><x:ExcelWorkbook><x:ExcelWorksheets><x:ExcelWorksheet>",
                "<x:Name>{}</x:Name>",
                "<x:WorksheetOptions><x:DisplayGridlines/></x:WorksheetOptions>",
                "</x:ExcelWorksheet></x:ExcelWorksheets></x:ExcelWorkbook></xml><![endif]-->\n",
                "</head>\n",
                "<body>\n",
                "<table border=\"1\">"
            ),
            escape_html(&self.sheet_name)
        )
    }
}

impl Default for ExcelHtmlEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for ExcelHtmlEncoder {
    fn encode(&self, rows: &[Row], columns: &[ColumnSpec]) -> Result<String> {
        let table = resolve_table(rows, columns)?;

        let mut html = self.document_head();

        html.push_str("<tr>");
        for label in &table.headers {
            // Writing into a String cannot fail
            let _ = write!(
                html,
                "<th style=\"{}\">{}</th>",
                HEADER_CELL_STYLE,
                escape_html(label)
            );
        }
        html.push_str("</tr>");

        for cells in &table.rows {
            html.push_str("<tr>");
            for cell in cells {
                let _ = write!(html, "<td>{}</td>", escape_html(&cell.to_text()));
            }
            html.push_str("</tr>");
        }

        html.push_str("</table></body></html>");

        debug!(
            "Encoded {} rows as Excel HTML ({} bytes)",
            table.len(),
            html.len()
        );
        Ok(html)
    }

    fn format_name(&self) -> &str {
        ExportFormat::Excel.as_str()
    }

    fn aliases(&self) -> &[&str] {
        ExportFormat::Excel.aliases()
    }

    fn file_extension(&self) -> &str {
        ExportFormat::Excel.file_extension()
    }

    fn mime_type(&self) -> &str {
        ExportFormat::Excel.mime_type()
    }
}
