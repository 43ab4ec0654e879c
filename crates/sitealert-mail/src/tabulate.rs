//! Renders 2-D string data as a fixed-width text table and as an inline-styled
//! HTML table for e-mail bodies.

use std::fmt::Write as _;

use sitealert_core::ParsedRecord;

use crate::error::TabulateError;

const HEADER_FILL: &str = "#992846";
const ROW_FILL: &str = "#e8e1e3";

/// A header row plus data rows, with column widths precomputed.
#[derive(Debug, Clone)]
pub struct Tabulator {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    table_padding: usize,
    value_padding: usize,
    col_widths: Vec<usize>,
}

impl Tabulator {
    /// Builds a table whose first row is the header.
    ///
    /// # Errors
    ///
    /// [`TabulateError::Empty`] when `data` has no rows;
    /// [`TabulateError::RaggedRow`] when a data row's width differs from the
    /// header's.
    pub fn from_rows(
        data: Vec<Vec<String>>,
        table_padding: usize,
        value_padding: usize,
    ) -> Result<Self, TabulateError> {
        let mut data = data.into_iter();
        let columns = data.next().ok_or(TabulateError::Empty)?;
        let rows: Vec<Vec<String>> = data.collect();

        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(TabulateError::RaggedRow {
                row: idx + 1,
                expected: columns.len(),
                found: row.len(),
            });
        }

        Ok(Self::new(columns, rows, table_padding, value_padding))
    }

    /// Builds a table with one column per [`ParsedRecord::KEYS`] entry.
    ///
    /// # Errors
    ///
    /// [`TabulateError::Empty`] when `records` is empty.
    pub fn from_records(
        records: &[ParsedRecord],
        table_padding: usize,
        value_padding: usize,
    ) -> Result<Self, TabulateError> {
        if records.is_empty() {
            return Err(TabulateError::Empty);
        }

        let columns = ParsedRecord::KEYS.iter().map(|k| (*k).to_owned()).collect();
        let rows = records
            .iter()
            .map(|record| record.values().iter().map(|v| (*v).to_owned()).collect())
            .collect();

        Ok(Self::new(columns, rows, table_padding, value_padding))
    }

    fn new(
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
        table_padding: usize,
        value_padding: usize,
    ) -> Self {
        let col_widths = columns
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                rows.iter()
                    .map(|row| widest_line(&row[idx]))
                    .chain(std::iter::once(widest_line(header)))
                    .max()
                    .unwrap_or_default()
            })
            .collect();

        Self {
            columns,
            rows,
            table_padding,
            value_padding,
            col_widths,
        }
    }

    /// Total width of a text row, border characters included.
    #[must_use]
    pub fn width(&self) -> usize {
        self.col_widths.iter().sum::<usize>()
            + self.columns.len() * (1 + self.value_padding * 2)
            + 1
    }

    /// Renders the table as monospaced text framed by `=` rules.
    #[must_use]
    pub fn to_text(&self) -> String {
        let pad = " ".repeat(self.table_padding);
        let rule = format!("{pad}{}\n", "=".repeat(self.width()));

        let mut table = String::new();
        table.push_str(&rule);
        table.push_str(&self.text_line(&self.columns));
        table.push_str(&rule);
        for row in &self.rows {
            table.push_str(&self.text_line(row));
        }
        table.push_str(&rule);
        table
    }

    /// Renders one logical row. Multi-line cells stretch the row over
    /// several physical lines, with shorter cells padded by blanks.
    fn text_line(&self, cells: &[String]) -> String {
        let pad = " ".repeat(self.table_padding);
        let v = " ".repeat(self.value_padding);
        let separator = format!("{v}|{v}");

        let cell_lines: Vec<Vec<&str>> = cells
            .iter()
            .map(|cell| cell.split('\n').collect())
            .collect();
        let height = cell_lines.iter().map(Vec::len).max().unwrap_or(1);

        let mut out = String::new();
        for line_idx in 0..height {
            let parts: Vec<String> = cell_lines
                .iter()
                .zip(&self.col_widths)
                .map(|(lines, &width)| {
                    let text = lines.get(line_idx).copied().unwrap_or("");
                    format!("{text:<width$}")
                })
                .collect();
            let _ = writeln!(out, "{pad}|{v}{}{v}|", parts.join(&separator));
        }
        out
    }

    /// Renders the table as HTML with inline styles, header row first and
    /// alternating row fills.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut table = String::from(
            r#"<table style="width:450px;margin:0;" cellpadding="0" cellspacing="0" border="1px">"#,
        );

        let _ = write!(
            table,
            r#"<tr style="background-color:{HEADER_FILL}; height:40px; width:450px; margin:0; color:white">"#
        );
        for col in &self.columns {
            let _ = write!(table, "<th>{}</th>", escape_html(col));
        }
        table.push_str("</tr>");

        for (idx, row) in self.rows.iter().enumerate() {
            let fill = if idx % 2 == 1 { ROW_FILL } else { "white" };
            let _ = write!(
                table,
                r#"<tr style="background-color:{fill}; height:40px; width:10px; margin:0;">"#
            );
            for val in row {
                let _ = write!(table, "<td>{}</td>", escape_html(val));
            }
            table.push_str("</tr>");
        }

        table.push_str("</table>");
        table
    }
}

/// Character count of the longest line in `text`.
fn widest_line(text: &str) -> usize {
    text.split('\n')
        .map(|line| line.chars().count())
        .max()
        .unwrap_or_default()
}

/// Escapes markup characters; newlines become `<br>`.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("<br>"),
            other => out.push(other),
        }
    }
    out
}
