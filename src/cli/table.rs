//! Table formatting for CLI list commands
//!
//! One formatter shared by the place and item commands, so every list looks
//! the same: aligned columns with styled headers for terminals, plus CSV,
//! Markdown and bare-id variants for piping.

use console::style;

use crate::cli::helpers::{escape_csv, format_short_id_str, truncate_str};
use crate::cli::OutputFormat;

/// A typed cell value with semantic meaning for formatting
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Record ID (truncated for display, cyan colored)
    Id(String),
    /// Plain text, truncated to the column width
    Text(String),
    /// Numeric value, right-aligned
    Number(i64),
}

impl CellValue {
    fn format_tsv(&self, width: usize) -> String {
        match self {
            // Pad the raw text first; styling wraps it in ANSI codes that
            // must not count against the column width.
            CellValue::Id(id) => {
                let padded = format!("{:<width$}", format_short_id_str(id), width = width);
                style(padded).cyan().to_string()
            }
            CellValue::Text(s) => {
                format!(
                    "{:<width$}",
                    truncate_str(s, width.saturating_sub(2)),
                    width = width
                )
            }
            CellValue::Number(n) => format!("{:>width$}", n, width = width),
        }
    }

    fn format_csv(&self) -> String {
        match self {
            CellValue::Id(id) => escape_csv(id),
            CellValue::Text(s) => escape_csv(s),
            CellValue::Number(n) => n.to_string(),
        }
    }

    fn format_md(&self) -> String {
        let raw = match self {
            CellValue::Id(id) => id.clone(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
        };
        raw.replace('|', "\\|")
    }

    /// Visible width in characters, not bytes
    fn display_width(&self) -> usize {
        match self {
            CellValue::Id(id) => format_short_id_str(id).chars().count(),
            CellValue::Text(s) => s.chars().count(),
            CellValue::Number(n) => n.to_string().len(),
        }
    }
}

/// Column definition with header label and maximum width
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub key: &'static str,
    pub header: &'static str,
    pub width: usize,
}

impl ColumnDef {
    pub const fn new(key: &'static str, header: &'static str, width: usize) -> Self {
        Self { key, header, width }
    }
}

/// A row of cell values for table output
pub struct TableRow {
    pub full_id: String,
    cells: Vec<(&'static str, CellValue)>,
}

impl TableRow {
    pub fn new(full_id: String) -> Self {
        Self {
            full_id,
            cells: Vec::new(),
        }
    }

    pub fn cell(mut self, key: &'static str, value: CellValue) -> Self {
        self.cells.push((key, value));
        self
    }

    fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Table formatter that outputs rows in the selected format
pub struct TableFormatter<'a> {
    columns: &'a [ColumnDef],
    record_name: &'static str,
    show_summary: bool,
}

impl<'a> TableFormatter<'a> {
    pub fn new(columns: &'a [ColumnDef], record_name: &'static str) -> Self {
        Self {
            columns,
            record_name,
            show_summary: true,
        }
    }

    /// Disable the trailing summary line (for piping)
    pub fn without_summary(mut self) -> Self {
        self.show_summary = false;
        self
    }

    pub fn output(&self, rows: Vec<TableRow>, format: OutputFormat) {
        match format {
            OutputFormat::Tsv => self.output_tsv(&rows),
            OutputFormat::Csv => self.output_csv(&rows),
            OutputFormat::Md => self.output_md(&rows),
            OutputFormat::Id => self.output_ids(&rows),
            // JSON is handled by the commands, which serialize the records
            // themselves; fall back to the terminal format here.
            OutputFormat::Json => self.output_tsv(&rows),
        }
    }

    /// Size columns to their content, capped at the defined width
    fn calculate_widths(&self, rows: &[TableRow]) -> Vec<usize> {
        self.columns
            .iter()
            .map(|col| {
                let max_content = rows
                    .iter()
                    .filter_map(|r| r.get(col.key))
                    .map(|v| v.display_width())
                    .max()
                    .unwrap_or(0);
                let natural = col.header.len().max(max_content.saturating_add(2));
                natural.min(col.width)
            })
            .collect()
    }

    fn output_tsv(&self, rows: &[TableRow]) {
        let widths = self.calculate_widths(rows);

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, w)| {
                style(format!("{:<width$}", col.header, width = w))
                    .bold()
                    .to_string()
            })
            .collect();
        println!("{}", header.join(" "));

        let total: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
        println!("{}", "-".repeat(total));

        for row in rows {
            let parts: Vec<String> = self
                .columns
                .iter()
                .zip(&widths)
                .map(|(col, w)| match row.get(col.key) {
                    Some(value) => value.format_tsv(*w),
                    None => format!("{:<width$}", "-", width = w),
                })
                .collect();
            println!("{}", parts.join(" "));
        }

        if self.show_summary {
            println!();
            println!(
                "{} {}(s) found.",
                style(rows.len()).cyan(),
                self.record_name
            );
        }
    }

    fn output_csv(&self, rows: &[TableRow]) {
        let headers: Vec<&str> = self.columns.iter().map(|c| c.key).collect();
        println!("{}", headers.join(","));

        for row in rows {
            let values: Vec<String> = self
                .columns
                .iter()
                .map(|col| {
                    row.get(col.key)
                        .map(CellValue::format_csv)
                        .unwrap_or_default()
                })
                .collect();
            println!("{}", values.join(","));
        }
    }

    fn output_md(&self, rows: &[TableRow]) {
        let headers: Vec<&str> = self.columns.iter().map(|c| c.header).collect();
        println!("| {} |", headers.join(" | "));
        let separators: Vec<&str> = headers.iter().map(|_| "---").collect();
        println!("|{}|", separators.join("|"));

        for row in rows {
            let values: Vec<String> = self
                .columns
                .iter()
                .map(|col| {
                    row.get(col.key)
                        .map(CellValue::format_md)
                        .unwrap_or_else(|| "-".to_string())
                })
                .collect();
            println!("| {} |", values.join(" | "));
        }
    }

    fn output_ids(&self, rows: &[TableRow]) {
        for row in rows {
            println!("{}", row.full_id);
        }
    }
}
