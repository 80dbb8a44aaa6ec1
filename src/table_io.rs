use crate::truth_table::{TruthTable, TruthValue};
use itertools::Itertools;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    /// Aligned columns separated by `|`, with a rule under the headers.
    #[default]
    Text,
    Csv,
}

impl TableFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Csv => "csv",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStyle {
    pub format: TableFormat,
    pub true_label: String,
    pub false_label: String,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            format: TableFormat::Text,
            true_label: TruthValue::True.to_string(),
            false_label: TruthValue::False.to_string(),
        }
    }
}

impl TableStyle {
    fn label(&self, value: TruthValue) -> &str {
        match value {
            TruthValue::True => &self.true_label,
            TruthValue::False => &self.false_label,
        }
    }
}

pub fn write_table<W: Write>(writer: &mut W, table: &TruthTable, style: &TableStyle) -> io::Result<()> {
    match style.format {
        TableFormat::Text => write_text(writer, table, style),
        TableFormat::Csv => write_csv(writer, table, style),
    }
}

fn write_text<W: Write>(writer: &mut W, table: &TruthTable, style: &TableStyle) -> io::Result<()> {
    let label_width = style
        .true_label
        .chars()
        .count()
        .max(style.false_label.chars().count());

    let widths: Vec<usize> = table
        .headers()
        .iter()
        .map(|h| h.chars().count().max(label_width))
        .collect();

    let header_line = table
        .headers()
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{h:^w$}"))
        .join(" | ");
    writeln!(writer, "{}", header_line.trim_end())?;

    let rule = widths.iter().map(|&w| "-".repeat(w)).join("-+-");
    writeln!(writer, "{rule}")?;

    for row in table.rows() {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(&v, &w)| format!("{:^w$}", style.label(v)))
            .join(" | ");
        writeln!(writer, "{}", line.trim_end())?;
    }

    Ok(())
}

fn write_csv<W: Write>(writer: &mut W, table: &TruthTable, style: &TableStyle) -> io::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(table.headers())?;

    for row in table.rows() {
        csv_writer.write_record(row.iter().map(|&v| style.label(v)))?;
    }

    csv_writer.flush()
}

/// Renders `table` to a string, for logging and tests.
pub fn render_table(table: &TruthTable, style: &TableStyle) -> io::Result<String> {
    let mut buffer = Vec::new();
    write_table(&mut buffer, table, style)?;

    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
