//! CSV point tables: loading and writing.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

use crate::models::{Table, Value};

/// How to read a delimited point file
#[derive(Debug, Clone)]
pub struct CsvOptions {
    pub delimiter: u8,
    /// Fields kept as text instead of type-inferred (e.g. zero-padded codes)
    pub text_fields: Vec<String>,
    /// When set, only these fields are type-inferred; all others stay text
    pub infer_only: Option<Vec<String>>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            text_fields: Vec::new(),
            infer_only: None,
        }
    }
}

impl CsvOptions {
    /// Whether the column named `field` is kept as raw text
    fn keeps_text(&self, field: &str) -> bool {
        let excluded = self
            .infer_only
            .as_ref()
            .map_or(false, |fields| !fields.iter().any(|f| f == field));
        excluded || self.text_fields.iter().any(|f| f == field)
    }
}

/// Load a point table from a CSV file (optionally `.gz` compressed)
pub fn load_points(path: &Path, options: &CsvOptions) -> Result<Table> {
    info!("Loading point table from {}", path.display());

    let file = File::open(path)
        .with_context(|| format!("Failed to open point file {}", path.display()))?;
    let reader: Box<dyn Read> = if path.extension().map_or(false, |e| e == "gz") {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let table = read_points(reader, options)
        .with_context(|| format!("Failed to read point file {}", path.display()))?;

    info!(
        "Loaded {} rows with fields [{}]",
        table.len(),
        table.fields().join(", ")
    );
    Ok(table)
}

/// Read a point table from any CSV source
pub fn read_points<R: Read>(reader: R, options: &CsvOptions) -> Result<Table> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let as_text: Vec<bool> = headers.iter().map(|h| options.keeps_text(h)).collect();

    let mut table = Table::new(headers.iter())?;

    for (line, result) in csv_reader.records().enumerate() {
        let record = result.with_context(|| format!("Malformed record {}", line + 1))?;
        let row = record
            .iter()
            .zip(&as_text)
            .map(|(cell, &text)| {
                if text && !cell.is_empty() {
                    Value::Text(cell.to_string())
                } else {
                    Value::infer(cell)
                }
            })
            .collect();
        table.push_row(row)?;
    }

    Ok(table)
}

/// Write a table as CSV with a header row. `Null` cells are left empty.
pub fn write_table<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().from_writer(writer);

    csv_writer.write_record(table.fields())?;
    for row in table.rows() {
        csv_writer.write_record(row.iter().map(|v| v.to_string()))?;
    }
    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}
