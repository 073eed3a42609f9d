use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Write;
use tracing::info;

use crate::record::Record;

/// Cell text for one field: missing and null are blank, strings are written
/// as-is and anything else as compact JSON.
pub fn cell(record: &Record, field: &str) -> String {
    match record.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Projects records onto a fixed list of columns for spreadsheet export.
pub struct CsvProjector<W: Write> {
    writer: csv::Writer<W>,
    fields: Vec<String>,
    rows: usize,
}

impl<W: Write> CsvProjector<W> {
    /// Starts the CSV stream by writing the header row.
    pub fn new(writer: W, fields: Vec<String>) -> Result<Self> {
        let mut writer = csv::Writer::from_writer(writer);
        writer
            .write_record(&fields)
            .context("Failed to write CSV header")?;
        Ok(Self {
            writer,
            fields,
            rows: 0,
        })
    }

    pub fn write(&mut self, records: &[Record]) -> Result<()> {
        for record in records {
            let row: Vec<String> = self.fields.iter().map(|f| cell(record, f)).collect();
            self.writer
                .write_record(&row)
                .context("Failed to write CSV row")?;
            self.rows += 1;
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush().context("Failed to flush CSV output")?;
        info!(action = "complete", component = "csv_output", row_count = self.rows, column_count = self.fields.len(), "CSV export completed");
        Ok(self.rows)
    }
}
