use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use crate::error::FilterError;

pub const NAME: &str = "name";
pub const CHECK: &str = "check";
pub const TARGET: &str = "target";
pub const DESCRIPTION: &str = "description";

/// One scanner result. Fields beyond the ones a filter looks at are carried
/// through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Checked string lookup; `index` is the record's position in its input
    /// and only used for error reporting.
    pub fn str_field(&self, field: &str, index: usize) -> crate::error::Result<&str> {
        match self.0.get(field) {
            Some(Value::String(s)) => Ok(s),
            Some(_) => Err(FilterError::FieldType {
                field: field.to_string(),
                index,
            }),
            None => Err(FilterError::MissingField {
                field: field.to_string(),
                index,
            }),
        }
    }

    /// The record's check type, if it carries a string one.
    pub fn check(&self) -> Option<&str> {
        self.0.get(CHECK).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>> {
    let records: Vec<Record> =
        serde_json::from_reader(BufReader::new(reader)).context("Failed to parse JSON records")?;
    Ok(records)
}

/// Loads a record array from `path`, or from standard input when no path is
/// given.
pub fn load_records(path: Option<&Path>) -> Result<Vec<Record>> {
    let start_time = Instant::now();

    let records = match path {
        Some(path) => {
            info!(action = "load", component = "record_source", file_path = ?path, "Reading records from file");
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file {:?}", path))?;
            read_records(file).with_context(|| format!("Invalid record file {:?}", path))?
        }
        None => {
            info!(action = "load", component = "record_source", "Reading records from standard input");
            read_records(io::stdin().lock())?
        }
    };

    info!(
        action = "loaded",
        component = "record_source",
        record_count = records.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Records loaded"
    );
    Ok(records)
}

/// Loads every path in order. An empty list reads standard input once.
pub fn load_all(paths: &[PathBuf]) -> Result<Vec<Vec<Record>>> {
    if paths.is_empty() {
        return Ok(vec![load_records(None)?]);
    }
    paths
        .iter()
        .map(|path| load_records(Some(path.as_path())))
        .collect()
}

/// Writes records as an indented JSON array followed by a newline.
pub fn write_records<W: Write>(records: &[Record], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, records).context("Failed to write JSON records")?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
