use anyhow::{Context, Result};
use regex::Regex;
use std::time::Instant;
use tracing::info;

use crate::record::{Record, CHECK, DESCRIPTION, NAME, TARGET};

/// Regex filter over the scanner's fixed fields. A field without a pattern
/// is not consulted at all.
#[derive(Debug, Default)]
pub struct RecordFilter {
    patterns: Vec<(&'static str, Regex)>,
    invert: bool,
}

fn compile(field: &str, pattern: Option<&str>) -> Result<Option<Regex>> {
    pattern
        .map(|p| Regex::new(p).with_context(|| format!("Invalid regex for --{}: {}", field, p)))
        .transpose()
}

impl RecordFilter {
    pub fn new(
        name: Option<&str>,
        target: Option<&str>,
        check: Option<&str>,
        description: Option<&str>,
        invert: bool,
    ) -> Result<Self> {
        let mut patterns = Vec::new();
        for (field, pattern) in [
            (NAME, name),
            (TARGET, target),
            (CHECK, check),
            (DESCRIPTION, description),
        ] {
            if let Some(regex) = compile(field, pattern)? {
                patterns.push((field, regex));
            }
        }

        info!(action = "compile", component = "record_filter", pattern_count = patterns.len(), invert, "Compiled record filter");
        Ok(Self { patterns, invert })
    }

    /// True when the record should be kept. Every pattern must find a match
    /// somewhere in its field; `invert` flips the outcome.
    pub fn keep(&self, record: &Record, index: usize) -> crate::error::Result<bool> {
        for (field, regex) in &self.patterns {
            if !regex.is_match(record.str_field(field, index)?) {
                return Ok(self.invert);
            }
        }
        Ok(!self.invert)
    }

    pub fn apply(&self, records: Vec<Record>) -> crate::error::Result<Vec<Record>> {
        let start_time = Instant::now();
        let total = records.len();

        let mut kept = Vec::new();
        for (index, record) in records.into_iter().enumerate() {
            if self.keep(&record, index)? {
                kept.push(record);
            }
        }

        info!(
            action = "complete",
            component = "record_filter",
            record_count = total,
            matched = kept.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Record filtering completed"
        );
        Ok(kept)
    }
}
