use std::collections::HashMap;
use tracing::{debug, info};

use crate::error::Result;
use crate::record::{Record, CHECK, NAME, TARGET};

/// Identity of a scanner finding: the same name, check and target reported
/// twice is the same problem.
pub fn record_key(record: &Record, index: usize) -> Result<String> {
    Ok(format!(
        "{}-{}-{}",
        record.str_field(NAME, index)?,
        record.str_field(CHECK, index)?,
        record.str_field(TARGET, index)?
    ))
}

/// Collapses duplicate findings across any number of inputs. The last record
/// seen for a key wins, but it keeps the position of the key's first
/// appearance.
#[derive(Debug, Default)]
pub struct Deduplicator {
    positions: HashMap<String, usize>,
    records: Vec<Record>,
    seen: usize,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, records: Vec<Record>) -> Result<()> {
        for (index, record) in records.into_iter().enumerate() {
            let key = record_key(&record, index)?;
            self.seen += 1;
            match self.positions.get(&key) {
                Some(&position) => {
                    debug!(action = "replace", component = "deduplication", key = %key, "Replaced duplicate record");
                    self.records[position] = record;
                }
                None => {
                    self.positions.insert(key, self.records.len());
                    self.records.push(record);
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<Record> {
        info!(
            action = "complete",
            component = "deduplication",
            records_seen = self.seen,
            unique_records = self.records.len(),
            "Deduplication completed"
        );
        self.records
    }
}
