//! Domain label aggregation.
//!
//! Groups records of one check type by the trailing labels of a chosen field
//! and counts how many records fall in each group. Summarising broken CNAMEs
//! `foo1.elb.amazonaws.com`, `bar2.elb.amazonaws.com` and
//! `baz3.s3.amazonaws.com` at two labels yields 3 for `amazonaws.com`; at three
//! labels it yields 1 for `s3.amazonaws.com` and 2 for `elb.amazonaws.com`.

use std::collections::HashMap;
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info};

use crate::domain::label_suffix;
use crate::error::{FilterError, Result};
use crate::record::Record;

/// Number of trailing labels kept when grouping. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelDepth(usize);

impl LabelDepth {
    pub fn new(labels: i64) -> Result<Self> {
        match usize::try_from(labels) {
            Ok(n) if n > 0 => Ok(Self(n)),
            _ => Err(FilterError::Configuration(format!(
                "label count must be greater than 0, got {}",
                labels
            ))),
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for LabelDepth {
    fn default() -> Self {
        Self(1)
    }
}

#[derive(Debug, Clone)]
pub struct AggregateOptions {
    pub field: String,
    pub labels: LabelDepth,
    pub check: String,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            field: crate::record::TARGET.to_string(),
            labels: LabelDepth::default(),
            check: "cname".to_string(),
        }
    }
}

/// Per-suffix record counts for a single aggregation run.
#[derive(Debug, Default)]
pub struct CountTable {
    counts: HashMap<String, u64>,
}

impl CountTable {
    pub fn increment(&mut self, suffix: &str) {
        match self.counts.get_mut(suffix) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(suffix.to_string(), 1);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries ordered by count ascending, ties by suffix ascending.
    pub fn into_sorted(self) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self.counts.into_iter().collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }
}

/// Counts records whose `check` equals `options.check`, grouped by the
/// trailing labels of `options.field`.
///
/// Fails on the first kept record that lacks the field; no partial table is
/// returned. Records of other check types are never inspected beyond `check`.
pub fn aggregate(records: &[Record], options: &AggregateOptions) -> Result<Vec<(String, u64)>> {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "label_aggregation",
        record_count = records.len(),
        field = %options.field,
        labels = options.labels.get(),
        check = %options.check,
        "Starting label aggregation"
    );

    let mut table = CountTable::default();
    let mut skipped = 0usize;

    for (index, record) in records.iter().enumerate() {
        if record.check() != Some(options.check.as_str()) {
            skipped += 1;
            continue;
        }

        let value = record.str_field(&options.field, index)?;
        let suffix = label_suffix(value, options.labels.get());
        debug!(action = "count", component = "label_aggregation", index, suffix, "Counted record");
        table.increment(suffix);
    }

    info!(
        action = "complete",
        component = "label_aggregation",
        unique_suffixes = table.len(),
        records_skipped = skipped,
        duration_ms = start_time.elapsed().as_millis(),
        "Label aggregation completed"
    );

    Ok(table.into_sorted())
}

/// Writes one `<count>\t<suffix>` line per entry, in the given order.
pub fn write_report<W: Write>(entries: &[(String, u64)], mut writer: W) -> std::io::Result<()> {
    for (suffix, count) in entries {
        writeln!(writer, "{}\t{}", count, suffix)?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(check: &str, target: &str) -> Record {
        Record::new().with("check", check).with("target", target)
    }

    fn options(labels: i64) -> AggregateOptions {
        AggregateOptions {
            labels: LabelDepth::new(labels).unwrap(),
            ..AggregateOptions::default()
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            record("cname", "a.s3.amazonaws.com"),
            record("cname", "b.elb.amazonaws.com"),
            record("cname", "c.elb.amazonaws.com"),
            record("a", "d.example.com"),
        ]
    }

    #[test]
    fn test_label_depth_rejects_non_positive() {
        assert!(matches!(LabelDepth::new(0), Err(FilterError::Configuration(_))));
        assert!(matches!(LabelDepth::new(-3), Err(FilterError::Configuration(_))));
        assert_eq!(LabelDepth::new(3).unwrap().get(), 3);
    }

    #[test]
    fn test_defaults() {
        let options = AggregateOptions::default();
        assert_eq!(options.field, "target");
        assert_eq!(options.check, "cname");
        assert_eq!(options.labels.get(), 1);
    }

    #[test]
    fn test_suffixes_collapse_at_two_labels() {
        let result = aggregate(&sample(), &options(2)).unwrap();
        assert_eq!(result, vec![("amazonaws.com".to_string(), 3)]);
    }

    #[test]
    fn test_three_labels_sorted_by_count() {
        let result = aggregate(&sample(), &options(3)).unwrap();
        assert_eq!(
            result,
            vec![
                ("s3.amazonaws.com".to_string(), 1),
                ("elb.amazonaws.com".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_ties_ordered_by_suffix() {
        let records = vec![
            record("cname", "x.zeta.net"),
            record("cname", "y.alpha.org"),
            record("cname", "z.mid.io"),
        ];
        let result = aggregate(&records, &options(2)).unwrap();
        let suffixes: Vec<&str> = result.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(suffixes, vec!["alpha.org", "mid.io", "zeta.net"]);
    }

    #[test]
    fn test_trailing_dot_and_long_depth() {
        let records = vec![record("cname", "foo1.elb.amazonaws.com.")];
        assert_eq!(
            aggregate(&records, &options(3)).unwrap(),
            vec![("elb.amazonaws.com".to_string(), 1)]
        );
        assert_eq!(
            aggregate(&records, &options(9)).unwrap(),
            vec![("foo1.elb.amazonaws.com".to_string(), 1)]
        );
    }

    #[test]
    fn test_counts_sum_to_matching_records() {
        let records = sample();
        let result = aggregate(&records, &options(1)).unwrap();
        let total: u64 = result.iter().map(|(_, c)| c).sum();
        let matching = records.iter().filter(|r| r.check() == Some("cname")).count();
        assert_eq!(total, matching as u64);
    }

    #[test]
    fn test_unrelated_fields_do_not_change_output() {
        let baseline = aggregate(&sample(), &options(2)).unwrap();

        let mut changed = sample();
        for (i, r) in changed.iter_mut().enumerate() {
            r.set("name", format!("host{}.example.com", i));
            r.set("description", "changed");
        }
        assert_eq!(aggregate(&changed, &options(2)).unwrap(), baseline);
    }

    #[test]
    fn test_deterministic() {
        let records = vec![
            record("cname", "a.one.com"),
            record("cname", "b.two.com"),
            record("cname", "c.three.com"),
            record("cname", "d.two.com"),
        ];
        let first = aggregate(&records, &options(2)).unwrap();
        let second = aggregate(&records, &options(2)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_field_aborts() {
        let records = vec![
            record("cname", "a.example.com"),
            Record::new().with("check", "cname"),
        ];
        let err = aggregate(&records, &options(1)).unwrap_err();
        assert_eq!(
            err,
            FilterError::MissingField {
                field: "target".to_string(),
                index: 1
            }
        );
    }

    #[test]
    fn test_missing_field_on_filtered_record_is_ignored() {
        let records = vec![
            record("cname", "a.example.com"),
            Record::new().with("check", "ns"),
            Record::new().with("name", "no-check.example.com"),
        ];
        let result = aggregate(&records, &options(1)).unwrap();
        assert_eq!(result, vec![("com".to_string(), 1)]);
    }

    #[test]
    fn test_custom_field_and_check() {
        let records = vec![
            Record::new().with("check", "ns").with("name", "a.corp.example.org."),
            Record::new().with("check", "ns").with("name", "b.corp.example.org"),
            Record::new().with("check", "cname").with("name", "c.other.net"),
        ];
        let options = AggregateOptions {
            field: "name".to_string(),
            labels: LabelDepth::new(3).unwrap(),
            check: "ns".to_string(),
        };
        assert_eq!(
            aggregate(&records, &options).unwrap(),
            vec![("corp.example.org".to_string(), 2)]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[], &options(1)).unwrap().is_empty());
    }

    #[test]
    fn test_write_report() {
        let entries = vec![
            ("s3.amazonaws.com".to_string(), 1),
            ("elb.amazonaws.com".to_string(), 2),
        ];
        let mut out = Vec::new();
        write_report(&entries, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1\ts3.amazonaws.com\n2\telb.amazonaws.com\n"
        );
    }
}
