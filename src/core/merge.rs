//! Merge new records into a stored dataset and drop structural duplicates

use crate::types::Record;
use serde_json::Value;
use std::collections::HashSet;

/// Where incoming records go relative to the stored ones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Bulk import: stored records first, then the new ones
    Append,
    /// Manual entry: new records first, then the stored ones
    Prepend,
}

/// Canonical form used for duplicate detection.
///
/// Compact JSON in insertion order. Key order is NOT normalized, so
/// `{"a":1,"b":2}` and `{"b":2,"a":1}` are different records.
pub fn canonical_form(record: &Record) -> String {
    Value::Object(record.clone()).to_string()
}

/// Keep the first occurrence of each canonical form, preserving order
pub fn dedupe(records: Vec<Record>) -> Vec<Record> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(canonical_form(record)))
        .collect()
}

/// Combine stored and incoming records according to `mode`, then dedupe
pub fn merge(existing: Vec<Record>, incoming: Vec<Record>, mode: MergeMode) -> Vec<Record> {
    let combined = match mode {
        MergeMode::Append => existing.into_iter().chain(incoming).collect(),
        MergeMode::Prepend => incoming.into_iter().chain(existing).collect(),
    };
    dedupe(combined)
}
