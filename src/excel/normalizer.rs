//! Grid → records conversion, starting at a detected header row

use super::grid::Grid;
use crate::types::Record;
use serde_json::Value;

/// Normalize a header cell into a record key: trim, then turn every CR/LF into a space
pub fn normalize_key(raw: &str) -> String {
    raw.trim().replace(['\r', '\n'], " ")
}

/// Convert everything from `header_row` to the bottom of the grid into records.
///
/// The header row supplies the keys in column order; columns with a blank
/// header cell are left out. Each later row becomes one record, missing cells
/// are stored as `""`. Fully empty rows are kept as all-blank records.
pub fn normalize_table(grid: &Grid, header_row: u32) -> Vec<Record> {
    let Some(bounds) = grid.bounds() else {
        return Vec::new();
    };
    if !bounds.rows().contains(&header_row) {
        return Vec::new();
    }

    let headers: Vec<(u32, String)> = bounds
        .cols()
        .filter_map(|col| grid.text(header_row, col).map(|h| (col, normalize_key(&h))))
        .collect();

    (header_row + 1..=bounds.end.0)
        .map(|row| {
            let mut record = Record::new();
            for (col, key) in &headers {
                let value = grid.text(row, *col).unwrap_or_default();
                record.insert(key.clone(), Value::String(value));
            }
            record
        })
        .collect()
}
