//! Spreadsheet import
//!
//! Turns workbook bytes into records:
//! - Grid: first worksheet as an absolutely addressed block of cells
//! - Header detection: the densest row is the header
//! - Normalization: every row below the header becomes a record

mod grid;
mod header;
mod normalizer;

pub use grid::{cell_to_text, counts_as_filled, is_blank, Bounds, Grid};
pub use header::locate_header;
pub use normalizer::{normalize_key, normalize_table};

use crate::error::{TabulaError, TabulaResult};
use crate::types::Record;

/// Convert a parsed grid into records, failing when no header row exists
pub fn grid_to_records(grid: &Grid) -> TabulaResult<Vec<Record>> {
    let header_row = locate_header(grid).ok_or(TabulaError::NoHeaderFound)?;
    Ok(normalize_table(grid, header_row))
}

/// Parse workbook bytes and convert the first worksheet into records
pub fn convert_bytes(bytes: &[u8]) -> TabulaResult<Vec<Record>> {
    let grid = Grid::from_bytes(bytes)?;
    grid_to_records(&grid)
}
