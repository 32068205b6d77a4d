//! Worksheet grid - calamine range with absolute addressing

use crate::error::{TabulaError, TabulaResult};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use std::io::Cursor;

/// Inclusive bounding range of a grid, in absolute sheet coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub start: (u32, u32),
    pub end: (u32, u32),
}

impl Bounds {
    pub fn rows(&self) -> std::ops::RangeInclusive<u32> {
        self.start.0..=self.end.0
    }

    pub fn cols(&self) -> std::ops::RangeInclusive<u32> {
        self.start.1..=self.end.1
    }
}

/// A rectangular block of cells read from the first worksheet of a workbook.
///
/// Coordinates are absolute: a sheet whose data begins at `C5` has bounds
/// starting at `(4, 2)`, and `cell(4, 2)` is that first cell.
///
/// The last row is the later of the last row holding a value and the last row
/// the sheet declares in its dimension, so trailing blank but formatted rows
/// still belong to the table.
#[derive(Debug, Clone)]
pub struct Grid {
    range: Range<Data>,
    declared_last_row: Option<u32>,
}

impl Grid {
    /// Wrap an already loaded calamine range
    pub fn from_range(range: Range<Data>) -> Self {
        Self {
            range,
            declared_last_row: None,
        }
    }

    /// Extend the grid down to `row` when the sheet declares more rows than hold values
    pub fn with_declared_last_row(mut self, row: u32) -> Self {
        self.declared_last_row = Some(row);
        self
    }

    /// Parse workbook bytes and take the first worksheet.
    ///
    /// The format (xlsx, xlsm, xlsb, xls, ods) is detected from the content.
    pub fn from_bytes(bytes: &[u8]) -> TabulaResult<Self> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|e| TabulaError::Sheet(format!("Failed to open workbook: {}", e)))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| TabulaError::Sheet("Workbook contains no worksheets".to_string()))?;

        // calamine trims ranges to cells with values; xlsx also carries the declared extent
        let declared_last_row = match &mut workbook {
            Sheets::Xlsx(xlsx) => xlsx
                .worksheet_cells_reader(&sheet_name)
                .ok()
                .map(|reader| reader.dimensions().end.0),
            _ => None,
        };

        let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
            TabulaError::Sheet(format!("Failed to read worksheet '{}': {}", sheet_name, e))
        })?;

        let grid = Self::from_range(range);
        Ok(match declared_last_row {
            Some(row) => grid.with_declared_last_row(row),
            None => grid,
        })
    }

    /// Build a grid anchored at `A1` from rows of text. Blank strings become empty cells.
    pub fn from_rows<R, S>(rows: &[R]) -> Self
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let height = rows.len();
        let width = rows.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
        if height == 0 || width == 0 {
            return Self::from_range(Range::empty());
        }

        let mut range = Range::new((0, 0), (height as u32 - 1, width as u32 - 1));
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.as_ref().iter().enumerate() {
                let value = value.as_ref();
                if !value.is_empty() {
                    range.set_value((r as u32, c as u32), Data::String(value.to_string()));
                }
            }
        }
        Self::from_range(range)
    }

    /// Bounding range of the sheet, or `None` when the sheet declares no cells
    pub fn bounds(&self) -> Option<Bounds> {
        let start = self.range.start()?;
        let (mut last_row, last_col) = self.range.end()?;
        if let Some(declared) = self.declared_last_row {
            last_row = last_row.max(declared);
        }
        Some(Bounds {
            start,
            end: (last_row, last_col),
        })
    }

    /// Raw cell at absolute `(row, col)`
    pub fn cell(&self, row: u32, col: u32) -> Option<&Data> {
        self.range.get_value((row, col))
    }

    /// Whether the cell at `(row, col)` counts toward header detection
    pub fn is_filled(&self, row: u32, col: u32) -> bool {
        self.cell(row, col).is_some_and(counts_as_filled)
    }

    /// Textual value of the cell, `None` when absent or blank
    pub fn text(&self, row: u32, col: u32) -> Option<String> {
        self.cell(row, col)
            .filter(|cell| !is_blank(cell))
            .map(cell_to_text)
    }
}

/// Empty cells and empty strings both count as blank
pub fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Blank cells, numeric zero and `false` do not count as filled.
///
/// Only header detection uses this; a zero still renders as `"0"` in a record.
pub fn counts_as_filled(cell: &Data) -> bool {
    match cell {
        Data::Int(0) | Data::Bool(false) => false,
        Data::Float(f) => *f != 0.0,
        other => !is_blank(other),
    }
}

/// Render a cell the way it is stored in a record
pub fn cell_to_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        // f64 Display is already the shortest form: 30.0 -> "30"
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) if datetime.time() == chrono::NaiveTime::MIN => {
                datetime.format("%Y-%m-%d").to_string()
            }
            Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        other => other.to_string(),
    }
}
