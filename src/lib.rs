//! Tabula - spreadsheet to JSON category datasets
//!
//! This library converts spreadsheets into JSON records and keeps them in
//! per-category datasets that can be appended to, queried and deduplicated.
//!
//! # Features
//!
//! - Header detection: the densest row of the first worksheet is the header
//! - Row to record conversion with normalized header keys
//! - Append (bulk import) and prepend (manual entry) merges with structural dedupe
//! - One JSON document per category, key order preserved
//! - HTTP server and CLI
//!
//! # Example
//!
//! ```no_run
//! use royalbit_tabula::core::RecordService;
//! use royalbit_tabula::store::JsonFileStore;
//!
//! let service = RecordService::new(JsonFileStore::new("uploads"));
//! let bytes = std::fs::read("parts.xlsx")?;
//!
//! let records = service.import_workbook("parts", &bytes)?;
//! println!("parts now holds {} records", records.len());
//!
//! let fields = service.list_fields("parts")?;
//! println!("fields: {:?}", fields.fields);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{TabulaError, TabulaResult};
pub use types::{DatasetState, FieldListing, Record};
