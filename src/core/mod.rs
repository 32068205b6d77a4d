//! Core dataset logic: merge/dedupe, the record service, the category registry

pub mod merge;
pub mod registry;
pub mod service;

pub use merge::{canonical_form, dedupe, merge, MergeMode};
pub use registry::CategoryRegistry;
pub use service::{validate_category, RecordService};
