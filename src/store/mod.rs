//! Category dataset persistence
//!
//! A dataset is the full ordered list of records of one category. Stores read
//! and write it whole; there are no partial updates.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::TabulaResult;
use crate::types::Record;

/// Whole-document storage keyed by category name
pub trait DatasetStore: Send + Sync {
    /// Stored records, or `None` when the category has never been written
    fn read(&self, category: &str) -> TabulaResult<Option<Vec<Record>>>;

    /// Replace the stored records of `category`
    fn save(&self, category: &str, records: &[Record]) -> TabulaResult<()>;

    /// Stored records, empty when the category does not exist
    fn load(&self, category: &str) -> TabulaResult<Vec<Record>> {
        Ok(self.read(category)?.unwrap_or_default())
    }
}

impl<S: DatasetStore + ?Sized> DatasetStore for std::sync::Arc<S> {
    fn read(&self, category: &str) -> TabulaResult<Option<Vec<Record>>> {
        (**self).read(category)
    }

    fn save(&self, category: &str, records: &[Record]) -> TabulaResult<()> {
        (**self).save(category, records)
    }
}
