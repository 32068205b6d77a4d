//! Record service - convert, import, add, list, fetch

use super::merge::{merge, MergeMode};
use crate::error::{TabulaError, TabulaResult};
use crate::excel;
use crate::store::DatasetStore;
use crate::types::{DatasetState, FieldListing, Record};
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tracing::{debug, info};

/// Reject empty names and anything that could leave the data directory
pub fn validate_category(category: &str) -> TabulaResult<&str> {
    static CATEGORY_RE: OnceLock<Regex> = OnceLock::new();
    let re = CATEGORY_RE.get_or_init(|| {
        Regex::new(r"^[^/\\\x00-\x1f.][^/\\\x00-\x1f]*$").expect("category pattern is valid")
    });

    let trimmed = category.trim();
    if trimmed.is_empty() {
        return Err(TabulaError::MissingInput("category"));
    }
    if !re.is_match(category) || trimmed != category {
        return Err(TabulaError::InvalidCategory(category.to_string()));
    }
    Ok(category)
}

/// Per-category mutual exclusion for load-merge-save.
///
/// Entries only live while some writer holds or waits on them.
#[derive(Debug, Default)]
struct CategoryLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl CategoryLocks {
    fn for_category(&self, category: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(category.to_string()).or_default())
    }

    /// Hand a lock back, dropping the entry when no other writer shares it
    fn release(&self, category: &str, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // One reference in the map, one here
        if Arc::strong_count(&lock) == 2 {
            locks.remove(category);
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Entry point for every dataset operation.
///
/// Writes to the same category are serialized, so a read-modify-write never
/// loses a concurrent writer's records. Different categories do not contend.
pub struct RecordService<S> {
    store: S,
    locks: CategoryLocks,
}

impl<S: DatasetStore> RecordService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: CategoryLocks::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Parse workbook bytes into records (first worksheet only)
    pub fn convert(&self, bytes: &[u8]) -> TabulaResult<Vec<Record>> {
        let records = excel::convert_bytes(bytes)?;
        debug!(records = records.len(), "workbook converted");
        Ok(records)
    }

    /// Append `records` to the category, dropping duplicates, and persist
    pub fn import_bulk(&self, category: &str, records: Vec<Record>) -> TabulaResult<Vec<Record>> {
        self.update(category, records, MergeMode::Append)
    }

    /// Validate the category, convert the workbook, then [`Self::import_bulk`]
    pub fn import_workbook(&self, category: &str, bytes: &[u8]) -> TabulaResult<Vec<Record>> {
        validate_category(category)?;
        let records = self.convert(bytes)?;
        self.import_bulk(category, records)
    }

    /// Put a single record at the front of the category, dropping duplicates, and persist
    pub fn add_single(&self, category: &str, record: Record) -> TabulaResult<Vec<Record>> {
        self.update(category, vec![record], MergeMode::Prepend)
    }

    /// Keys of the first stored record. Missing or empty categories give no fields.
    pub fn list_fields(&self, category: &str) -> TabulaResult<FieldListing> {
        validate_category(category)?;
        let (fields, state) = match self.store.read(category)? {
            None => (Vec::new(), DatasetState::Missing),
            Some(records) => match records.first() {
                None => (Vec::new(), DatasetState::Empty),
                Some(first) => (first.keys().cloned().collect(), DatasetState::Populated),
            },
        };
        Ok(FieldListing {
            category: category.to_string(),
            fields,
            state,
        })
    }

    /// Every stored record of the category, verbatim
    pub fn fetch_all(&self, category: &str) -> TabulaResult<Vec<Record>> {
        validate_category(category)?;
        self.store.load(category)
    }

    fn update(
        &self,
        category: &str,
        incoming: Vec<Record>,
        mode: MergeMode,
    ) -> TabulaResult<Vec<Record>> {
        validate_category(category)?;

        let lock = self.locks.for_category(category);
        let result = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.merge_and_save(category, incoming, mode)
        };
        self.locks.release(category, lock);
        result
    }

    fn merge_and_save(
        &self,
        category: &str,
        incoming: Vec<Record>,
        mode: MergeMode,
    ) -> TabulaResult<Vec<Record>> {
        let existing = self.store.load(category)?;
        let (before, added) = (existing.len(), incoming.len());
        let merged = merge(existing, incoming, mode);
        self.store.save(category, &merged)?;

        info!(
            category,
            mode = ?mode,
            before,
            added,
            after = merged.len(),
            "dataset saved"
        );
        Ok(merged)
    }
}
