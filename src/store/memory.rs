use super::DatasetStore;
use crate::error::TabulaResult;
use crate::types::Record;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// In-process store, for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    datasets: Mutex<HashMap<String, Vec<Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .datasets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl DatasetStore for MemoryStore {
    fn read(&self, category: &str) -> TabulaResult<Option<Vec<Record>>> {
        Ok(self
            .datasets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(category)
            .cloned())
    }

    fn save(&self, category: &str, records: &[Record]) -> TabulaResult<()> {
        self.datasets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(category.to_string(), records.to_vec());
        Ok(())
    }
}
