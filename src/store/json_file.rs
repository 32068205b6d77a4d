use super::DatasetStore;
use crate::error::{TabulaError, TabulaResult};
use crate::types::Record;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One pretty-printed `<category>.json` document per category.
///
/// Category names are used verbatim as file stems; callers validate them first
/// (see [`crate::core::validate_category`]).
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Store rooted at `root`. The directory is created on first save.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the document backing `category`
    pub fn path_for(&self, category: &str) -> PathBuf {
        self.root.join(format!("{}.json", category))
    }
}

impl DatasetStore for JsonFileStore {
    fn read(&self, category: &str) -> TabulaResult<Option<Vec<Record>>> {
        let path = self.path_for(category);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(TabulaError::StoreRead {
                    category: category.to_string(),
                    source,
                })
            }
        };

        let records: Vec<Record> =
            serde_json::from_str(&content).map_err(|source| TabulaError::StoreReadCorrupt {
                category: category.to_string(),
                source,
            })?;
        Ok(Some(records))
    }

    fn save(&self, category: &str, records: &[Record]) -> TabulaResult<()> {
        let write_failure = |source| TabulaError::StoreWriteFailure {
            category: category.to_string(),
            source,
        };

        fs::create_dir_all(&self.root).map_err(write_failure)?;

        // serde_json errors here are only ever I/O; records are plain maps
        let content = serde_json::to_string_pretty(records)
            .map_err(|e| write_failure(std::io::Error::new(ErrorKind::InvalidData, e)))?;
        fs::write(self.path_for(category), content).map_err(write_failure)?;
        Ok(())
    }
}
