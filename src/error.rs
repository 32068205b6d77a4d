use thiserror::Error;

pub type TabulaResult<T> = Result<T, TabulaError>;

#[derive(Error, Debug)]
pub enum TabulaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Spreadsheet error: {0}")]
    Sheet(String),

    #[error("No header row found: every row of the sheet is empty")]
    NoHeaderFound,

    #[error("Missing input: {0}")]
    MissingInput(&'static str),

    #[error("Invalid category name: {0:?}")]
    InvalidCategory(String),

    #[error("Data file for category '{category}' is corrupt: {source}")]
    StoreReadCorrupt {
        category: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read data file for category '{category}': {source}")]
    StoreRead {
        category: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write data file for category '{category}': {source}")]
    StoreWriteFailure {
        category: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Server error: {0}")]
    Server(String),
}

impl TabulaError {
    /// True when the caller sent something unusable, as opposed to a failure on our side.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TabulaError::NoHeaderFound
                | TabulaError::MissingInput(_)
                | TabulaError::InvalidCategory(_)
                | TabulaError::Upload(_)
                | TabulaError::InvalidBody(_)
        )
    }
}
