//! Server configuration
//!
//! Read from an optional YAML file; every key has a default:
//!
//! ```yaml
//! host: 0.0.0.0
//! port: 3000
//! data_dir: uploads
//! public_dir: public
//! max_upload_bytes: 52428800
//! request_timeout_secs: 300
//! ```

use crate::error::TabulaResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 50 MiB, the largest accepted spreadsheet upload
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Whole-request deadline
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabulaConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding one `<category>.json` per category
    pub data_dir: PathBuf,
    /// Static pages: `index.html`, `data.html`, `404.html` and assets
    pub public_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub request_timeout_secs: u64,
}

impl Default for TabulaConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            data_dir: PathBuf::from("uploads"),
            public_dir: PathBuf::from("public"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl TabulaConfig {
    /// Load from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> TabulaResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> TabulaResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load `path` when given, defaults otherwise
    pub fn load(path: Option<&Path>) -> TabulaResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
