//! Dataset reader port
//!
//! Local file ingestion: turns a user-selected file into dataset text.
//! The content is not validated in any way.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Local ingestion failure
#[derive(Error, Debug)]
#[error("Could not read file {}: {source}", .path.display())]
pub struct DatasetReadError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl DatasetReadError {
    pub fn new(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

/// Reads a dataset file (CSV, plain text, JSON) into a string
#[async_trait]
pub trait DatasetReader: Send + Sync {
    async fn read_dataset(&self, path: &Path) -> Result<String, DatasetReadError>;
}
