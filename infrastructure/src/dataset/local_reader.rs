//! Reads a dataset file from the local file system.

use async_trait::async_trait;
use scopelens_application::ports::dataset_reader::{DatasetReadError, DatasetReader};
use std::path::Path;
use tracing::debug;

/// [`DatasetReader`] over `tokio::fs`.
///
/// The whole file is read as UTF-8; content is passed through untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalDatasetReader;

impl LocalDatasetReader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DatasetReader for LocalDatasetReader {
    async fn read_dataset(&self, path: &Path) -> Result<String, DatasetReadError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DatasetReadError::new(path, e))?;
        debug!("Read {} bytes from {}", text.len(), path.display());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_file_verbatim() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Month,Sales\nJan,100\n").unwrap();

        let text = LocalDatasetReader::new()
            .read_dataset(file.path())
            .await
            .unwrap();
        assert_eq!(text, "Month,Sales\nJan,100\n");
    }

    #[tokio::test]
    async fn test_reads_thai_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "ยอดขายเพิ่มขึ้น").unwrap();

        let text = LocalDatasetReader::new().read_dataset(&path).await.unwrap();
        assert_eq!(text, "ยอดขายเพิ่มขึ้น");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");

        let err = LocalDatasetReader::new()
            .read_dataset(&path)
            .await
            .unwrap_err();
        assert_eq!(err.path, path);
        assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
        assert!(err.to_string().starts_with("Could not read file"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.bin");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let err = LocalDatasetReader::new()
            .read_dataset(&path)
            .await
            .unwrap_err();
        assert_eq!(err.source.kind(), std::io::ErrorKind::InvalidData);
    }
}
