use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Filesystem storage rooted at `base_path`. Absolute paths bypass the root.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    async fn list_files(&self, dir: &str) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(self.resolve(dir)).await?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                let name = entry.file_name();
                files.push(
                    Path::new(dir)
                        .join(name)
                        .to_string_lossy()
                        .into_owned(),
                );
            }
        }

        Ok(files)
    }

    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = tokio::fs::read(self.resolve(path)).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_list_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage
            .write_file("captures/frame-1.json", b"{\"score\": 7}")
            .await
            .unwrap();
        storage
            .write_file("captures/nested/frame-2.json", b"{}")
            .await
            .unwrap();

        let files = storage.list_files("captures").await.unwrap();
        assert_eq!(files, vec!["captures/frame-1.json".to_string()]);

        let data = storage.read_file(&files[0]).await.unwrap();
        assert_eq!(data, b"{\"score\": 7}");
    }

    #[tokio::test]
    async fn test_missing_directory_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        let result = storage.list_files("does-not-exist").await;
        assert!(matches!(
            result,
            Err(crate::utils::error::ScanError::IoError(_))
        ));
    }
}
