//! JSON file storage: one `<key>.json` file per key under a base directory.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use super::traits::ProfileStorage;
use crate::error::StorageError;

pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Resolve a key to its file. Keys must be a single path component.
    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let invalid = key.is_empty()
            || key == "."
            || key == ".."
            || key.contains(['/', '\\'])
            || key.contains('\0');
        if invalid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(format!("{key}.json")))
    }
}

#[async_trait]
impl ProfileStorage for FileStorage {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.base_path).await?;
        // Write then rename so a crash mid-write never leaves a torn snapshot.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn creates_directory_and_roundtrips() {
        let tmp = TempDir::new().unwrap();
        let storage = FileStorage::new(tmp.path().join("nested").join("data"));

        assert_eq!(storage.load("profile").await.unwrap(), None);
        storage.save("profile", r#"{"currentStep":2}"#).await.unwrap();

        let on_disk = std::fs::read_to_string(tmp.path().join("nested/data/profile.json")).unwrap();
        assert_eq!(on_disk, r#"{"currentStep":2}"#);
        assert_eq!(
            storage.load("profile").await.unwrap().as_deref(),
            Some(r#"{"currentStep":2}"#)
        );
    }

    #[tokio::test]
    async fn remove_reports_presence() {
        let tmp = TempDir::new().unwrap();
        let storage = FileStorage::new(tmp.path().to_path_buf());

        assert!(!storage.remove("missing").await.unwrap());
        storage.save("k", "v").await.unwrap();
        assert!(storage.remove("k").await.unwrap());
        assert_eq!(storage.load("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn rejects_path_like_keys() {
        let tmp = TempDir::new().unwrap();
        let storage = FileStorage::new(tmp.path().to_path_buf());

        for key in ["", "..", "../escape", "a/b", "a\\b"] {
            let err = storage.save(key, "x").await.unwrap_err();
            assert!(matches!(err, StorageError::InvalidKey(_)), "key {key:?}");
        }
    }
}
