//! In-process storage. Nothing survives the process.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::traits::ProfileStorage;
use crate::error::StorageError;

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStorage for MemoryStorage {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.entries.write().await.remove(key).is_some())
    }
}
