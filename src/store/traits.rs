//! `ProfileStorage` trait: the local key/value slot the wizard persists to.

use async_trait::async_trait;

use crate::error::StorageError;

/// Single-device key/value storage holding serialized snapshots.
///
/// Values are opaque strings; encoding and decoding belong to the caller.
#[async_trait]
pub trait ProfileStorage: Send + Sync {
    /// Read the value under `key`, or `None` if nothing is stored.
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    async fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Returns whether anything was removed.
    async fn remove(&self, key: &str) -> Result<bool, StorageError>;
}
