//! libSQL backend: `ProfileStorage` over a `kv_store` table.
//!
//! Supports local file and in-memory databases.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::{debug, info};

use crate::error::StorageError;
use crate::store::migrations;
use crate::store::traits::ProfileStorage;

/// libSQL storage backend.
///
/// Stores a single connection that is reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlStorage {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlStorage {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StorageError::Pool(format!("Failed to open libSQL database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| StorageError::Pool(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        migrations::run_migrations(&backend.conn).await?;
        info!(path = %path.display(), "Database opened");
        Ok(backend)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, StorageError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| StorageError::Pool(format!("Failed to create in-memory database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| StorageError::Pool(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        migrations::run_migrations(&backend.conn).await?;
        Ok(backend)
    }
}

#[async_trait]
impl ProfileStorage for LibSqlStorage {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut rows = self
            .conn
            .query("SELECT value FROM kv_store WHERE key = ?1", params![key])
            .await
            .map_err(|e| StorageError::Query(format!("load: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => {
                let value: String = row
                    .get(0)
                    .map_err(|e| StorageError::Query(format!("load: {e}")))?;
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(StorageError::Query(format!("load: {e}"))),
        }
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let now = Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT (key) DO UPDATE SET value = ?2, updated_at = ?3",
                params![key, value, now],
            )
            .await
            .map_err(|e| StorageError::Query(format!("save: {e}")))?;
        debug!(key, bytes = value.len(), "Stored value");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let count = self
            .conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])
            .await
            .map_err(|e| StorageError::Query(format!("remove: {e}")))?;
        Ok(count > 0)
    }
}
