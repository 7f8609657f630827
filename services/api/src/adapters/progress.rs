//! services/api/src/adapters/progress.rs
//!
//! This module contains the progress store adapter, the concrete
//! implementation of the `ProgressStore` port from the `core` crate. Each
//! identity gets its own SQLite database file under the configured store
//! directory, created lazily with its schema ensured on every open. It
//! handles all interactions with those files using `sqlx`.

use async_trait::async_trait;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection, SqliteConnection};
use std::path::PathBuf;

use annotation_study_core::domain::{Identity, NewEntry};
use annotation_study_core::ports::{PortError, PortResult, ProgressStore};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS progress (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    paragraph_id INTEGER NOT NULL,
    selections TEXT,
    paragraph TEXT,
    duration REAL
)";

/// A progress store keeping one SQLite file per identity.
#[derive(Clone)]
pub struct SqliteProgressStore {
    store_dir: PathBuf,
}

impl SqliteProgressStore {
    pub fn new(store_dir: PathBuf) -> Self {
        Self { store_dir }
    }

    fn store_path(&self, identity: &Identity) -> PathBuf {
        self.store_dir.join(format!("{}.db", identity))
    }

    /// Opens (creating if missing) the store for one identity and ensures
    /// the schema. One short-lived connection per operation; there is no
    /// pool because each file serves at most one in-flight request.
    async fn open(&self, identity: &Identity) -> PortResult<SqliteConnection> {
        tokio::fs::create_dir_all(&self.store_dir)
            .await
            .map_err(|e| PortError::Storage(e.to_string()))?;
        let mut conn = SqliteConnectOptions::new()
            .filename(self.store_path(identity))
            .create_if_missing(true)
            .connect()
            .await
            .map_err(|e| PortError::Storage(e.to_string()))?;
        sqlx::query(SCHEMA)
            .execute(&mut conn)
            .await
            .map_err(|e| PortError::Storage(e.to_string()))?;
        Ok(conn)
    }
}

#[async_trait]
impl ProgressStore for SqliteProgressStore {
    async fn current_position(&self, identity: &Identity) -> PortResult<usize> {
        // An absent store is position zero; don't create a file just to
        // count its rows.
        if tokio::fs::metadata(self.store_path(identity)).await.is_err() {
            return Ok(0);
        }
        let mut conn = self.open(identity).await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM progress")
            .fetch_one(&mut conn)
            .await
            .map_err(|e| PortError::Storage(e.to_string()))?;
        conn.close()
            .await
            .map_err(|e| PortError::Storage(e.to_string()))?;
        Ok(count as usize)
    }

    async fn append_entry(&self, identity: &Identity, entry: NewEntry) -> PortResult<()> {
        let mut conn = self.open(identity).await?;
        sqlx::query(
            "INSERT INTO progress (paragraph_id, selections, paragraph, duration)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(entry.paragraph_id)
        .bind(entry.selections)
        .bind(entry.paragraph)
        .bind(entry.duration)
        .execute(&mut conn)
        .await
        .map_err(|e| PortError::Storage(e.to_string()))?;
        conn.close()
            .await
            .map_err(|e| PortError::Storage(e.to_string()))?;
        Ok(())
    }

    async fn reset(&self, identity: &Identity) -> PortResult<()> {
        match tokio::fs::remove_file(self.store_path(identity)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(PortError::StoreNotFound(identity.to_string()))
            }
            Err(e) => Err(PortError::Storage(e.to_string())),
        }
    }

    async fn export(&self, identity: &Identity) -> PortResult<Vec<u8>> {
        match tokio::fs::read(self.store_path(identity)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(PortError::StoreNotFound(identity.to_string()))
            }
            Err(e) => Err(PortError::Storage(e.to_string())),
        }
    }
}
