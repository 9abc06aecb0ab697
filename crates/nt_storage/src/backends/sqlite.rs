use async_trait::async_trait;
use nt_core::{Error, KeyValueStore, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use sqlx::Row;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use crate::StorageBackend;

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS kv (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    )
    "#,
    // Add future migrations here
];

/// Durable key-value store backed by a single SQLite file.
pub struct SqliteStore {
    pool: Arc<SqlitePool>,
    db_path: PathBuf,
}

#[async_trait]
impl StorageBackend for SqliteStore {
    fn get_error_message() -> &'static str {
        "SQLite database should be writable at the configured path"
    }

    async fn open(path: &Path) -> Result<Self> {
        Self::new_with_path(path).await
    }
}

impl SqliteStore {
    pub async fn new_with_path(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| Error::Store(format!("Failed to open {}: {}", db_path.display(), e)))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| Error::Store(format!("Failed to run migration {}: {}", i, e)))?;
        }

        Ok(Self {
            pool: Arc::new(pool),
            db_path: db_path.to_path_buf(),
        })
    }

    pub fn get_db_path(&self) -> &Path {
        &self.db_path
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| Error::Store(format!("Failed to read {}: {}", key, e)))?;

        Ok(row.map(|row| row.get::<String, _>("value")))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO kv (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&*self.pool)
            .await
            .map_err(|e| Error::Store(format!("Failed to write {}: {}", key, e)))?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM kv WHERE key = ?")
            .bind(key)
            .execute(&*self.pool)
            .await
            .map_err(|e| Error::Store(format!("Failed to delete {}: {}", key, e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_sqlite_store() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("nested").join("test.db");

        let store = SqliteStore::new_with_path(&db_path).await.unwrap();
        assert_eq!(store.get_db_path(), db_path.as_path());
        assert_eq!(store.get("favoriteNewsItems").await.unwrap(), None);

        store.set("favoriteNewsItems", "[]").await.unwrap();
        store.set("favoriteNewsItems", r#"[{"title":"A","description":""}]"#).await.unwrap();
        assert_eq!(
            store.get("favoriteNewsItems").await.unwrap().as_deref(),
            Some(r#"[{"title":"A","description":""}]"#)
        );

        store.remove("favoriteNewsItems").await.unwrap();
        assert_eq!(store.get("favoriteNewsItems").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sqlite_survives_reopen() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("news.db");

        {
            let store = SqliteStore::new_with_path(&db_path).await.unwrap();
            store.set("userData", r#"{"email":"test@test.com"}"#).await.unwrap();
            store.pool.close().await;
        }

        let store = SqliteStore::new_with_path(&db_path).await.unwrap();
        assert_eq!(
            store.get("userData").await.unwrap().as_deref(),
            Some(r#"{"email":"test@test.com"}"#)
        );
    }
}
