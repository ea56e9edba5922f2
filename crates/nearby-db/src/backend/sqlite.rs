//! # SQLite Key-Value Backend
//!
//! Stores each key as one row of the `kv_store` table.
//!
//! ## Schema
//! ```text
//! kv_store
//! ├── key         TEXT PRIMARY KEY
//! ├── value       TEXT            (opaque, usually JSON)
//! └── updated_at  TEXT            (RFC 3339, UTC)
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use super::KeyValueBackend;
use crate::error::DbResult;

/// Key-value backend over a SQLite pool.
#[derive(Debug, Clone)]
pub struct SqliteKvBackend {
    pool: SqlitePool,
}

impl SqliteKvBackend {
    /// Creates a backend over an already-migrated pool.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteKvBackend { pool }
    }
}

#[async_trait]
impl KeyValueBackend for SqliteKvBackend {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = value.len(), "kv_store row written");
        Ok(())
    }
}
