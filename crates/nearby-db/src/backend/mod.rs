//! # Key-Value Backends
//!
//! The durable contract the favorites store writes through.
//!
//! ## Implementations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  dyn KeyValueBackend                                                   │
//! │       │                                                                 │
//! │       ├──► MemoryBackend    (tests, previews; shareable handle)        │
//! │       │                                                                 │
//! │       └──► SqliteKvBackend  (kv_store table on the device)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values are opaque strings; callers own the encoding.

mod memory;
mod sqlite;

pub use memory::MemoryBackend;
pub use sqlite::SqliteKvBackend;

use async_trait::async_trait;

use crate::error::DbResult;

/// Async string-keyed storage that survives restarts.
///
/// Every operation may fail; callers decide whether a failure is fatal.
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    /// Reads the value under `key`. `Ok(None)` if nothing was ever stored.
    async fn get(&self, key: &str) -> DbResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> DbResult<()>;
}
