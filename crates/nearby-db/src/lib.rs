//! # nearby-db: Durable Layer for Nearby
//!
//! This crate provides the durable key-value contract, its SQLite and
//! in-memory implementations, and the persisted [`FavoriteStore`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Nearby Data Flow                                 │
//! │                                                                         │
//! │  Screen taps heart ──► FavoriteStore::add                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     nearby-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ FavoriteStore │    │   Backends    │    │  Database    │  │   │
//! │  │   │(favorites.rs) │    │ (backend/)    │    │  (pool.rs)   │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ in-memory     │───►│ KeyValue-     │───►│ SqlitePool   │  │   │
//! │  │   │ collection +  │    │  Backend      │    │ migrations   │  │   │
//! │  │   │ write lane    │    │ Memory/Sqlite │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               kv_store table, key = "favorites"                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Durable-layer error types
//! - [`backend`] - The key-value contract and its implementations
//! - [`favorites`] - The persisted favorites store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use nearby_db::{Database, DbConfig, FavoriteStore};
//!
//! let db = Database::new(DbConfig::new("path/to/nearby.db")).await?;
//! let store = FavoriteStore::new(Arc::new(db.key_value()));
//! store.load().await;
//! ```

pub mod backend;
pub mod error;
pub mod favorites;
pub mod migrations;
pub mod pool;

pub use backend::{KeyValueBackend, MemoryBackend, SqliteKvBackend};
pub use error::{DbError, DbResult};
pub use favorites::{AddOutcome, FavoriteStore, LoadOutcome};
pub use pool::{Database, DbConfig};
