//! # Favorite Store
//!
//! The single source of truth for the user's favorites, mirrored to a
//! durable key-value slot on every change.
//!
//! ## Write Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Favorite Store Operations                            │
//! │                                                                         │
//! │  Screen Action         Store Call          In-Memory          Durable   │
//! │  ─────────────         ──────────          ─────────          ───────   │
//! │                                                                         │
//! │  Tap heart ──────────► add(input) ───────► insert if new ──┐            │
//! │                                                            │            │
//! │  Tap heart again ────► remove(id) ───────► delete if found ┤            │
//! │                                                            │            │
//! │  Clear list ─────────► clear_all() ──────► clear ──────────┤            │
//! │                                                            ▼            │
//! │                                               write lane (one at a time)│
//! │                                                            │            │
//! │                                     snapshot CURRENT state ┘            │
//! │                                                   │                     │
//! │                                                   ▼                     │
//! │                                        backend.set("favorites", json)   │
//! │                                                                         │
//! │  NOTE: Memory is updated before the write starts, so reads see the      │
//! │        change immediately. The snapshot is taken inside the lane, so    │
//! │        the last write to finish always carries every earlier change.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Handling
//! Backend failures never reach the caller. They are logged, counted, and
//! the store keeps serving from memory for the rest of the session.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use nearby_core::validation::validate_favorite_input;
use nearby_core::{
    FavoriteCollection, FavoriteItem, FavoriteItemInput, ValidationError, FAVORITES_STORAGE_KEY,
};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::backend::KeyValueBackend;

// =============================================================================
// Outcomes
// =============================================================================

/// What [`FavoriteStore::load`] found in the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored yet (first launch).
    Empty,
    /// A stored collection with this many items was restored.
    Restored(usize),
    /// The blob was unreadable or the backend failed; started empty.
    Recovered,
}

/// Result of [`FavoriteStore::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// An item with the same id exists; nothing changed.
    AlreadyFavorite,
}

// =============================================================================
// Favorite Store
// =============================================================================

/// Persisted, id-unique, ordered favorites collection.
///
/// ## Usage
/// ```rust,ignore
/// let store = Arc::new(FavoriteStore::new(Arc::new(db.key_value())));
/// store.load().await;
///
/// store.add(FavoriteItemInput::new("r7", "Savour Foods", "Food")).await?;
/// assert!(store.is_favorite("r7"));
/// ```
pub struct FavoriteStore {
    backend: Arc<dyn KeyValueBackend>,
    storage_key: String,
    state: RwLock<FavoriteCollection>,
    write_lane: Mutex<()>,
    persist_failures: AtomicU64,
}

impl std::fmt::Debug for FavoriteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoriteStore")
            .field("storage_key", &self.storage_key)
            .field("len", &self.len())
            .field("persist_failures", &self.persist_failures())
            .finish()
    }
}

impl FavoriteStore {
    /// Creates an empty store over `backend`, using the default key.
    ///
    /// Call [`load`](Self::load) before first use to restore saved items.
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self::with_storage_key(backend, FAVORITES_STORAGE_KEY)
    }

    /// Creates an empty store that persists under `storage_key`.
    pub fn with_storage_key(backend: Arc<dyn KeyValueBackend>, storage_key: impl Into<String>) -> Self {
        FavoriteStore {
            backend,
            storage_key: storage_key.into(),
            state: RwLock::new(FavoriteCollection::new()),
            write_lane: Mutex::new(()),
            persist_failures: AtomicU64::new(0),
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    // -------------------------------------------------------------------------
    // Hydration
    // -------------------------------------------------------------------------

    /// Hydrates the in-memory collection from the backend.
    ///
    /// Never fails: a missing blob gives an empty store, and an unreadable
    /// blob or backend error gives an empty store plus a warning.
    ///
    /// Items added while the read was in flight are kept, after the stored
    /// ones, and the merged collection is written back.
    pub async fn load(&self) -> LoadOutcome {
        let _lane = self.write_lane.lock().await;

        let (collection, outcome) = match self.backend.get(&self.storage_key).await {
            Ok(None) => {
                debug!(key = %self.storage_key, "No stored favorites");
                (FavoriteCollection::new(), LoadOutcome::Empty)
            }
            Ok(Some(blob)) => match serde_json::from_str::<FavoriteCollection>(&blob) {
                Ok(collection) => {
                    let count = collection.len();
                    info!(key = %self.storage_key, count, "Favorites restored");
                    (collection, LoadOutcome::Restored(count))
                }
                Err(e) => {
                    warn!(
                        key = %self.storage_key,
                        error = %e,
                        "Stored favorites unreadable, starting empty"
                    );
                    (FavoriteCollection::new(), LoadOutcome::Recovered)
                }
            },
            Err(e) => {
                warn!(
                    key = %self.storage_key,
                    error = %e,
                    "Favorites backend read failed, starting empty"
                );
                (FavoriteCollection::new(), LoadOutcome::Recovered)
            }
        };

        let appended = {
            let mut state = self.write();
            let mut merged = collection;
            let mut appended = 0;
            for item in state.items() {
                if merged.insert(item.clone()) {
                    appended += 1;
                }
            }
            *state = merged;
            appended
        };

        if appended > 0 {
            debug!(count = appended, "Kept favorites added during load");
            self.write_snapshot().await;
        }

        outcome
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Favorites a catalog entry, stamping `addedAt` with the current time.
    ///
    /// A repeated id is a no-op: the existing item keeps its place and
    /// timestamp, and nothing is written.
    ///
    /// ## Errors
    /// Only input validation (blank id/name/category, bad rating). Backend
    /// failures are absorbed.
    pub async fn add(&self, input: FavoriteItemInput) -> Result<AddOutcome, ValidationError> {
        validate_favorite_input(&input)?;

        let item = FavoriteItem::from_input(input, Utc::now().timestamp_millis());
        let id = item.id().to_string();

        let inserted = self.write().insert(item);
        if !inserted {
            debug!(id = %id, "Already a favorite");
            return Ok(AddOutcome::AlreadyFavorite);
        }

        debug!(id = %id, "Favorite added");
        self.persist().await;
        Ok(AddOutcome::Added)
    }

    /// Removes the favorite with `id`. Returns whether anything was removed.
    pub async fn remove(&self, id: &str) -> bool {
        let removed = self.write().remove(id).is_some();
        if !removed {
            return false;
        }

        debug!(id = %id, "Favorite removed");
        self.persist().await;
        true
    }

    /// The heart button: adds `input` if absent, removes it if present.
    ///
    /// Returns the new membership (`true` = now a favorite).
    pub async fn toggle(&self, input: FavoriteItemInput) -> Result<bool, ValidationError> {
        if self.remove(&input.id).await {
            return Ok(false);
        }
        self.add(input).await?;
        Ok(true)
    }

    /// Removes every favorite. Always writes, so the mirror is empty even
    /// if it had drifted.
    pub async fn clear_all(&self) {
        let previous = {
            let mut state = self.write();
            let n = state.len();
            state.clear();
            n
        };

        info!(count = previous, "Favorites cleared");
        self.persist().await;
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn is_favorite(&self, id: &str) -> bool {
        self.read().contains(id)
    }

    /// Favorites tagged with `category`, in collection order.
    pub fn by_category(&self, category: &str) -> Vec<FavoriteItem> {
        self.read().by_category(category)
    }

    /// Copy of the whole collection, oldest first, for rendering.
    pub fn snapshot(&self) -> Vec<FavoriteItem> {
        self.read().items().to_vec()
    }

    pub fn get(&self, id: &str) -> Option<FavoriteItem> {
        self.read().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Distinct categories in first-favorited order.
    pub fn categories(&self) -> Vec<String> {
        self.read().categories()
    }

    pub fn count_by_category(&self) -> Vec<(String, usize)> {
        self.read().count_by_category()
    }

    /// Number of durable writes that failed since the store was created.
    pub fn persist_failures(&self) -> u64 {
        self.persist_failures.load(Ordering::Relaxed)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Writes the current collection to the backend.
    ///
    /// Waits for any write already in flight, then serializes whatever the
    /// collection holds at that moment.
    async fn persist(&self) {
        let _lane = self.write_lane.lock().await;
        self.write_snapshot().await;
    }

    /// Serializes and stores the current collection. Caller holds the lane.
    async fn write_snapshot(&self) {
        // Guard must be released before the await below
        let encoded = {
            let state = self.read();
            serde_json::to_string(&*state).map(|blob| (blob, state.len()))
        };

        let (blob, count) = match encoded {
            Ok(v) => v,
            Err(e) => {
                self.persist_failures.fetch_add(1, Ordering::Relaxed);
                error!(key = %self.storage_key, error = %e, "Failed to encode favorites");
                return;
            }
        };

        match self.backend.set(&self.storage_key, &blob).await {
            Ok(()) => debug!(key = %self.storage_key, count, "Favorites persisted"),
            Err(e) => {
                self.persist_failures.fetch_add(1, Ordering::Relaxed);
                warn!(
                    key = %self.storage_key,
                    error = %e,
                    "Failed to persist favorites, keeping in-memory state"
                );
            }
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, FavoriteCollection> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, FavoriteCollection> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
