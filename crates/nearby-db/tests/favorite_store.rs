//! End-to-end behaviour of `FavoriteStore` over each backend.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use nearby_core::{FavoriteCollection, FavoriteItemInput, FAVORITES_STORAGE_KEY};
use nearby_db::{
    AddOutcome, Database, DbConfig, DbError, DbResult, FavoriteStore, KeyValueBackend,
    LoadOutcome, MemoryBackend,
};

// =============================================================================
// Fakes
// =============================================================================

/// Backend whose reads and writes can be switched to fail.
#[derive(Default)]
struct FlakyBackend {
    inner: MemoryBackend,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

#[async_trait]
impl KeyValueBackend for FlakyBackend {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable("read refused".into()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable("disk full".into()));
        }
        self.inner.set(key, value).await
    }
}

/// Backend that takes a while to write and records every blob in order.
#[derive(Default)]
struct SlowRecordingBackend {
    writes: Mutex<Vec<String>>,
}

impl SlowRecordingBackend {
    fn last_write(&self) -> Option<FavoriteCollection> {
        let writes = self.writes.lock().unwrap();
        writes.last().map(|b| serde_json::from_str(b).unwrap())
    }
}

#[async_trait]
impl KeyValueBackend for SlowRecordingBackend {
    async fn get(&self, _key: &str) -> DbResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, value: &str) -> DbResult<()> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.writes.lock().unwrap().push(value.to_string());
        Ok(())
    }
}

/// Backend whose reads take a while, over a shared memory map.
struct SlowReadBackend {
    inner: MemoryBackend,
}

#[async_trait]
impl KeyValueBackend for SlowReadBackend {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        self.inner.set(key, value).await
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn input(id: &str, category: &str) -> FavoriteItemInput {
    FavoriteItemInput::new(id, format!("Place {}", id), category)
}

fn ids(store: &FavoriteStore) -> Vec<String> {
    store.snapshot().iter().map(|i| i.id().to_string()).collect()
}

async fn persisted(backend: &MemoryBackend) -> FavoriteCollection {
    let blob = backend
        .get(FAVORITES_STORAGE_KEY)
        .await
        .unwrap()
        .expect("favorites blob written");
    serde_json::from_str(&blob).unwrap()
}

// =============================================================================
// Collection properties
// =============================================================================

#[tokio::test]
async fn test_repeated_adds_keep_one_item_per_id() {
    let backend = MemoryBackend::new();
    let store = FavoriteStore::new(Arc::new(backend.clone()));

    for id in ["a", "b", "a", "c", "b", "a"] {
        store.add(input(id, "Food")).await.unwrap();
    }

    assert_eq!(ids(&store), vec!["a", "b", "c"]);
    assert_eq!(persisted(&backend).await.len(), 3);
}

#[tokio::test]
async fn test_readded_item_moves_to_end() {
    let store = FavoriteStore::new(Arc::new(MemoryBackend::new()));
    store.add(input("a", "Food")).await.unwrap();
    store.add(input("b", "Food")).await.unwrap();
    store.add(input("c", "Food")).await.unwrap();

    assert!(store.remove("a").await);
    store.add(input("a", "Food")).await.unwrap();

    assert_eq!(ids(&store), vec!["b", "c", "a"]);
}

#[tokio::test]
async fn test_by_category_scopes_exactly() {
    let store = FavoriteStore::new(Arc::new(MemoryBackend::new()));
    store.add(input("a", "Food")).await.unwrap();
    store.add(input("b", "Healthcare")).await.unwrap();

    let food = store.by_category("Food");
    assert_eq!(food.len(), 1);
    assert_eq!(food[0].id(), "a");
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_cold_start_restores_identical_collection() {
    let backend = MemoryBackend::new();
    let first = FavoriteStore::new(Arc::new(backend.clone()));
    first.load().await;
    first
        .add(input("a", "Food").price("Rs 450").rating(4.5))
        .await
        .unwrap();
    first.add(input("b", "Healthcare").phone("051-1234567")).await.unwrap();
    first.add(input("c", "Home Services")).await.unwrap();
    let before = first.snapshot();
    drop(first);

    let second = FavoriteStore::new(Arc::new(backend));
    assert_eq!(second.load().await, LoadOutcome::Restored(3));
    assert_eq!(second.snapshot(), before);
}

#[tokio::test]
async fn test_clear_all_empties_memory_and_mirror() {
    let backend = MemoryBackend::new();
    let store = FavoriteStore::new(Arc::new(backend.clone()));
    store.add(input("a", "Food")).await.unwrap();
    store.add(input("b", "Healthcare")).await.unwrap();

    store.clear_all().await;

    assert!(!store.is_favorite("a"));
    assert!(!store.is_favorite("b"));
    assert!(persisted(&backend).await.is_empty());
}

#[tokio::test]
async fn test_clear_all_on_empty_store_still_writes() {
    let backend = MemoryBackend::new();
    let store = FavoriteStore::new(Arc::new(backend.clone()));

    store.clear_all().await;

    assert!(persisted(&backend).await.is_empty());
}

#[tokio::test]
async fn test_remove_absent_changes_nothing() {
    let backend = MemoryBackend::new();
    let store = FavoriteStore::new(Arc::new(backend.clone()));
    store.add(input("a", "Food")).await.unwrap();
    let blob_before = backend.get(FAVORITES_STORAGE_KEY).await.unwrap();

    assert!(!store.remove("nonexistent").await);

    assert_eq!(ids(&store), vec!["a"]);
    assert_eq!(backend.get(FAVORITES_STORAGE_KEY).await.unwrap(), blob_before);
}

#[tokio::test]
async fn test_duplicate_add_reports_already_favorite() {
    let store = FavoriteStore::new(Arc::new(MemoryBackend::new()));
    assert_eq!(store.add(input("a", "Food")).await.unwrap(), AddOutcome::Added);
    assert_eq!(
        store.add(input("a", "Food")).await.unwrap(),
        AddOutcome::AlreadyFavorite
    );
}

// =============================================================================
// Degraded backends
// =============================================================================

#[tokio::test]
async fn test_corrupt_blob_loads_empty() {
    let backend = MemoryBackend::with_entries([(FAVORITES_STORAGE_KEY, "{not json")]);
    let store = FavoriteStore::new(Arc::new(backend.clone()));

    assert_eq!(store.load().await, LoadOutcome::Recovered);
    assert!(store.is_empty());

    // The next mutation replaces the unreadable blob
    store.add(input("a", "Food")).await.unwrap();
    assert_eq!(persisted(&backend).await.len(), 1);
}

#[tokio::test]
async fn test_incompatible_schema_loads_empty() {
    let backend =
        MemoryBackend::with_entries([(FAVORITES_STORAGE_KEY, r#"{"version":2,"items":[]}"#)]);
    let store = FavoriteStore::new(Arc::new(backend));

    assert_eq!(store.load().await, LoadOutcome::Recovered);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_failed_read_loads_empty() {
    let backend = Arc::new(FlakyBackend::default());
    backend.fail_reads.store(true, Ordering::SeqCst);
    let store = FavoriteStore::new(backend);

    assert_eq!(store.load().await, LoadOutcome::Recovered);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_failed_writes_keep_memory_authoritative() {
    let backend = Arc::new(FlakyBackend::default());
    backend.fail_writes.store(true, Ordering::SeqCst);
    let store = FavoriteStore::new(backend.clone());

    store.add(input("a", "Food")).await.unwrap();
    store.add(input("b", "Food")).await.unwrap();
    assert!(store.remove("a").await);

    assert_eq!(ids(&store), vec!["b"]);
    assert_eq!(store.persist_failures(), 3);

    // Backend recovers: the next write carries the full current state
    backend.fail_writes.store(false, Ordering::SeqCst);
    store.add(input("c", "Food")).await.unwrap();

    let blob = backend.get(FAVORITES_STORAGE_KEY).await.unwrap().unwrap();
    let mirror: FavoriteCollection = serde_json::from_str(&blob).unwrap();
    assert!(mirror.contains("b"));
    assert!(mirror.contains("c"));
    assert!(!mirror.contains("a"));
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_back_to_back_mutations_persist_union() {
    let backend = Arc::new(SlowRecordingBackend::default());
    let store = FavoriteStore::new(backend.clone());

    let (a, b) = tokio::join!(
        store.add(input("a", "Food")),
        store.add(input("b", "Healthcare"))
    );
    a.unwrap();
    b.unwrap();

    let last = backend.last_write().unwrap();
    assert!(last.contains("a"));
    assert!(last.contains("b"));
}

#[tokio::test(start_paused = true)]
async fn test_mutations_visible_before_write_finishes() {
    let backend = Arc::new(SlowRecordingBackend::default());
    let store = Arc::new(FavoriteStore::new(backend.clone()));

    let writer = {
        let store = Arc::clone(&store);
        tokio::spawn(async move { store.add(input("a", "Food")).await })
    };

    // Let the add reach the slow write
    tokio::task::yield_now().await;
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(store.is_favorite("a"));
    assert!(backend.last_write().is_none());

    writer.await.unwrap().unwrap();
    assert!(backend.last_write().unwrap().contains("a"));
}

#[tokio::test(start_paused = true)]
async fn test_add_during_load_survives() {
    let stored = serde_json::to_string(&FavoriteCollection::from_items([
        nearby_core::FavoriteItem::from_input(input("x", "Food"), 1),
    ]))
    .unwrap();
    let memory = MemoryBackend::with_entries([(FAVORITES_STORAGE_KEY, stored)]);
    let store = FavoriteStore::new(Arc::new(SlowReadBackend {
        inner: memory.clone(),
    }));

    let (loaded, added) = tokio::join!(store.load(), async {
        // Land in the middle of the slow read
        tokio::time::sleep(Duration::from_millis(10)).await;
        store.add(input("a", "Healthcare")).await
    });

    assert_eq!(loaded, LoadOutcome::Restored(1));
    assert_eq!(added.unwrap(), AddOutcome::Added);
    assert_eq!(ids(&store), vec!["x", "a"]);

    let mirror = persisted(&memory).await;
    assert!(mirror.contains("x"));
    assert!(mirror.contains("a"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_adds_from_many_tasks() {
    let backend = MemoryBackend::new();
    let store = Arc::new(FavoriteStore::new(Arc::new(backend.clone())));

    let handles: Vec<_> = (0..20)
        .map(|n| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.add(input(&format!("p{}", n), "Food")).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.len(), 20);
    assert_eq!(persisted(&backend).await.len(), 20);
}

// =============================================================================
// SQLite
// =============================================================================

#[tokio::test]
async fn test_store_over_in_memory_sqlite() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let store = FavoriteStore::new(Arc::new(db.key_value()));
    assert_eq!(store.load().await, LoadOutcome::Empty);

    store.add(input("a", "Food")).await.unwrap();
    store.add(input("b", "Healthcare")).await.unwrap();
    store.remove("a").await;

    let reloaded = FavoriteStore::new(Arc::new(db.key_value()));
    assert_eq!(reloaded.load().await, LoadOutcome::Restored(1));
    assert_eq!(ids(&reloaded), vec!["b"]);
}

#[tokio::test]
async fn test_cold_start_from_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nearby.db");

    let before = {
        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        let store = FavoriteStore::new(Arc::new(db.key_value()));
        store.load().await;
        store.add(input("a", "Food").rating(4.2)).await.unwrap();
        store.add(input("b", "Construction")).await.unwrap();
        let snapshot = store.snapshot();
        db.close().await;
        snapshot
    };

    let db = Database::new(DbConfig::new(&path)).await.unwrap();
    let store = FavoriteStore::new(Arc::new(db.key_value()));
    assert_eq!(store.load().await, LoadOutcome::Restored(2));
    assert_eq!(store.snapshot(), before);
    db.close().await;
}

#[tokio::test]
async fn test_closed_database_degrades_to_memory() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let store = FavoriteStore::new(Arc::new(db.key_value()));
    db.close().await;

    store.add(input("a", "Food")).await.unwrap();

    assert!(store.is_favorite("a"));
    assert_eq!(store.persist_failures(), 1);
}
