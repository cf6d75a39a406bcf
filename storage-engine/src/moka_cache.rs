use crate::entry_store::{EntryStore, StoredEntry};
use async_trait::async_trait;
use moka::future::Cache;
use std::fmt::Debug;
use std::time::Duration;

/// Moka-backed entry store.
/// Bounded by entry count (TinyLFU admission) with an optional retention window
/// after which moka sweeps the entry regardless of freshness checks done by callers.
pub struct MokaEntryStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    cache: Cache<String, StoredEntry<V>>,
}

impl<V> MokaEntryStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(name: &str, max_entries: Option<u64>, retention: Option<Duration>) -> Self {
        let mut builder = Cache::builder().name(name);

        if let Some(capacity) = max_entries {
            builder = builder.max_capacity(capacity);
        }

        if let Some(retention) = retention {
            builder = builder.time_to_live(retention);
        }

        Self {
            cache: builder.build(),
        }
    }
}

#[async_trait]
impl<V> EntryStore<V> for MokaEntryStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Option<StoredEntry<V>> {
        // None when absent or past the retention window
        self.cache.get(key).await
    }

    async fn put(&self, key: String, entry: StoredEntry<V>) {
        self.cache.insert(key, entry).await;
    }

    fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

impl<V> Debug for MokaEntryStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaEntryStore")
            .field("name", &self.cache.name())
            .field("entry_count", &self.cache.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_put_and_get() {
        let store = MokaEntryStore::new("test", None, None);

        store.put("hello".to_string(), StoredEntry::new("world", 10)).await;

        let entry = store.get("hello").await.unwrap();
        assert_eq!(entry.value, "world");
        assert_eq!(entry.stored_at_ms, 10);
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let store: MokaEntryStore<&str> = MokaEntryStore::new("test", None, None);
        assert!(store.get("nonexistent").await.is_none());
    }

    #[tokio::test]
    async fn test_overwrite_replaces_value_and_timestamp() {
        let store = MokaEntryStore::new("test", None, None);

        store.put("key".to_string(), StoredEntry::new("value1", 1)).await;
        store.put("key".to_string(), StoredEntry::new("value2", 2)).await;

        let entry = store.get("key").await.unwrap();
        assert_eq!(entry, StoredEntry::new("value2", 2));
    }

    #[tokio::test]
    async fn test_retention_window_sweeps_entries() {
        let store = MokaEntryStore::new("test", None, Some(Duration::from_millis(100)));

        store.put("key".to_string(), StoredEntry::new("value", 0)).await;
        assert!(store.get("key").await.is_some());

        sleep(Duration::from_millis(150)).await;

        assert!(store.get("key").await.is_none());
    }

    #[tokio::test]
    async fn test_bounded_store_evicts() {
        let store = MokaEntryStore::new("bounded", Some(2), None);

        for i in 0..10 {
            store
                .put(format!("key{i}"), StoredEntry::new(i, 0))
                .await;
        }

        // flush pending maintenance so the count is exact
        store.cache.run_pending_tasks().await;

        assert!(store.entry_count() <= 2, "store should hold at most 2 entries");
    }
}
