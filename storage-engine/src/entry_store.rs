use async_trait::async_trait;
use shared::TtlMs;

/// A value together with the time it was stored.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredEntry<V> {
    pub value: V,
    pub stored_at_ms: u64,
}

impl<V> StoredEntry<V> {
    pub fn new(value: V, stored_at_ms: u64) -> Self {
        Self {
            value,
            stored_at_ms,
        }
    }

    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.stored_at_ms)
    }

    /// Fresh while `now - stored_at < ttl`.
    pub fn is_fresh(&self, now_ms: u64, ttl: TtlMs) -> bool {
        self.age_ms(now_ms) < ttl.0
    }
}

/// Port for the keyed store behind a memoized client
#[async_trait]
pub trait EntryStore<V>: Send + Sync + 'static {
    async fn get(&self, key: &str) -> Option<StoredEntry<V>>;
    async fn put(&self, key: String, entry: StoredEntry<V>);
    fn entry_count(&self) -> u64;
}
