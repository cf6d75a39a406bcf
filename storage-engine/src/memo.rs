//! Read-through memoization of upstream calls.
//!
//! A [`Memoized`] client returns the stored value for a key while it is younger
//! than the client's TTL and otherwise runs the supplied upstream call, storing
//! the result only when the call succeeds. Failed calls never touch the store.
//! Concurrent misses on the same key are coalesced: one caller runs its call
//! while the others wait and then re-read the store.

use crate::entry_store::{EntryStore, StoredEntry};
use dashmap::DashMap;
use shared::{Clock, TtlMs};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

pub struct Memoized<V>
where
    V: Clone + Send + Sync + 'static,
{
    name: String,
    store: Arc<dyn EntryStore<V>>,
    ttl: TtlMs,
    clock: Arc<dyn Clock>,
    in_flight: DashMap<String, Arc<Mutex<()>>>,
}

impl<V> Memoized<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(
        name: impl Into<String>,
        store: Arc<dyn EntryStore<V>>,
        ttl: TtlMs,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            name: name.into(),
            store,
            ttl,
            clock,
            in_flight: DashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stored value for `key` if it is still fresh. Never calls upstream.
    pub async fn peek(&self, key: &str) -> Option<V> {
        let entry = self.store.get(key).await?;
        entry
            .is_fresh(self.clock.now_ms(), self.ttl)
            .then_some(entry.value)
    }

    /// Return the fresh value for `key`, or run `upstream` and store what it returns.
    ///
    /// Errors from `upstream` are returned unchanged and leave any stored entry as it was.
    pub async fn fetch<F, Fut, E>(&self, key: &str, upstream: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.peek(key).await {
            debug!(cache = %self.name, key, "memo hit");
            return Ok(value);
        }

        let gate = {
            let slot = self.in_flight.entry(key.to_string()).or_default();
            Arc::clone(slot.value())
        };

        let outcome = {
            let _guard = gate.lock().await;

            // another caller may have stored a value while we waited
            if let Some(value) = self.peek(key).await {
                debug!(cache = %self.name, key, "memo hit after wait");
                Ok(value)
            } else {
                debug!(cache = %self.name, key, "memo miss, calling upstream");
                match upstream().await {
                    Ok(value) => {
                        let entry = StoredEntry::new(value.clone(), self.clock.now_ms());
                        self.store.put(key.to_string(), entry).await;
                        debug!(
                            cache = %self.name,
                            key,
                            entries = self.store.entry_count(),
                            "memo stored"
                        );
                        Ok(value)
                    }
                    Err(err) => Err(err),
                }
            }
        };

        drop(gate);
        self.in_flight
            .remove_if(key, |_, gate| Arc::strong_count(gate) == 1);

        outcome
    }

}

impl<V> std::fmt::Debug for Memoized<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memoized")
            .field("name", &self.name)
            .field("ttl_ms", &self.ttl.0)
            .field("in_flight", &self.in_flight.len())
            .finish()
    }
}
