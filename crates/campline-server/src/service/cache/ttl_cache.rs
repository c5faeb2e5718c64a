//! Generic keyed cache with a wall-clock TTL.
//!
//! # Consistency contract
//!
//! Readers may observe content that is stale by up to the configured TTL
//! after a write, unless the writer calls [`TtlCache::invalidate`] for the
//! affected key. Mutating routes are expected to invalidate; background
//! drift is bounded by the TTL.
//!
//! Concurrent readers that miss on the same key will each perform the
//! underlying load and race to insert. That duplicates idempotent reads and
//! is accepted; there is deliberately no single-flight machinery here.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

/// Tracing target for cache operations.
const TRACING_TARGET: &str = "campline_server::service::cache";

/// A cached value and the instant it was stored.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// Keyed in-memory cache where entries expire after a fixed TTL.
///
/// Cloning is cheap; all clones share the same storage. Entries are dropped
/// lazily: an expired entry is removed when a reader finds it dead or when a
/// writer replaces it.
#[derive(Debug, Clone)]
pub struct TtlCache<K, V> {
    entries: Arc<RwLock<HashMap<K, CacheEntry<V>>>>,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    /// Creates a cache whose entries expire `ttl` after insertion.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Returns the configured TTL.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the live value for a key, if any.
    ///
    /// An expired entry counts as a miss and is removed on the way out.
    pub async fn get(&self, key: &K) -> Option<V> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // The entry exists but is expired; drop it under the write lock.
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key)
            && entry.stored_at.elapsed() >= self.ttl
        {
            entries.remove(key);
        }
        None
    }

    /// Stores a value for a key, replacing any previous entry.
    pub async fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key,
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drops the entry for a key, if present.
    ///
    /// Mutating routes call this so readers see their write immediately
    /// instead of up to TTL later.
    pub async fn invalidate(&self, key: &K) {
        let removed = self.entries.write().await.remove(key).is_some();
        if removed {
            tracing::debug!(
                target: TRACING_TARGET,
                "cache entry invalidated"
            );
        }
    }

    /// Drops every entry.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Returns the number of stored entries, live or expired.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns whether the cache holds no entries at all.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_returns_inserted_value() {
        let cache: TtlCache<u32, String> = TtlCache::new(Duration::from_secs(60));
        cache.insert(1, "roster".to_owned()).await;

        assert_eq!(cache.get(&1).await.as_deref(), Some("roster"));
        assert_eq!(cache.get(&2).await, None);
    }

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let cache: TtlCache<u32, String> = TtlCache::new(Duration::from_millis(10));
        cache.insert(1, "roster".to_owned()).await;

        tokio::time::sleep(Duration::from_millis(25)).await;

        assert_eq!(cache.get(&1).await, None);
        // Expired entry was removed by the miss
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn invalidate_takes_effect_before_ttl() {
        let cache: TtlCache<u32, String> = TtlCache::new(Duration::from_secs(60));
        cache.insert(1, "stale".to_owned()).await;

        cache.invalidate(&1).await;
        assert_eq!(cache.get(&1).await, None);
    }

    #[tokio::test]
    async fn insert_replaces_previous_entry() {
        let cache: TtlCache<u32, String> = TtlCache::new(Duration::from_secs(60));
        cache.insert(1, "old".to_owned()).await;
        cache.insert(1, "new".to_owned()).await;

        assert_eq!(cache.get(&1).await.as_deref(), Some("new"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let cache: TtlCache<u32, u32> = TtlCache::new(Duration::from_secs(60));
        cache.insert(1, 10).await;
        cache.insert(2, 20).await;

        cache.clear().await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn clones_share_storage() {
        let cache: TtlCache<u32, u32> = TtlCache::new(Duration::from_secs(60));
        let clone = cache.clone();

        cache.insert(7, 42).await;
        assert_eq!(clone.get(&7).await, Some(42));

        clone.invalidate(&7).await;
        assert_eq!(cache.get(&7).await, None);
    }
}
