//! Database health monitoring with simple caching.
//!
//! Health probes acquire a pooled connection, which is cheap but not free;
//! caching the result keeps the health endpoint from hammering the pool
//! while still detecting failures within the TTL window.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use campline_postgres::PgClient;
use tokio::sync::RwLock;

/// Tracing target for health service operations.
const TRACING_TARGET: &str = "campline_server::service::health";

/// Default cache duration for health checks.
const DEFAULT_CACHE_DURATION: Duration = Duration::from_secs(30);

/// Internal health cache entry with atomic boolean and timestamp.
///
/// The atomic boolean gives lock-free reads of the cached value; the RwLock
/// only guards the expiry timestamp. Eventual consistency is acceptable for
/// health data, so relaxed ordering is enough.
#[derive(Debug)]
struct HealthCacheEntry {
    is_healthy: AtomicBool,
    last_check: RwLock<Instant>,
    cache_duration: Duration,
}

impl HealthCacheEntry {
    fn new(cache_duration: Duration) -> Self {
        Self {
            is_healthy: AtomicBool::new(false),
            last_check: RwLock::new(Instant::now() - cache_duration), // Force initial check
            cache_duration,
        }
    }

    async fn get_or_update<F, Fut>(&self, check_fn: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = bool>,
    {
        let now = Instant::now();
        let last_check = { *self.last_check.read().await };

        // Check if cache is still valid
        if now.duration_since(last_check) < self.cache_duration {
            return self.is_healthy.load(Ordering::Relaxed);
        }

        let healthy = check_fn().await;

        self.is_healthy.store(healthy, Ordering::Relaxed);
        *self.last_check.write().await = now;

        healthy
    }

    fn get_cached(&self) -> bool {
        self.is_healthy.load(Ordering::Relaxed)
    }

    async fn invalidate(&self) {
        *self.last_check.write().await = Instant::now() - self.cache_duration;
    }
}

/// Health monitoring service for the database behind a TTL cache.
///
/// `Clone` shares the underlying cache through `Arc`; all operations are
/// safe to call concurrently.
#[derive(Debug, Clone)]
pub struct HealthCache {
    cache: Arc<HealthCacheEntry>,
}

impl HealthCache {
    /// Creates a health cache with the default 30-second TTL.
    pub fn new() -> Self {
        Self::with_cache_duration(DEFAULT_CACHE_DURATION)
    }

    /// Creates a health cache with a custom TTL.
    pub fn with_cache_duration(cache_duration: Duration) -> Self {
        tracing::info!(
            target: TRACING_TARGET,
            cache_duration_secs = cache_duration.as_secs(),
            "health service initialized"
        );

        Self {
            cache: Arc::new(HealthCacheEntry::new(cache_duration)),
        }
    }

    /// Checks database health, returning the cached value when fresh.
    ///
    /// A successful connection acquisition indicates the database is
    /// reachable and the pool has capacity.
    pub async fn is_healthy(&self, pg_client: &PgClient) -> bool {
        self.cache
            .get_or_update(|| Self::check_database(pg_client))
            .await
    }

    /// Returns the cached health status without performing any checks.
    ///
    /// The value may be stale if the cache has expired but no check has run
    /// since expiration.
    pub fn get_cached_health(&self) -> bool {
        self.cache.get_cached()
    }

    /// Invalidates the cache, forcing a fresh check on the next access.
    pub async fn invalidate(&self) {
        self.cache.invalidate().await;

        tracing::debug!(
            target: TRACING_TARGET,
            "health cache invalidated"
        );
    }

    async fn check_database(pg_client: &PgClient) -> bool {
        match pg_client.get_connection().await {
            Ok(_) => {
                tracing::debug!(target: TRACING_TARGET, "postgres health check passed");
                true
            }
            Err(e) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %e,
                    "postgres health check failed"
                );
                false
            }
        }
    }
}

impl Default for HealthCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_starts_unhealthy() {
        let entry = HealthCacheEntry::new(Duration::from_secs(30));
        assert!(!entry.get_cached());
    }

    #[tokio::test]
    async fn cached_value_survives_within_ttl() {
        let entry = HealthCacheEntry::new(Duration::from_secs(1));

        let result = entry.get_or_update(|| async { true }).await;
        assert!(result);

        // Second immediate call returns the cached value
        let result = entry.get_or_update(|| async { false }).await;
        assert!(result);
    }

    #[tokio::test]
    async fn expiry_triggers_fresh_check() {
        let entry = HealthCacheEntry::new(Duration::from_millis(10));

        let result = entry.get_or_update(|| async { true }).await;
        assert!(result);

        tokio::time::sleep(Duration::from_millis(20)).await;

        let result = entry.get_or_update(|| async { false }).await;
        assert!(!result);
    }

    #[tokio::test]
    async fn invalidation_forces_fresh_check() {
        let entry = HealthCacheEntry::new(Duration::from_secs(60));

        entry.get_or_update(|| async { true }).await;
        assert!(entry.get_cached());

        entry.invalidate().await;

        let result = entry.get_or_update(|| async { false }).await;
        assert!(!result);
    }

    #[tokio::test]
    async fn service_invalidation_is_safe() {
        let service = HealthCache::new();
        service.invalidate().await;
        assert!(!service.get_cached_health());
    }
}
