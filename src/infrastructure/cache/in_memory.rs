//! In-memory snapshot store using moka

use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::domain::cache::{CacheEntry, CacheKey, CacheStore, KeyPredicate};

/// Configuration for the in-memory store
#[derive(Debug, Clone)]
pub struct InMemoryCacheConfig {
    /// Maximum number of entries
    pub max_capacity: u64,
}

impl Default for InMemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 2_000,
        }
    }
}

impl InMemoryCacheConfig {
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }
}

/// Thread-safe snapshot store.
///
/// Values are `Arc<CacheEntry>` so a put only swaps a pointer; readers holding the old entry
/// are unaffected. Entries have no TTL: the refresher replaces them and purges past days.
#[derive(Debug, Clone)]
pub struct InMemoryCacheStore {
    cache: MokaCache<CacheKey, Arc<CacheEntry>>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::with_config(InMemoryCacheConfig::default())
    }

    pub fn with_config(config: InMemoryCacheConfig) -> Self {
        Self {
            cache: MokaCache::builder()
                .max_capacity(config.max_capacity)
                .build(),
        }
    }
}

impl Default for InMemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &CacheKey) -> Option<Arc<CacheEntry>> {
        self.cache.get(key).await
    }

    async fn put(&self, entry: CacheEntry) -> Arc<CacheEntry> {
        let entry = Arc::new(entry);
        self.cache.insert(entry.key().clone(), entry.clone()).await;
        entry
    }

    async fn purge_stale(&self, predicate: KeyPredicate<'_>) -> usize {
        self.cache.run_pending_tasks().await;

        let doomed: Vec<CacheKey> = self
            .cache
            .iter()
            .filter(|(key, _)| predicate(key.as_ref()))
            .map(|(key, _)| key.as_ref().clone())
            .collect();

        for key in &doomed {
            self.cache.invalidate(key).await;
        }

        doomed.len()
    }

    async fn keys(&self) -> Vec<CacheKey> {
        self.cache.run_pending_tasks().await;

        let mut keys: Vec<CacheKey> = self
            .cache
            .iter()
            .map(|(key, _)| key.as_ref().clone())
            .collect();
        keys.sort();
        keys
    }

    async fn len(&self) -> usize {
        self.cache.run_pending_tasks().await;
        self.cache.iter().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    use crate::domain::cache::{CachePayload, SourceStatus};
    use crate::domain::locale::Language;

    fn entry(key: CacheKey, status: SourceStatus) -> CacheEntry {
        CacheEntry::new(key, CachePayload::News(Vec::new()), status, Utc::now())
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = InMemoryCacheStore::new();

        assert!(store.get(&CacheKey::weather("guntur")).await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_put_replaces_wholesale() {
        let store = InMemoryCacheStore::new();
        let key = CacheKey::news(Language::English);

        let first = store.put(entry(key.clone(), SourceStatus::FallbackDefault)).await;
        store.put(entry(key.clone(), SourceStatus::Live)).await;

        let current = store.get(&key).await.unwrap();
        assert_eq!(current.source_status(), SourceStatus::Live);
        // readers holding the previous snapshot keep it intact
        assert_eq!(first.source_status(), SourceStatus::FallbackDefault);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_day_scoped_keys_do_not_leak_across_days() {
        let store = InMemoryCacheStore::new();

        store
            .put(entry(CacheKey::market_prices("vijayawada", day(19)), SourceStatus::Live))
            .await;

        assert!(store
            .get(&CacheKey::market_prices("vijayawada", day(20)))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_purge_stale() {
        let store = InMemoryCacheStore::new();

        store
            .put(entry(CacheKey::market_prices("guntur", day(18)), SourceStatus::Live))
            .await;
        store
            .put(entry(CacheKey::market_prices("guntur", day(19)), SourceStatus::Live))
            .await;
        store
            .put(entry(CacheKey::weather("guntur"), SourceStatus::Live))
            .await;

        let today = day(19);
        let purged = store.purge_stale(&|key: &CacheKey| key.is_outdated(today)).await;

        assert_eq!(purged, 1);
        assert_eq!(
            store.keys().await,
            vec![
                CacheKey::market_prices("guntur", day(19)),
                CacheKey::weather("guntur"),
            ]
        );
    }
}
