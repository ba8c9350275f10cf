//! Cache store trait definition

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use super::entry::CacheEntry;
use super::key::CacheKey;

/// Predicate selecting keys to drop
pub type KeyPredicate<'a> = &'a (dyn Fn(&CacheKey) -> bool + Send + Sync);

/// Snapshot store holding the latest entry per key.
///
/// Entries are shared immutable values: `put` swaps in a new `Arc` and readers holding the
/// previous one keep a complete, consistent snapshot. Implementations never perform I/O.
#[async_trait]
pub trait CacheStore: Send + Sync + Debug {
    /// Current entry for a key, if one was ever written
    async fn get(&self, key: &CacheKey) -> Option<Arc<CacheEntry>>;

    /// Replaces whatever is stored under the entry's key
    async fn put(&self, entry: CacheEntry) -> Arc<CacheEntry>;

    /// Removes every key matching the predicate and returns how many were removed
    async fn purge_stale(&self, predicate: KeyPredicate<'_>) -> usize;

    /// Keys currently stored
    async fn keys(&self) -> Vec<CacheKey>;

    /// Number of stored entries
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
