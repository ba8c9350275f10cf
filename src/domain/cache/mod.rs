//! Cache domain - keys, snapshots and the store abstraction

mod entry;
mod key;
mod repository;

pub use entry::{CacheEntry, CachePayload, SourceStatus};
pub use key::{CacheKey, DataKind};
pub use repository::{CacheStore, KeyPredicate};
