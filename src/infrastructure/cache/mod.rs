//! Cache infrastructure - Snapshot store implementations

mod in_memory;

pub use in_memory::{InMemoryCacheConfig, InMemoryCacheStore};
