//! Producer trait - one step of a fallback chain

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

/// Something that can yield a list of records for a chain step.
///
/// An `Ok` with an empty list and an `Err` are treated alike by the chain: both mean
/// "try the next step".
#[async_trait]
pub trait Producer<T: Send>: Send + Sync + Debug {
    /// Name reported in chain outcomes and logs
    fn name(&self) -> &str;

    async fn produce(&self) -> Result<Vec<T>, DomainError>;
}
