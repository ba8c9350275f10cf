//! Upstream source adapter contract

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::DomainError;

/// Fetches and normalizes one upstream provider.
///
/// Implementors write [`try_fetch`](Self::try_fetch) and may fail in any way; callers use
/// [`fetch`](Self::fetch), which bounds the attempt by [`timeout`](Self::timeout) and turns
/// every failure into an empty list. There is no retry inside a call.
#[async_trait]
pub trait SourceAdapter<T: Send + 'static>: Send + Sync + Debug {
    /// Provider identifier used in logs
    fn provider(&self) -> &str;

    /// Upper bound for a single attempt
    fn timeout(&self) -> Duration;

    async fn try_fetch(&self) -> Result<Vec<T>, DomainError>;

    async fn fetch(&self) -> Vec<T> {
        let limit = self.timeout();

        let result = match tokio::time::timeout(limit, self.try_fetch()).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::timeout(self.provider(), limit.as_secs())),
        };

        match result {
            Ok(records) => {
                debug!(provider = %self.provider(), count = records.len(), "Source fetched");
                records
            }
            Err(e) => {
                warn!(provider = %self.provider(), error = %e, "Source failed, treating as empty");
                Vec::new()
            }
        }
    }
}
