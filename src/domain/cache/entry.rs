//! Cached snapshots

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::key::CacheKey;
use crate::domain::facility::LocatedPoi;
use crate::domain::market::PricePoint;
use crate::domain::news::Item;
use crate::domain::weather::WeatherReport;

/// Where the data in an entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceStatus {
    /// Produced by an upstream source in the most recent attempt
    Live,
    /// An earlier live payload kept because the latest attempt produced nothing
    Stale,
    /// The static default of the fallback chain
    FallbackDefault,
}

impl SourceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceStatus::Live => "live",
            SourceStatus::Stale => "stale",
            SourceStatus::FallbackDefault => "fallback-default",
        }
    }
}

/// Typed payload per data kind
#[derive(Debug, Clone, PartialEq)]
pub enum CachePayload {
    News(Vec<Item>),
    MarketPrices(Vec<PricePoint>),
    Weather(WeatherReport),
    Facilities(Vec<LocatedPoi>),
}

impl CachePayload {
    /// Number of records carried
    pub fn len(&self) -> usize {
        match self {
            CachePayload::News(items) => items.len(),
            CachePayload::MarketPrices(prices) => prices.len(),
            CachePayload::Weather(_) => 1,
            CachePayload::Facilities(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Immutable snapshot stored under one key. Replaced wholesale, never edited.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    key: CacheKey,
    payload: CachePayload,
    generated_at: DateTime<Utc>,
    source_status: SourceStatus,
}

impl CacheEntry {
    pub fn new(
        key: CacheKey,
        payload: CachePayload,
        source_status: SourceStatus,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            key,
            payload,
            generated_at,
            source_status,
        }
    }

    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    pub fn payload(&self) -> &CachePayload {
        &self.payload
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn source_status(&self) -> SourceStatus {
        self.source_status
    }

    /// Whether this entry carries upstream data (live or retained) rather than the default
    pub fn has_upstream_data(&self) -> bool {
        self.source_status != SourceStatus::FallbackDefault
    }

    /// A new entry carrying the same payload, re-published as stale
    pub fn to_stale(&self) -> CacheEntry {
        CacheEntry {
            key: self.key.clone(),
            payload: self.payload.clone(),
            generated_at: self.generated_at,
            source_status: SourceStatus::Stale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::locale::Language;

    #[test]
    fn test_source_status_serialization() {
        assert_eq!(
            serde_json::to_string(&SourceStatus::FallbackDefault).unwrap(),
            "\"fallback-default\""
        );
        assert_eq!(SourceStatus::Stale.as_str(), "stale");
    }

    #[test]
    fn test_to_stale_keeps_payload_and_timestamp() {
        let entry = CacheEntry::new(
            CacheKey::news(Language::English),
            CachePayload::News(Vec::new()),
            SourceStatus::Live,
            Utc::now(),
        );

        let stale = entry.to_stale();

        assert_eq!(stale.source_status(), SourceStatus::Stale);
        assert_eq!(stale.payload(), entry.payload());
        assert_eq!(stale.generated_at(), entry.generated_at());
        assert!(stale.has_upstream_data());
    }
}
