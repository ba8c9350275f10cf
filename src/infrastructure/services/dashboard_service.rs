//! Dashboard service - builds the fallback chain for a cache key and owns the read path

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache as MokaCache;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::SourcesConfig;
use crate::domain::cache::{CacheEntry, CacheKey, CachePayload, CacheStore, DataKind, SourceStatus};
use crate::domain::facility::{helpline_defaults, FacilityKind};
use crate::domain::market::{PriceSimulator, SeedKey};
use crate::domain::news::{offline_bulletin, Categorizer};
use crate::domain::{
    Clock, DomainError, FallbackChain, GeoRanker, KeyOutcome, Language, Location,
    LocationCatalog, SourceAdapter,
};
use crate::infrastructure::http::HttpClientTrait;
use crate::infrastructure::observability::{record_cache_read, record_chain_result};
use crate::infrastructure::sources::{
    NewsFeedGroup, OpenMeteoAdapter, OverpassAdapter, RankedFacilities, RssFeedAdapter,
    SimulatedPrices,
};

/// How long the read path answers "unavailable" for a key without calling upstream again.
/// The refresher keeps retrying on its own schedule.
pub const UNAVAILABLE_RETRY_AFTER: Duration = Duration::from_secs(60);

/// Fresh result for a key, before it meets the store
#[derive(Debug)]
enum Computed {
    Data(CachePayload, SourceStatus),
    /// No upstream answered and the kind has no static default
    Unavailable(String),
}

/// One line of the cache status report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryStatus {
    pub key: CacheKey,
    pub kind: DataKind,
    pub source_status: SourceStatus,
    pub generated_at: DateTime<Utc>,
    pub size: usize,
}

/// Everything a chain needs, shared by the refresher and the read path
#[derive(Debug)]
pub struct DashboardService {
    store: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
    client: Arc<dyn HttpClientTrait>,
    sources: SourcesConfig,
    categorizer: Arc<Categorizer>,
    simulator: PriceSimulator,
    ranker: GeoRanker,
    /// Keys whose last fill found nothing to store
    unavailable: MokaCache<CacheKey, ()>,
}

impl DashboardService {
    pub fn new(
        store: Arc<dyn CacheStore>,
        clock: Arc<dyn Clock>,
        client: Arc<dyn HttpClientTrait>,
        sources: SourcesConfig,
    ) -> Self {
        let ranker = GeoRanker::new(sources.max_facilities);

        Self {
            store,
            clock,
            client,
            sources,
            categorizer: Arc::new(Categorizer::default()),
            simulator: PriceSimulator::default(),
            ranker,
            unavailable: MokaCache::builder()
                .time_to_live(UNAVAILABLE_RETRY_AFTER)
                .build(),
        }
    }

    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    // ---- read path ----

    pub async fn news(&self, language: Language) -> Option<Arc<CacheEntry>> {
        self.read(CacheKey::news(language)).await
    }

    /// Prices for today; past days are purged first
    pub async fn market_prices(&self, location: &Location) -> Option<Arc<CacheEntry>> {
        self.purge_outdated().await;
        self.read(CacheKey::market_prices(location.slug, self.clock.today()))
            .await
    }

    /// `None` when the weather upstream is unreachable and nothing was ever cached
    pub async fn weather(&self, location: &Location) -> Option<Arc<CacheEntry>> {
        self.read(CacheKey::weather(location.slug)).await
    }

    pub async fn facilities(
        &self,
        kind: FacilityKind,
        location: &Location,
    ) -> Option<Arc<CacheEntry>> {
        self.read(CacheKey::facilities(kind, location.slug)).await
    }

    /// Cached entry, or a one-off cold fill when the key was never populated.
    ///
    /// Concurrent misses on one key may each fill it; the last write wins and every
    /// write is a complete chain result. A fill that found nothing is not retried from the
    /// read path for [`UNAVAILABLE_RETRY_AFTER`].
    pub async fn read(&self, key: CacheKey) -> Option<Arc<CacheEntry>> {
        if let Some(entry) = self.store.get(&key).await {
            record_cache_read(key.kind(), true);
            return Some(entry);
        }

        record_cache_read(key.kind(), false);

        if self.unavailable.contains_key(&key) {
            debug!(key = %key, "Recently unavailable, skipping inline fill");
            return None;
        }

        debug!(key = %key, "Cache miss, filling inline");

        self.refresh_key(key.clone()).await;
        self.store.get(&key).await
    }

    /// Drop day-scoped entries of past days
    pub async fn purge_outdated(&self) -> usize {
        let today = self.clock.today();
        let purged = self
            .store
            .purge_stale(&|key: &CacheKey| key.is_outdated(today))
            .await;

        if purged > 0 {
            info!(purged, %today, "Purged outdated entries");
        }

        purged
    }

    pub async fn status(&self) -> Vec<EntryStatus> {
        let mut lines = Vec::new();

        for key in self.store.keys().await {
            if let Some(entry) = self.store.get(&key).await {
                lines.push(EntryStatus {
                    kind: key.kind(),
                    key,
                    source_status: entry.source_status(),
                    generated_at: entry.generated_at(),
                    size: entry.payload().len(),
                });
            }
        }

        lines
    }

    // ---- write path ----

    /// Run the chain for `key` and write the result, keeping upstream data over defaults
    pub async fn refresh_key(&self, key: CacheKey) -> KeyOutcome {
        let computed = match self.compute(&key).await {
            Ok(computed) => computed,
            Err(e) => {
                error!(key = %key, error = %e, "Cannot build chain for key");
                return KeyOutcome::Error;
            }
        };

        let previous = self.store.get(&key).await;
        let now = self.clock.now();

        match computed {
            Computed::Data(payload, SourceStatus::Live) => {
                self.unavailable.invalidate(&key).await;
                self.store
                    .put(CacheEntry::new(key, payload, SourceStatus::Live, now))
                    .await;
                KeyOutcome::Success
            }
            Computed::Data(payload, status) => {
                match previous.filter(|entry| entry.has_upstream_data()) {
                    Some(entry) => {
                        debug!(key = %key, "Keeping previous upstream data as stale");
                        self.store.put(entry.to_stale()).await;
                    }
                    None => {
                        self.store.put(CacheEntry::new(key, payload, status, now)).await;
                    }
                }
                KeyOutcome::Empty
            }
            Computed::Unavailable(reason) => {
                match previous.filter(|entry| entry.has_upstream_data()) {
                    Some(entry) => {
                        debug!(key = %key, reason = %reason, "Upstream unavailable, keeping stale data");
                        self.store.put(entry.to_stale()).await;
                        KeyOutcome::Empty
                    }
                    None => {
                        warn!(key = %key, reason = %reason, "Nothing available for key");
                        self.unavailable.insert(key, ()).await;
                        KeyOutcome::Error
                    }
                }
            }
        }
    }

    async fn compute(&self, key: &CacheKey) -> Result<Computed, DomainError> {
        let computed = match key.kind() {
            DataKind::News => self.compute_news(Language::resolve(key.scope())).await?,
            DataKind::MarketPrices => {
                let location = self.location(key)?;
                let day = key.day().unwrap_or_else(|| self.clock.today());
                let seed = SeedKey::new(day, location.slug, location.price_modifier);
                self.compute_prices(location, seed).await?
            }
            DataKind::Weather => self.compute_weather(self.location(key)?).await,
            DataKind::Hospitals | DataKind::Pharmacies | DataKind::BloodBanks => {
                let kind = key.kind().facility_kind().ok_or_else(|| {
                    DomainError::internal(format!("'{}' is not a facility kind", key.kind()))
                })?;
                self.compute_facilities(kind, self.location(key)?).await?
            }
        };

        if let Computed::Data(_, status) = &computed {
            record_chain_result(key.kind(), *status);
        }

        Ok(computed)
    }

    fn location(&self, key: &CacheKey) -> Result<&'static Location, DomainError> {
        LocationCatalog::find(key.scope())
            .ok_or_else(|| DomainError::validation(format!("Unknown location '{}'", key.scope())))
    }

    fn feed_group(&self, name: &str, language: Language, backup: bool) -> NewsFeedGroup {
        let feeds = if backup {
            &self.sources.backup_feeds
        } else {
            &self.sources.primary_feeds
        };

        let adapters = feeds
            .for_language(language)
            .iter()
            .map(|feed| {
                RssFeedAdapter::new(
                    self.client.clone(),
                    feed.url.clone(),
                    feed.name.clone(),
                    self.sources.items_per_feed,
                    self.sources.request_timeout(),
                )
            })
            .collect();

        NewsFeedGroup::new(
            name,
            adapters,
            self.categorizer.clone(),
            self.sources.max_articles,
        )
    }

    async fn compute_news(&self, language: Language) -> Result<Computed, DomainError> {
        let chain = FallbackChain::new(
            format!("news:{}", language),
            offline_bulletin(language, self.clock.now()),
        )?
        .with_producer(Arc::new(self.feed_group("primary-feeds", language, false)))
        .with_producer(Arc::new(self.feed_group("backup-feeds", language, true)));

        let outcome = chain.run().await;
        Ok(Computed::Data(CachePayload::News(outcome.payload), outcome.status))
    }

    async fn compute_prices(
        &self,
        location: &Location,
        seed: SeedKey,
    ) -> Result<Computed, DomainError> {
        let chain = FallbackChain::new(
            format!("market-prices:{}", location.slug),
            self.simulator.baseline(),
        )?
        .with_producer(Arc::new(SimulatedPrices::new(self.simulator, seed)));

        let outcome = chain.run().await;
        Ok(Computed::Data(
            CachePayload::MarketPrices(outcome.payload),
            outcome.status,
        ))
    }

    async fn compute_weather(&self, location: &Location) -> Computed {
        let adapter = OpenMeteoAdapter::new(
            self.client.clone(),
            self.sources.weather_url.clone(),
            location.coordinates,
            self.sources.forecast_days,
            self.sources.request_timeout(),
        );

        match adapter.fetch().await.into_iter().next() {
            Some(report) => Computed::Data(CachePayload::Weather(report), SourceStatus::Live),
            None => Computed::Unavailable("Weather service unavailable".to_string()),
        }
    }

    async fn compute_facilities(
        &self,
        kind: FacilityKind,
        location: &Location,
    ) -> Result<Computed, DomainError> {
        let adapter = OverpassAdapter::new(
            self.client.clone(),
            self.sources.overpass_url.clone(),
            kind,
            location.coordinates,
            self.sources.facility_radius_m,
            self.sources.overpass_timeout(),
        );

        let chain = FallbackChain::new(
            format!("{}:{}", kind.as_str(), location.slug),
            helpline_defaults(kind, location.coordinates),
        )?
        .with_producer(Arc::new(RankedFacilities::new(adapter, self.ranker)));

        let outcome = chain.run().await;
        Ok(Computed::Data(
            CachePayload::Facilities(outcome.payload),
            outcome.status,
        ))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::NaiveDate;

    use crate::config::{FeedSource, FeedsConfig};
    use crate::domain::clock::mock::ManualClock;
    use crate::infrastructure::cache::InMemoryCacheStore;
    use crate::infrastructure::http::mock::MockHttpClient;

    pub const PRIMARY_FEED: &str = "https://primary.example/rss";
    pub const BACKUP_FEED: &str = "https://backup.example/rss";
    pub const WEATHER_URL: &str = "https://weather.example/v1/forecast";
    pub const OVERPASS_URL: &str = "https://overpass.example/api/interpreter";

    pub fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn feeds(url: &str) -> FeedsConfig {
        let feed = vec![FeedSource {
            name: "Test Feed".to_string(),
            url: url.to_string(),
        }];

        FeedsConfig {
            english: feed.clone(),
            hindi: feed.clone(),
            telugu: feed,
        }
    }

    pub fn sources() -> SourcesConfig {
        SourcesConfig {
            primary_feeds: feeds(PRIMARY_FEED),
            backup_feeds: feeds(BACKUP_FEED),
            weather_url: WEATHER_URL.to_string(),
            overpass_url: OVERPASS_URL.to_string(),
            request_timeout_secs: 1,
            overpass_timeout_secs: 1,
            ..SourcesConfig::default()
        }
    }

    /// Every upstream unreachable
    pub fn offline_client() -> MockHttpClient {
        MockHttpClient::new()
            .with_error(PRIMARY_FEED, "timed out")
            .with_error(BACKUP_FEED, "timed out")
            .with_error(WEATHER_URL, "timed out")
            .with_error(OVERPASS_URL, "timed out")
    }

    pub fn rss(titles: &[&str]) -> String {
        let items: String = titles
            .iter()
            .map(|title| {
                format!(
                    "<item><title>{}</title><link>https://news.example/{}</link></item>",
                    title,
                    title.len()
                )
            })
            .collect();
        format!("<rss><channel>{}</channel></rss>", items)
    }

    pub fn service_with(
        client: MockHttpClient,
        store: Arc<InMemoryCacheStore>,
        clock: Arc<ManualClock>,
    ) -> DashboardService {
        DashboardService::new(store, clock, Arc::new(client), sources())
    }

    pub fn service(client: MockHttpClient) -> DashboardService {
        service_with(
            client,
            Arc::new(InMemoryCacheStore::new()),
            Arc::new(ManualClock::new(day())),
        )
    }
}
