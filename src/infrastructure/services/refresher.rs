//! Background refresher - keeps every tracked key warm

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::dashboard_service::DashboardService;
use crate::config::RefreshConfig;
use crate::domain::cache::{CacheKey, DataKind};
use crate::domain::{
    KeyOutcome, Language, Location, LocationCatalog, RefreshCycle, RefreshIntervals,
    RefreshSchedule,
};
use crate::infrastructure::observability::{record_refresh_cycle, record_refresh_outcome};

/// Single long-lived task that re-runs the chains of tracked keys.
///
/// Cycles run strictly one after another: work, then sleep one tick. The stop signal is
/// only observed while sleeping, so a cycle in progress always finishes.
#[derive(Debug)]
pub struct Refresher {
    service: Arc<DashboardService>,
    locations: Vec<&'static Location>,
    intervals: RefreshIntervals,
    concurrency: usize,
}

impl Refresher {
    pub fn new(service: Arc<DashboardService>, config: &RefreshConfig) -> Self {
        let mut locations: Vec<&'static Location> = Vec::new();

        for slug in &config.locations {
            match LocationCatalog::find(slug) {
                Some(location) if !locations.contains(&location) => locations.push(location),
                Some(_) => {}
                None => warn!(location = %slug, "Ignoring unknown tracked location"),
            }
        }

        Self {
            service,
            locations,
            intervals: config.intervals(),
            concurrency: config.concurrency.max(1),
        }
    }

    pub fn intervals(&self) -> RefreshIntervals {
        self.intervals
    }

    /// Keys of the given kinds: configured ones plus whatever the store already holds,
    /// with day-scoped keys moved to today
    pub async fn tracked_keys(&self, kinds: &[DataKind]) -> BTreeSet<CacheKey> {
        let today = self.service.clock().today();
        let mut keys = BTreeSet::new();

        for kind in kinds {
            match kind {
                DataKind::News => {
                    keys.extend(Language::ALL.into_iter().map(CacheKey::news));
                }
                DataKind::MarketPrices => {
                    keys.extend(
                        self.locations
                            .iter()
                            .map(|location| CacheKey::market_prices(location.slug, today)),
                    );
                }
                DataKind::Weather => {
                    keys.extend(
                        self.locations
                            .iter()
                            .map(|location| CacheKey::weather(location.slug)),
                    );
                }
                DataKind::Hospitals | DataKind::Pharmacies | DataKind::BloodBanks => {
                    if let Some(facility) = kind.facility_kind() {
                        keys.extend(
                            self.locations
                                .iter()
                                .map(|location| CacheKey::facilities(facility, location.slug)),
                        );
                    }
                }
            }
        }

        for key in self.service.store().keys().await {
            if kinds.contains(&key.kind()) {
                keys.insert(key.for_day(today));
            }
        }

        keys
    }

    /// Refresh every kind once
    pub async fn run_full_cycle(&self) -> RefreshCycle {
        self.run_cycle(&DataKind::ALL).await
    }

    /// Purge past days, then refresh all tracked keys of `kinds` with bounded concurrency
    pub async fn run_cycle(&self, kinds: &[DataKind]) -> RefreshCycle {
        let started = Instant::now();
        let mut cycle = RefreshCycle::start(self.service.clock().now(), kinds.to_vec());

        cycle.set_purged(self.service.purge_outdated().await);

        let keys = self.tracked_keys(kinds).await;
        debug!(keys = keys.len(), ?kinds, "Refresh cycle started");

        let outcomes: Vec<(CacheKey, KeyOutcome)> = stream::iter(keys)
            .map(|key| self.refresh_one(key))
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        for (key, outcome) in outcomes {
            record_refresh_outcome(key.kind(), outcome);
            cycle.record(key, outcome);
        }

        let elapsed = started.elapsed();
        record_refresh_cycle(elapsed, cycle.outcomes().len());

        info!(
            keys = cycle.outcomes().len(),
            success = cycle.count(KeyOutcome::Success),
            empty = cycle.count(KeyOutcome::Empty),
            error = cycle.count(KeyOutcome::Error),
            purged = cycle.purged(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Refresh cycle finished"
        );

        cycle
    }

    async fn refresh_one(&self, key: CacheKey) -> (CacheKey, KeyOutcome) {
        let outcome = self.service.refresh_key(key.clone()).await;
        debug!(key = %key, outcome = outcome.as_str(), "Key refreshed");
        (key, outcome)
    }

    /// Loop until `shutdown` fires or its sender is dropped.
    ///
    /// Expects the warm-up cycle to have run already, so every kind starts as fresh.
    pub async fn run(self: Arc<Self>, mut shutdown: broadcast::Receiver<()>) {
        let tick = self.intervals.tick();
        let mut schedule = RefreshSchedule::new(self.intervals);
        schedule.mark_ran(&DataKind::ALL, Instant::now());

        info!(tick_secs = tick.as_secs(), "Refresher started");

        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    info!("Refresher stopping");
                    break;
                }
                _ = tokio::time::sleep(tick) => {}
            }

            let now = Instant::now();
            let due = schedule.due(now);

            if due.is_empty() {
                continue;
            }

            self.run_cycle(&due).await;
            schedule.mark_ran(&due, now);
        }
    }
}
