//! Refresh scheduling and cycle bookkeeping

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::cache::{CacheKey, DataKind};

/// Result of refreshing one key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyOutcome {
    /// Live data written
    Success,
    /// Static default written or previous payload retained as stale
    Empty,
    /// Nothing could be produced
    Error,
}

impl KeyOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyOutcome::Success => "success",
            KeyOutcome::Empty => "empty",
            KeyOutcome::Error => "error",
        }
    }
}

/// Ephemeral record of one refresher iteration
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshCycle {
    started_at: DateTime<Utc>,
    kinds: Vec<DataKind>,
    outcomes: Vec<(CacheKey, KeyOutcome)>,
    purged: usize,
}

impl RefreshCycle {
    pub fn start(started_at: DateTime<Utc>, kinds: Vec<DataKind>) -> Self {
        Self {
            started_at,
            kinds,
            outcomes: Vec::new(),
            purged: 0,
        }
    }

    pub fn record(&mut self, key: CacheKey, outcome: KeyOutcome) {
        self.outcomes.push((key, outcome));
    }

    pub fn set_purged(&mut self, purged: usize) {
        self.purged = purged;
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn kinds(&self) -> &[DataKind] {
        &self.kinds
    }

    pub fn outcomes(&self) -> &[(CacheKey, KeyOutcome)] {
        &self.outcomes
    }

    pub fn purged(&self) -> usize {
        self.purged
    }

    pub fn count(&self, outcome: KeyOutcome) -> usize {
        self.outcomes.iter().filter(|(_, o)| *o == outcome).count()
    }
}

/// Refresh interval per data kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshIntervals {
    pub news: Duration,
    pub weather: Duration,
    pub market_prices: Duration,
    pub facilities: Duration,
}

impl Default for RefreshIntervals {
    fn default() -> Self {
        Self {
            news: Duration::from_secs(60),
            weather: Duration::from_secs(600),
            market_prices: Duration::from_secs(900),
            facilities: Duration::from_secs(6 * 60 * 60),
        }
    }
}

impl RefreshIntervals {
    pub fn for_kind(&self, kind: DataKind) -> Duration {
        match kind {
            DataKind::News => self.news,
            DataKind::Weather => self.weather,
            DataKind::MarketPrices => self.market_prices,
            DataKind::Hospitals | DataKind::Pharmacies | DataKind::BloodBanks => self.facilities,
        }
    }

    /// Wake-up period of the refresher loop: the smallest interval
    pub fn tick(&self) -> Duration {
        DataKind::ALL
            .iter()
            .map(|kind| self.for_kind(*kind))
            .min()
            .unwrap_or(self.news)
    }
}

/// Tracks when each kind last ran and which kinds are due
#[derive(Debug, Clone)]
pub struct RefreshSchedule {
    intervals: RefreshIntervals,
    last_run: HashMap<DataKind, Instant>,
}

impl RefreshSchedule {
    pub fn new(intervals: RefreshIntervals) -> Self {
        Self {
            intervals,
            last_run: HashMap::new(),
        }
    }

    pub fn intervals(&self) -> &RefreshIntervals {
        &self.intervals
    }

    /// Kinds that never ran or whose interval has elapsed at `now`
    pub fn due(&self, now: Instant) -> Vec<DataKind> {
        DataKind::ALL
            .into_iter()
            .filter(|kind| match self.last_run.get(kind) {
                Some(last) => now.saturating_duration_since(*last) >= self.intervals.for_kind(*kind),
                None => true,
            })
            .collect()
    }

    pub fn mark_ran(&mut self, kinds: &[DataKind], at: Instant) {
        for kind in kinds {
            self.last_run.insert(*kind, at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::locale::Language;

    #[test]
    fn test_tick_is_smallest_interval() {
        let intervals = RefreshIntervals::default();
        assert_eq!(intervals.tick(), Duration::from_secs(60));

        let custom = RefreshIntervals {
            weather: Duration::from_secs(5),
            ..RefreshIntervals::default()
        };
        assert_eq!(custom.tick(), Duration::from_secs(5));
    }

    #[test]
    fn test_everything_due_initially() {
        let schedule = RefreshSchedule::new(RefreshIntervals::default());
        assert_eq!(schedule.due(Instant::now()).len(), DataKind::ALL.len());
    }

    #[test]
    fn test_only_elapsed_kinds_are_due() {
        let mut schedule = RefreshSchedule::new(RefreshIntervals::default());
        let start = Instant::now();
        schedule.mark_ran(&DataKind::ALL, start);

        assert!(schedule.due(start).is_empty());
        assert_eq!(schedule.due(start + Duration::from_secs(60)), vec![DataKind::News]);

        let due = schedule.due(start + Duration::from_secs(900));
        assert_eq!(
            due,
            vec![DataKind::News, DataKind::MarketPrices, DataKind::Weather]
        );
    }

    #[test]
    fn test_cycle_counts_outcomes() {
        let mut cycle = RefreshCycle::start(Utc::now(), vec![DataKind::News]);
        cycle.record(CacheKey::news(Language::English), KeyOutcome::Success);
        cycle.record(CacheKey::news(Language::Hindi), KeyOutcome::Empty);
        cycle.record(CacheKey::news(Language::Telugu), KeyOutcome::Success);

        assert_eq!(cycle.count(KeyOutcome::Success), 2);
        assert_eq!(cycle.count(KeyOutcome::Error), 0);
        assert_eq!(cycle.outcomes().len(), 3);
    }
}
