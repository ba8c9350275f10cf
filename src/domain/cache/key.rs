//! Cache key scoping

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::facility::FacilityKind;
use crate::domain::locale::Language;

/// What a cache partition holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataKind {
    News,
    MarketPrices,
    Weather,
    Hospitals,
    Pharmacies,
    BloodBanks,
}

impl DataKind {
    pub const ALL: [DataKind; 6] = [
        DataKind::News,
        DataKind::MarketPrices,
        DataKind::Weather,
        DataKind::Hospitals,
        DataKind::Pharmacies,
        DataKind::BloodBanks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataKind::News => "news",
            DataKind::MarketPrices => "market-prices",
            DataKind::Weather => "weather",
            DataKind::Hospitals => "hospitals",
            DataKind::Pharmacies => "pharmacies",
            DataKind::BloodBanks => "blood-banks",
        }
    }

    pub fn facility_kind(&self) -> Option<FacilityKind> {
        match self {
            DataKind::Hospitals => Some(FacilityKind::Hospital),
            DataKind::Pharmacies => Some(FacilityKind::Pharmacy),
            DataKind::BloodBanks => Some(FacilityKind::BloodBank),
            _ => None,
        }
    }

    /// Whether keys of this kind are scoped by a location slug
    pub fn is_location_scoped(&self) -> bool {
        !matches!(self, DataKind::News)
    }
}

impl From<FacilityKind> for DataKind {
    fn from(kind: FacilityKind) -> Self {
        match kind {
            FacilityKind::Hospital => DataKind::Hospitals,
            FacilityKind::Pharmacy => DataKind::Pharmacies,
            FacilityKind::BloodBank => DataKind::BloodBanks,
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite key: data kind + language or location + calendar day where applicable
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    kind: DataKind,
    scope: String,
    day: Option<NaiveDate>,
}

impl CacheKey {
    pub fn news(language: Language) -> Self {
        Self {
            kind: DataKind::News,
            scope: language.as_str().to_string(),
            day: None,
        }
    }

    pub fn market_prices(location: &str, day: NaiveDate) -> Self {
        Self {
            kind: DataKind::MarketPrices,
            scope: location.to_string(),
            day: Some(day),
        }
    }

    pub fn weather(location: &str) -> Self {
        Self {
            kind: DataKind::Weather,
            scope: location.to_string(),
            day: None,
        }
    }

    pub fn facilities(kind: FacilityKind, location: &str) -> Self {
        Self {
            kind: kind.into(),
            scope: location.to_string(),
            day: None,
        }
    }

    pub fn kind(&self) -> DataKind {
        self.kind
    }

    /// Language name for news keys, location slug for everything else
    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn day(&self) -> Option<NaiveDate> {
        self.day
    }

    /// A day-scoped key belonging to any day other than `today` is stale
    pub fn is_outdated(&self, today: NaiveDate) -> bool {
        self.day.is_some_and(|day| day != today)
    }

    /// The same partition re-targeted at `today`; keys without a day are unchanged
    pub fn for_day(&self, today: NaiveDate) -> Self {
        Self {
            day: self.day.map(|_| today),
            ..self.clone()
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.scope)?;

        if let Some(day) = self.day {
            write!(f, ":{}", day.format("%Y-%m-%d"))?;
        }

        Ok(())
    }
}

impl Serialize for CacheKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn test_display() {
        assert_eq!(CacheKey::news(Language::Hindi).to_string(), "news:hindi");
        assert_eq!(
            CacheKey::market_prices("vijayawada", day(19)).to_string(),
            "market-prices:vijayawada:2026-10-19"
        );
        assert_eq!(
            CacheKey::facilities(FacilityKind::BloodBank, "guntur").to_string(),
            "blood-banks:guntur"
        );
    }

    #[test]
    fn test_day_scoping() {
        let key = CacheKey::market_prices("vijayawada", day(19));

        assert!(!key.is_outdated(day(19)));
        assert!(key.is_outdated(day(20)));
        assert_ne!(key, CacheKey::market_prices("vijayawada", day(20)));
        assert_eq!(key.for_day(day(20)), CacheKey::market_prices("vijayawada", day(20)));
    }

    #[test]
    fn test_undated_keys_never_outdated() {
        let key = CacheKey::weather("guntur");
        assert!(!key.is_outdated(day(1)));
        assert_eq!(key.for_day(day(1)), key);
    }

    #[test]
    fn test_facility_kind_round_trip() {
        for kind in FacilityKind::ALL {
            assert_eq!(DataKind::from(kind).facility_kind(), Some(kind));
        }
        assert_eq!(DataKind::News.facility_kind(), None);
    }
}
