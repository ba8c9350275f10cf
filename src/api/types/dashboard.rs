//! Request and response bodies of the dashboard endpoints

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::domain::{
    CacheEntry, CachePayload, CategoryFilter, Item, Language, LocatedPoi, Location, PricePoint,
    SourceStatus, WeatherReport,
};
use crate::infrastructure::services::EntryStatus;

/// `?location=`; unknown or missing values resolve to the default location
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationQuery {
    pub location: Option<String>,
}

/// `?language=&category=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsQuery {
    pub language: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantRequest {
    pub message: String,
    #[serde(default)]
    pub language: Option<String>,
}

fn unexpected_payload(entry: &CacheEntry) -> ApiError {
    ApiError::internal(format!("Snapshot under {} has an unexpected payload", entry.key()))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    pub articles: Vec<Item>,
    pub language: Language,
    pub category: &'static str,
    pub total: usize,
    pub source_status: SourceStatus,
    pub generated_at: DateTime<Utc>,
}

impl NewsResponse {
    /// Applies the category filter to the cached list
    pub fn from_entry(
        entry: &CacheEntry,
        language: Language,
        filter: CategoryFilter,
    ) -> Result<Self, ApiError> {
        let CachePayload::News(items) = entry.payload() else {
            return Err(unexpected_payload(entry));
        };

        let articles: Vec<Item> = items
            .iter()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect();

        Ok(Self {
            total: articles.len(),
            articles,
            language,
            category: filter.as_str(),
            source_status: entry.source_status(),
            generated_at: entry.generated_at(),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketPricesResponse {
    pub location: &'static Location,
    pub prices: Vec<PricePoint>,
    pub date: NaiveDate,
    pub source_status: SourceStatus,
    pub generated_at: DateTime<Utc>,
}

impl MarketPricesResponse {
    pub fn from_entry(entry: &CacheEntry, location: &'static Location) -> Result<Self, ApiError> {
        let CachePayload::MarketPrices(prices) = entry.payload() else {
            return Err(unexpected_payload(entry));
        };

        Ok(Self {
            location,
            prices: prices.clone(),
            date: entry
                .key()
                .day()
                .unwrap_or_else(|| entry.generated_at().date_naive()),
            source_status: entry.source_status(),
            generated_at: entry.generated_at(),
        })
    }
}

/// Either a report or the explicit "not available" marker, both answered with 200
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum WeatherResponse {
    Available(WeatherBody),
    Unavailable(WeatherUnavailable),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherBody {
    pub location: &'static Location,
    pub available: bool,
    #[serde(flatten)]
    pub report: WeatherReport,
    pub source_status: SourceStatus,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct WeatherUnavailable {
    pub location: &'static Location,
    pub available: bool,
    pub error: String,
}

impl WeatherResponse {
    pub fn from_entry(entry: &CacheEntry, location: &'static Location) -> Result<Self, ApiError> {
        let CachePayload::Weather(report) = entry.payload() else {
            return Err(unexpected_payload(entry));
        };

        Ok(Self::Available(WeatherBody {
            location,
            available: true,
            report: report.clone(),
            source_status: entry.source_status(),
            generated_at: entry.generated_at(),
        }))
    }

    pub fn unavailable(location: &'static Location) -> Self {
        Self::Unavailable(WeatherUnavailable {
            location,
            available: false,
            error: format!(
                "Weather data for {} is not available right now. Please try again later.",
                location.name
            ),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilitiesResponse {
    pub location: &'static Location,
    pub items: Vec<LocatedPoi>,
    pub total: usize,
    pub source_status: SourceStatus,
    pub generated_at: DateTime<Utc>,
}

impl FacilitiesResponse {
    pub fn from_entry(entry: &CacheEntry, location: &'static Location) -> Result<Self, ApiError> {
        let CachePayload::Facilities(items) = entry.payload() else {
            return Err(unexpected_payload(entry));
        };

        Ok(Self {
            location,
            total: items.len(),
            items: items.clone(),
            source_status: entry.source_status(),
            generated_at: entry.generated_at(),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationsResponse {
    pub locations: &'static [Location],
    pub default_location: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub entries: Vec<EntryStatus>,
    pub total: usize,
    pub today: NaiveDate,
}
