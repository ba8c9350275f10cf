use std::time::Duration;

use serde::Deserialize;

use crate::domain::location::DEFAULT_LOCATION;
use crate::domain::refresh::RefreshIntervals;
use crate::domain::Language;
use crate::infrastructure::assistant::{DEFAULT_MODEL, DEFAULT_OPENAI_BASE_URL};
use crate::infrastructure::observability::MetricsConfig;
use crate::infrastructure::sources::{DEFAULT_FORECAST_URL, DEFAULT_INTERPRETER_URL};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
    pub cache: CacheConfig,
    pub refresh: RefreshConfig,
    pub sources: SourcesConfig,
    pub assistant: AssistantConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Upper bound on stored entries
    pub max_entries: u64,
    /// Fixed UTC offset deciding the day rollover; the host's local zone when unset
    pub utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    pub news_interval_secs: u64,
    pub weather_interval_secs: u64,
    pub market_prices_interval_secs: u64,
    pub facilities_interval_secs: u64,
    /// Keys refreshed at once within a cycle
    pub concurrency: usize,
    /// Location slugs kept warm from startup
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

impl FeedSource {
    fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

/// Feed URLs per news language
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct FeedsConfig {
    pub english: Vec<FeedSource>,
    pub hindi: Vec<FeedSource>,
    pub telugu: Vec<FeedSource>,
}

impl FeedsConfig {
    pub fn for_language(&self, language: Language) -> &[FeedSource] {
        match language {
            Language::English => &self.english,
            Language::Hindi => &self.hindi,
            Language::Telugu => &self.telugu,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Bound on a single upstream attempt
    pub request_timeout_secs: u64,
    pub items_per_feed: usize,
    pub max_articles: usize,
    pub primary_feeds: FeedsConfig,
    pub backup_feeds: FeedsConfig,
    pub weather_url: String,
    pub forecast_days: u8,
    pub overpass_url: String,
    pub overpass_timeout_secs: u64,
    pub facility_radius_m: u32,
    pub max_facilities: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Without a key the assistant endpoint answers with `success: false`
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 2_000,
            utc_offset_minutes: None,
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        let intervals = RefreshIntervals::default();

        Self {
            news_interval_secs: intervals.news.as_secs(),
            weather_interval_secs: intervals.weather.as_secs(),
            market_prices_interval_secs: intervals.market_prices.as_secs(),
            facilities_interval_secs: intervals.facilities.as_secs(),
            concurrency: 4,
            locations: vec![
                DEFAULT_LOCATION.to_string(),
                "guntur".to_string(),
                "hyderabad".to_string(),
            ],
        }
    }
}

impl RefreshConfig {
    pub fn intervals(&self) -> RefreshIntervals {
        RefreshIntervals {
            news: Duration::from_secs(self.news_interval_secs.max(1)),
            weather: Duration::from_secs(self.weather_interval_secs.max(1)),
            market_prices: Duration::from_secs(self.market_prices_interval_secs.max(1)),
            facilities: Duration::from_secs(self.facilities_interval_secs.max(1)),
        }
    }
}

fn google_news(query: &str, hl: &str, ceid: &str) -> String {
    format!(
        "https://news.google.com/rss/search?q={}&hl={}&gl=IN&ceid={}",
        query, hl, ceid
    )
}

impl Default for SourcesConfig {
    fn default() -> Self {
        let toi = FeedSource::new(
            "Times of India",
            "https://timesofindia.indiatimes.com/rssfeedstopstories.cms",
        );
        let news18 = FeedSource::new("News18", "https://www.news18.com/rss/india.xml");

        Self {
            request_timeout_secs: 10,
            items_per_feed: 4,
            max_articles: 10,
            primary_feeds: FeedsConfig {
                english: vec![toi.clone(), news18.clone()],
                hindi: vec![
                    FeedSource::new("Dainik Jagran", "https://www.jagran.com/rss_feed.xml"),
                    FeedSource::new("Aaj Tak", "https://www.aajtak.in/rssfeeds/rssf.php"),
                ],
                telugu: vec![news18, toi],
            },
            backup_feeds: FeedsConfig {
                english: vec![FeedSource {
                    name: "Google News".to_string(),
                    url: google_news("agriculture+india", "en-IN", "IN:en"),
                }],
                hindi: vec![FeedSource {
                    name: "Google News".to_string(),
                    url: google_news("kisan", "hi", "IN:hi"),
                }],
                telugu: vec![FeedSource {
                    name: "Google News".to_string(),
                    url: google_news("rythu", "te", "IN:te"),
                }],
            },
            weather_url: DEFAULT_FORECAST_URL.to_string(),
            forecast_days: 5,
            overpass_url: DEFAULT_INTERPRETER_URL.to_string(),
            overpass_timeout_secs: 25,
            facility_radius_m: 10_000,
            max_facilities: 10,
        }
    }
}

impl SourcesConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn overpass_timeout(&self) -> Duration {
        Duration::from_secs(self.overpass_timeout_secs.max(1))
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 20,
        }
    }
}

impl AssistantConfig {
    /// The configured key, ignoring blank values
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
