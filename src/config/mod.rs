//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AssistantConfig, CacheConfig, FeedSource, FeedsConfig, LogFormat, LoggingConfig,
    RefreshConfig, ServerConfig, SourcesConfig,
};
