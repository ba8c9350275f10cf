//! Rural Info Gateway
//!
//! Serves news, market prices, weather and nearby health facilities for rural towns from an
//! in-memory cache. A background refresher keeps the cache warm from unreliable upstream
//! feeds, and every read degrades to stale or built-in data instead of failing.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use domain::{Clock, SystemClock, TextCompletion};
use infrastructure::assistant::{AssistantService, OpenAiCompletion};
use infrastructure::cache::{InMemoryCacheConfig, InMemoryCacheStore};
use infrastructure::http::HttpClient;
use infrastructure::services::{DashboardService, Refresher};
use infrastructure::sources::BROWSER_USER_AGENT;

/// Everything the commands need, wired from configuration
#[derive(Debug)]
pub struct Services {
    pub dashboard: Arc<DashboardService>,
    pub refresher: Arc<Refresher>,
    pub assistant: AssistantService,
}

pub fn create_services(config: &AppConfig) -> anyhow::Result<Services> {
    let store = Arc::new(InMemoryCacheStore::with_config(
        InMemoryCacheConfig::default().with_max_capacity(config.cache.max_entries),
    ));

    let clock: Arc<dyn Clock> = match config.cache.utc_offset_minutes {
        Some(minutes) => Arc::new(SystemClock::with_utc_offset_minutes(minutes)),
        None => Arc::new(SystemClock::new()),
    };

    // Adapters bound their own attempts; the client only needs to outlast the slowest one
    let client_timeout = config
        .sources
        .request_timeout()
        .max(config.sources.overpass_timeout());
    let client = HttpClient::new(client_timeout, BROWSER_USER_AGENT)
        .context("Failed to build upstream HTTP client")?;

    let dashboard = Arc::new(DashboardService::new(
        store,
        clock,
        Arc::new(client),
        config.sources.clone(),
    ));
    let refresher = Arc::new(Refresher::new(dashboard.clone(), &config.refresh));
    let assistant = create_assistant(config)?;

    info!(
        tracked_locations = config.refresh.locations.len(),
        assistant = assistant.is_configured(),
        "Services initialized"
    );

    Ok(Services {
        dashboard,
        refresher,
        assistant,
    })
}

fn create_assistant(config: &AppConfig) -> anyhow::Result<AssistantService> {
    let settings = &config.assistant;

    let Some(api_key) = settings.api_key() else {
        info!("No assistant API key configured, assistant disabled");
        return Ok(AssistantService::disabled());
    };

    let client = HttpClient::new(settings.timeout(), env!("CARGO_PKG_NAME"))
        .context("Failed to build assistant HTTP client")?;
    let backend: Arc<dyn TextCompletion> = Arc::new(OpenAiCompletion::with_base_url(
        client,
        api_key,
        &settings.base_url,
        &settings.model,
    ));

    Ok(AssistantService::new(Some(backend), settings.timeout()))
}
