//! Upstream source adapters and chain producers

mod news_feeds;
mod open_meteo;
mod overpass;
mod rss;
mod simulated_prices;

pub use news_feeds::NewsFeedGroup;
pub use open_meteo::{parse_forecast, OpenMeteoAdapter, DEFAULT_FORECAST_URL};
pub use overpass::{build_query, parse_elements, OverpassAdapter, RankedFacilities, DEFAULT_INTERPRETER_URL};
pub use rss::{parse_feed, RssFeedAdapter, BROWSER_USER_AGENT};
pub use simulated_prices::SimulatedPrices;
