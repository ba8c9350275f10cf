//! Dashboard read endpoints under `/api`

pub mod assistant;
pub mod catalog;
pub mod facilities;
pub mod market;
pub mod news;
pub mod weather;

use axum::{
    Router,
    routing::{get, post},
};

use super::state::AppState;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/news", get(news::get_news))
        .route("/market-prices", get(market::get_market_prices))
        .route("/weather", get(weather::get_weather))
        .route("/hospitals", get(facilities::get_hospitals))
        .route("/pharmacies", get(facilities::get_pharmacies))
        .route("/blood-banks", get(facilities::get_blood_banks))
        .route("/assistant", post(assistant::ask_assistant))
        .route("/locations", get(catalog::list_locations))
        .route("/status", get(catalog::cache_status))
}
