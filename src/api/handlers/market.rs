//! Market price endpoint

use axum::extract::{Query, State};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, LocationQuery, MarketPricesResponse};
use crate::domain::LocationCatalog;

/// GET /api/market-prices
pub async fn get_market_prices(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<MarketPricesResponse>, ApiError> {
    let location = LocationCatalog::resolve(query.location.as_deref().unwrap_or_default());

    let entry = state
        .dashboard
        .market_prices(location)
        .await
        .ok_or_else(|| ApiError::unavailable("Market prices are not available yet"))?;

    Ok(Json(MarketPricesResponse::from_entry(&entry, location)?))
}
