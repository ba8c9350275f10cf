//! Weather endpoint

use axum::extract::{Query, State};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, LocationQuery, WeatherResponse};
use crate::domain::LocationCatalog;

/// GET /api/weather
///
/// Answers 200 with `available: false` when nothing could ever be fetched for the location.
pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<WeatherResponse>, ApiError> {
    let location = LocationCatalog::resolve(query.location.as_deref().unwrap_or_default());

    match state.dashboard.weather(location).await {
        Some(entry) => Ok(Json(WeatherResponse::from_entry(&entry, location)?)),
        None => {
            debug!(location = location.slug, "Weather unavailable");
            Ok(Json(WeatherResponse::unavailable(location)))
        }
    }
}
