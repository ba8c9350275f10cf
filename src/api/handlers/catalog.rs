//! Location catalog and cache status endpoints

use axum::extract::State;

use crate::api::state::AppState;
use crate::api::types::{Json, LocationsResponse, StatusResponse};
use crate::domain::LocationCatalog;
use crate::domain::location::DEFAULT_LOCATION;

/// GET /api/locations
pub async fn list_locations() -> Json<LocationsResponse> {
    Json(LocationsResponse {
        locations: LocationCatalog::all(),
        default_location: DEFAULT_LOCATION,
    })
}

/// GET /api/status
pub async fn cache_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let entries = state.dashboard.status().await;

    Json(StatusResponse {
        total: entries.len(),
        entries,
        today: state.dashboard.clock().today(),
    })
}
