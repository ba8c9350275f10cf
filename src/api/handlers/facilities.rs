//! Hospital, pharmacy and blood bank endpoints

use axum::extract::{Query, State};

use crate::api::state::AppState;
use crate::api::types::{ApiError, FacilitiesResponse, Json, LocationQuery};
use crate::domain::{FacilityKind, LocationCatalog};

async fn facilities(
    state: &AppState,
    kind: FacilityKind,
    query: &LocationQuery,
) -> Result<Json<FacilitiesResponse>, ApiError> {
    let location = LocationCatalog::resolve(query.location.as_deref().unwrap_or_default());

    let entry = state
        .dashboard
        .facilities(kind, location)
        .await
        .ok_or_else(|| ApiError::unavailable(format!("{} are not available yet", kind.as_str())))?;

    Ok(Json(FacilitiesResponse::from_entry(&entry, location)?))
}

/// GET /api/hospitals
pub async fn get_hospitals(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<FacilitiesResponse>, ApiError> {
    facilities(&state, FacilityKind::Hospital, &query).await
}

/// GET /api/pharmacies
pub async fn get_pharmacies(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<FacilitiesResponse>, ApiError> {
    facilities(&state, FacilityKind::Pharmacy, &query).await
}

/// GET /api/blood-banks
pub async fn get_blood_banks(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<FacilitiesResponse>, ApiError> {
    facilities(&state, FacilityKind::BloodBank, &query).await
}
