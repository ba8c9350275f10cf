//! News endpoint

use axum::extract::{Query, State};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, NewsQuery, NewsResponse};
use crate::domain::{CategoryFilter, Language};

/// GET /api/news
pub async fn get_news(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<NewsResponse>, ApiError> {
    let language = Language::resolve(query.language.as_deref().unwrap_or_default());
    let filter = CategoryFilter::resolve(query.category.as_deref().unwrap_or_default());
    debug!(language = %language, category = filter.as_str(), "Reading news");

    let entry = state
        .dashboard
        .news(language)
        .await
        .ok_or_else(|| ApiError::unavailable("News is not available yet"))?;

    Ok(Json(NewsResponse::from_entry(&entry, language, filter)?))
}
