//! Assistant endpoint

use axum::extract::State;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{AssistantRequest, Json};
use crate::domain::Language;
use crate::infrastructure::assistant::AssistantReply;

/// POST /api/assistant
pub async fn ask_assistant(
    State(state): State<AppState>,
    Json(request): Json<AssistantRequest>,
) -> Json<AssistantReply> {
    let language = Language::resolve(request.language.as_deref().unwrap_or_default());
    debug!(language = %language, chars = request.message.len(), "Assistant request");

    Json(state.assistant.reply(&request.message, language).await)
}
