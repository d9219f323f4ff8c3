use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use study_advisor_service::models::{ConversationTurn, MoodAssessment};
use study_advisor_service::utils::logging::*;
use study_advisor_service::utils::AppError;
use study_advisor_service::AppState;

use super::mood::validate_text_input;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
    #[serde(default)]
    pub mood: Option<MoodAssessment>,
    #[serde(default)]
    pub study_context: Option<Value>,
}

pub async fn chat_message(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatMessageRequest>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/api/chat/message", "POST");
    validate_text_input("message", &payload.message)?;

    let outcome = state
        .advisor
        .generate_chat_reply(
            payload.message.trim(),
            &payload.history,
            payload.mood.as_ref(),
            payload.study_context.as_ref(),
        )
        .await;

    Ok(Json(json!({
        "success": true,
        "reply": outcome.reply,
        "metadata": outcome.metadata,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
