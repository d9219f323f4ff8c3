use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use study_advisor_service::utils::logging::*;
use study_advisor_service::utils::{AppError, AppResult};
use study_advisor_service::AppState;

/// Upstream bound for free-text inputs; the classifier itself is
/// length-agnostic.
pub const MAX_INPUT_CHARS: usize = 2000;

#[derive(Debug, Deserialize)]
pub struct MoodAnalyzeRequest {
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct VoiceAnalyzeRequest {
    pub transcription: String,
}

pub fn validate_text_input(field: &str, value: &str) -> AppResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        log_validation_error(field, "must not be empty");
        return Err(AppError::ValidationError(format!(
            "{} must not be empty",
            field
        )));
    }
    if trimmed.chars().count() > MAX_INPUT_CHARS {
        log_validation_error(field, "exceeds maximum length");
        return Err(AppError::ValidationError(format!(
            "{} must be at most {} characters",
            field, MAX_INPUT_CHARS
        )));
    }
    Ok(())
}

pub async fn analyze_mood(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<MoodAnalyzeRequest>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/api/mood/analyze", "POST");
    validate_text_input("description", &payload.description)?;

    let outcome = state.advisor.analyze_text_mood(payload.description.trim()).await;

    Ok(Json(json!({
        "success": true,
        "analysisId": Uuid::new_v4().to_string(),
        "assessment": outcome.assessment,
        "metadata": outcome.metadata,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

pub async fn analyze_voice_mood(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<VoiceAnalyzeRequest>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/api/mood/voice", "POST");
    validate_text_input("transcription", &payload.transcription)?;

    let outcome = state
        .advisor
        .analyze_voice_mood(payload.transcription.trim())
        .await;

    Ok(Json(json!({
        "success": true,
        "analysisId": Uuid::new_v4().to_string(),
        "assessment": outcome.assessment,
        "metadata": outcome.metadata,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(validate_text_input("description", "").is_err());
        assert!(validate_text_input("description", "   ").is_err());
    }

    #[test]
    fn test_overlong_input_is_rejected() {
        let long = "a".repeat(MAX_INPUT_CHARS + 1);
        assert!(validate_text_input("description", &long).is_err());
    }

    #[test]
    fn test_reasonable_input_passes() {
        assert!(validate_text_input("description", "I feel great today").is_ok());
        let exactly_max = "b".repeat(MAX_INPUT_CHARS);
        assert!(validate_text_input("description", &exactly_max).is_ok());
    }
}
