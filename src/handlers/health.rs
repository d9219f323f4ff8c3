use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use std::sync::Arc;

use study_advisor_service::utils::logging::*;
use study_advisor_service::AppState;

pub async fn health_check() -> Json<Value> {
    log_health_check();

    Json(json!({
        "status": "healthy",
        "service": "study-advisor-service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// The local fallback guarantees service even without the gateway, so the
/// instance is always ready; the gateway state is reported for visibility.
pub async fn ready_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let status = state.advisor.service_status();

    Json(json!({
        "ready": true,
        "service": "study-advisor-service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "dependencies": {
            "gemini": {
                "enabled": status.remote_enabled,
                "available": status.remote_available
            }
        }
    }))
}

pub async fn status_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let status = state.advisor.service_status();
    let ai_enabled = state.settings.ai.as_ref().map_or(true, |ai| ai.enabled);

    Json(json!({
        "service": "study-advisor-service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "ai": {
            "enabled": ai_enabled,
            "strategy": status.current_strategy,
            "remote_enabled": status.remote_enabled,
            "remote_available": status.remote_available
        },
        "server": {
            "host": state.settings.server.host,
            "port": state.settings.server.port
        }
    }))
}
