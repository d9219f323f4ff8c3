/// Main application: study advisor backend
///
/// Architecture:
/// - Thin axum routing layer over the StudyAdvisorService
/// - Mood analysis and chat try the Gemini gateway first
/// - On gateway failure, timeout or malformed output, the deterministic
///   local classifier/responder takes over; callers always get a result
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use study_advisor_service::{config, services, utils, AppState};

mod handlers;

use config::Settings;
use handlers::{
    analyze_mood, analyze_voice_mood, chat_message, health_check, ready_check, status_check,
};
use utils::logging::*;
use utils::AppError;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional; real deployments configure through the environment
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
    let settings = Settings::new()
        .map_err(|e| AppError::InternalError(format!("failed to load configuration: {}", e)))?;
    log_config_loaded(&run_mode);

    let advisor = services::StudyAdvisorService::new(&settings);

    let app_state = Arc::new(AppState {
        settings: settings.clone(),
        advisor,
    });

    let app = Router::new()
        // Health checks
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))
        .route("/status", get(status_check))
        // Advisor API
        .route("/api/mood/analyze", post(analyze_mood))
        .route("/api/mood/voice", post(analyze_voice_mood))
        .route("/api/chat/message", post(chat_message))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // Honor the PORT environment variable in containerized deployments
    let mut server = settings.server.clone();
    if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        server.port = port;
    }
    let address = server.address();
    let listener = TcpListener::bind(&address).await?;

    log_server_startup(server.port);
    log_server_ready(&address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log_info("Server shut down gracefully");
    Ok(())
}

/// Signal handler for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
