use tracing::{debug, error, info, warn};

pub fn log_request_received(endpoint: &str, method: &str) {
    info!("Request received: {} {}", method, endpoint);
}

pub fn log_config_loaded(env: &str) {
    info!("Configuration loaded successfully for environment: {}", env);
}

pub fn log_server_startup(port: u16) {
    info!("🚀 Study advisor service starting on port {}", port);
}

pub fn log_server_ready(address: &str) {
    info!("✅ Server ready and listening on http://{}", address);
}

pub fn log_health_check() {
    debug!("Health check requested");
}

pub fn log_validation_error(field: &str, message: &str) {
    warn!("Validation error: {} - {}", field, message);
}

pub fn log_mood_classified(mood: &str, confidence: f32, source: &str) {
    info!(
        "Mood classified: {} - Confidence: {:.2} - Source: {}",
        mood, confidence, source
    );
}

pub fn log_gateway_fallback(reason: &str) {
    warn!("Remote gateway unusable, using local fallback: {}", reason);
}

pub fn log_gateway_error(endpoint: &str, status: Option<u16>, error: &str) {
    error!(
        "Gateway API error: {} - Status: {:?} - Error: {}",
        endpoint, status, error
    );
}

pub fn log_info(message: &str) {
    info!("{}", message);
}

pub fn log_warning(message: &str) {
    warn!("{}", message);
}
