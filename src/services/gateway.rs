use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::settings::GeminiSettings;
use crate::utils::logging::*;

/// Errors at the remote completion boundary.
///
/// Nothing here ever reaches an HTTP caller: the advisor absorbs every
/// variant and switches to the local fallback path.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway unavailable: {0}")]
    Unavailable(String),
    #[error("gateway timed out")]
    Timeout,
    #[error("invalid gateway response: {0}")]
    InvalidResponse(String),
}

/// Opaque remote completion capability: one natural-language prompt in, the
/// model's raw text out. Retry and backoff are the implementation's business,
/// never the caller's.
#[async_trait]
pub trait RemoteCompletionGateway: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError>;
}

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-pro";

/// Gateway to the Google Generative Language REST API.
#[derive(Clone)]
pub struct GeminiGateway {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiGateway {
    pub fn new(api_key: String, model: Option<String>, base_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    /// Returns `None` when the gateway is disabled or has no API key; the
    /// advisor then runs on the local fallback path only.
    pub fn from_settings(settings: &GeminiSettings) -> Option<Self> {
        if !settings.enabled {
            return None;
        }
        let api_key = match settings.api_key.as_deref() {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => {
                log_warning("Gemini enabled but GEMINI_API_KEY is not set");
                return None;
            }
        };

        log_info("Gemini gateway initialized successfully");

        Some(Self::new(
            api_key,
            settings.model.clone(),
            settings.base_url.clone(),
        ))
    }
}

#[async_trait]
impl RemoteCompletionGateway for GeminiGateway {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let request_body = json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ]
        });

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            log_gateway_error("generateContent", Some(status), &error_text);
            return Err(GatewayError::Unavailable(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let json_response: Value = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        // Extract the first candidate's text
        let content = json_response
            .get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|candidate| candidate.get("content"))
            .and_then(|content| content.get("parts"))
            .and_then(|parts| parts.get(0))
            .and_then(|part| part.get("text"))
            .and_then(|t| t.as_str())
            .ok_or_else(|| {
                GatewayError::InvalidResponse("missing candidate text in response".to_string())
            })?;

        Ok(content.to_string())
    }
}

static JSON_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("JSON block regex must compile"));

/// Models often wrap their JSON in markdown fences or surrounding prose;
/// pull out the outermost object before parsing.
pub fn extract_json_block(raw: &str) -> Option<&str> {
    JSON_BLOCK.find(raw).map(|m| m.as_str())
}
