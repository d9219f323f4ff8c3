//! StudyAdvisorService: remote-AI-primary with guaranteed local fallback.
//!
//! Strategy:
//! 1. If the Gemini gateway is configured, try it first (with timeout).
//! 2. On any gateway error, timeout, or unparsable/out-of-range output,
//!    fall back to the local classifier/responder (always succeeds).
//!
//! Both paths produce the same output shape, so callers never see which one
//! ran except through the attached metadata.

use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;

use crate::config::Settings;
use crate::models::{ChatReply, ConversationTurn, MoodAssessment, RemoteChatReply};
use crate::services::classifier::TextMoodClassifier;
use crate::services::gateway::{
    extract_json_block, GatewayError, GeminiGateway, RemoteCompletionGateway,
};
use crate::services::prompts;
use crate::services::responder::ConversationResponder;
use crate::utils::logging::*;

/// Advisor configuration derived from the system settings.
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    /// Try the remote gateway before the local fallback
    pub remote_enabled: bool,

    /// Timeout for the remote gateway (ms) before falling back
    pub remote_timeout_ms: u64,

    /// Detailed logging of path decisions
    pub verbose_logging: bool,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            remote_enabled: false,
            remote_timeout_ms: 15000,
            verbose_logging: true,
        }
    }
}

impl AdvisorConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        let remote_enabled = settings.gemini.as_ref().map(|g| g.enabled).unwrap_or(false);

        Self {
            remote_enabled,
            remote_timeout_ms: settings
                .gemini
                .as_ref()
                .map(|g| g.timeout_seconds * 1000)
                .unwrap_or(15000),
            verbose_logging: settings
                .ai
                .as_ref()
                .and_then(|ai| ai.verbose_logging)
                .unwrap_or(true),
        }
    }
}

/// Which path produced the final result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisorSource {
    Remote,
    LocalFallback,
}

/// Per-call metadata about path selection and timing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorMetadata {
    pub source: AdvisorSource,
    pub fallback_occurred: bool,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodAnalysisOutcome {
    pub assessment: MoodAssessment,
    pub metadata: AdvisorMetadata,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReplyOutcome {
    pub reply: ChatReply,
    pub metadata: AdvisorMetadata,
}

/// Reported by the status endpoint.
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub remote_available: bool,
    pub remote_enabled: bool,
    pub current_strategy: String,
}

/// Outcome of the remote attempt, resolved at a single decision point so the
/// supersedes-entirely contract stays auditable.
enum Resolution<T> {
    Remote(T),
    Local,
}

#[derive(Clone)]
pub struct StudyAdvisorService {
    /// Remote gateway (optional; None means local-only operation)
    gateway: Option<Arc<dyn RemoteCompletionGateway>>,

    /// Local fallback components (always available)
    classifier: TextMoodClassifier,
    responder: ConversationResponder,

    config: AdvisorConfig,
}

impl StudyAdvisorService {
    /// Builds the advisor from settings. The local fallback is always
    /// initialized; the gateway only when enabled and configured, and a
    /// missing gateway never prevents startup.
    pub fn new(settings: &Settings) -> Self {
        let config = AdvisorConfig::from_settings(settings);

        let gateway: Option<Arc<dyn RemoteCompletionGateway>> = if config.remote_enabled {
            match settings.gemini.as_ref().and_then(GeminiGateway::from_settings) {
                Some(g) => Some(Arc::new(g)),
                None => {
                    log_warning(
                        "Remote AI enabled but gateway could not be configured, running local-only",
                    );
                    None
                }
            }
        } else {
            if config.verbose_logging {
                log_info("Remote AI disabled in configuration, running local-only");
            }
            None
        };

        Self::from_parts(gateway, config)
    }

    /// Wires an explicit gateway; used by tests and custom deployments.
    pub fn with_gateway(gateway: Arc<dyn RemoteCompletionGateway>, config: AdvisorConfig) -> Self {
        Self::from_parts(Some(gateway), config)
    }

    /// Local fallback only, no remote gateway.
    pub fn local_only(config: AdvisorConfig) -> Self {
        Self::from_parts(None, config)
    }

    fn from_parts(
        gateway: Option<Arc<dyn RemoteCompletionGateway>>,
        config: AdvisorConfig,
    ) -> Self {
        Self {
            gateway,
            classifier: TextMoodClassifier::new(),
            responder: ConversationResponder::new(),
            config,
        }
    }

    /// Analyzes mood from a written description.
    pub async fn analyze_text_mood(&self, description: &str) -> MoodAnalysisOutcome {
        let started = Instant::now();
        let prompt = prompts::text_mood_prompt(description);

        let (assessment, source) = match self.resolve(&prompt, parse_mood_response).await {
            Resolution::Remote(assessment) => (assessment, AdvisorSource::Remote),
            Resolution::Local => (
                self.classifier.classify(description),
                AdvisorSource::LocalFallback,
            ),
        };

        self.finish_mood(assessment, source, started)
    }

    /// Analyzes mood from a voice transcription.
    pub async fn analyze_voice_mood(&self, transcription: &str) -> MoodAnalysisOutcome {
        let started = Instant::now();
        let prompt = prompts::voice_mood_prompt(transcription);

        let (assessment, source) = match self.resolve(&prompt, parse_mood_response).await {
            Resolution::Remote(assessment) => (assessment, AdvisorSource::Remote),
            Resolution::Local => (
                self.classifier.classify_transcription(transcription),
                AdvisorSource::LocalFallback,
            ),
        };

        self.finish_mood(assessment, source, started)
    }

    /// Produces a context-aware chat reply.
    pub async fn generate_chat_reply(
        &self,
        user_message: &str,
        history: &[ConversationTurn],
        mood: Option<&MoodAssessment>,
        study_context: Option<&serde_json::Value>,
    ) -> ChatReplyOutcome {
        let started = Instant::now();
        let prompt = prompts::chat_prompt(user_message, history, mood, study_context);

        let (reply, source) = match self.resolve(&prompt, parse_chat_response).await {
            Resolution::Remote(reply) => (reply, AdvisorSource::Remote),
            Resolution::Local => (
                self.responder.respond(user_message, history, mood),
                AdvisorSource::LocalFallback,
            ),
        };

        ChatReplyOutcome {
            reply,
            metadata: self.metadata(source, started),
        }
    }

    pub fn service_status(&self) -> ServiceStatus {
        ServiceStatus {
            remote_available: self.gateway.is_some(),
            remote_enabled: self.config.remote_enabled,
            current_strategy: if self.gateway.is_some() {
                "Remote AI primary with local fallback".to_string()
            } else {
                "Local fallback only".to_string()
            },
        }
    }

    /// The single decision point for the remote-supersedes-local contract:
    /// a remote result that completes in time AND parses wins; everything
    /// else resolves to the local path.
    async fn resolve<T, F>(&self, prompt: &str, parse: F) -> Resolution<T>
    where
        F: Fn(&str) -> Result<T, GatewayError>,
    {
        let Some(gateway) = self.gateway.as_ref() else {
            return Resolution::Local;
        };

        let remote_timeout = Duration::from_millis(self.config.remote_timeout_ms);
        let outcome = match timeout(remote_timeout, gateway.complete(prompt)).await {
            Err(_) => Err(GatewayError::Timeout),
            Ok(result) => result.and_then(|raw| parse(&raw)),
        };

        match outcome {
            Ok(value) => Resolution::Remote(value),
            Err(e) => {
                log_gateway_fallback(&e.to_string());
                Resolution::Local
            }
        }
    }

    fn finish_mood(
        &self,
        assessment: MoodAssessment,
        source: AdvisorSource,
        started: Instant,
    ) -> MoodAnalysisOutcome {
        if self.config.verbose_logging {
            let source_name = match source {
                AdvisorSource::Remote => "remote",
                AdvisorSource::LocalFallback => "local_fallback",
            };
            log_mood_classified(assessment.mood.as_str(), assessment.confidence, source_name);
        }

        MoodAnalysisOutcome {
            metadata: self.metadata(source, started),
            assessment,
        }
    }

    fn metadata(&self, source: AdvisorSource, started: Instant) -> AdvisorMetadata {
        AdvisorMetadata {
            source,
            fallback_occurred: source == AdvisorSource::LocalFallback && self.gateway.is_some(),
            processing_time_ms: started.elapsed().as_millis() as u64,
        }
    }
}

/// Parses remote output against the mood-analysis schema; out-of-range
/// values are invalid, keeping the assessment invariants unconditional.
fn parse_mood_response(raw: &str) -> Result<MoodAssessment, GatewayError> {
    let block = extract_json_block(raw)
        .ok_or_else(|| GatewayError::InvalidResponse("no JSON object in model output".to_string()))?;

    let assessment: MoodAssessment = serde_json::from_str(block)
        .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

    if !assessment.is_within_bounds() {
        return Err(GatewayError::InvalidResponse(
            "mood fields out of range".to_string(),
        ));
    }

    Ok(assessment)
}

/// Parses remote output against the chat-reply schema.
fn parse_chat_response(raw: &str) -> Result<ChatReply, GatewayError> {
    let block = extract_json_block(raw)
        .ok_or_else(|| GatewayError::InvalidResponse("no JSON object in model output".to_string()))?;

    let remote: RemoteChatReply = serde_json::from_str(block)
        .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

    Ok(remote.into())
}
