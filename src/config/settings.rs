use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub gemini: Option<GeminiSettings>,
    pub ai: Option<AiSettings>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Remote completion gateway settings. When disabled or missing an API key,
/// the service runs on the local fallback path only.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeminiSettings {
    pub enabled: bool,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AiSettings {
    pub enabled: bool,
    /// Detailed logging of advisor path decisions (defaults to on)
    #[serde(default)]
    pub verbose_logging: Option<bool>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            // Base configuration file
            .add_source(File::with_name("config/default").required(false))
            // Environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        // The Gemini API key comes from the environment, never from files
        if let Ok(api_key) = std::env::var("GEMINI_API_KEY") {
            builder = builder.set_override("gemini.api_key", api_key)?;
        }

        builder = builder.add_source(Environment::with_prefix("STUDY_ADVISOR"));

        let s = builder.build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_deserialize_from_toml() {
        let raw = r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [gemini]
            enabled = true
            model = "gemini-pro"
            timeout_seconds = 15

            [ai]
            enabled = true
            verbose_logging = false
        "#;

        let settings: Settings = Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.server.port, 8080);
        let gemini = settings.gemini.unwrap();
        assert!(gemini.enabled);
        assert_eq!(gemini.model.as_deref(), Some("gemini-pro"));
        assert!(gemini.api_key.is_none());
        assert_eq!(gemini.timeout_seconds, 15);
        let ai = settings.ai.unwrap();
        assert_eq!(ai.verbose_logging, Some(false));
    }

    #[test]
    fn test_ai_verbose_logging_defaults_to_unset() {
        let raw = r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [ai]
            enabled = true
        "#;

        let settings: Settings = Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(settings.ai.unwrap().verbose_logging.is_none());
    }

    #[test]
    fn test_server_address_interpolates_host_and_port() {
        let server = ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 3000,
        };
        assert_eq!(server.address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_gemini_section_is_optional() {
        let raw = r#"
            [server]
            host = "127.0.0.1"
            port = 3000
        "#;

        let settings: Settings = Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(settings.gemini.is_none());
        assert!(settings.ai.is_none());
    }
}
