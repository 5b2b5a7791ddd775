use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// Process-wide settings, read once at startup and handed to whatever needs them.
#[derive(Clone, Debug)]
pub struct Settings {
    pub project_name: String,
    pub version: String,
    pub api_prefix: String,
    pub cors_allow_origins: Vec<String>,
    pub bind_addr: SocketAddr,
    pub max_body_bytes: usize,
    pub openai_api_key: Option<SecretString>,
    pub openai_base_url: String,
    pub openai_model_name: String,
    pub openai_embedding_model: String,
    pub openai_timeout: Duration,
    pub openai_max_attempts: usize,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_name: "Tax Lien Strategist".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            api_prefix: "/api".to_string(),
            cors_allow_origins: vec!["*".to_string()],
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            max_body_bytes: 1024 * 1024,
            openai_api_key: None,
            openai_base_url: lienstrat_llm::OPENAI_BASE_URL.to_string(),
            openai_model_name: "gpt-5.1".to_string(),
            openai_embedding_model: "text-embedding-3-large".to_string(),
            openai_timeout: Duration::from_secs(60),
            openai_max_attempts: 1,
            log_level: "INFO".to_string(),
            log_format: LogFormat::Json,
        }
    }
}

impl Settings {
    /// Reads the process environment, after loading `.env` when one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is normal outside development.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(value) = var("PROJECT_NAME") {
            settings.project_name = value;
        }
        if let Some(value) = var("VERSION") {
            settings.version = value;
        }
        if let Some(value) = var("API_V1_PREFIX") {
            settings.api_prefix = value;
        }
        if let Some(value) = var("CORS_ALLOW_ORIGINS") {
            settings.cors_allow_origins = split_origins(&value);
        }
        if let Some(value) = var("BIND_ADDR") {
            settings.bind_addr = parse("BIND_ADDR", value)?;
        }
        if let Some(value) = var("MAX_BODY_BYTES") {
            settings.max_body_bytes = parse("MAX_BODY_BYTES", value)?;
        }
        settings.openai_api_key = var("OPENAI_API_KEY").map(SecretString::new);
        if let Some(value) = var("OPENAI_BASE_URL") {
            settings.openai_base_url = value;
        }
        if let Some(value) = var("OPENAI_MODEL_NAME") {
            settings.openai_model_name = value;
        }
        // Blank is allowed here; the embedding adapter substitutes its own default.
        if let Some(value) = lookup("OPENAI_EMBEDDING_MODEL") {
            settings.openai_embedding_model = value;
        }
        if let Some(value) = var("OPENAI_TIMEOUT_SECS") {
            settings.openai_timeout = Duration::from_secs(parse("OPENAI_TIMEOUT_SECS", value)?);
        }
        if let Some(value) = var("OPENAI_MAX_ATTEMPTS") {
            settings.openai_max_attempts = parse("OPENAI_MAX_ATTEMPTS", value)?;
        }
        if let Some(value) = var("LOG_LEVEL") {
            settings.log_level = value;
        }
        if let Some(value) = var("LOG_FORMAT") {
            settings.log_format = LogFormat::parse(&value);
        }

        Ok(settings)
    }

    /// Mount point of the versioned API, e.g. `/api/v1`.
    pub fn api_v1_path(&self) -> String {
        let prefix = self.api_prefix.trim().trim_matches('/');
        if prefix.is_empty() {
            "/v1".to_string()
        } else {
            format!("/{prefix}/v1")
        }
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    let parsed = value.trim().parse();
    parsed.map_err(|_| ConfigError::Invalid { key, value })
}

fn split_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
