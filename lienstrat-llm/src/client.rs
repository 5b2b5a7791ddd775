//! HTTP client for an OpenAI-compatible hosted API.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use lienstrat_core::{AiError, EmbeddingsApi, EmbeddingsRequest, ResponsesApi, ResponsesRequest};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum OpenAiClientError {
    #[error("api key is required")]
    MissingApiKey,
    #[error("invalid base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Default)]
pub struct OpenAiClientBuilder {
    base_url: Option<String>,
    api_key: Option<SecretString>,
    timeout: Option<Duration>,
    http: Option<Client>,
}

impl fmt::Debug for OpenAiClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_some() {
            "<redacted>"
        } else {
            "<none>"
        };

        f.debug_struct("OpenAiClientBuilder")
            .field("base_url", &self.base_url)
            .field("api_key", &api_key)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OpenAiClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, value: impl Into<String>) -> Self {
        self.base_url = Some(value.into());
        self
    }

    pub fn api_key(mut self, value: SecretString) -> Self {
        self.api_key = if value.expose_secret().trim().is_empty() {
            None
        } else {
            Some(value)
        };
        self
    }

    pub fn timeout(mut self, value: Duration) -> Self {
        self.timeout = Some(value);
        self
    }

    /// Reuse an existing connection pool instead of building a new one.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http = Some(client);
        self
    }

    pub fn build(self) -> Result<OpenAiClient, OpenAiClientError> {
        let api_key = self.api_key.ok_or(OpenAiClientError::MissingApiKey)?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| OPENAI_BASE_URL.to_string());
        Url::parse(&base_url).map_err(|source| OpenAiClientError::InvalidBaseUrl {
            url: base_url.clone(),
            source,
        })?;

        let http = match self.http {
            Some(http) => http,
            None => Client::builder()
                .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
                .build()?,
        };

        Ok(OpenAiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[derive(Clone)]
pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: SecretString,
}

impl fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

impl OpenAiClient {
    pub fn builder() -> OpenAiClientBuilder {
        OpenAiClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<B>(&self, endpoint: &str, body: &B) -> Result<Value, AiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .http
            .post(url)
            .bearer_auth(self.api_key.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|err| AiError::unavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::unavailable(error_message(status, &body)));
        }

        response.json::<Value>().await.map_err(|err| {
            if err.is_decode() {
                AiError::contract_violation(format!("{endpoint} response was not valid JSON"))
            } else {
                AiError::unavailable(err.to_string())
            }
        })
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<OpenAiErrorBody>(body) {
        Ok(parsed) => format!("HTTP {}: {}", status.as_u16(), parsed.error.message),
        Err(_) => format!("HTTP {}: {}", status.as_u16(), body),
    }
}

#[async_trait]
impl ResponsesApi for OpenAiClient {
    async fn create_response(&self, request: &ResponsesRequest) -> Result<Value, AiError> {
        self.post_json("responses", request).await
    }
}

#[async_trait]
impl EmbeddingsApi for OpenAiClient {
    async fn create_embeddings(&self, request: &EmbeddingsRequest) -> Result<Value, AiError> {
        self.post_json("embeddings", request).await
    }
}
