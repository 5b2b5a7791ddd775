use std::sync::Arc;

use lienstrat_core::{EmbeddingGeneration, Retrying, TextGeneration};
use lienstrat_embeddings::EmbeddingAdapter;
use lienstrat_llm::{CompletionAdapter, OpenAiClient, OpenAiClientError};

use crate::{ApiError, Settings};

/// Services shared by the route handlers.
///
/// Both services are absent when no provider credentials were configured; the
/// AI routes then answer 503 while the rest of the API keeps working.
#[derive(Clone, Default)]
pub struct AppState {
    text: Option<Arc<dyn TextGeneration>>,
    embeddings: Option<Arc<dyn EmbeddingGeneration>>,
}

impl AppState {
    pub fn new(
        text: Arc<dyn TextGeneration>,
        embeddings: Arc<dyn EmbeddingGeneration>,
    ) -> Self {
        Self {
            text: Some(text),
            embeddings: Some(embeddings),
        }
    }

    pub fn unconfigured() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, OpenAiClientError> {
        let Some(api_key) = settings.openai_api_key.clone() else {
            tracing::warn!("OPENAI_API_KEY is not set; AI routes will answer 503");
            return Ok(Self::unconfigured());
        };

        let client = OpenAiClient::builder()
            .base_url(settings.openai_base_url.clone())
            .api_key(api_key)
            .timeout(settings.openai_timeout)
            .build()?;

        let attempts = settings.openai_max_attempts;
        let text = Retrying::new(
            CompletionAdapter::new(client.clone(), settings.openai_model_name.clone()),
            attempts,
        );
        let embeddings = Retrying::new(
            EmbeddingAdapter::new(client, settings.openai_embedding_model.clone()),
            attempts,
        );

        tracing::info!(
            base_url = %settings.openai_base_url,
            model = %settings.openai_model_name,
            embedding_model = %settings.openai_embedding_model,
            max_attempts = attempts,
            "hosted model client configured"
        );
        Ok(Self::new(Arc::new(text), Arc::new(embeddings)))
    }

    pub fn is_configured(&self) -> bool {
        self.text.is_some() && self.embeddings.is_some()
    }

    pub(crate) fn text(&self) -> Result<&dyn TextGeneration, ApiError> {
        self.text.as_deref().ok_or(ApiError::NotConfigured)
    }

    pub(crate) fn embeddings(&self) -> Result<&dyn EmbeddingGeneration, ApiError> {
        self.embeddings.as_deref().ok_or(ApiError::NotConfigured)
    }
}
