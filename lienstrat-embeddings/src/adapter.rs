use async_trait::async_trait;
use tracing::Instrument;

use lienstrat_core::{
    AiError, EmbeddingGeneration, EmbeddingRequest, EmbeddingResult, EmbeddingsApi,
    EmbeddingsRequest,
};

use crate::EmbeddingsBody;

pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const EMPTY_INPUT_MESSAGE: &str = "At least one text input is required for embeddings.";
pub const COUNT_MISMATCH_MESSAGE: &str = "OpenAI returned an unexpected number of embeddings.";
const INVALID_PAYLOAD_MESSAGE: &str = "OpenAI returned an invalid embeddings payload.";

/// Single-shot batch embedding over an [`EmbeddingsApi`] transport.
#[derive(Clone, Debug)]
pub struct EmbeddingAdapter<T> {
    transport: T,
    default_model: String,
}

impl<T> EmbeddingAdapter<T> {
    /// A blank `default_model` falls back to [`DEFAULT_EMBEDDING_MODEL`].
    pub fn new(transport: T, default_model: impl Into<String>) -> Self {
        let default_model = default_model.into();
        let default_model = if default_model.trim().is_empty() {
            DEFAULT_EMBEDDING_MODEL.to_string()
        } else {
            default_model
        };
        Self {
            transport,
            default_model,
        }
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }
}

#[async_trait]
impl<T> EmbeddingGeneration for EmbeddingAdapter<T>
where
    T: EmbeddingsApi,
{
    async fn create_embeddings(
        &self,
        request: EmbeddingRequest,
    ) -> Result<EmbeddingResult, AiError> {
        if request.texts.is_empty() {
            return Err(AiError::invalid_argument(EMPTY_INPUT_MESSAGE));
        }

        let model = request
            .model
            .filter(|model| !model.is_empty())
            .unwrap_or_else(|| self.default_model.clone());
        let span = tracing::debug_span!(
            "create_embeddings",
            model = %model,
            inputs = request.texts.len()
        );
        let payload = EmbeddingsRequest {
            model,
            input: request.texts,
        };

        async move {
            let raw = self.transport.create_embeddings(&payload).await?;
            if !raw.is_object() {
                tracing::warn!("embedding payload was not a JSON object");
                return Err(AiError::contract_violation(INVALID_PAYLOAD_MESSAGE));
            }
            let body: EmbeddingsBody = serde_json::from_value(raw).map_err(|err| {
                tracing::warn!(error = %err, "embedding payload could not be decoded");
                AiError::contract_violation(format!(
                    "OpenAI returned an invalid embeddings payload: {err}"
                ))
            })?;

            if body.vectors.len() != payload.input.len() {
                tracing::warn!(
                    expected = payload.input.len(),
                    got = body.vectors.len(),
                    "embedding count mismatch"
                );
                return Err(AiError::contract_violation(COUNT_MISMATCH_MESSAGE));
            }

            Ok(EmbeddingResult {
                embeddings: body.vectors,
                model: payload.model,
                usage: body.usage,
            })
        }
        .instrument(span)
        .await
    }
}
