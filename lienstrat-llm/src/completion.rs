use async_trait::async_trait;
use tracing::Instrument;

use lienstrat_core::{
    AiError, CompletionResult, ResponsesApi, ResponsesRequest, TextGeneration,
    TextGenerationRequest,
};

use crate::{extract_text, ResponseBody};

pub const EMPTY_PROMPT_MESSAGE: &str = "Prompt must not be empty.";
pub const MISSING_TEXT_MESSAGE: &str = "OpenAI response did not contain any text output.";

/// Single-shot text generation over a [`ResponsesApi`] transport.
#[derive(Clone, Debug)]
pub struct CompletionAdapter<T> {
    transport: T,
    default_model: String,
}

impl<T> CompletionAdapter<T> {
    pub fn new(transport: T, default_model: impl Into<String>) -> Self {
        Self {
            transport,
            default_model: default_model.into(),
        }
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    fn effective_model(&self, requested: Option<String>) -> String {
        requested
            .filter(|model| !model.is_empty())
            .unwrap_or_else(|| self.default_model.clone())
    }
}

#[async_trait]
impl<T> TextGeneration for CompletionAdapter<T>
where
    T: ResponsesApi,
{
    async fn generate_text(
        &self,
        request: TextGenerationRequest,
    ) -> Result<CompletionResult, AiError> {
        if request.prompt.trim().is_empty() {
            return Err(AiError::invalid_argument(EMPTY_PROMPT_MESSAGE));
        }

        let model = self.effective_model(request.model);
        let span = tracing::debug_span!("generate_text", model = %model);
        let payload = ResponsesRequest {
            model,
            input: request.prompt,
            temperature: request.temperature,
            max_output_tokens: request.max_output_tokens,
        };

        async move {
            let raw = self.transport.create_response(&payload).await?;
            // Serde would happily read a JSON array positionally into the struct.
            if !raw.is_object() {
                tracing::warn!("response payload was not a JSON object");
                return Err(AiError::contract_violation(MISSING_TEXT_MESSAGE));
            }
            let body: ResponseBody = serde_json::from_value(raw).map_err(|err| {
                tracing::warn!(error = %err, "response payload could not be decoded");
                AiError::contract_violation(MISSING_TEXT_MESSAGE)
            })?;

            let content = extract_text(&body).ok_or_else(|| {
                tracing::warn!("response carried neither output_text nor text blocks");
                AiError::contract_violation(MISSING_TEXT_MESSAGE)
            })?;

            tracing::debug!(
                chars = content.len(),
                usage_reported = body.usage.is_some(),
                "text generated"
            );
            Ok(CompletionResult {
                content,
                model: payload.model,
                usage: body.usage,
            })
        }
        .instrument(span)
        .await
    }
}
