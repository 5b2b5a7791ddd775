use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::{
    AiError, CompletionResult, EmbeddingGeneration, EmbeddingRequest, EmbeddingResult,
    TextGeneration, TextGenerationRequest,
};

const DEFAULT_BACKOFF: Duration = Duration::from_millis(200);

/// Re-issues a failed call when the provider was unreachable.
///
/// With `max_attempts == 1` this is a pass-through.
pub struct Retrying<S> {
    inner: S,
    max_attempts: usize,
    backoff: Duration,
}

impl<S> Retrying<S> {
    pub fn new(inner: S, max_attempts: usize) -> Self {
        Self {
            inner,
            max_attempts: max_attempts.max(1),
            backoff: DEFAULT_BACKOFF,
        }
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    async fn run<T, F, Fut>(&self, mut call: F) -> Result<T, AiError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, AiError>>,
    {
        let mut delay = self.backoff;
        let mut attempt = 1;
        loop {
            match call().await {
                Ok(output) => return Ok(output),
                Err(error) if is_retryable(&error) && attempt < self.max_attempts => {
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %error,
                        "upstream call failed, retrying"
                    );
                    sleep(delay).await;
                    delay = delay.saturating_mul(2);
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}

pub fn is_retryable(error: &AiError) -> bool {
    matches!(error, AiError::UpstreamUnavailable(_))
}

#[async_trait]
impl<S> TextGeneration for Retrying<S>
where
    S: TextGeneration,
{
    async fn generate_text(
        &self,
        request: TextGenerationRequest,
    ) -> Result<CompletionResult, AiError> {
        self.run(|| self.inner.generate_text(request.clone())).await
    }
}

#[async_trait]
impl<S> EmbeddingGeneration for Retrying<S>
where
    S: EmbeddingGeneration,
{
    async fn create_embeddings(
        &self,
        request: EmbeddingRequest,
    ) -> Result<EmbeddingResult, AiError> {
        self.run(|| self.inner.create_embeddings(request.clone())).await
    }
}
