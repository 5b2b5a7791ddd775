use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use async_trait::async_trait;

use lienstrat_core::{
    AiError, CompletionResult, EmbeddingGeneration, EmbeddingRequest, EmbeddingResult, Retrying,
    TextGeneration, TextGenerationRequest,
};

struct Flaky {
    failures_before_success: usize,
    failure: AiError,
    attempts: Arc<AtomicUsize>,
}

impl Flaky {
    fn new(failures_before_success: usize) -> Self {
        Self::failing_with(failures_before_success, AiError::unavailable("transient"))
    }

    fn failing_with(failures_before_success: usize, failure: AiError) -> Self {
        Self {
            failures_before_success,
            failure,
            attempts: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn attempts_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.attempts)
    }

    fn attempt(&self) -> Result<(), AiError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt <= self.failures_before_success {
            return Err(self.failure.clone());
        }
        Ok(())
    }
}

#[async_trait]
impl TextGeneration for Flaky {
    async fn generate_text(
        &self,
        request: TextGenerationRequest,
    ) -> Result<CompletionResult, AiError> {
        self.attempt()?;
        Ok(CompletionResult {
            content: format!("ok:{}", request.prompt),
            model: "gpt-test".to_string(),
            usage: None,
        })
    }
}

#[async_trait]
impl EmbeddingGeneration for Flaky {
    async fn create_embeddings(
        &self,
        request: EmbeddingRequest,
    ) -> Result<EmbeddingResult, AiError> {
        self.attempt()?;
        Ok(EmbeddingResult {
            embeddings: request.texts.iter().map(|_| vec![0.5]).collect(),
            model: "embed-test".to_string(),
            usage: None,
        })
    }
}

#[tokio::test]
async fn single_attempt_surfaces_first_failure() {
    let flaky = Flaky::new(1);
    let attempts = flaky.attempts_counter();
    let retrying = Retrying::new(flaky, 1).with_backoff(Duration::ZERO);

    let err = retrying
        .generate_text(TextGenerationRequest::new("hi"))
        .await
        .unwrap_err();

    assert_eq!(err, AiError::unavailable("transient"));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn transient_failures_are_retried_until_success() {
    let flaky = Flaky::new(2);
    let attempts = flaky.attempts_counter();
    let retrying = Retrying::new(flaky, 3).with_backoff(Duration::ZERO);

    let result = retrying
        .generate_text(TextGenerationRequest::new("hi"))
        .await
        .unwrap();

    assert_eq!(result.content, "ok:hi");
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn exhausted_attempts_return_last_error() {
    let flaky = Flaky::new(5);
    let attempts = flaky.attempts_counter();
    let retrying = Retrying::new(flaky, 2).with_backoff(Duration::ZERO);

    let err = retrying
        .create_embeddings(EmbeddingRequest::new(vec!["a".to_string()]))
        .await
        .unwrap_err();

    assert!(matches!(err, AiError::UpstreamUnavailable(_)));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn contract_violations_are_not_retried() {
    let flaky = Flaky::failing_with(1, AiError::contract_violation("no text"));
    let attempts = flaky.attempts_counter();
    let retrying = Retrying::new(flaky, 3).with_backoff(Duration::ZERO);

    let err = retrying
        .generate_text(TextGenerationRequest::new("hi"))
        .await
        .unwrap_err();

    assert_eq!(err, AiError::contract_violation("no text"));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[test]
fn zero_attempts_is_clamped_to_one() {
    let retrying = Retrying::new(Flaky::new(0), 0);
    assert_eq!(retrying.max_attempts(), 1);
}
