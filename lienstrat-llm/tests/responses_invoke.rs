use httpmock::prelude::*;
use secrecy::SecretString;
use serde_json::json;

use lienstrat_core::{AiError, TokenUsage};
use lienstrat_llm::{
    CompletionAdapter, OpenAiClient, TextGeneration, TextGenerationRequest, MISSING_TEXT_MESSAGE,
};

fn adapter(server: &MockServer) -> CompletionAdapter<OpenAiClient> {
    let client = OpenAiClient::builder()
        .base_url(server.url("/v1"))
        .api_key(SecretString::new("test-key".to_string()))
        .build()
        .expect("client");
    CompletionAdapter::new(client, "gpt-4")
}

#[tokio::test]
async fn aggregated_output_text_maps_to_content_and_usage() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/responses")
            .header("authorization", "Bearer test-key")
            .json_body(json!({
                "model": "gpt-4",
                "input": "Tell me a joke",
                "temperature": 0.2
            }));
        then.status(200).json_body(json!({
            "output_text": "hello world",
            "usage": {
                "input_tokens": 10,
                "output_tokens": 5,
                "total_tokens": 15,
                "reasoning_tokens": 2
            }
        }));
    });

    let result = adapter(&server)
        .generate_text(TextGenerationRequest::new("Tell me a joke"))
        .await
        .unwrap();

    assert_eq!(result.content, "hello world");
    assert_eq!(result.model, "gpt-4");
    assert_eq!(
        result.usage,
        Some(TokenUsage {
            input_tokens: Some(10),
            output_tokens: Some(5),
            total_tokens: Some(15),
            reasoning_tokens: Some(2),
        })
    );
    mock.assert();
}

#[tokio::test]
async fn structured_output_blocks_are_concatenated() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/v1/responses").json_body(json!({
            "model": "gpt-4.1-mini",
            "input": "Story time",
            "temperature": 0.5,
            "max_output_tokens": 100
        }));
        then.status(200).json_body(json!({
            "model": "gpt-4.1-mini-2025-04-14",
            "output": [
                {
                    "type": "message",
                    "content": [
                        {"type": "output_text", "text": "part one"},
                        {"type": "text", "text": " part two"}
                    ]
                }
            ],
            "usage": {"input_tokens": 3}
        }));
    });

    let request = TextGenerationRequest::new("Story time")
        .with_model("gpt-4.1-mini")
        .with_temperature(0.5)
        .with_max_output_tokens(100);
    let result = adapter(&server).generate_text(request).await.unwrap();

    assert_eq!(result.content, "part one part two");
    assert_eq!(result.model, "gpt-4.1-mini");
    assert_eq!(
        result.usage,
        Some(TokenUsage {
            input_tokens: Some(3),
            ..TokenUsage::default()
        })
    );
    mock.assert();
}

#[tokio::test]
async fn aggregated_text_wins_when_both_shapes_are_present() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/responses");
        then.status(200).json_body(json!({
            "output_text": "  aggregated  ",
            "output": [{"content": [{"type": "output_text", "text": "structured"}]}]
        }));
    });

    let result = adapter(&server)
        .generate_text(TextGenerationRequest::new("hi"))
        .await
        .unwrap();

    assert_eq!(result.content, "aggregated");
    assert_eq!(result.usage, None);
}

#[tokio::test]
async fn blank_prompt_is_rejected_without_calling_upstream() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/v1/responses");
        then.status(200).json_body(json!({"output_text": "unused"}));
    });

    let adapter = adapter(&server);
    for prompt in ["", "   "] {
        let err = adapter
            .generate_text(TextGenerationRequest::new(prompt))
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::InvalidArgument(_)));
    }

    mock.assert_hits(0);
}

#[tokio::test]
async fn response_without_text_is_a_contract_violation() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/responses");
        then.status(200)
            .json_body(json!({"usage": {"input_tokens": 1}}));
    });

    let err = adapter(&server)
        .generate_text(TextGenerationRequest::new("Prompt"))
        .await
        .unwrap_err();

    assert_eq!(err, AiError::contract_violation(MISSING_TEXT_MESSAGE));
}

#[tokio::test]
async fn provider_error_surfaces_as_unavailable() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/responses");
        then.status(429).json_body(json!({
            "error": {"message": "quota exceeded", "type": "insufficient_quota"}
        }));
    });

    let err = adapter(&server)
        .generate_text(TextGenerationRequest::new("hi"))
        .await
        .unwrap_err();

    assert_eq!(err, AiError::unavailable("HTTP 429: quota exceeded"));
}

#[tokio::test]
async fn non_json_success_body_is_a_contract_violation() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/responses");
        then.status(200).body("<html>oops</html>");
    });

    let err = adapter(&server)
        .generate_text(TextGenerationRequest::new("hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, AiError::UpstreamContractViolation(_)));
}

#[tokio::test]
async fn repeated_calls_yield_identical_results() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/v1/responses");
        then.status(200).json_body(json!({
            "output_text": "same",
            "usage": {"total_tokens": 4}
        }));
    });

    let adapter = adapter(&server);
    let first = adapter
        .generate_text(TextGenerationRequest::new("hi"))
        .await
        .unwrap();
    let second = adapter
        .generate_text(TextGenerationRequest::new("hi"))
        .await
        .unwrap();

    assert_eq!(first, second);
    mock.assert_hits(2);
}
