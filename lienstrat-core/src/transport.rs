//! Seams to the hosted model provider.
//!
//! Transports return the raw JSON body; decoding into the crate's own shapes
//! happens in the adapters so that every payload variant is reconciled in one
//! place.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::AiError;

/// Body of a single text-generation call.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ResponsesRequest {
    pub model: String,
    pub input: String,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// Body of a single batch-embedding call.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct EmbeddingsRequest {
    pub model: String,
    pub input: Vec<String>,
}

#[async_trait]
pub trait ResponsesApi: Send + Sync {
    async fn create_response(&self, request: &ResponsesRequest) -> Result<Value, AiError>;
}

#[async_trait]
pub trait EmbeddingsApi: Send + Sync {
    async fn create_embeddings(&self, request: &EmbeddingsRequest) -> Result<Value, AiError>;
}

#[async_trait]
impl<T> ResponsesApi for Arc<T>
where
    T: ResponsesApi + ?Sized,
{
    async fn create_response(&self, request: &ResponsesRequest) -> Result<Value, AiError> {
        (**self).create_response(request).await
    }
}

#[async_trait]
impl<T> EmbeddingsApi for Arc<T>
where
    T: EmbeddingsApi + ?Sized,
{
    async fn create_embeddings(&self, request: &EmbeddingsRequest) -> Result<Value, AiError> {
        (**self).create_embeddings(request).await
    }
}
