use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{AiError, TokenUsage};

#[derive(Clone, Debug, PartialEq)]
pub struct EmbeddingRequest {
    pub texts: Vec<String>,
    pub model: Option<String>,
}

impl EmbeddingRequest {
    pub fn new(texts: Vec<String>) -> Self {
        Self { texts, model: None }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// One vector per input text, in input order.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct EmbeddingResult {
    pub embeddings: Vec<Vec<f32>>,
    pub model: String,
    pub usage: Option<TokenUsage>,
}

#[async_trait]
pub trait EmbeddingGeneration: Send + Sync {
    async fn create_embeddings(&self, request: EmbeddingRequest)
        -> Result<EmbeddingResult, AiError>;
}
