use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{AiError, TokenUsage};

pub const DEFAULT_TEMPERATURE: f32 = 0.2;

#[derive(Clone, Debug, PartialEq)]
pub struct TextGenerationRequest {
    pub prompt: String,
    /// Falls back to the adapter's default model when `None`.
    pub model: Option<String>,
    pub temperature: f32,
    pub max_output_tokens: Option<u32>,
}

impl TextGenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: None,
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct CompletionResult {
    pub content: String,
    pub model: String,
    pub usage: Option<TokenUsage>,
}

#[async_trait]
pub trait TextGeneration: Send + Sync {
    async fn generate_text(
        &self,
        request: TextGenerationRequest,
    ) -> Result<CompletionResult, AiError>;
}
