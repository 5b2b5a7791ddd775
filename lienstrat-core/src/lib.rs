mod completion;
mod embedding;
mod error;
mod retry;
mod transport;
mod usage;

pub use completion::{
    CompletionResult, TextGeneration, TextGenerationRequest, DEFAULT_TEMPERATURE,
};
pub use embedding::{EmbeddingGeneration, EmbeddingRequest, EmbeddingResult};
pub use error::AiError;
pub use retry::{is_retryable, Retrying};
pub use transport::{EmbeddingsApi, EmbeddingsRequest, ResponsesApi, ResponsesRequest};
pub use usage::{normalize_usage, TokenUsage};
