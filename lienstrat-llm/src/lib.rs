mod client;
mod completion;
mod response;
mod text;

pub use client::{OpenAiClient, OpenAiClientBuilder, OpenAiClientError, OPENAI_BASE_URL};
pub use completion::{CompletionAdapter, EMPTY_PROMPT_MESSAGE, MISSING_TEXT_MESSAGE};
pub use response::{ContentBlock, OutputItem, ResponseBody};
pub use text::extract_text;

pub use lienstrat_core::{CompletionResult, TextGeneration, TextGenerationRequest, TokenUsage};
