mod adapter;
mod payload;

pub use adapter::{
    EmbeddingAdapter, COUNT_MISMATCH_MESSAGE, DEFAULT_EMBEDDING_MODEL, EMPTY_INPUT_MESSAGE,
};
pub use payload::EmbeddingsBody;

pub use lienstrat_core::{EmbeddingGeneration, EmbeddingRequest, EmbeddingResult};
