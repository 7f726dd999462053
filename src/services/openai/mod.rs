pub mod client;
pub mod errors;
pub mod models;
pub mod retry;

pub use client::{OpenAiClient, OpenAiConfig, MAX_EMBEDDING_BATCH};
pub use errors::{OpenAiError, RetryError};
pub use models::{
    ChatCompletionRequest, ChatCompletionResponse, ChatChoice, ChatMessage, EmbeddingObject,
    EmbeddingsRequest, EmbeddingsResponse, Usage,
};
pub use retry::{with_retry, RetryConfig, RetryHandler};
