use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::debug;

use super::errors::{OpenAiError, RetryError};
use super::models::{
    ChatCompletionRequest, ChatCompletionResponse, EmbeddingsRequest, EmbeddingsResponse,
};
use super::retry::{with_retry, RetryConfig};
use crate::env::apis as env_vars;

const OPENAI_API_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1536;
const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
const REQUEST_TIMEOUT_SECONDS: u64 = 120;

/// Maximum number of inputs sent in a single embeddings request
pub const MAX_EMBEDDING_BATCH: usize = 128;

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub embedding_model: String,
    pub embedding_dimensions: usize,
    pub chat_model: String,
    pub timeout: Duration,
    pub max_retries: usize,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var(env_vars::OPENAI_API_KEY).unwrap_or_default(),
            base_url: std::env::var(env_vars::OPENAI_BASE_URL)
                .unwrap_or_else(|_| OPENAI_API_BASE_URL.to_string()),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECONDS),
            max_retries: 3,
        }
    }
}

impl OpenAiConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            ..Default::default()
        }
    }

    pub fn with_embedding_model(mut self, model: String, dimensions: usize) -> Self {
        self.embedding_model = model;
        self.embedding_dimensions = dimensions;
        self
    }

    pub fn with_chat_model(mut self, model: String) -> Self {
        self.chat_model = model;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn validate(&self) -> Result<(), OpenAiError> {
        if self.api_key.is_empty() {
            return Err(OpenAiError::ConfigurationError {
                message: "OpenAI API key is required".to_string(),
            });
        }

        if self.base_url.is_empty() {
            return Err(OpenAiError::ConfigurationError {
                message: "Base URL cannot be empty".to_string(),
            });
        }

        if self.embedding_model.is_empty() || self.chat_model.is_empty() {
            return Err(OpenAiError::ConfigurationError {
                message: "Model name cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

#[derive(Clone)]
pub struct OpenAiClient {
    config: OpenAiConfig,
    client: Client,
    rate_limiter: Arc<Semaphore>,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, OpenAiError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent("docuchat/0.1")
            .build()
            .map_err(|e| OpenAiError::ConfigurationError {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        // Rate limiter - at most 8 concurrent in-flight requests
        let rate_limiter = Arc::new(Semaphore::new(8));

        Ok(Self {
            config,
            client,
            rate_limiter,
        })
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    pub fn embedding_model(&self) -> &str {
        &self.config.embedding_model
    }

    pub fn embedding_dimensions(&self) -> usize {
        self.config.embedding_dimensions
    }

    pub fn chat_model(&self) -> &str {
        &self.config.chat_model
    }

    /// Generate embeddings for the given texts.
    ///
    /// Inputs are split into batches of at most [`MAX_EMBEDDING_BATCH`] and the
    /// returned vectors are in the same order as the inputs.
    pub async fn create_embeddings(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, OpenAiError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut vectors = Vec::with_capacity(texts.len());
        for batch in texts.chunks(MAX_EMBEDDING_BATCH) {
            let request =
                EmbeddingsRequest::new(self.config.embedding_model.clone(), batch.to_vec());

            let retry_config = RetryConfig::new(self.config.max_retries)
                .with_total_timeout(self.config.timeout);

            let response = with_retry(retry_config, || self.embeddings_once(request.clone()))
                .await
                .map_err(|retry_error| self.unwrap_retry_error(retry_error))?;

            if let Some(usage) = &response.usage {
                debug!(
                    prompt_tokens = usage.prompt_tokens,
                    batch_size = batch.len(),
                    "Embeddings batch complete"
                );
            }

            let batch_vectors = response.into_vectors();
            if batch_vectors.len() != batch.len() {
                return Err(OpenAiError::InvalidResponse {
                    message: format!(
                        "Expected {} embeddings, got {}",
                        batch.len(),
                        batch_vectors.len()
                    ),
                });
            }

            for vector in &batch_vectors {
                if vector.len() != self.config.embedding_dimensions {
                    return Err(OpenAiError::InvalidResponse {
                        message: format!(
                            "Expected {} dimensions, got {}",
                            self.config.embedding_dimensions,
                            vector.len()
                        ),
                    });
                }
            }

            vectors.extend(batch_vectors);
        }

        Ok(vectors)
    }

    async fn embeddings_once(
        &self,
        request: EmbeddingsRequest,
    ) -> Result<EmbeddingsResponse, OpenAiError> {
        let _permit =
            self.rate_limiter
                .acquire()
                .await
                .map_err(|_| OpenAiError::RateLimitExceeded {
                    message: "Rate limiter closed".to_string(),
                })?;

        let url = format!("{}/embeddings", self.config.base_url);
        debug!("Making embeddings request to: {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(OpenAiError::from_reqwest_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(OpenAiError::from_reqwest_error)?;

        if !status.is_success() {
            return Err(OpenAiError::from_status_and_body(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| OpenAiError::ParseError {
            message: format!("Failed to parse embeddings response: {e}"),
        })
    }

    /// Send a chat completion request.
    pub async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, OpenAiError> {
        let retry_config =
            RetryConfig::new(self.config.max_retries).with_total_timeout(self.config.timeout);

        let response = with_retry(retry_config, || self.chat_completion_once(request.clone()))
            .await
            .map_err(|retry_error| self.unwrap_retry_error(retry_error))?;

        response
            .validate()
            .map_err(|message| OpenAiError::InvalidResponse { message })?;

        Ok(response)
    }

    async fn chat_completion_once(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, OpenAiError> {
        let _permit =
            self.rate_limiter
                .acquire()
                .await
                .map_err(|_| OpenAiError::RateLimitExceeded {
                    message: "Rate limiter closed".to_string(),
                })?;

        let url = format!("{}/chat/completions", self.config.base_url);
        debug!(
            "Making chat completion request to: {} (~{} tokens)",
            url,
            request.estimate_tokens()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(OpenAiError::from_reqwest_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(OpenAiError::from_reqwest_error)?;

        if !status.is_success() {
            return Err(OpenAiError::from_status_and_body(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| OpenAiError::ParseError {
            message: format!("Failed to parse chat completion response: {e}"),
        })
    }

    fn unwrap_retry_error(&self, retry_error: RetryError) -> OpenAiError {
        match retry_error {
            RetryError::NonRetryable { source } => source,
            RetryError::MaxAttemptsExceeded => OpenAiError::RateLimitExceeded {
                message: "Maximum retry attempts exceeded".to_string(),
            },
            RetryError::TimeoutExceeded => OpenAiError::Timeout {
                timeout_ms: self.config.timeout.as_millis() as u64,
            },
        }
    }
}
