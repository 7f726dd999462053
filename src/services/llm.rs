//! Provider-agnostic LLM text generation
//!
//! This module defines the trait the query engine synthesizes answers
//! through, so tests can substitute a canned client for the OpenAI API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::openai::{ChatCompletionRequest, ChatMessage, OpenAiClient, OpenAiError};

/// Request for text generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// The prompt text to send to the LLM
    pub prompt: String,

    /// Maximum tokens to generate (optional, provider defaults apply)
    pub max_tokens: Option<u32>,

    /// Temperature for sampling (optional)
    pub temperature: Option<f32>,

    /// System instruction (optional)
    pub system_prompt: Option<String>,
}

impl GenerateRequest {
    pub fn new(prompt: String) -> Self {
        Self {
            prompt,
            max_tokens: None,
            temperature: None,
            system_prompt: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: String) -> Self {
        self.system_prompt = Some(system_prompt);
        self
    }
}

/// Response from text generation
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GenerateResponse {
    /// The generated text content
    pub text: String,

    /// Token usage (if reported by provider)
    pub token_usage: Option<TokenUsage>,

    /// Model used for generation
    pub model_used: Option<String>,

    /// Reason for stopping generation
    pub finish_reason: Option<String>,
}

/// Token usage information
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TokenUsage {
    pub input_tokens: Option<u32>,
    pub output_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

/// Provider-agnostic trait for LLM text generation
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate text completion from a prompt
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, OpenAiError>;

    /// Get the provider name for logging and debugging
    fn provider_name(&self) -> &'static str;

    /// Get the model identifier being used
    fn model_name(&self) -> &str;

    /// Estimate token count for a given text (rough approximation)
    ///
    /// Default implementation: ~4 characters per token
    fn estimate_tokens(&self, text: &str) -> u32 {
        (text.len() / 4).max(1) as u32
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, OpenAiError> {
        let mut messages = Vec::new();
        if let Some(system_prompt) = &request.system_prompt {
            messages.push(ChatMessage::system(system_prompt.clone()));
        }
        messages.push(ChatMessage::user(request.prompt.clone()));

        let mut chat_request = ChatCompletionRequest::new(self.chat_model().to_string(), messages);
        if let Some(temperature) = request.temperature {
            chat_request = chat_request.with_temperature(temperature);
        }
        if let Some(max_tokens) = request.max_tokens {
            chat_request = chat_request.with_max_tokens(max_tokens);
        }

        let response = self.create_chat_completion(chat_request).await?;

        let text = response
            .extract_text()
            .ok_or_else(|| OpenAiError::InvalidResponse {
                message: "No content in chat completion response".to_string(),
            })?;

        let token_usage = response.usage.as_ref().map(|usage| TokenUsage {
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        });

        Ok(GenerateResponse {
            text,
            token_usage,
            model_used: response.model.clone(),
            finish_reason: response.get_finish_reason(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        self.chat_model()
    }
}
