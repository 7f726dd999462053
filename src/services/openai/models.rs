use serde::{Deserialize, Serialize};

/// Request body for POST /v1/embeddings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EmbeddingsRequest {
    pub model: String,
    pub input: Vec<String>,
}

impl EmbeddingsRequest {
    pub fn new(model: String, input: Vec<String>) -> Self {
        Self { model, input }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EmbeddingsResponse {
    pub data: Vec<EmbeddingObject>,
    pub model: String,
    pub usage: Option<Usage>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EmbeddingObject {
    pub index: usize,
    pub embedding: Vec<f32>,
}

impl EmbeddingsResponse {
    /// Extract embedding vectors ordered by their input index.
    ///
    /// The API documents that results may arrive out of order relative to the
    /// input batch, so callers must not rely on response ordering.
    pub fn into_vectors(mut self) -> Vec<Vec<f32>> {
        self.data.sort_by_key(|obj| obj.index);
        self.data.into_iter().map(|obj| obj.embedding).collect()
    }
}

/// Request body for POST /v1/chat/completions
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

impl ChatCompletionRequest {
    pub fn new(model: String, messages: Vec<ChatMessage>) -> Self {
        Self {
            model,
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature.clamp(0.0, 2.0));
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn estimate_tokens(&self) -> u32 {
        // Rough estimation, about 4 characters per token
        let total_chars: usize = self.messages.iter().map(|m| m.content.len()).sum();
        (total_chars / 4).max(1) as u32
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatCompletionResponse {
    pub id: Option<String>,
    pub model: Option<String>,
    pub choices: Vec<ChatChoice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatChoice {
    pub index: Option<u32>,
    pub message: ChatMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Usage {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

impl ChatCompletionResponse {
    pub fn extract_text(&self) -> Option<String> {
        self.choices.first().map(|choice| choice.message.content.clone())
    }

    pub fn get_token_usage(&self) -> Option<u32> {
        self.usage.as_ref().and_then(|usage| usage.total_tokens)
    }

    pub fn get_finish_reason(&self) -> Option<String> {
        self.choices
            .first()
            .and_then(|choice| choice.finish_reason.clone())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.choices.is_empty() {
            return Err("No choices in response".to_string());
        }

        if let Some(finish_reason) = &self.choices[0].finish_reason {
            match finish_reason.as_str() {
                "stop" => Ok(()),
                "length" => Ok(()), // Acceptable - just reached token limit
                "content_filter" => Err("Response blocked by content filter".to_string()),
                reason => Err(format!("Unexpected finish reason: {reason}")),
            }
        } else {
            Ok(())
        }
    }
}
