//! Natural-language queries against a vector index.
//!
//! The engine embeds the question, retrieves the most similar nodes, and
//! asks the LLM to answer from that context alone.

use std::time::Instant;
use tracing::{debug, info};

use crate::error::{DocuChatError, Result};
use crate::index::VectorIndex;
use crate::models::ScoredNode;
use crate::services::embedding::Embedder;
use crate::services::llm::{GenerateRequest, LlmClient, TokenUsage};

/// Default number of nodes retrieved per query
pub const DEFAULT_TOP_K: usize = 2;

const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that answers questions using only the provided context.";

/// Answer to a query along with the retrieval evidence.
#[derive(Debug, Clone)]
pub struct QueryResponse {
    pub answer: String,
    pub sources: Vec<ScoredNode>,
    pub token_usage: Option<TokenUsage>,
    pub elapsed_ms: u64,
}

/// Query engine over a vector index.
pub struct QueryEngine<'a> {
    index: &'a VectorIndex,
    embedder: &'a dyn Embedder,
    llm: &'a dyn LlmClient,
    top_k: usize,
}

impl<'a> QueryEngine<'a> {
    pub fn new(
        index: &'a VectorIndex,
        embedder: &'a dyn Embedder,
        llm: &'a dyn LlmClient,
    ) -> Self {
        Self {
            index,
            embedder,
            llm,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    /// Answer a natural-language question from the indexed documents.
    pub async fn query(&self, question: &str) -> Result<QueryResponse> {
        let question = question.trim();
        if question.is_empty() {
            return Err(DocuChatError::validation("question", "cannot be empty"));
        }

        let start_time = Instant::now();

        let query_vectors = self
            .embedder
            .embed(&[question.to_string()])
            .await
            .map_err(|e| DocuChatError::external_service("openai", e.to_string()))?;
        let query_vector = query_vectors
            .first()
            .ok_or_else(|| DocuChatError::external_service("openai", "no query embedding"))?;

        let sources = self.index.top_k(query_vector, self.top_k)?;
        debug!(
            retrieved = sources.len(),
            top_k = self.top_k,
            "Retrieved context nodes"
        );

        let prompt = build_prompt(question, &sources);

        let request = GenerateRequest::new(prompt)
            .with_system_prompt(SYSTEM_PROMPT.to_string())
            .with_temperature(0.1);

        let response = self
            .llm
            .generate(request)
            .await
            .map_err(|e| DocuChatError::external_service("openai", e.to_string()))?;

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        info!(
            question_chars = question.len(),
            answer_chars = response.text.len(),
            elapsed_ms,
            "Query answered"
        );

        Ok(QueryResponse {
            answer: response.text,
            sources,
            token_usage: response.token_usage,
            elapsed_ms,
        })
    }
}

/// Compose the context-stuffed prompt sent to the LLM.
fn build_prompt(question: &str, sources: &[ScoredNode]) -> String {
    let context = if sources.is_empty() {
        "No relevant context was found in the indexed documents.".to_string()
    } else {
        sources
            .iter()
            .map(|scored| format!("[{}]\n{}", scored.node.file_name, scored.node.text.trim()))
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    format!(
        "Context information is below.\n\
         ---------------------\n\
         {context}\n\
         ---------------------\n\
         Given the context information and not prior knowledge, answer the query.\n\
         Query: {question}\n\
         Answer:"
    )
}
