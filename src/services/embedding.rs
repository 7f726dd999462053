//! Embedding generation for documents and queries
//!
//! The [`Embedder`] trait abstracts over the embedding backend so the index
//! and query engine do not care whether vectors come from the OpenAI API or
//! from the deterministic local embedder used in tests and offline runs.

use async_trait::async_trait;

use super::openai::{OpenAiClient, OpenAiError};

/// Provider-agnostic trait for embedding generation
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate embeddings for a batch of texts, one vector per input,
    /// in input order. All vectors are unit length.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, OpenAiError>;

    /// Number of dimensions in the produced vectors
    fn dimensions(&self) -> usize;

    /// Model identifier recorded in persisted index metadata
    fn model_name(&self) -> &str;
}

#[async_trait]
impl Embedder for OpenAiClient {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, OpenAiError> {
        self.create_embeddings(texts).await
    }

    fn dimensions(&self) -> usize {
        self.embedding_dimensions()
    }

    fn model_name(&self) -> &str {
        self.embedding_model()
    }
}

/// Deterministic local embedder.
///
/// Produces unit-length vectors seeded from a hash of the text, so the same
/// text always maps to the same vector. Useful for tests and offline
/// development; the vectors carry no semantic meaning.
pub struct HashEmbedder {
    dimensions: usize,
}

/// Model name recorded when the hash embedder built an index
pub const HASH_EMBEDDER_MODEL: &str = "hash-embedder";

impl HashEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let seed = hasher.finish();

        // Deterministic pseudo-random values from a simple LCG
        let mut embedding = Vec::with_capacity(self.dimensions);
        let mut rng_state = seed;

        for _ in 0..self.dimensions {
            rng_state = rng_state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = (rng_state >> 32) as u32;
            // Normalize to [-1, 1] range
            let normalized = (value as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(normalized);
        }

        // Normalize the vector to unit length (L2 normalization)
        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut embedding {
                *value /= magnitude;
            }
        }

        embedding
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(384)
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, OpenAiError> {
        Ok(texts.iter().map(|text| self.embed_one(text)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        HASH_EMBEDDER_MODEL
    }
}
