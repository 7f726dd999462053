//! In-memory vector index over document nodes.

use std::collections::HashSet;
use tracing::{debug, info};

use crate::error::{DocuChatError, Result};
use crate::models::{Document, Node, ScoredNode};
use crate::services::embedding::Embedder;
use crate::services::splitter::TextSplitter;

/// Statistics about a vector index.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexStats {
    pub node_count: usize,
    pub document_count: usize,
    pub dimensions: usize,
    pub embedding_model: String,
}

/// Vector index mapping document chunks to embedding vectors for
/// similarity search.
pub struct VectorIndex {
    documents: Vec<Document>,
    nodes: Vec<Node>,
    embeddings: Vec<Vec<f32>>,
    dimensions: usize,
    embedding_model: String,
}

impl VectorIndex {
    /// Create an empty index for the given embedding space.
    pub fn new(dimensions: usize, embedding_model: String) -> Self {
        Self {
            documents: Vec::new(),
            nodes: Vec::new(),
            embeddings: Vec::new(),
            dimensions,
            embedding_model,
        }
    }

    /// Build an index from documents: split into nodes, embed, store.
    pub async fn from_documents(
        documents: Vec<Document>,
        splitter: &TextSplitter,
        embedder: &dyn Embedder,
    ) -> Result<Self> {
        let nodes = splitter.split_documents(&documents);
        if nodes.is_empty() {
            return Err(DocuChatError::index(
                "documents produced no indexable chunks",
            ));
        }

        debug!(
            documents = documents.len(),
            nodes = nodes.len(),
            "Embedding document chunks"
        );

        let texts: Vec<String> = nodes.iter().map(|node| node.text.clone()).collect();
        let embeddings = embedder
            .embed(&texts)
            .await
            .map_err(|e| DocuChatError::external_service("openai", e.to_string()))?;

        let mut index = Self::new(embedder.dimensions(), embedder.model_name().to_string());
        index.documents = documents;
        for (node, embedding) in nodes.into_iter().zip(embeddings) {
            index.insert(node, embedding)?;
        }

        info!(
            nodes = index.nodes.len(),
            dimensions = index.dimensions,
            model = %index.embedding_model,
            "Vector index built"
        );

        Ok(index)
    }

    /// Reassemble an index from persisted parts, validating consistency.
    pub(crate) fn from_parts(
        documents: Vec<Document>,
        nodes: Vec<Node>,
        embeddings: Vec<Vec<f32>>,
        dimensions: usize,
        embedding_model: String,
    ) -> Result<Self> {
        if nodes.len() != embeddings.len() {
            return Err(DocuChatError::index(format!(
                "{} nodes but {} embeddings",
                nodes.len(),
                embeddings.len()
            )));
        }

        let mut seen = HashSet::new();
        for node in &nodes {
            if !seen.insert(node.id) {
                return Err(DocuChatError::index(format!(
                    "duplicate node id {}",
                    node.id
                )));
            }
        }

        let mut index = Self::new(dimensions, embedding_model);
        index.documents = documents;
        for (node, embedding) in nodes.into_iter().zip(embeddings) {
            index.insert(node, embedding)?;
        }

        Ok(index)
    }

    /// Insert a node with its embedding.
    pub fn insert(&mut self, node: Node, embedding: Vec<f32>) -> Result<()> {
        if embedding.len() != self.dimensions {
            return Err(DocuChatError::index(format!(
                "embedding for node {} has {} dimensions, index expects {}",
                node.id,
                embedding.len(),
                self.dimensions
            )));
        }

        self.nodes.push(node);
        self.embeddings.push(embedding);
        Ok(())
    }

    /// Retrieve the `k` nodes most similar to the query vector.
    ///
    /// Results are ordered by descending cosine similarity with ties broken
    /// by insertion order. An empty index yields an empty result; `k` larger
    /// than the node count yields every node.
    pub fn top_k(&self, query_vector: &[f32], k: usize) -> Result<Vec<ScoredNode>> {
        if query_vector.len() != self.dimensions {
            return Err(DocuChatError::index(format!(
                "query vector has {} dimensions, index expects {}",
                query_vector.len(),
                self.dimensions
            )));
        }

        let mut scored: Vec<(usize, f32)> = self
            .embeddings
            .iter()
            .enumerate()
            .map(|(i, embedding)| (i, cosine_similarity(query_vector, embedding)))
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(i, score)| ScoredNode {
                node: self.nodes[i].clone(),
                score,
            })
            .collect())
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            node_count: self.nodes.len(),
            document_count: self.documents.len(),
            dimensions: self.dimensions,
            embedding_model: self.embedding_model.clone(),
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn embeddings(&self) -> &[Vec<f32>] {
        &self.embeddings
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Cosine similarity between two vectors of equal length.
///
/// Zero-magnitude vectors score 0.0 rather than dividing by zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
