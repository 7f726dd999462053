use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A chunk of a source document; the unit of retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: Uuid,
    /// The document this node was split from
    pub document_id: Uuid,
    /// File name of the source document, carried for display
    pub file_name: String,
    pub text: String,
    /// Character offset of this chunk within the source document
    pub start_char: usize,
    pub end_char: usize,
}

impl Node {
    pub fn new(
        document_id: Uuid,
        file_name: String,
        text: String,
        start_char: usize,
        end_char: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            file_name,
            text,
            start_char,
            end_char,
        }
    }
}

/// A retrieved node with its similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredNode {
    pub node: Node,
    pub score: f32,
}
