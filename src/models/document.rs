use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// A source document loaded from the input directory.
///
/// Documents are opaque text blobs; splitting into retrieval units happens
/// later in the text splitter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    /// File name relative to the input directory
    pub file_name: String,
    /// Absolute path the document was loaded from
    pub path: PathBuf,
    pub text: String,
}

impl Document {
    pub fn new(file_name: String, path: PathBuf, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name,
            path,
            text,
        }
    }

    /// Length of the document text in characters
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
