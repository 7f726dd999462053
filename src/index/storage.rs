//! Index persistence.
//!
//! An index is persisted as three JSON files in a storage directory:
//! `docstore.json` (documents and nodes), `vector_store.json` (node id to
//! embedding vector), and `index_meta.json` (format version, embedding
//! model, dimensions). Loading validates that the three files agree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

use super::vector_index::VectorIndex;
use crate::error::{DocuChatError, Result};
use crate::models::{Document, Node};

/// Default persistence directory, matching the conventional `./storage`
pub const DEFAULT_STORAGE_DIR: &str = "./storage";

const DOCSTORE_FILE: &str = "docstore.json";
const VECTOR_STORE_FILE: &str = "vector_store.json";
const META_FILE: &str = "index_meta.json";

const STORAGE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct DocStoreFile {
    documents: Vec<Document>,
    nodes: Vec<Node>,
}

#[derive(Debug, Serialize, Deserialize)]
struct VectorStoreFile {
    embeddings: HashMap<Uuid, Vec<f32>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct IndexMeta {
    version: u32,
    embedding_model: String,
    dimensions: usize,
    node_count: usize,
    created_at: DateTime<Utc>,
}

/// Storage context binding an index to a directory on disk.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether a persisted index exists in the storage directory.
    pub fn exists(&self) -> bool {
        self.dir.join(META_FILE).exists()
    }

    /// Persist the index to the storage directory.
    pub fn persist(&self, index: &VectorIndex) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let docstore = DocStoreFile {
            documents: index.documents().to_vec(),
            nodes: index.nodes().to_vec(),
        };

        let embeddings: HashMap<Uuid, Vec<f32>> = index
            .nodes()
            .iter()
            .zip(index.embeddings())
            .map(|(node, embedding)| (node.id, embedding.clone()))
            .collect();
        let vector_store = VectorStoreFile { embeddings };

        let meta = IndexMeta {
            version: STORAGE_FORMAT_VERSION,
            embedding_model: index.embedding_model().to_string(),
            dimensions: index.dimensions(),
            node_count: index.len(),
            created_at: Utc::now(),
        };

        self.write_json(DOCSTORE_FILE, &docstore)?;
        self.write_json(VECTOR_STORE_FILE, &vector_store)?;
        self.write_json(META_FILE, &meta)?;

        info!(
            dir = %self.dir.display(),
            nodes = index.len(),
            "Index persisted"
        );

        Ok(())
    }

    /// Load a persisted index from the storage directory.
    pub fn load(&self) -> Result<VectorIndex> {
        if !self.dir.is_dir() {
            return Err(DocuChatError::not_found(format!(
                "storage directory {}",
                self.dir.display()
            )));
        }

        let meta: IndexMeta = self.read_json(META_FILE)?;
        if meta.version != STORAGE_FORMAT_VERSION {
            return Err(DocuChatError::storage(format!(
                "unsupported storage format version {} (expected {})",
                meta.version, STORAGE_FORMAT_VERSION
            )));
        }

        let docstore: DocStoreFile = self.read_json(DOCSTORE_FILE)?;
        let mut vector_store: VectorStoreFile = self.read_json(VECTOR_STORE_FILE)?;

        if docstore.nodes.len() != meta.node_count {
            return Err(DocuChatError::storage(format!(
                "docstore has {} nodes but metadata records {}",
                docstore.nodes.len(),
                meta.node_count
            )));
        }

        // Reunite each node with its vector; every node must have one and
        // no vector may be left over.
        let mut embeddings = Vec::with_capacity(docstore.nodes.len());
        for node in &docstore.nodes {
            let embedding = vector_store.embeddings.remove(&node.id).ok_or_else(|| {
                DocuChatError::storage(format!("missing embedding for node {}", node.id))
            })?;
            embeddings.push(embedding);
        }
        if !vector_store.embeddings.is_empty() {
            return Err(DocuChatError::storage(format!(
                "{} orphaned embeddings in vector store",
                vector_store.embeddings.len()
            )));
        }

        let index = VectorIndex::from_parts(
            docstore.documents,
            docstore.nodes,
            embeddings,
            meta.dimensions,
            meta.embedding_model,
        )?;

        debug!(
            dir = %self.dir.display(),
            nodes = index.len(),
            "Index loaded from storage"
        );

        Ok(index)
    }

    fn write_json<T: Serialize>(&self, file_name: &str, value: &T) -> Result<()> {
        let path = self.dir.join(file_name);
        let contents = serde_json::to_string_pretty(value)?;

        // Write to a temp file first so a crash never leaves a half-written
        // store behind.
        let tmp_path = self.dir.join(format!("{file_name}.tmp"));
        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, &path)?;

        Ok(())
    }

    fn read_json<T: for<'de> Deserialize<'de>>(&self, file_name: &str) -> Result<T> {
        let path = self.dir.join(file_name);
        if !path.exists() {
            return Err(DocuChatError::not_found(format!("{}", path.display())));
        }

        let contents = fs::read_to_string(&path)?;
        serde_json::from_str(&contents).map_err(|e| {
            DocuChatError::storage(format!("failed to parse {}: {e}", path.display()))
        })
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_DIR)
    }
}
