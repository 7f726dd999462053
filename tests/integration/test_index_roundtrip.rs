//! End-to-end pipeline test: load documents, build an index, query it,
//! persist it, reload it, and query again. Uses the deterministic hash
//! embedder and a canned LLM so no network access is needed.

use async_trait::async_trait;
use docuchat::index::{Storage, VectorIndex};
use docuchat::services::embedding::{Embedder, HashEmbedder};
use docuchat::services::llm::{GenerateRequest, GenerateResponse, LlmClient};
use docuchat::services::openai::OpenAiError;
use docuchat::services::{DirectoryReader, QueryEngine, TextSplitter};
use std::fs;
use tempfile::TempDir;

struct CannedLlm;

#[async_trait]
impl LlmClient for CannedLlm {
    async fn generate(&self, _request: GenerateRequest) -> Result<GenerateResponse, OpenAiError> {
        Ok(GenerateResponse {
            text: "The author worked on writing and programming.".to_string(),
            ..Default::default()
        })
    }

    fn provider_name(&self) -> &'static str {
        "canned"
    }

    fn model_name(&self) -> &str {
        "canned-model"
    }
}

fn write_corpus(dir: &std::path::Path) {
    fs::write(
        dir.join("growing_up.txt"),
        "Before college the two main things I worked on, outside of school, \
         were writing and programming.",
    )
    .unwrap();
    fs::write(
        dir.join("college.txt"),
        "I learned Lisp in college and it expanded my concept of a program.",
    )
    .unwrap();
}

#[tokio::test]
async fn test_full_pipeline_roundtrip() {
    let data_dir = TempDir::new().unwrap();
    let storage_dir = TempDir::new().unwrap();
    write_corpus(data_dir.path());

    // load config → read documents
    let documents = DirectoryReader::new(data_dir.path()).load_data().unwrap();
    assert_eq!(documents.len(), 2);

    // build index
    let splitter = TextSplitter::new(512, 64).unwrap();
    let embedder = HashEmbedder::new(128);
    let index = VectorIndex::from_documents(documents, &splitter, &embedder)
        .await
        .unwrap();
    assert_eq!(index.stats().document_count, 2);

    // query
    let llm = CannedLlm;
    let engine = QueryEngine::new(&index, &embedder, &llm);
    let response = engine
        .query("What did the author do growing up?")
        .await
        .unwrap();
    assert!(!response.answer.is_empty());
    assert_eq!(response.sources.len(), 2);

    // persist
    let storage = Storage::new(storage_dir.path());
    assert!(!storage.exists());
    storage.persist(&index).unwrap();
    assert!(storage.exists());

    // reload
    let reloaded = storage.load().unwrap();
    assert_eq!(reloaded.stats(), index.stats());

    // the reloaded index retrieves the same nodes in the same order
    let reloaded_engine = QueryEngine::new(&reloaded, &embedder, &llm);
    let reloaded_response = reloaded_engine
        .query("What did the author do growing up?")
        .await
        .unwrap();

    let original_ids: Vec<_> = response.sources.iter().map(|s| s.node.id).collect();
    let reloaded_ids: Vec<_> = reloaded_response.sources.iter().map(|s| s.node.id).collect();
    assert_eq!(original_ids, reloaded_ids);
}

#[tokio::test]
async fn test_persist_overwrites_previous_index() {
    let data_dir = TempDir::new().unwrap();
    let storage_dir = TempDir::new().unwrap();
    write_corpus(data_dir.path());

    let splitter = TextSplitter::default();
    let embedder = HashEmbedder::new(64);
    let storage = Storage::new(storage_dir.path());

    let documents = DirectoryReader::new(data_dir.path()).load_data().unwrap();
    let index = VectorIndex::from_documents(documents, &splitter, &embedder)
        .await
        .unwrap();
    storage.persist(&index).unwrap();

    // Re-index with one document removed
    fs::remove_file(data_dir.path().join("college.txt")).unwrap();
    let documents = DirectoryReader::new(data_dir.path()).load_data().unwrap();
    let smaller = VectorIndex::from_documents(documents, &splitter, &embedder)
        .await
        .unwrap();
    storage.persist(&smaller).unwrap();

    let reloaded = storage.load().unwrap();
    assert_eq!(reloaded.stats(), smaller.stats());
    assert_eq!(reloaded.stats().document_count, 1);
}

#[tokio::test]
async fn test_retrieval_prefers_exact_chunk() {
    let data_dir = TempDir::new().unwrap();
    write_corpus(data_dir.path());

    let documents = DirectoryReader::new(data_dir.path()).load_data().unwrap();
    let splitter = TextSplitter::default();
    let embedder = HashEmbedder::new(128);
    let index = VectorIndex::from_documents(documents, &splitter, &embedder)
        .await
        .unwrap();

    // Querying with a chunk's exact text must rank that chunk first, since
    // the hash embedder maps identical text to identical vectors.
    let target = index.nodes()[0].clone();
    let query_vecs = embedder.embed(&[target.text.clone()]).await.unwrap();

    let results = index.top_k(&query_vecs[0], 1).unwrap();
    assert_eq!(results[0].node.id, target.id);
    assert!((results[0].score - 1.0).abs() < 1e-5);
}
