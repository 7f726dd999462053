//! Failure-path coverage across the pipeline: missing inputs, bad
//! configuration, and mismatched persisted state must all surface as typed
//! errors instead of panics.

use async_trait::async_trait;
use docuchat::index::{Storage, VectorIndex};
use docuchat::services::embedding::HashEmbedder;
use docuchat::services::llm::{GenerateRequest, GenerateResponse, LlmClient};
use docuchat::services::openai::{OpenAiClient, OpenAiConfig, OpenAiError};
use docuchat::services::{DirectoryReader, QueryEngine, TextSplitter};
use docuchat::DocuChatError;
use std::fs;
use tempfile::TempDir;

struct FailingLlm;

#[async_trait]
impl LlmClient for FailingLlm {
    async fn generate(&self, _request: GenerateRequest) -> Result<GenerateResponse, OpenAiError> {
        Err(OpenAiError::ServiceUnavailable {
            message: "synthetic outage".to_string(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "failing"
    }

    fn model_name(&self) -> &str {
        "failing-model"
    }
}

#[test]
fn test_missing_input_directory() {
    let result = DirectoryReader::new("/no/such/docuchat/data").load_data();
    assert!(matches!(result, Err(DocuChatError::NotFound { .. })));
}

#[test]
fn test_missing_storage_directory() {
    let storage = Storage::new("/no/such/docuchat/storage");
    assert!(matches!(
        storage.load(),
        Err(DocuChatError::NotFound { .. })
    ));
}

#[test]
fn test_splitter_rejects_bad_overlap() {
    assert!(matches!(
        TextSplitter::new(128, 128),
        Err(DocuChatError::Validation { .. })
    ));
}

#[test]
fn test_client_requires_api_key() {
    let config = OpenAiConfig {
        api_key: String::new(),
        ..OpenAiConfig::new("unused".to_string())
    };
    assert!(OpenAiClient::new(config).is_err());
}

#[tokio::test]
async fn test_llm_failure_propagates_as_external_service() {
    let data_dir = TempDir::new().unwrap();
    fs::write(data_dir.path().join("doc.txt"), "some indexed text").unwrap();

    let documents = DirectoryReader::new(data_dir.path()).load_data().unwrap();
    let splitter = TextSplitter::default();
    let embedder = HashEmbedder::new(64);
    let index = VectorIndex::from_documents(documents, &splitter, &embedder)
        .await
        .unwrap();

    let llm = FailingLlm;
    let engine = QueryEngine::new(&index, &embedder, &llm);
    let result = engine.query("anything?").await;

    match result {
        Err(DocuChatError::ExternalService { service, .. }) => assert_eq!(service, "openai"),
        other => panic!("expected ExternalService error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_tampered_vector_store_detected() {
    let data_dir = TempDir::new().unwrap();
    let storage_dir = TempDir::new().unwrap();
    fs::write(data_dir.path().join("doc.txt"), "some indexed text").unwrap();

    let documents = DirectoryReader::new(data_dir.path()).load_data().unwrap();
    let splitter = TextSplitter::default();
    let embedder = HashEmbedder::new(64);
    let index = VectorIndex::from_documents(documents, &splitter, &embedder)
        .await
        .unwrap();

    let storage = Storage::new(storage_dir.path());
    storage.persist(&index).unwrap();

    // Empty the vector store so nodes have no embeddings on reload
    fs::write(
        storage_dir.path().join("vector_store.json"),
        r#"{"embeddings": {}}"#,
    )
    .unwrap();

    assert!(matches!(
        storage.load(),
        Err(DocuChatError::Storage { .. })
    ));
}
