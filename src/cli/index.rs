use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::index::{Storage, VectorIndex};
use crate::services::{DirectoryReader, TextSplitter};

pub async fn handle_index_command(
    data_dir: String,
    storage_dir: String,
    recursive: bool,
    chunk_size: usize,
    chunk_overlap: usize,
) -> Result<()> {
    let client = super::openai_client()?;
    let splitter = TextSplitter::new(chunk_size, chunk_overlap)?;

    let reader = DirectoryReader::new(&data_dir).with_recursive(recursive);
    let documents = reader.load_data()?;
    println!(
        "Loaded {} documents from {}",
        documents.len(),
        style(&data_dir).cyan()
    );

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("Embedding document chunks...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let index = VectorIndex::from_documents(documents, &splitter, &client).await?;
    pb.finish_and_clear();

    let storage = Storage::new(&storage_dir);
    storage.persist(&index)?;

    let stats = index.stats();
    println!("{}", style("Index built and persisted").bold().green());
    println!("  Documents: {}", stats.document_count);
    println!("  Chunks: {}", stats.node_count);
    println!(
        "  Embeddings: {} ({} dimensions)",
        stats.embedding_model, stats.dimensions
    );
    println!("  Storage: {}", storage.dir().display());

    Ok(())
}
