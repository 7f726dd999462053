use anyhow::{anyhow, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::index::{Storage, VectorIndex};
use crate::services::{DirectoryReader, QueryEngine, TextSplitter};

/// One-shot pipeline: index a folder, answer a question, persist the index,
/// reload it from disk and confirm the reload matches.
pub async fn handle_ask_command(
    data_dir: String,
    question: String,
    storage_dir: String,
    top_k: Option<usize>,
) -> Result<()> {
    let client = super::openai_client()?;
    let splitter = TextSplitter::default();

    let documents = DirectoryReader::new(&data_dir).load_data()?;
    println!(
        "Loaded {} documents from {}",
        documents.len(),
        style(&data_dir).cyan()
    );

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("Building index...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let index = VectorIndex::from_documents(documents, &splitter, &client).await?;
    pb.finish_and_clear();

    let mut engine = QueryEngine::new(&index, &client, &client);
    if let Some(top_k) = top_k {
        engine = engine.with_top_k(top_k);
    }

    let response = engine.query(&question).await?;
    super::query::print_response(&question, &response);

    // Persist, then reload to prove the stored index is usable
    let storage = Storage::new(&storage_dir);
    storage.persist(&index)?;

    let reloaded = storage.load()?;
    if reloaded.stats() != index.stats() {
        return Err(anyhow!(
            "reloaded index does not match: {:?} vs {:?}",
            reloaded.stats(),
            index.stats()
        ));
    }

    println!();
    println!(
        "{} {} chunks persisted to {} and reloaded",
        style("Verified:").bold().green(),
        reloaded.len(),
        storage.dir().display()
    );

    Ok(())
}
