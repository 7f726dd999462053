use anyhow::Result;
use console::style;

use crate::index::Storage;
use crate::services::{QueryEngine, QueryResponse};

pub async fn handle_query_command(
    question: String,
    storage_dir: String,
    top_k: Option<usize>,
) -> Result<()> {
    let storage = Storage::new(&storage_dir);
    let index = storage.load()?;

    let embedder = super::embedder_for_index(&index)?;
    let llm = super::openai_client()?;

    let mut engine = QueryEngine::new(&index, embedder.as_ref(), &llm);
    if let Some(top_k) = top_k {
        engine = engine.with_top_k(top_k);
    }

    let response = engine.query(&question).await?;
    print_response(&question, &response);

    Ok(())
}

pub(super) fn print_response(question: &str, response: &QueryResponse) {
    println!("{} {}", style("Query:").bold(), question);
    println!("{} {}", style("Answer:").bold(), response.answer);
    println!();

    println!("Sources:");
    for scored in &response.sources {
        let preview: String = scored.node.text.chars().take(80).collect();
        println!(
            "  {} (score {:.3}): {}...",
            scored.node.file_name, scored.score, preview
        );
    }

    if let Some(usage) = &response.token_usage {
        if let Some(total) = usage.total_tokens {
            println!();
            println!("Tokens: {total} in {}ms", response.elapsed_ms);
        }
    }
}
