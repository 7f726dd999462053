use anyhow::Result;

use crate::index::Storage;

pub async fn handle_stats_command(storage_dir: String) -> Result<()> {
    let storage = Storage::new(&storage_dir);
    let index = storage.load()?;
    let stats = index.stats();

    println!("Index at {}:", storage.dir().display());
    println!("  Documents: {}", stats.document_count);
    println!("  Chunks: {}", stats.node_count);
    println!("  Dimensions: {}", stats.dimensions);
    println!("  Embedding model: {}", stats.embedding_model);

    Ok(())
}
