pub mod ask;
pub mod config;
pub mod index;
pub mod query;
pub mod stats;

use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;

use crate::index::DEFAULT_STORAGE_DIR;
use crate::services::splitter::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};

#[derive(Parser)]
#[command(name = "docuchat")]
#[command(about = "Semantic question answering over a folder of documents")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a vector index from a folder of documents and persist it
    Index {
        /// Directory containing the documents to index
        data_dir: String,
        /// Directory the index is persisted to
        #[arg(short, long, default_value = DEFAULT_STORAGE_DIR)]
        storage: String,
        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,
        /// Chunk size in characters
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
        /// Overlap between consecutive chunks in characters
        #[arg(long, default_value_t = DEFAULT_CHUNK_OVERLAP)]
        chunk_overlap: usize,
    },
    /// Answer a question against a persisted index
    Query {
        /// The natural-language question
        question: String,
        /// Directory the index was persisted to
        #[arg(short, long, default_value = DEFAULT_STORAGE_DIR)]
        storage: String,
        /// Number of context chunks to retrieve
        #[arg(short, long)]
        top_k: Option<usize>,
    },
    /// Index a folder, answer one question, persist and verify the index
    Ask {
        /// Directory containing the documents to index
        data_dir: String,
        /// The natural-language question
        question: String,
        /// Directory the index is persisted to
        #[arg(short, long, default_value = DEFAULT_STORAGE_DIR)]
        storage: String,
        /// Number of context chunks to retrieve
        #[arg(short, long)]
        top_k: Option<usize>,
    },
    /// Show statistics for a persisted index
    Stats {
        /// Directory the index was persisted to
        #[arg(short, long, default_value = DEFAULT_STORAGE_DIR)]
        storage: String,
    },
    /// Manage configuration values
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Get a config value
    Get {
        /// Config key (e.g. openai-api-key)
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key (e.g. openai-api-key)
        key: String,
        /// Value to store
        value: String,
    },
    /// Remove a config value
    Unset {
        /// Config key (e.g. openai-api-key)
        key: String,
    },
    /// List all config values
    List,
}

/// Build an OpenAI client from the configured API key
/// (environment first, then config file).
pub(crate) fn openai_client() -> anyhow::Result<crate::services::openai::OpenAiClient> {
    use crate::services::openai::{OpenAiClient, OpenAiConfig};

    let api_key = crate::config::get_openai_api_key()?.ok_or_else(|| {
        anyhow::anyhow!(
            "OpenAI API key not configured. Set OPENAI_API_KEY (a .env file works) \
             or run: docuchat config set openai-api-key <key>"
        )
    })?;

    Ok(OpenAiClient::new(OpenAiConfig::new(api_key))?)
}

/// Pick the embedder matching the model a persisted index was built with.
pub(crate) fn embedder_for_index(
    index: &crate::index::VectorIndex,
) -> anyhow::Result<Box<dyn crate::services::Embedder>> {
    use crate::services::embedding::{HashEmbedder, HASH_EMBEDDER_MODEL};
    use crate::services::openai::{OpenAiClient, OpenAiConfig};

    if index.embedding_model() == HASH_EMBEDDER_MODEL {
        return Ok(Box::new(HashEmbedder::new(index.dimensions())));
    }

    let api_key = crate::config::get_openai_api_key()?.ok_or_else(|| {
        anyhow::anyhow!(
            "OpenAI API key not configured. Set OPENAI_API_KEY (a .env file works) \
             or run: docuchat config set openai-api-key <key>"
        )
    })?;

    let config = OpenAiConfig::new(api_key)
        .with_embedding_model(index.embedding_model().to_string(), index.dimensions());
    Ok(Box::new(OpenAiClient::new(config)?))
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let rt = Runtime::new()?;

        rt.block_on(async {
            match self.command {
                Commands::Index {
                    data_dir,
                    storage,
                    recursive,
                    chunk_size,
                    chunk_overlap,
                } => {
                    index::handle_index_command(
                        data_dir,
                        storage,
                        recursive,
                        chunk_size,
                        chunk_overlap,
                    )
                    .await
                }
                Commands::Query {
                    question,
                    storage,
                    top_k,
                } => query::handle_query_command(question, storage, top_k).await,
                Commands::Ask {
                    data_dir,
                    question,
                    storage,
                    top_k,
                } => ask::handle_ask_command(data_dir, question, storage, top_k).await,
                Commands::Stats { storage } => stats::handle_stats_command(storage).await,
                Commands::Config { command } => match command {
                    ConfigCommands::Get { key } => config::handle_get_command(key),
                    ConfigCommands::Set { key, value } => config::handle_set_command(key, value),
                    ConfigCommands::Unset { key } => config::handle_unset_command(key),
                    ConfigCommands::List => config::handle_list_command(),
                },
            }
        })
    }
}
