pub mod cli;
pub mod index;
pub mod models;
pub mod services;

pub mod config;
pub mod env;
pub mod error;
pub mod logging;

// Re-exports for convenience
pub use error::{DocuChatError, Result};
pub use index::{Storage, VectorIndex};
pub use logging::{init_logging, LoggingConfig};
pub use services::{DirectoryReader, QueryEngine, TextSplitter};
