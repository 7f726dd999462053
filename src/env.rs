//! Environment variable constants used throughout the application
//!
//! This module centralizes all environment variable names to ensure consistency
//! and make it easier to manage configuration across the codebase.

/// Logging configuration
pub mod logging {
    /// Log level configuration (e.g., "debug", "info", "warn", "error")
    pub const LOG_LEVEL: &str = "DOCUCHAT_LOG_LEVEL";

    /// Log file path for file-based logging
    pub const LOG_FILE: &str = "DOCUCHAT_LOG_FILE";

    /// Disable colored output (follows the NO_COLOR standard)
    pub const NO_COLOR: &str = "NO_COLOR";
}

/// External API configuration
pub mod apis {
    /// OpenAI API key used for embeddings and chat completions
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

    /// Override for the OpenAI API base URL (proxies, compatible servers)
    pub const OPENAI_BASE_URL: &str = "DOCUCHAT_OPENAI_BASE_URL";
}
