use thiserror::Error;

/// Custom error types for the docuchat application
#[derive(Error, Debug)]
pub enum DocuChatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Document loading error: {message}")]
    DocumentLoad { message: String },

    #[error("Index error: {message}")]
    Index { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("External service error: {service}: {message}")]
    ExternalService { service: String, message: String },
}

impl DocuChatError {
    /// Create an invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a document loading error
    pub fn document_load<S: Into<String>>(message: S) -> Self {
        Self::DocumentLoad {
            message: message.into(),
        }
    }

    /// Create an index error
    pub fn index<S: Into<String>>(message: S) -> Self {
        Self::Index {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>, T: Into<String>>(field: S, message: T) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an external service error
    pub fn external_service<S: Into<String>, T: Into<String>>(service: S, message: T) -> Self {
        Self::ExternalService {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DocuChatError::Network(_) | DocuChatError::ExternalService { .. } | DocuChatError::Io(_)
        )
    }

    /// Get error category for logging and metrics
    pub fn category(&self) -> &'static str {
        match self {
            DocuChatError::Io(_) => "io",
            DocuChatError::Json(_) => "json",
            DocuChatError::Toml(_) => "toml",
            DocuChatError::Network(_) => "network",
            DocuChatError::InvalidConfig { .. } => "config",
            DocuChatError::DocumentLoad { .. } => "document_load",
            DocuChatError::Index { .. } => "index",
            DocuChatError::Storage { .. } => "storage",
            DocuChatError::Validation { .. } => "validation",
            DocuChatError::NotFound { .. } => "not_found",
            DocuChatError::ExternalService { .. } => "external",
        }
    }
}

/// Result type alias for docuchat
pub type Result<T> = std::result::Result<T, DocuChatError>;
