//! Error types for the Advisor domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Advisor operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Reasoning service errors ---
    #[error("Reasoning error: {0}")]
    Reasoning(#[from] ReasoningError),

    // --- Knowledge base errors ---
    #[error("Knowledge error: {0}")]
    Knowledge(#[from] KnowledgeError),

    // --- Session storage errors ---
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ReasoningError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Service not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Empty completion returned by {0}")]
    EmptyCompletion(String),
}

#[derive(Debug, Clone, Error)]
pub enum KnowledgeError {
    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Document rejected: {0}")]
    InvalidDocument(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Session store error: {0}")]
    Store(String),

    #[error("Snapshot could not be decoded: {0}")]
    Corrupt(String),
}
