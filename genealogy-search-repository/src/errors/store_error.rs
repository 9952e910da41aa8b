//! Document store error types.

use thiserror::Error;

/// Errors that can occur while reading from the primary store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The collection does not exist in the store.
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    /// Failed to read from the underlying storage.
    #[error("IO error: {0}")]
    Io(String),

    /// A stored record could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Any other backend failure.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Create an unknown collection error.
    pub fn unknown_collection(collection: impl Into<String>) -> Self {
        Self::UnknownCollection(collection.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a backend error.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
