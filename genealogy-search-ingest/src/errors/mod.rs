//! Error types for the genealogy search ingest.

use genealogy_search_repository::{SearchError, StoreError};
use thiserror::Error;

/// Errors that abort a rebuild.
///
/// Failures of individual documents are never returned here: they are logged
/// and counted as skipped in the collection report.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Checking, deleting or creating the index failed.
    #[error("Index administration error: {0}")]
    IndexAdministration(#[source] SearchError),

    /// The primary store could not open a collection.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The collection is not part of the searchable catalogue.
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),
}

impl IngestError {
    /// Create an index administration error.
    pub fn index_administration(err: SearchError) -> Self {
        Self::IndexAdministration(err)
    }

    /// Create an unknown collection error.
    pub fn unknown_collection(collection: impl Into<String>) -> Self {
        Self::UnknownCollection(collection.into())
    }
}
