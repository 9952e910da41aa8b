//! Search engine client trait definition.
//!
//! This module defines the abstract interface for search engine operations,
//! allowing for different backend implementations (OpenSearch, mock, etc.).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchError;
use genealogy_search_shared::Document;

/// Abstract interface for search engine operations.
///
/// This trait covers the index administration used by a full rebuild, single
/// document writes, and the read-only queries used for suggestions.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, SearchError>`. Writes distinguish a body that
/// could not be serialized (`SearchError::SerializationError`) from a request
/// the engine rejected (`SearchError::RequestError`).
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Check whether an index exists.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    async fn index_exists(&self, index: &str) -> Result<bool, SearchError>;

    /// Delete an index and every document in it.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index was deleted
    /// * `Err(SearchError::IndexDeletionError)` - If the engine refused
    async fn delete_index(&self, index: &str) -> Result<(), SearchError>;

    /// Create an index with the given settings and mappings.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    /// * `mapping` - Settings and mappings body
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index was created
    /// * `Err(SearchError::IndexCreationError)` - If creation fails
    async fn create_index(&self, index: &str, mapping: &Value) -> Result<(), SearchError>;

    /// Index a single document.
    ///
    /// If a document with the same key already exists in the collection, it
    /// is replaced.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    /// * `collection` - The source collection of the document
    /// * `key` - The document key within the collection
    /// * `body` - The document body
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was indexed
    /// * `Err(SearchError::SerializationError)` - If the body holds values the
    ///   engine cannot represent
    /// * `Err(SearchError::RequestError)` - If the engine rejected the document
    async fn index_document(
        &self,
        index: &str,
        collection: &str,
        key: &str,
        body: &Document,
    ) -> Result<(), SearchError>;

    /// Run a search request and return the `_source` of every hit, in rank
    /// order.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    /// * `query` - The full search request body
    async fn search(&self, index: &str, query: &Value) -> Result<Vec<Value>, SearchError>;

    /// Run a suggest request and return the `_source` of every suggestion
    /// option, in suggester order then rank order.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    /// * `query` - A request body with a `suggest` section
    async fn suggest(&self, index: &str, query: &Value) -> Result<Vec<Value>, SearchError>;

    /// Check if the search engine is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the search engine is healthy
    /// * `Ok(false)` - If the search engine is unhealthy
    /// * `Err(SearchError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, SearchError>;
}
