//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts},
    IndexParts, OpenSearch, SearchParts,
};
use serde_json::Value;
use tracing::{debug, error, info};
use url::Url;

use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;
use genealogy_search_shared::collections::COLLECTION_FIELD;
use genealogy_search_shared::Document;

/// OpenSearch client implementation.
///
/// All collections share one typeless index. A document is addressed by
/// `<collection>.<key>` and its body records the collection it came from.
///
/// # Example
///
/// ```ignore
/// use genealogy_search_repository::OpenSearchClient;
/// let client = OpenSearchClient::new("http://localhost:9200")?;
///
/// let mut body = Document::new();
/// body.insert("Header", Document::from_json(json!({"En": "TEL AVIV", "He": "תל אביב"})));
/// // Replaces any previous document with the same key
/// client.index_document("bhp6", "places", "507f1f77bcf86cd799439011", &body).await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchError)` - If connection setup fails
    pub fn new(url: &str) -> Result<Self, SearchError> {
        let parsed_url = Url::parse(url).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, "Created OpenSearch client");

        Ok(Self { client })
    }

    /// Generate a document ID from the collection and the record key.
    fn document_id(collection: &str, key: &str) -> String {
        format!("{}.{}", collection, key)
    }

    /// Serialize a document body and tag it with its collection.
    fn document_body(collection: &str, body: &Document) -> Result<Value, SearchError> {
        let mut value =
            serde_json::to_value(body).map_err(|e| SearchError::serialization(e.to_string()))?;
        if let Value::Object(map) = &mut value {
            map.insert(
                COLLECTION_FIELD.to_string(),
                Value::String(collection.to_string()),
            );
        }
        Ok(value)
    }

    /// Extract the `_source` of every hit from a search response.
    fn parse_hits(response: &Value) -> Result<Vec<Value>, SearchError> {
        let hits = response["hits"]["hits"]
            .as_array()
            .ok_or_else(|| SearchError::parse("Response has no hits array"))?;

        Ok(hits
            .iter()
            .filter_map(|hit| hit.get("_source").cloned())
            .collect())
    }

    /// Extract the `_source` of every option from a suggest response,
    /// ordered by suggester name and then by rank.
    fn parse_suggestions(response: &Value) -> Result<Vec<Value>, SearchError> {
        let suggest = response["suggest"]
            .as_object()
            .ok_or_else(|| SearchError::parse("Response has no suggest section"))?;

        let mut names: Vec<&String> = suggest.keys().collect();
        names.sort();

        let mut sources = Vec::new();
        for name in names {
            let entries = suggest[name.as_str()].as_array().into_iter().flatten();
            for entry in entries {
                let options = entry["options"].as_array().into_iter().flatten();
                sources.extend(options.filter_map(|option| option.get("_source").cloned()));
            }
        }
        Ok(sources)
    }

    /// Read a failed response body for error reporting.
    async fn failure_body(response: Response) -> String {
        response.text().await.unwrap_or_default()
    }

    async fn run_query(&self, index: &str, query: &Value) -> Result<Value, SearchError> {
        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .body(query.clone())
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::failure_body(response).await;
            error!(status = %status, body = %error_body, "Search request failed");
            return Err(SearchError::query(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))
    }
}

#[async_trait]
impl SearchEngineClient for OpenSearchClient {
    async fn index_exists(&self, index: &str) -> Result<bool, SearchError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        Ok(response.status_code().is_success())
    }

    async fn delete_index(&self, index: &str) -> Result<(), SearchError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchError::index_deletion(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::failure_body(response).await;
            error!(index = %index, status = %status, body = %error_body, "Index deletion failed");
            return Err(SearchError::index_deletion(format!(
                "Delete of {} failed with status {}: {}",
                index, status, error_body
            )));
        }

        info!(index = %index, "Deleted index");
        Ok(())
    }

    async fn create_index(&self, index: &str, mapping: &Value) -> Result<(), SearchError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(mapping.clone())
            .send()
            .await
            .map_err(|e| SearchError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::failure_body(response).await;
            error!(index = %index, status = %status, body = %error_body, "Index creation failed");
            return Err(SearchError::index_creation(format!(
                "Create of {} failed with status {}: {}",
                index, status, error_body
            )));
        }

        info!(index = %index, "Created index");
        Ok(())
    }

    async fn index_document(
        &self,
        index: &str,
        collection: &str,
        key: &str,
        body: &Document,
    ) -> Result<(), SearchError> {
        let doc_id = Self::document_id(collection, key);
        let body = Self::document_body(collection, body)?;

        let response = self
            .client
            .index(IndexParts::IndexId(index, &doc_id))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::request(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::failure_body(response).await;
            return Err(SearchError::request(format!(
                "Index of {} failed with status {}: {}",
                doc_id, status, error_body
            )));
        }

        debug!(doc_id = %doc_id, "Document indexed");
        Ok(())
    }

    async fn search(&self, index: &str, query: &Value) -> Result<Vec<Value>, SearchError> {
        let response = self.run_query(index, query).await?;
        Self::parse_hits(&response)
    }

    async fn suggest(&self, index: &str, query: &Value) -> Result<Vec<Value>, SearchError> {
        let response = self.run_query(index, query).await?;
        Self::parse_suggestions(&response)
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let health: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;
        let status = health["status"].as_str().unwrap_or("unknown");

        debug!(status = %status, "OpenSearch cluster status");
        Ok(status == "green" || status == "yellow")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genealogy_search_shared::SourceValue;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn test_document_id() {
        let doc_id = OpenSearchClient::document_id("places", "507f1f77bcf86cd799439011");
        assert_eq!(doc_id, "places.507f1f77bcf86cd799439011");
    }

    #[test]
    fn test_document_body_adds_collection() {
        let body = Document::from_json(json!({"Header": {"En": "A", "He": "1234567890"}}));
        let value = OpenSearchClient::document_body("places", &body).unwrap();

        assert_eq!(value["collection"], "places");
        assert_eq!(value["Header"]["En"], "A");
    }

    #[test]
    fn test_document_body_rejects_native_values() {
        let mut body = Document::new();
        body.insert("ref", SourceValue::Uuid(Uuid::nil()));

        let result = OpenSearchClient::document_body("places", &body);
        assert!(matches!(result, Err(SearchError::SerializationError(_))));
    }

    #[test]
    fn test_parse_hits() {
        let response = json!({
            "hits": {
                "hits": [
                    { "_id": "places.1", "_source": { "Header": { "En": "A" } } },
                    { "_id": "places.2" },
                    { "_id": "places.3", "_source": { "Header": { "En": "C" } } }
                ]
            }
        });

        let sources = OpenSearchClient::parse_hits(&response).unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[1]["Header"]["En"], "C");
    }

    #[test]
    fn test_parse_hits_invalid() {
        let result = OpenSearchClient::parse_hits(&json!({"took": 1}));
        assert!(matches!(result, Err(SearchError::ParseError(_))));
    }

    #[test]
    fn test_parse_suggestions_orders_by_suggester() {
        let response = json!({
            "suggest": {
                "phonetic_01": [{
                    "text": "456000",
                    "options": [{ "text": "456000", "_source": { "Header": { "En": "KOHN" } } }]
                }],
                "phonetic_00": [{
                    "text": "556000",
                    "options": [
                        { "text": "556000", "_source": { "Header": { "En": "COHEN" } } },
                        { "text": "556000", "_source": { "Header": { "En": "COHN" } } }
                    ]
                }]
            }
        });

        let sources = OpenSearchClient::parse_suggestions(&response).unwrap();
        let headers: Vec<&str> = sources
            .iter()
            .filter_map(|s| s["Header"]["En"].as_str())
            .collect();
        assert_eq!(headers, vec!["COHEN", "COHN", "KOHN"]);
    }

    #[test]
    fn test_parse_suggestions_without_section() {
        let result = OpenSearchClient::parse_suggestions(&json!({"hits": {}}));
        assert!(matches!(result, Err(SearchError::ParseError(_))));
    }
}
