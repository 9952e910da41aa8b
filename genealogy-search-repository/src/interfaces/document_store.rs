//! Primary document store trait definition.
//!
//! The primary store is the source of truth for every record. The search
//! index is derived from it and can always be rebuilt.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::errors::StoreError;
use crate::store::ShowFilter;
use genealogy_search_shared::collections::ID_FIELD;
use genealogy_search_shared::{Document, ObjectId, SourceValue};

/// A lazy sequence of records read from one collection.
pub type RecordStream = BoxStream<'static, Result<Document, StoreError>>;

/// Point-read criteria for [`DocumentStore::find_one`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreQuery {
    /// Match the record whose `_id` equals the identifier.
    ById(ObjectId),
    /// Match the first record whose string field at `path` equals `value`.
    FieldEquals { path: String, value: String },
}

impl StoreQuery {
    /// Exact string match on a dotted field path.
    pub fn field_equals(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self::FieldEquals {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Whether a record satisfies this query.
    pub fn matches(&self, record: &Document) -> bool {
        match self {
            Self::ById(oid) => match record.get(ID_FIELD) {
                Some(SourceValue::ObjectId(id)) => id == oid,
                Some(SourceValue::String(id)) => *id == oid.to_hex(),
                _ => false,
            },
            Self::FieldEquals { path, value } => record.get_str(path) == Some(value.as_str()),
        }
    }
}

/// Abstract interface for the primary document store.
///
/// Implementations are injected into the reindexer and the query services, so
/// tests can run against an in-memory store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Stream every record of `collection` accepted by `filter`.
    ///
    /// The stream is lazy: records are produced as the caller polls it.
    ///
    /// # Returns
    ///
    /// * `Ok(RecordStream)` - The record stream; individual records may still
    ///   fail to decode
    /// * `Err(StoreError::UnknownCollection)` - If the collection does not exist
    async fn find(&self, collection: &str, filter: &ShowFilter) -> Result<RecordStream, StoreError>;

    /// Read the first record of `collection` matching `query`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(record))` - If a record matched
    /// * `Ok(None)` - If nothing matched
    /// * `Err(StoreError)` - If the read failed
    async fn find_one(
        &self,
        collection: &str,
        query: &StoreQuery,
    ) -> Result<Option<Document>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_by_id() {
        let oid = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        let mut record = Document::new();
        record.insert("_id", oid);
        assert!(StoreQuery::ById(oid).matches(&record));

        record.insert("_id", SourceValue::from("507f1f77bcf86cd799439011"));
        assert!(StoreQuery::ById(oid).matches(&record));

        let other = ObjectId::parse_str("507f1f77bcf86cd799439012").unwrap();
        assert!(!StoreQuery::ById(other).matches(&record));
    }

    #[test]
    fn test_query_field_equals() {
        let record = Document::from_json(json!({"Header": {"En": "TELAVIV", "He": null}}));
        assert!(StoreQuery::field_equals("Header.En", "TELAVIV").matches(&record));
        assert!(!StoreQuery::field_equals("Header.En", "telaviv").matches(&record));
        assert!(!StoreQuery::field_equals("Header.He", "TELAVIV").matches(&record));
    }
}
