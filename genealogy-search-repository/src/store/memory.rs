//! In-memory document store.

use std::collections::HashMap;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tokio::sync::RwLock;

use crate::errors::StoreError;
use crate::interfaces::{DocumentStore, RecordStream, StoreQuery};
use crate::store::ShowFilter;
use genealogy_search_shared::Document;

/// A store holding every collection in memory, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from `(collection, records)` pairs.
    pub fn with_collections<I, S>(collections: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<Document>)>,
        S: Into<String>,
    {
        let map = collections
            .into_iter()
            .map(|(name, records)| (name.into(), records))
            .collect();
        Self {
            collections: RwLock::new(map),
        }
    }

    /// Append a record to a collection, creating the collection if needed.
    pub async fn insert(&self, collection: &str, record: Document) {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(record);
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: &str, filter: &ShowFilter) -> Result<RecordStream, StoreError> {
        let collections = self.collections.read().await;
        let records = collections
            .get(collection)
            .ok_or_else(|| StoreError::unknown_collection(collection))?;

        let matching: Vec<Result<Document, StoreError>> = records
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .map(Ok)
            .collect();

        Ok(stream::iter(matching).boxed())
    }

    async fn find_one(
        &self,
        collection: &str,
        query: &StoreQuery,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|records| records.iter().find(|record| query.matches(record)))
            .cloned())
    }
}
