//! Reindexer module for the genealogy search ingest.
//!
//! Rebuilds the search index from the primary store, one collection at a
//! time, with a per-document fault boundary.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::errors::IngestError;
use crate::sanitizer::{coerce_uuids, sanitize};
use genealogy_search_repository::opensearch::get_index_settings;
use genealogy_search_repository::{
    DocumentStore, IndexSettings, SearchEngineClient, SearchError, ShowFilter,
};
use genealogy_search_shared::collections::is_searchable;
use genealogy_search_shared::IndexedDocument;

/// Configuration for the reindexer.
#[derive(Debug, Clone)]
pub struct ReindexConfig {
    /// Number of collections indexed concurrently.
    pub max_parallel_collections: usize,
    /// Shard layout used when the index is recreated.
    pub index_settings: IndexSettings,
    /// Records that are allowed into the index.
    pub filter: ShowFilter,
}

impl Default for ReindexConfig {
    fn default() -> Self {
        Self {
            max_parallel_collections: 1,
            index_settings: IndexSettings::default(),
            filter: ShowFilter::publishable(),
        }
    }
}

/// Outcome of one collection pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionReport {
    pub collection: String,
    /// Documents accepted on the first attempt.
    pub indexed: usize,
    /// Documents accepted after UUID coercion.
    pub recovered: usize,
    /// Documents that could not be read or indexed.
    pub skipped: usize,
    pub duration: Duration,
}

impl CollectionReport {
    fn new(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            indexed: 0,
            recovered: 0,
            skipped: 0,
            duration: Duration::ZERO,
        }
    }
}

/// Outcome of a rebuild, one report per collection in request order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RebuildReport {
    pub collections: Vec<CollectionReport>,
}

impl RebuildReport {
    /// Documents present in the index after the rebuild.
    pub fn total_indexed(&self) -> usize {
        self.collections
            .iter()
            .map(|report| report.indexed + report.recovered)
            .sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.collections.iter().map(|report| report.skipped).sum()
    }
}

enum DocumentOutcome {
    Indexed,
    Recovered,
    Skipped,
}

/// Rebuilds the search index from the primary store.
///
/// The reindexer is responsible for:
/// - Resetting the index mapping when asked to
/// - Streaming publishable records and sanitizing them
/// - Isolating per-document failures so one bad record never stops a pass
pub struct Reindexer {
    store: Arc<dyn DocumentStore>,
    engine: Arc<dyn SearchEngineClient>,
    config: ReindexConfig,
}

impl Reindexer {
    /// Create a new reindexer with the default configuration.
    pub fn new(store: Arc<dyn DocumentStore>, engine: Arc<dyn SearchEngineClient>) -> Self {
        Self::with_config(store, engine, ReindexConfig::default())
    }

    /// Create a new reindexer with custom configuration.
    pub fn with_config(
        store: Arc<dyn DocumentStore>,
        engine: Arc<dyn SearchEngineClient>,
        config: ReindexConfig,
    ) -> Self {
        Self {
            store,
            engine,
            config,
        }
    }

    /// Rebuild `index` from the given collections.
    ///
    /// With `drop_existing` the index is deleted and recreated with the
    /// current mapping first; otherwise documents are upserted by key.
    /// Unknown collections are rejected before the index is touched.
    pub async fn rebuild(
        &self,
        index: &str,
        collections: &[String],
        drop_existing: bool,
    ) -> Result<RebuildReport, IngestError> {
        if let Some(unknown) = collections.iter().find(|c| !is_searchable(c)) {
            return Err(IngestError::unknown_collection(unknown.as_str()));
        }

        if drop_existing {
            self.reset_index(index).await?;
        }

        let parallelism = self.config.max_parallel_collections.max(1);
        let reports: Vec<CollectionReport> = stream::iter(collections)
            .map(|collection| self.index_collection(index, collection))
            .buffered(parallelism)
            .try_collect()
            .await?;

        let report = RebuildReport {
            collections: reports,
        };
        info!(
            index = %index,
            indexed = report.total_indexed(),
            skipped = report.total_skipped(),
            "Rebuild completed"
        );
        Ok(report)
    }

    /// Delete the index if present and create it with the current mapping.
    async fn reset_index(&self, index: &str) -> Result<(), IngestError> {
        let exists = self
            .engine
            .index_exists(index)
            .await
            .map_err(IngestError::index_administration)?;

        if exists {
            info!(index = %index, "Removing existing index");
            self.engine
                .delete_index(index)
                .await
                .map_err(IngestError::index_administration)?;
        }

        let mapping = get_index_settings(&self.config.index_settings);
        self.engine
            .create_index(index, &mapping)
            .await
            .map_err(IngestError::index_administration)
    }

    /// Index every publishable record of one collection.
    #[instrument(skip(self))]
    pub async fn index_collection(
        &self,
        index: &str,
        collection: &str,
    ) -> Result<CollectionReport, IngestError> {
        let started = Instant::now();
        let mut report = CollectionReport::new(collection);
        let mut records = self.store.find(collection, &self.config.filter).await?;

        while let Some(record) = records.next().await {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    error!(collection = %collection, error = %e, "Failed to read record");
                    report.skipped += 1;
                    continue;
                }
            };

            match self.index_one(index, sanitize(collection, record)).await {
                DocumentOutcome::Indexed => report.indexed += 1,
                DocumentOutcome::Recovered => report.recovered += 1,
                DocumentOutcome::Skipped => report.skipped += 1,
            }
        }

        report.duration = started.elapsed();
        info!(
            collection = %collection,
            indexed = report.indexed,
            recovered = report.recovered,
            skipped = report.skipped,
            duration_ms = report.duration.as_millis() as u64,
            "Collection indexed"
        );
        Ok(report)
    }

    /// Write one document, retrying once with UUIDs coerced to strings when
    /// the body could not be serialized.
    async fn index_one(&self, index: &str, mut doc: IndexedDocument) -> DocumentOutcome {
        if doc.key.is_empty() {
            warn!(collection = %doc.collection, "Record has no identifier, skipping");
            return DocumentOutcome::Skipped;
        }

        let first = self
            .engine
            .index_document(index, &doc.collection, &doc.key, &doc.body)
            .await;

        let result = match first {
            Ok(()) => {
                debug!(collection = %doc.collection, key = %doc.key, "Document indexed");
                return DocumentOutcome::Indexed;
            }
            Err(SearchError::SerializationError(_)) => {
                coerce_uuids(&mut doc.body);
                self.engine
                    .index_document(index, &doc.collection, &doc.key, &doc.body)
                    .await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                debug!(collection = %doc.collection, key = %doc.key, "Document indexed after UUID coercion");
                DocumentOutcome::Recovered
            }
            Err(e) => {
                error!(
                    collection = %doc.collection,
                    key = %doc.key,
                    kind = e.kind(),
                    error = %e,
                    "Failed to index document, skipping"
                );
                DocumentOutcome::Skipped
            }
        }
    }
}
