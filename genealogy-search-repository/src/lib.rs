//! # Genealogy Search Repository
//!
//! This crate provides the traits the indexer and the query services are
//! written against: the search engine client and the primary document store.
//! It also ships a concrete OpenSearch client, the index mapping, and two
//! store implementations (in-memory and `mongoexport` dump files).

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod store;

pub use config::IndexSettings;
pub use errors::{SearchError, StoreError};
pub use interfaces::{DocumentStore, RecordStream, SearchEngineClient, StoreQuery};
pub use opensearch::OpenSearchClient;
pub use store::{JsonDumpStore, MemoryStore, ShowFilter};
