//! Interface definitions for the search engine and the primary store.
//!
//! This module defines the abstract `SearchEngineClient` and `DocumentStore`
//! traits that allow for dependency injection and swappable backends.

mod document_store;
mod search_engine_client;

pub use document_store::{DocumentStore, RecordStream, StoreQuery};
pub use search_engine_client::SearchEngineClient;
