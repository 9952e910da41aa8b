//! OpenSearch implementation of the search engine client.
//!
//! This module provides a concrete implementation of `SearchEngineClient`
//! using OpenSearch as the backend, along with the index mapping and the
//! query builders used by the suggestion strategies.

mod client;
mod index_config;
pub mod queries;

pub use client::OpenSearchClient;
pub use index_config::{get_index_settings, COLLECTION_CONTEXT, SUGGEST_MAX_INPUT_LENGTH};
