//! # Genealogy Search Ingest
//!
//! This crate rebuilds the search index from the primary store.
//!
//! ## Architecture
//!
//! The ingest follows a Read-Sanitize-Load pattern:
//!
//! 1. **Store**: Streams publishable records of one collection
//! 2. **Sanitizer**: Projects each record into an engine-ready document
//! 3. **Reindexer**: Writes documents to the index behind a per-document
//!    fault boundary, and owns the index mapping lifecycle

pub mod errors;
pub mod reindexer;
pub mod sanitizer;

pub use errors::IngestError;
pub use reindexer::{CollectionReport, RebuildReport, ReindexConfig, Reindexer};
