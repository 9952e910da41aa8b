//! # Genealogy Search Shared
//!
//! Shared types for the genealogy search indexer: the semi-structured value
//! model used for records read from the primary store, the engine-ready
//! document projection, compound references and script-based language
//! detection.

pub mod collections;
pub mod document;
pub mod language;
pub mod object_id;
pub mod reference;
pub mod value;

pub use document::IndexedDocument;
pub use language::Language;
pub use object_id::{ObjectId, ObjectIdError};
pub use reference::CompoundReference;
pub use value::{Document, SourceValue};
