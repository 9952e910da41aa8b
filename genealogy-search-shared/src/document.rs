//! The engine-ready projection of a source record.

use crate::value::Document;

/// A sanitized record ready to be written to the search engine.
///
/// `key` is the string form of the record's store identifier, which is
/// removed from `body` and becomes the engine's document key.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedDocument {
    /// Source collection the record was read from.
    pub collection: String,
    /// Engine document key.
    pub key: String,
    /// Sanitized business fields.
    pub body: Document,
}

impl IndexedDocument {
    pub fn new(collection: impl Into<String>, key: impl Into<String>, body: Document) -> Self {
        Self {
            collection: collection.into(),
            key: key.into(),
            body,
        }
    }
}
