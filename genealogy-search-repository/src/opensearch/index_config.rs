//! OpenSearch index configuration and mappings.
//!
//! The index is typeless: every collection shares one mapping and documents
//! carry their source collection in a keyword field.

use serde_json::{json, Value};

use crate::config::IndexSettings;
use genealogy_search_shared::collections::{COLLECTION_FIELD, PHONETIC_FIELD};

/// Longest input, in characters, kept by the completion suggesters.
pub const SUGGEST_MAX_INPUT_LENGTH: u32 = 20;

/// Name of the completion context that scopes suggestions to one collection.
pub const COLLECTION_CONTEXT: &str = "collection";

fn collection_contexts() -> Value {
    json!([{
        "name": COLLECTION_CONTEXT,
        "type": "category",
        "path": COLLECTION_FIELD
    }])
}

fn header_field() -> Value {
    json!({
        "type": "text",
        "fields": {
            "raw": {
                "type": "keyword"
            },
            "suggest": {
                "type": "completion",
                "max_input_length": SUGGEST_MAX_INPUT_LENGTH,
                "contexts": collection_contexts()
            }
        }
    })
}

/// Get the settings and mappings for the search index.
///
/// - `Header.En` / `Header.He`: full text, with an exact `raw` keyword and a
///   `suggest` completion subfield
/// - the phonetic code field: a completion field holding soundex codes
/// - the collection field: a keyword used for filtering and completion context
pub fn get_index_settings(settings: &IndexSettings) -> Value {
    json!({
        "settings": {
            "number_of_shards": settings.number_of_shards,
            "number_of_replicas": settings.number_of_replicas
        },
        "mappings": {
            "properties": {
                COLLECTION_FIELD: {
                    "type": "keyword"
                },
                "Header": {
                    "properties": {
                        "En": header_field(),
                        "He": header_field()
                    }
                },
                PHONETIC_FIELD: {
                    "type": "completion",
                    "max_input_length": SUGGEST_MAX_INPUT_LENGTH,
                    "contexts": collection_contexts()
                }
            }
        }
    })
}
