//! OpenSearch query builders for the suggestion strategies.
//!
//! Every query is scoped to one source collection, through the completion
//! context for suggesters and a term filter for searches.

use serde_json::{json, Map, Value};

use crate::opensearch::index_config::COLLECTION_CONTEXT;
use genealogy_search_shared::collections::{COLLECTION_FIELD, HEADER_PLACEHOLDER, PHONETIC_FIELD};
use genealogy_search_shared::Language;

/// Build a completion suggest request over the header of one language.
pub fn build_completion_query(collection: &str, lang: Language, prefix: &str, size: usize) -> Value {
    json!({
        "_source": ["Header"],
        "suggest": {
            "header": {
                "prefix": prefix,
                "completion": {
                    "field": format!("{}.suggest", lang.header_path()),
                    "size": size,
                    "skip_duplicates": true,
                    "contexts": { COLLECTION_CONTEXT: [collection] }
                }
            }
        }
    })
}

/// Build a case-insensitive substring search over the exact header value.
///
/// Records whose header is the blank placeholder never match.
pub fn build_contains_query(collection: &str, lang: Language, text: &str, size: usize) -> Value {
    let pattern = format!("*{}*", escape_wildcard(text));
    let raw_field = format!("{}.raw", lang.header_path());

    json!({
        "size": size,
        "_source": ["Header"],
        "query": {
            "bool": {
                "filter": [
                    { "term": { COLLECTION_FIELD: collection } },
                    {
                        "wildcard": {
                            raw_field.clone(): {
                                "value": pattern,
                                "case_insensitive": true
                            }
                        }
                    }
                ],
                "must_not": [
                    { "term": { raw_field: HEADER_PLACEHOLDER } }
                ]
            }
        }
    })
}

/// Build a suggest request with one completion suggester per phonetic code.
///
/// Suggesters are named `phonetic_<nn>` with a zero-padded index, so sorting
/// them by name restores code order.
pub fn build_phonetic_query(collection: &str, codes: &[String], size: usize) -> Value {
    let mut suggesters = Map::new();
    for (n, code) in codes.iter().enumerate() {
        suggesters.insert(
            format!("phonetic_{:02}", n),
            json!({
                "prefix": code,
                "completion": {
                    "field": PHONETIC_FIELD,
                    "size": size,
                    "skip_duplicates": true,
                    "contexts": { COLLECTION_CONTEXT: [collection] }
                }
            }),
        );
    }

    json!({
        "_source": ["Header"],
        "suggest": suggesters
    })
}

/// Escape the wildcard metacharacters so user input matches literally.
fn escape_wildcard(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '*' | '?' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
