//! Suggestion strategies and exact header lookup.
//!
//! Suggestions read from the live index; header lookups read the primary
//! store. Neither ever fails: degraded strategies return empty results.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use genealogy_search_phonetic::{encode, UNKNOWN};
use genealogy_search_repository::opensearch::queries::{
    build_completion_query, build_contains_query, build_phonetic_query,
};
use genealogy_search_repository::{DocumentStore, SearchEngineClient, SearchError, StoreQuery};
use genealogy_search_shared::collections::HEADER_PLACEHOLDER;
use genealogy_search_shared::Language;

/// Most entries returned by each suggestion strategy.
pub const MAX_SUGGESTIONS: usize = 5;

/// Header strings proposed for a partial query, per strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Suggestions {
    pub completion: Vec<String>,
    pub contains: Vec<String>,
    pub phonetic: Vec<String>,
}

/// Result of a combined place and family name lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WizardResult {
    pub place: Value,
    pub name: Value,
}

/// Routes a user query to the suggestion strategies and header lookups.
pub struct SuggestionRouter {
    engine: Arc<dyn SearchEngineClient>,
    store: Arc<dyn DocumentStore>,
    index_name: String,
}

impl SuggestionRouter {
    pub fn new(
        engine: Arc<dyn SearchEngineClient>,
        store: Arc<dyn DocumentStore>,
        index_name: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            store,
            index_name: index_name.into(),
        }
    }

    /// Run the completion, contains and phonetic strategies concurrently.
    ///
    /// Results are header strings in the query's language, at most
    /// [`MAX_SUGGESTIONS`] each. A failing strategy yields an empty list.
    pub async fn suggest(&self, collection: &str, query: &str) -> Suggestions {
        let query = query.trim();
        if query.is_empty() {
            return Suggestions::default();
        }
        let lang = Language::detect(query);

        let (completion, contains, phonetic) = tokio::join!(
            self.completion(collection, lang, query),
            self.contains(collection, lang, query),
            self.phonetic(collection, lang, query),
        );

        Suggestions {
            completion: degrade("completion", collection, completion),
            contains: degrade("contains", collection, contains),
            phonetic: degrade("phonetic", collection, phonetic),
        }
    }

    async fn completion(
        &self,
        collection: &str,
        lang: Language,
        query: &str,
    ) -> Result<Vec<String>, SearchError> {
        if HEADER_PLACEHOLDER.starts_with(query) {
            debug!(query = %query, "Query is a prefix of the blank header placeholder");
            return Ok(Vec::new());
        }

        let body = build_completion_query(collection, lang, query, MAX_SUGGESTIONS);
        let sources = self.engine.suggest(&self.index_name, &body).await?;
        Ok(headers(&sources, lang))
    }

    async fn contains(
        &self,
        collection: &str,
        lang: Language,
        query: &str,
    ) -> Result<Vec<String>, SearchError> {
        let body = build_contains_query(collection, lang, query, MAX_SUGGESTIONS);
        let sources = self.engine.search(&self.index_name, &body).await?;
        Ok(headers(&sources, lang))
    }

    async fn phonetic(
        &self,
        collection: &str,
        lang: Language,
        query: &str,
    ) -> Result<Vec<String>, SearchError> {
        let codes = encode(query, lang);
        if codes.iter().all(|code| code == UNKNOWN) {
            debug!(query = %query, "Query has no phonetic code");
            return Ok(Vec::new());
        }

        let body = build_phonetic_query(collection, &codes, MAX_SUGGESTIONS);
        let sources = self.engine.suggest(&self.index_name, &body).await?;
        Ok(headers(&sources, lang))
    }

    /// Find the record whose header in the text's language equals the
    /// uppercased text. Returns `{}` when nothing matches.
    pub async fn lookup_by_header(&self, collection: &str, text: &str) -> Value {
        let lang = Language::detect(text);
        let query = StoreQuery::field_equals(lang.header_path(), text.to_uppercase());

        match self.store.find_one(collection, &query).await {
            Ok(Some(record)) => record.to_json(),
            Ok(None) => json!({}),
            Err(e) => {
                warn!(collection = %collection, error = %e, "Header lookup failed");
                json!({})
            }
        }
    }

    /// Look up a place and a family name by exact header.
    pub async fn wizard_search(&self, place: &str, name: &str) -> WizardResult {
        let (place, name) = tokio::join!(
            self.lookup_by_header("places", place),
            self.lookup_by_header("familyNames", name),
        );
        WizardResult { place, name }
    }
}

fn degrade(strategy: &str, collection: &str, result: Result<Vec<String>, SearchError>) -> Vec<String> {
    result.unwrap_or_else(|e| {
        warn!(
            strategy = %strategy,
            collection = %collection,
            kind = e.kind(),
            error = %e,
            "Suggestion strategy failed"
        );
        Vec::new()
    })
}

/// Pick a display header from each source, preferring `lang` and falling
/// back to the other language when the preferred one is a placeholder.
/// Deduplicated, in source order, capped.
fn headers(sources: &[Value], lang: Language) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for source in sources {
        let header = Language::ALL
            .iter()
            .filter(|l| **l == lang)
            .chain(Language::ALL.iter().filter(|l| **l != lang))
            .filter_map(|l| source["Header"][l.tag()].as_str())
            .find(|h| !h.is_empty() && *h != HEADER_PLACEHOLDER);

        if let Some(header) = header {
            if !out.iter().any(|existing| existing == header) {
                out.push(header.to_string());
            }
        }
        if out.len() == MAX_SUGGESTIONS {
            break;
        }
    }
    out
}
