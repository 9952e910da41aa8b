//! Resolution of `<collection>.<id>` references against the primary store.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use genealogy_search_repository::{DocumentStore, StoreQuery};
use genealogy_search_shared::CompoundReference;

/// Upper bound on references a caller should pass in one request.
pub const MAX_REFERENCES_PER_REQUEST: usize = 10;

/// Result of resolving a list of references.
///
/// Serializes as the bare document (or `null`) for a single reference and
/// as a JSON array otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Resolved {
    /// Exactly one reference was given. `None` when it was malformed.
    Single(Option<Value>),
    /// Several references were given, in input order.
    Many(Vec<Value>),
}

/// Looks records up by compound reference, bypassing the search index.
pub struct Resolver {
    store: Arc<dyn DocumentStore>,
}

impl Resolver {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Resolve references independently and in order.
    ///
    /// A single reference yields [`Resolved::Single`]: `None` when it has no
    /// separator, `{}` when the id does not parse or nothing is stored under
    /// it. With several references, blank and malformed entries are dropped
    /// and the rest resolve as above. No cap is applied here.
    pub async fn resolve(&self, references: &[String]) -> Resolved {
        if let [reference] = references {
            return Resolved::Single(self.resolve_one(reference).await);
        }

        let mut documents = Vec::with_capacity(references.len());
        for reference in references {
            if reference.trim().is_empty() {
                continue;
            }
            if let Some(document) = self.resolve_one(reference).await {
                documents.push(document);
            }
        }
        Resolved::Many(documents)
    }

    async fn resolve_one(&self, reference: &str) -> Option<Value> {
        let reference = CompoundReference::parse(reference.trim())?;

        let Some(oid) = reference.object_id() else {
            debug!(reference = %reference, "Reference id is not an object id");
            return Some(json!({}));
        };

        match self
            .store
            .find_one(&reference.collection, &StoreQuery::ById(oid))
            .await
        {
            Ok(Some(record)) => Some(record.to_json()),
            Ok(None) => Some(json!({})),
            Err(e) => {
                warn!(reference = %reference, error = %e, "Failed to read referenced record");
                Some(json!({}))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genealogy_search_repository::MemoryStore;
    use genealogy_search_shared::{Document, ObjectId};

    const PLACE_ID: &str = "507f1f77bcf86cd799439011";
    const NAME_ID: &str = "507f1f77bcf86cd799439012";

    fn store() -> Arc<dyn DocumentStore> {
        let mut place = Document::from_json(json!({"Header": {"En": "TEL AVIV", "He": "תל אביב"}}));
        place.insert("_id", ObjectId::parse_str(PLACE_ID).unwrap());
        let mut name = Document::from_json(json!({"Header": {"En": "COHEN", "He": "כהן"}}));
        name.insert("_id", ObjectId::parse_str(NAME_ID).unwrap());

        Arc::new(MemoryStore::with_collections([
            ("places", vec![place]),
            ("familyNames", vec![name]),
        ]))
    }

    fn refs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_single_reference() {
        let resolver = Resolver::new(store());

        let resolved = resolver
            .resolve(&refs(&[format!("places.{}", PLACE_ID).as_str()]))
            .await;

        let Resolved::Single(Some(document)) = resolved else {
            panic!("expected a single document");
        };
        assert_eq!(document["_id"], PLACE_ID);
        assert_eq!(document["Header"]["En"], "TEL AVIV");
    }

    #[tokio::test]
    async fn test_single_malformed_is_none() {
        let resolver = Resolver::new(store());
        assert_eq!(resolver.resolve(&refs(&["nodot"])).await, Resolved::Single(None));
    }

    #[tokio::test]
    async fn test_single_unparsable_or_missing_is_empty() {
        let resolver = Resolver::new(store());

        assert_eq!(
            resolver.resolve(&refs(&["places.not-an-id"])).await,
            Resolved::Single(Some(json!({})))
        );
        assert_eq!(
            resolver
                .resolve(&refs(&[format!("movies.{}", PLACE_ID).as_str()]))
                .await,
            Resolved::Single(Some(json!({})))
        );
    }

    #[tokio::test]
    async fn test_many_preserves_order_and_drops_blank_and_malformed() {
        let resolver = Resolver::new(store());
        let place = format!("places.{}", PLACE_ID);
        let name = format!("familyNames.{}", NAME_ID);

        let resolved = resolver
            .resolve(&refs(&[name.as_str(), "", "bad", "places.zzz", place.as_str()]))
            .await;

        let Resolved::Many(documents) = resolved else {
            panic!("expected a list");
        };
        assert_eq!(documents.len(), 3);
        assert_eq!(documents[0]["Header"]["En"], "COHEN");
        assert_eq!(documents[1], json!({}));
        assert_eq!(documents[2]["Header"]["En"], "TEL AVIV");
    }

    #[tokio::test]
    async fn test_many_with_single_survivor() {
        let resolver = Resolver::new(store());
        let place = format!("places.{}", PLACE_ID);

        let resolved = resolver.resolve(&refs(&["bad", "", place.as_str()])).await;

        assert!(matches!(resolved, Resolved::Many(ref documents) if documents.len() == 1));
    }

    #[test]
    fn test_resolved_serialization() {
        assert_eq!(serde_json::to_value(Resolved::Single(None)).unwrap(), Value::Null);
        assert_eq!(
            serde_json::to_value(Resolved::Many(vec![json!({})])).unwrap(),
            json!([{}])
        );
    }
}
