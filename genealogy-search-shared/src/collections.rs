//! The fixed catalogue of indexed collections and their well-known fields.

/// Collections that are indexed into the search engine.
pub const SEARCHABLE_COLLECTIONS: [&str; 6] = [
    "places",
    "familyNames",
    "lexicon",
    "photoUnits",
    "personalities",
    "movies",
];

/// Collections whose headers are names and get phonetic keys.
pub const NAME_BEARING_COLLECTIONS: [&str; 2] = ["places", "familyNames"];

/// Store-internal identifier field.
pub const ID_FIELD: &str = "_id";

/// Bilingual display title.
pub const HEADER_FIELD: &str = "Header";

/// Precomputed phonetic field kept by the store; stale, never indexed.
pub const LEGACY_PHONETIC_FIELD: &str = "UnitHeaderDMSoundex";

/// Derived phonetic keys attached to indexed documents.
pub const PHONETIC_FIELD: &str = "phonetic_keys";

/// Field added to every indexed document naming its source collection.
pub const COLLECTION_FIELD: &str = "collection";

/// Stand-in for empty header values; completion fields reject nulls.
pub const HEADER_PLACEHOLDER: &str = "1234567890";

pub fn is_searchable(collection: &str) -> bool {
    SEARCHABLE_COLLECTIONS.contains(&collection)
}

pub fn is_name_bearing(collection: &str) -> bool {
    NAME_BEARING_COLLECTIONS.contains(&collection)
}
