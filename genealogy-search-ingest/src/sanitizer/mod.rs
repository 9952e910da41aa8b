//! Sanitizer module for the genealogy search ingest.
//!
//! Turns a raw record from the primary store into a document the search
//! engine accepts.

use genealogy_search_phonetic::encode_header;
use genealogy_search_shared::collections::{
    is_name_bearing, HEADER_FIELD, HEADER_PLACEHOLDER, ID_FIELD, LEGACY_PHONETIC_FIELD,
    PHONETIC_FIELD,
};
use genealogy_search_shared::{Document, IndexedDocument, Language, SourceValue};
use serde_json::Value;

/// Project a source record into an engine-ready document.
///
/// The record's `_id` is removed and becomes the document key. Name-bearing
/// collections get phonetic keys computed from the original header, and
/// empty header values are replaced with a placeholder. Identifier and
/// date values are converted to strings and opaque binaries to hex. Binaries
/// of the UUID subtypes are kept for [`coerce_uuids`]. Never fails.
pub fn sanitize(collection: &str, mut record: Document) -> IndexedDocument {
    let key = record
        .remove(ID_FIELD)
        .map(|id| key_string(&id))
        .unwrap_or_default();
    record.remove(LEGACY_PHONETIC_FIELD);

    if is_name_bearing(collection) {
        let codes = encode_header(
            record.get_str(&Language::En.header_path()),
            record.get_str(&Language::He.header_path()),
        );
        record.insert(
            PHONETIC_FIELD,
            SourceValue::Array(codes.into_iter().map(SourceValue::String).collect()),
        );
    }

    fill_header(&mut record);

    for value in record.values_mut() {
        stringify_natives(value);
    }

    IndexedDocument::new(collection, key, record)
}

/// Convert a whole record, `_id` included, into plain JSON.
///
/// Native values become their string forms. Binary payloads that are not
/// UUIDs become lowercase hex.
pub fn to_serializable(record: &Document) -> Value {
    record.to_json()
}

/// Replace UUID-like values with their hyphenated string form.
///
/// Covers native UUIDs and 16-byte binaries of the UUID subtypes, at any
/// depth. Other binaries are left untouched.
pub fn coerce_uuids(document: &mut Document) {
    for value in document.values_mut() {
        coerce_value(value);
    }
}

fn coerce_value(value: &mut SourceValue) {
    match value {
        SourceValue::Uuid(_) | SourceValue::Binary { .. } => {
            if let Some(uuid) = value.as_uuid() {
                *value = SourceValue::String(uuid.hyphenated().to_string());
            }
        }
        SourceValue::Document(doc) => coerce_uuids(doc),
        SourceValue::Array(items) => items.iter_mut().for_each(coerce_value),
        _ => {}
    }
}

/// Ensure `Header` is a mapping whose `En` and `He` are non-empty.
fn fill_header(record: &mut Document) {
    if !matches!(record.get(HEADER_FIELD), Some(SourceValue::Document(_))) {
        record.insert(HEADER_FIELD, Document::new());
    }
    if let Some(header) = record
        .get_mut(HEADER_FIELD)
        .and_then(SourceValue::as_document_mut)
    {
        for lang in Language::ALL {
            let blank = header.get(lang.tag()).map_or(true, SourceValue::is_blank);
            if blank {
                header.insert(lang.tag(), HEADER_PLACEHOLDER);
            }
        }
    }
}

/// Recursively replace native values with strings, except UUID binaries.
fn stringify_natives(value: &mut SourceValue) {
    match value {
        SourceValue::ObjectId(oid) => *value = SourceValue::String(oid.to_hex()),
        SourceValue::DateTime(dt) => *value = SourceValue::String(dt.to_rfc3339()),
        SourceValue::Uuid(uuid) => *value = SourceValue::String(uuid.hyphenated().to_string()),
        SourceValue::Binary { .. } => {
            if let Some(hex) = opaque_hex(value) {
                *value = SourceValue::String(hex);
            }
        }
        SourceValue::Document(doc) => doc.values_mut().for_each(stringify_natives),
        SourceValue::Array(items) => items.iter_mut().for_each(stringify_natives),
        _ => {}
    }
}

fn opaque_hex(value: &SourceValue) -> Option<String> {
    match value {
        SourceValue::Binary { bytes, .. } if value.as_uuid().is_none() => Some(hex::encode(bytes)),
        _ => None,
    }
}

fn key_string(id: &SourceValue) -> String {
    match id.to_json() {
        Value::String(s) => s,
        json => json.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use genealogy_search_shared::ObjectId;
    use serde_json::json;
    use uuid::Uuid;

    fn oid() -> ObjectId {
        ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap()
    }

    fn family(en: Option<&str>, he: Option<&str>) -> Document {
        let mut record = Document::from_json(json!({
            "Header": { "En": en, "He": he },
            "UnitHeaderDMSoundex": { "En": ["stale"] },
            "UnitText1": { "En": "A family name" }
        }));
        record.insert("_id", oid());
        record
    }

    #[test]
    fn test_sanitize_extracts_key_and_drops_legacy_field() {
        let doc = sanitize("familyNames", family(Some("COHEN"), Some("כהן")));

        assert_eq!(doc.collection, "familyNames");
        assert_eq!(doc.key, "507f1f77bcf86cd799439011");
        assert!(!doc.body.contains_key("_id"));
        assert!(!doc.body.contains_key("UnitHeaderDMSoundex"));
    }

    #[test]
    fn test_sanitize_fills_blank_headers() {
        let doc = sanitize("familyNames", family(Some(""), None));

        assert_eq!(doc.body.get_str("Header.En"), Some(HEADER_PLACEHOLDER));
        assert_eq!(doc.body.get_str("Header.He"), Some(HEADER_PLACEHOLDER));
    }

    #[test]
    fn test_sanitize_creates_missing_header() {
        let mut record = Document::new();
        record.insert("Header", SourceValue::Null);
        let doc = sanitize("lexicon", record);

        assert_eq!(doc.key, "");
        assert_eq!(doc.body.get_str("Header.En"), Some(HEADER_PLACEHOLDER));
        assert_eq!(doc.body.get_str("Header.He"), Some(HEADER_PLACEHOLDER));
    }

    #[test]
    fn test_phonetic_keys_prefer_english() {
        let doc = sanitize("familyNames", family(Some("Moskowitz"), Some("כהן")));
        assert_eq!(
            doc.body.get(PHONETIC_FIELD),
            Some(&SourceValue::Array(vec!["645740".into()]))
        );
    }

    #[test]
    fn test_phonetic_keys_fall_back_to_hebrew() {
        let doc = sanitize("places", family(None, Some("כהן")));
        assert_eq!(
            doc.body.get(PHONETIC_FIELD),
            Some(&SourceValue::Array(vec!["560000".into()]))
        );
    }

    #[test]
    fn test_phonetic_keys_unknown_without_header() {
        let doc = sanitize("familyNames", family(None, None));
        assert_eq!(
            doc.body.get(PHONETIC_FIELD),
            Some(&SourceValue::Array(vec!["UNKNOWN".into()]))
        );
    }

    #[test]
    fn test_phonetic_keys_only_for_name_bearing() {
        let doc = sanitize("movies", family(Some("COHEN"), None));
        assert!(!doc.body.contains_key(PHONETIC_FIELD));
    }

    #[test]
    fn test_sanitize_stringifies_natives() {
        let mut record = family(Some("A"), None);
        let mut nested = Document::new();
        nested.insert("when", Utc.with_ymd_and_hms(2016, 5, 1, 12, 0, 0).unwrap());
        nested.insert("ref", oid());
        record.insert("Meta", nested);
        record.insert("Token", Uuid::nil());

        let doc = sanitize("places", record);

        assert!(!doc.body.values().any(SourceValue::contains_native));
        assert_eq!(doc.body.get_str("Meta.when"), Some("2016-05-01T12:00:00+00:00"));
        assert_eq!(doc.body.get_str("Meta.ref"), Some("507f1f77bcf86cd799439011"));
        assert_eq!(
            doc.body.get_str("Token"),
            Some("00000000-0000-0000-0000-000000000000")
        );
    }

    #[test]
    fn test_sanitize_hex_encodes_opaque_binaries() {
        let mut record = family(Some("A"), None);
        record.insert(
            "Thumbnail",
            SourceValue::Binary {
                subtype: 0,
                bytes: vec![0xff, 0xd8],
            },
        );
        record.insert(
            "Legacy",
            SourceValue::Binary {
                subtype: 3,
                bytes: vec![0; 16],
            },
        );
        let mut doc = sanitize("places", record);

        assert_eq!(doc.body.get_str("Thumbnail"), Some("ffd8"));
        assert!(matches!(doc.body.get("Legacy"), Some(SourceValue::Binary { .. })));

        coerce_uuids(&mut doc.body);
        assert!(serde_json::to_value(&doc.body).is_ok());
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for record in [
            family(Some("COHEN"), Some("כהן")),
            family(None, Some("כהן")),
            family(Some(""), None),
        ] {
            let once = sanitize("familyNames", record);
            let twice = sanitize("familyNames", once.body.clone());
            assert_eq!(once.body, twice.body);
        }
    }

    #[test]
    fn test_coerce_uuids() {
        let uuid = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let mut document = Document::new();
        document.insert(
            "legacy",
            SourceValue::Binary {
                subtype: 3,
                bytes: uuid.as_bytes().to_vec(),
            },
        );
        document.insert(
            "list",
            SourceValue::Array(vec![SourceValue::Uuid(uuid), SourceValue::Int(1)]),
        );
        document.insert(
            "blob",
            SourceValue::Binary {
                subtype: 0,
                bytes: vec![1, 2, 3],
            },
        );

        coerce_uuids(&mut document);

        assert_eq!(
            document.get_str("legacy"),
            Some("67e55044-10b1-426f-9247-bb680e5fe0c8")
        );
        assert_eq!(
            document.get("list"),
            Some(&SourceValue::Array(vec![
                SourceValue::String("67e55044-10b1-426f-9247-bb680e5fe0c8".to_string()),
                SourceValue::Int(1)
            ]))
        );
        assert!(matches!(document.get("blob"), Some(SourceValue::Binary { .. })));
    }

    #[test]
    fn test_to_serializable_keeps_id() {
        let mut record = family(Some("COHEN"), None);
        record.insert(
            "blob",
            SourceValue::Binary {
                subtype: 0,
                bytes: vec![0xab, 0x01],
            },
        );

        let value = to_serializable(&record);

        assert_eq!(value["_id"], "507f1f77bcf86cd799439011");
        assert_eq!(value["Header"]["En"], "COHEN");
        assert_eq!(value["Header"]["He"], Value::Null);
        assert_eq!(value["blob"], "ab01");
    }
}
