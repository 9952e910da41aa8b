//! Semi-structured values read from the primary store.
//!
//! Records in the primary store are loosely typed: any field may be absent or
//! null, and some carry store-native types (object identifiers, timestamps,
//! UUIDs, binary blobs) that the search engine cannot serialize directly.
//! [`SourceValue`] models that explicitly. Accessors return `Option` for
//! anything absent or of the wrong shape instead of failing.

use std::collections::btree_map;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::object_id::ObjectId;

/// Binary subtype of legacy (driver-specific byte order) UUIDs.
pub const BINARY_SUBTYPE_UUID_LEGACY: u8 = 3;
/// Binary subtype of standard UUIDs.
pub const BINARY_SUBTYPE_UUID: u8 = 4;

/// A single value inside a source record.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<SourceValue>),
    Document(Document),
    /// Store-assigned record identifier.
    ObjectId(ObjectId),
    /// Store timestamp, always UTC.
    DateTime(DateTime<Utc>),
    /// Native UUID value.
    Uuid(Uuid),
    /// Opaque binary blob with the store's binary subtype tag.
    Binary { subtype: u8, bytes: Vec<u8> },
}

impl SourceValue {
    /// Borrow the value as a string slice if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Self::Document(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_document_mut(&mut self) -> Option<&mut Document> {
        match self {
            Self::Document(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[SourceValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True for null and for the empty string, the two "no text" cases found
    /// in header fields.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// True for store-native types that have no direct JSON representation.
    pub fn is_native(&self) -> bool {
        matches!(
            self,
            Self::ObjectId(_) | Self::DateTime(_) | Self::Uuid(_) | Self::Binary { .. }
        )
    }

    /// Whether this value or anything nested inside it is store-native.
    pub fn contains_native(&self) -> bool {
        match self {
            Self::Array(items) => items.iter().any(SourceValue::contains_native),
            Self::Document(doc) => doc.values().any(SourceValue::contains_native),
            other => other.is_native(),
        }
    }

    /// The UUID carried by this value, either native or as a 16-byte binary
    /// of one of the UUID subtypes.
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            Self::Uuid(uuid) => Some(*uuid),
            Self::Binary { subtype, bytes }
                if *subtype == BINARY_SUBTYPE_UUID_LEGACY || *subtype == BINARY_SUBTYPE_UUID =>
            {
                Uuid::from_slice(bytes).ok()
            }
            _ => None,
        }
    }

    /// Convert to plain JSON. Native values become their string forms and
    /// binaries that are not UUIDs become lowercase hex.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::from(*i),
            Self::Float(f) => Value::from(*f),
            Self::String(s) => Value::String(s.clone()),
            Self::Array(items) => Value::Array(items.iter().map(SourceValue::to_json).collect()),
            Self::Document(doc) => doc.to_json(),
            Self::ObjectId(oid) => Value::String(oid.to_hex()),
            Self::DateTime(dt) => Value::String(dt.to_rfc3339()),
            Self::Uuid(uuid) => Value::String(uuid.hyphenated().to_string()),
            Self::Binary { bytes, .. } => match self.as_uuid() {
                Some(uuid) => Value::String(uuid.hyphenated().to_string()),
                None => Value::String(hex::encode(bytes)),
            },
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Document(_) => "document",
            Self::ObjectId(_) => "objectId",
            Self::DateTime(_) => "date",
            Self::Uuid(_) => "uuid",
            Self::Binary { .. } => "binary",
        }
    }
}

impl From<&str> for SourceValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for SourceValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Document> for SourceValue {
    fn from(doc: Document) -> Self {
        Self::Document(doc)
    }
}

impl From<ObjectId> for SourceValue {
    fn from(oid: ObjectId) -> Self {
        Self::ObjectId(oid)
    }
}

impl From<Uuid> for SourceValue {
    fn from(uuid: Uuid) -> Self {
        Self::Uuid(uuid)
    }
}

impl From<DateTime<Utc>> for SourceValue {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }
}

impl From<serde_json::Value> for SourceValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => Self::Document(
                map.into_iter()
                    .map(|(k, v)| (k, SourceValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for SourceValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Document(doc) => doc.serialize(serializer),
            native => Err(S::Error::custom(format!(
                "{} values are not JSON serializable",
                native.type_name()
            ))),
        }
    }
}

/// An ordered field map: a whole source record or a nested sub-document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document(BTreeMap<String, SourceValue>);

impl Document {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Build a document from a JSON object. Anything other than an object
    /// yields an empty document.
    pub fn from_json(value: serde_json::Value) -> Self {
        match SourceValue::from(value) {
            SourceValue::Document(doc) => doc,
            _ => Self::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&SourceValue> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut SourceValue> {
        self.0.get_mut(key)
    }

    /// Look up a dotted path such as `Header.En`. Every intermediate segment
    /// must be a sub-document.
    pub fn get_path(&self, path: &str) -> Option<&SourceValue> {
        let mut segments = path.split('.');
        let mut current = self.get(segments.next()?)?;
        for segment in segments {
            current = current.as_document()?.get(segment)?;
        }
        Some(current)
    }

    /// Look up a dotted path and borrow it as a string.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get_path(path).and_then(SourceValue::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SourceValue>) -> Option<SourceValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<SourceValue> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, SourceValue> {
        self.0.iter()
    }

    pub fn values(&self) -> btree_map::Values<'_, String, SourceValue> {
        self.0.values()
    }

    pub fn values_mut(&mut self) -> btree_map::ValuesMut<'_, String, SourceValue> {
        self.0.values_mut()
    }

    /// Convert the whole document into a JSON object, see [`SourceValue::to_json`].
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect(),
        )
    }
}

impl FromIterator<(String, SourceValue)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, SourceValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Document {
    type Item = (String, SourceValue);
    type IntoIter = btree_map::IntoIter<String, SourceValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Document {
        Document::from_json(json!({
            "Header": { "En": "TEL AVIV", "He": null },
            "Slug": { "En": "place_tel-aviv" },
            "Pictures": [ { "PictureId": "abc" } ],
            "count": 3
        }))
    }

    #[test]
    fn test_get_path() {
        let doc = sample();
        assert_eq!(doc.get_str("Header.En"), Some("TEL AVIV"));
        assert_eq!(doc.get_path("Header.He"), Some(&SourceValue::Null));
        assert!(doc.get_path("Header.Fr").is_none());
        assert!(doc.get_path("count.En").is_none());
        assert!(doc.get_path("Missing.En").is_none());
    }

    #[test]
    fn test_is_blank() {
        assert!(SourceValue::Null.is_blank());
        assert!(SourceValue::from("").is_blank());
        assert!(!SourceValue::from("x").is_blank());
        assert!(!SourceValue::Int(0).is_blank());
    }

    #[test]
    fn test_json_numbers() {
        assert_eq!(SourceValue::from(json!(7)), SourceValue::Int(7));
        assert_eq!(SourceValue::from(json!(1.5)), SourceValue::Float(1.5));
    }

    #[test]
    fn test_serialize_plain_document() {
        let doc = sample();
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["Header"]["En"], "TEL AVIV");
        assert!(value["Header"]["He"].is_null());
        assert_eq!(value["count"], 3);
    }

    #[test]
    fn test_serialize_native_fails() {
        let mut doc = sample();
        doc.insert("guid", Uuid::nil());
        let err = serde_json::to_value(&doc).unwrap_err();
        assert!(err.to_string().contains("uuid"));
    }

    #[test]
    fn test_to_json_converts_natives() {
        let uuid = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let mut doc = sample();
        doc.insert("_id", ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap());
        doc.insert(
            "legacy",
            SourceValue::Binary {
                subtype: BINARY_SUBTYPE_UUID_LEGACY,
                bytes: uuid.as_bytes().to_vec(),
            },
        );
        doc.insert(
            "blob",
            SourceValue::Binary {
                subtype: 0,
                bytes: vec![0xab, 0x01],
            },
        );

        let value = doc.to_json();

        assert_eq!(value["_id"], "507f1f77bcf86cd799439011");
        assert_eq!(value["Header"]["En"], "TEL AVIV");
        assert!(value["Header"]["He"].is_null());
        assert_eq!(value["legacy"], "67e55044-10b1-426f-9247-bb680e5fe0c8");
        assert_eq!(value["blob"], "ab01");
        assert_eq!(value["Pictures"][0]["PictureId"], "abc");
    }

    #[test]
    fn test_as_uuid_requires_uuid_subtype() {
        let bytes = vec![7; 16];
        let standard = SourceValue::Binary {
            subtype: BINARY_SUBTYPE_UUID,
            bytes: bytes.clone(),
        };
        let generic = SourceValue::Binary { subtype: 0, bytes };
        assert!(standard.as_uuid().is_some());
        assert!(generic.as_uuid().is_none());
        assert!(SourceValue::Binary {
            subtype: BINARY_SUBTYPE_UUID,
            bytes: vec![1, 2]
        }
        .as_uuid()
        .is_none());
    }

    #[test]
    fn test_contains_native_nested() {
        let mut inner = Document::new();
        inner.insert("when", Utc::now());
        let value = SourceValue::Array(vec![SourceValue::Document(inner)]);
        assert!(value.contains_native());
        assert!(!SourceValue::from(json!({"a": [1, 2]})).contains_native());
    }
}
