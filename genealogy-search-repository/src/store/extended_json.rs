//! Decoding of MongoDB extended JSON, as written by `mongoexport`.
//!
//! Both the canonical and relaxed forms are accepted, along with the legacy
//! `{"$binary": "...", "$type": "03"}` binary encoding.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::errors::StoreError;
use genealogy_search_shared::{Document, ObjectId, SourceValue};

/// Decode one exported line into a record.
pub fn parse_record(line: &str) -> Result<Document, StoreError> {
    let value: Value = serde_json::from_str(line)
        .map_err(|e| StoreError::parse(format!("Invalid JSON: {}", e)))?;
    match decode(value)? {
        SourceValue::Document(doc) => Ok(doc),
        other => Err(StoreError::parse(format!(
            "Expected a document, found {}",
            other.type_name()
        ))),
    }
}

/// Decode an extended JSON value, converting type wrappers to native values.
pub fn decode(value: Value) -> Result<SourceValue, StoreError> {
    match value {
        Value::Array(items) => Ok(SourceValue::Array(
            items.into_iter().map(decode).collect::<Result<_, _>>()?,
        )),
        Value::Object(map) => match decode_wrapper(&map)? {
            Some(native) => Ok(native),
            None => {
                let mut doc = Document::new();
                for (key, item) in map {
                    doc.insert(key, decode(item)?);
                }
                Ok(SourceValue::Document(doc))
            }
        },
        scalar => Ok(SourceValue::from(scalar)),
    }
}

fn decode_wrapper(map: &Map<String, Value>) -> Result<Option<SourceValue>, StoreError> {
    if let Some(oid) = single(map, "$oid") {
        let hex = oid
            .as_str()
            .ok_or_else(|| StoreError::parse("$oid must be a string"))?;
        let oid = ObjectId::parse_str(hex).map_err(|e| StoreError::parse(e.to_string()))?;
        return Ok(Some(SourceValue::ObjectId(oid)));
    }

    if let Some(date) = single(map, "$date") {
        return decode_date(date).map(|dt| Some(SourceValue::DateTime(dt)));
    }

    if let Some(uuid) = single(map, "$uuid") {
        let text = uuid
            .as_str()
            .ok_or_else(|| StoreError::parse("$uuid must be a string"))?;
        let uuid = Uuid::parse_str(text).map_err(|e| StoreError::parse(e.to_string()))?;
        return Ok(Some(SourceValue::Uuid(uuid)));
    }

    if let Some(binary) = map.get("$binary") {
        return decode_binary(binary, map.get("$type")).map(Some);
    }

    if let Some(number) = single(map, "$numberLong").or_else(|| single(map, "$numberInt")) {
        let text = number
            .as_str()
            .ok_or_else(|| StoreError::parse("integer wrapper must hold a string"))?;
        let int = text
            .parse::<i64>()
            .map_err(|e| StoreError::parse(format!("Invalid integer {}: {}", text, e)))?;
        return Ok(Some(SourceValue::Int(int)));
    }

    if let Some(number) = single(map, "$numberDouble") {
        let text = number
            .as_str()
            .ok_or_else(|| StoreError::parse("$numberDouble must hold a string"))?;
        let float = text
            .parse::<f64>()
            .map_err(|e| StoreError::parse(format!("Invalid double {}: {}", text, e)))?;
        return Ok(Some(SourceValue::Float(float)));
    }

    Ok(None)
}

fn single<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    if map.len() == 1 {
        map.get(key)
    } else {
        None
    }
}

fn decode_date(value: &Value) -> Result<DateTime<Utc>, StoreError> {
    let millis = match value {
        Value::String(text) => {
            return DateTime::parse_from_rfc3339(text)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| StoreError::parse(format!("Invalid date {}: {}", text, e)));
        }
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| StoreError::parse("$date must be an integer"))?,
        Value::Object(inner) => single(inner, "$numberLong")
            .and_then(Value::as_str)
            .and_then(|text| text.parse::<i64>().ok())
            .ok_or_else(|| StoreError::parse("Invalid $date.$numberLong"))?,
        _ => return Err(StoreError::parse("Unsupported $date form")),
    };

    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| StoreError::parse(format!("Date out of range: {}", millis)))
}

fn decode_binary(value: &Value, legacy_type: Option<&Value>) -> Result<SourceValue, StoreError> {
    let (payload, subtype) = match (value, legacy_type) {
        (Value::Object(inner), None) => (inner.get("base64"), inner.get("subType")),
        (Value::String(_), Some(subtype)) => (Some(value), Some(subtype)),
        _ => return Err(StoreError::parse("Unsupported $binary form")),
    };

    let payload = payload
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::parse("$binary payload must be a string"))?;
    let subtype = subtype
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::parse("$binary subtype must be a string"))?;

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| StoreError::parse(format!("Invalid base64: {}", e)))?;
    let subtype = u8::from_str_radix(subtype, 16)
        .map_err(|e| StoreError::parse(format!("Invalid binary subtype {}: {}", subtype, e)))?;

    Ok(SourceValue::Binary { subtype, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_record_with_object_id() {
        let record =
            parse_record(r#"{"_id": {"$oid": "507f1f77bcf86cd799439011"}, "Header": {"En": "A"}}"#)
                .unwrap();
        assert_eq!(
            record.get("_id"),
            Some(&SourceValue::ObjectId(
                ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap()
            ))
        );
        assert_eq!(record.get_str("Header.En"), Some("A"));
    }

    #[test]
    fn test_decode_dates() {
        let expected = Utc.timestamp_millis_opt(1_500_000_000_000).unwrap();
        let forms = [
            json!({"$date": 1_500_000_000_000_i64}),
            json!({"$date": {"$numberLong": "1500000000000"}}),
            json!({"$date": "2017-07-14T02:40:00Z"}),
        ];
        for form in forms {
            assert_eq!(decode(form).unwrap(), SourceValue::DateTime(expected));
        }
    }

    #[test]
    fn test_decode_binary_forms() {
        let canonical = json!({"$binary": {"base64": "AAEC", "subType": "00"}});
        let legacy = json!({"$binary": "AAEC", "$type": "00"});
        let expected = SourceValue::Binary {
            subtype: 0,
            bytes: vec![0, 1, 2],
        };
        assert_eq!(decode(canonical).unwrap(), expected);
        assert_eq!(decode(legacy).unwrap(), expected);
    }

    #[test]
    fn test_decode_uuid_and_numbers() {
        let uuid = decode(json!({"$uuid": "67e55044-10b1-426f-9247-bb680e5fe0c8"})).unwrap();
        assert!(matches!(uuid, SourceValue::Uuid(_)));
        assert_eq!(
            decode(json!({"$numberLong": "42"})).unwrap(),
            SourceValue::Int(42)
        );
        assert_eq!(
            decode(json!({"$numberDouble": "1.5"})).unwrap(),
            SourceValue::Float(1.5)
        );
    }

    #[test]
    fn test_wrapper_keys_need_single_field() {
        let value = decode(json!({"$oid": "x", "other": 1})).unwrap();
        assert!(matches!(value, SourceValue::Document(_)));
    }

    #[test]
    fn test_parse_record_rejects_non_document() {
        assert!(matches!(parse_record("[1, 2]"), Err(StoreError::Parse(_))));
        assert!(matches!(parse_record("{oops"), Err(StoreError::Parse(_))));
    }
}
