//! Conversion between request JSON and stored BSON documents.
//!
//! Outbound documents are rendered as plain JSON: ObjectIds become hex strings and
//! date-times become RFC 3339 strings, so clients never see extended-JSON wrappers.

use chrono::{SecondsFormat, TimeZone, Utc};
use mongodb::bson::{Bson, DateTime, Document};
use serde_json::{Map, Value};
use std::collections::HashMap;

pub fn to_json(doc: Document) -> Value {
    Value::Object(doc.into_iter().map(|(k, v)| (k, bson_to_json(v))).collect())
}

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => datetime_to_json(dt),
        Bson::Document(doc) => to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

fn datetime_to_json(dt: DateTime) -> Value {
    match Utc.timestamp_millis_opt(dt.timestamp_millis()).single() {
        Some(t) => Value::String(t.to_rfc3339_opts(SecondsFormat::Millis, true)),
        None => Value::from(dt.timestamp_millis()),
    }
}

/// Encodes a JSON object as a BSON document. Never fails: integers outside the
/// Int64 range are stored as Double.
pub fn from_json_object(map: Map<String, Value>) -> Document {
    map.into_iter().map(|(k, v)| (k, json_to_bson(v))).collect()
}

pub fn json_to_bson(value: Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Bson::Int64(i),
            None => Bson::Double(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => Bson::String(s),
        Value::Array(items) => Bson::Array(items.into_iter().map(json_to_bson).collect()),
        Value::Object(map) => Bson::Document(from_json_object(map)),
    }
}

/// Query string parameters become an equality filter on string values.
pub fn filter_from_query(params: HashMap<String, String>) -> Document {
    params
        .into_iter()
        .map(|(k, v)| (k, Bson::String(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};

    #[test]
    fn renders_id_and_dates_plainly() {
        let id = ObjectId::new();
        let at = DateTime::from_millis(1_700_000_000_123);
        let json = to_json(doc! {
            "_id": id,
            "title": "A",
            "createdAt": at,
            "nested": { "when": at, "refs": [id] },
        });
        assert_eq!(json["_id"], id.to_hex());
        assert_eq!(json["title"], "A");
        assert_eq!(json["createdAt"], "2023-11-14T22:13:20.123Z");
        assert_eq!(json["nested"]["when"], "2023-11-14T22:13:20.123Z");
        assert_eq!(json["nested"]["refs"][0], id.to_hex());
    }

    #[test]
    fn null_and_numbers_pass_through() {
        let json = to_json(doc! { "title": Bson::Null, "n": 3_i64, "f": 1.5 });
        assert_eq!(json["title"], Value::Null);
        assert_eq!(json["n"], 3);
        assert_eq!(json["f"], 1.5);
    }

    #[test]
    fn json_object_encodes() {
        let Value::Object(map) = serde_json::json!({"tag": "x", "count": 2, "tags": ["a"]}) else {
            unreachable!()
        };
        let doc = from_json_object(map);
        assert_eq!(doc.get_str("tag").unwrap(), "x");
        assert_eq!(doc.get_i64("count").unwrap(), 2);
        assert_eq!(doc.get_array("tags").unwrap().len(), 1);
    }

    #[test]
    fn out_of_range_integers_become_doubles() {
        let value: Value = serde_json::from_str(r#"{"big": 18446744073709551615, "neg": -5, "nested": {"f": 0.5}}"#).unwrap();
        let Value::Object(map) = value else { unreachable!() };
        let doc = from_json_object(map);
        assert_eq!(doc.get_f64("big").unwrap(), 18446744073709551615_u64 as f64);
        assert_eq!(doc.get_i64("neg").unwrap(), -5);
        assert_eq!(doc.get_document("nested").unwrap().get_f64("f").unwrap(), 0.5);
    }

    #[test]
    fn query_becomes_string_filter() {
        let mut params = HashMap::new();
        params.insert("title".to_string(), "A".to_string());
        let filter = filter_from_query(params);
        assert_eq!(filter, doc! { "title": "A" });
        assert!(filter_from_query(HashMap::new()).is_empty());
    }
}
