//! Serialization for Record as a plain JSON object.
//!
//! Keys are written in sorted order so serialized records are stable.

use std::collections::HashMap;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;

use super::Record;
use super::Value;

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut keys: Vec<&String> = self.fields.keys().collect();
        keys.sort();

        let mut map = serializer.serialize_map(Some(keys.len()))?;
        for key in keys {
            map.serialize_entry(key, &self.fields[key])?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = HashMap::<String, Value>::deserialize(deserializer)?;
        Ok(fields.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_sorted_fields() {
        let record = Record::new().set("lname", "Lovelace").set("fname", "Ada");

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"fname":"Ada","lname":"Lovelace"}"#);
    }

    #[test]
    fn test_deserialize_nested_values() {
        let json = r#"{"name": "Ada", "tags": ["a", "b"], "age": 36, "active": true, "meta": {"x": null}}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.get("name"), Some(&Value::from("Ada")));
        assert_eq!(record.get("age"), Some(&Value::Int(36)));
        assert_eq!(record.get("active"), Some(&Value::Bool(true)));
        assert_eq!(record.get("tags"), Some(&Value::from(vec!["a", "b"])));
        assert!(matches!(record.get("meta"), Some(Value::Map(_))));
    }
}
