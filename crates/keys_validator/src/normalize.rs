//! Key normalization.
//!
//! Records from two schemas can only be compared once their field names agree.
//! [`normalize`] renames fields through a [`FieldMapping`]; [`canonical_key`]
//! then reduces a record to a string that is identical for equal records.

use keys_core::{FieldMapping, KeyValue, Record};
use serde_json::{Map, Value};
use tracing::warn;

/// Returns a copy of `record` with every mapped field name replaced.
///
/// Unmapped names pass through and values are never touched. When two source
/// fields land on the same target name, the one iterated later wins.
pub fn normalize(record: &Record, mapping: &FieldMapping) -> Record {
    let mut renamed = Record::new();

    for (name, value) in record.iter() {
        let new_name = mapping.map_name(name);
        if renamed.insert(new_name, value.clone()).is_some() {
            warn!(
                field = new_name,
                source = name,
                "Field rename collides with an earlier field, keeping the later value"
            );
        }
    }

    renamed
}

/// Serializes a record to a string that ignores field order.
///
/// Fields are sorted by name (byte order) and written as a JSON object, so
/// list values keep their element order.
///
/// # Example
///
/// ```rust
/// use keys_core::Record;
/// use keys_validator::canonical_key;
///
/// let a: Record = [("b", "2"), ("a", "1")].into_iter().collect();
/// let b: Record = [("a", "1"), ("b", "2")].into_iter().collect();
///
/// assert_eq!(canonical_key(&a), canonical_key(&b));
/// assert_eq!(canonical_key(&a), r#"{"a":"1","b":"2"}"#);
/// ```
pub fn canonical_key(record: &Record) -> String {
    let mut fields: Vec<(&str, &KeyValue)> = record.iter().collect();
    fields.sort_unstable_by(|a, b| a.0.cmp(b.0));

    let object: Map<String, Value> = fields
        .into_iter()
        .map(|(name, value)| (name.to_string(), key_value_to_json(value)))
        .collect();

    Value::Object(object).to_string()
}

fn key_value_to_json(value: &KeyValue) -> Value {
    match value {
        KeyValue::Single(s) => Value::String(s.clone()),
        KeyValue::Multiple(values) => {
            Value::Array(values.iter().cloned().map(Value::String).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keys_core::RecordBuilder;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_renames_mapped_fields() {
        let record: Record = [("a", "1"), ("b", "2")].into_iter().collect();
        let mapping = FieldMapping::from_pairs([("a", "x")]);

        let expected: Record = [("x", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(normalize(&record, &mapping), expected);
    }

    #[test]
    fn test_normalize_keeps_values_and_field_count() {
        let record = RecordBuilder::new()
            .value("id", "5")
            .values("tags", ["a", "b"])
            .build()
            .unwrap();
        let mapping = FieldMapping::from_pairs([("id", "donor_id"), ("unused", "other")]);

        let renamed = normalize(&record, &mapping);
        assert_eq!(renamed.len(), record.len());
        assert_eq!(renamed.get("donor_id"), record.get("id"));
        assert_eq!(renamed.get("tags"), record.get("tags"));
        assert!(!renamed.contains_field("id"));
    }

    #[test]
    fn test_normalize_does_not_mutate_input() {
        let record: Record = [("a", "1")].into_iter().collect();
        let mapping = FieldMapping::from_pairs([("a", "x")]);

        let _ = normalize(&record, &mapping);
        assert!(record.contains_field("a"));
    }

    #[test]
    fn test_normalize_collision_last_write_wins() {
        let record: Record = [("a", "1"), ("b", "2")].into_iter().collect();
        let mapping = FieldMapping::from_pairs([("a", "x"), ("b", "x")]);

        let renamed = normalize(&record, &mapping);
        assert_eq!(renamed.len(), 1);
        assert_eq!(renamed.get("x"), Some(&KeyValue::from("2")));
    }

    #[test]
    fn test_canonical_key_ignores_field_order() {
        let a: Record = [("z", "1"), ("m", "2"), ("a", "3")].into_iter().collect();
        let b: Record = [("a", "3"), ("z", "1"), ("m", "2")].into_iter().collect();
        let c: Record = [("m", "2"), ("a", "3"), ("z", "1")].into_iter().collect();

        assert_eq!(canonical_key(&a), canonical_key(&b));
        assert_eq!(canonical_key(&a), canonical_key(&c));
    }

    #[test]
    fn test_canonical_key_keeps_list_order() {
        let mut a = Record::new();
        a.insert("tags", vec!["a", "b"]);
        let mut b = Record::new();
        b.insert("tags", vec!["b", "a"]);

        assert_ne!(canonical_key(&a), canonical_key(&b));
    }

    #[test]
    fn test_canonical_key_distinguishes_single_from_list() {
        let mut single = Record::new();
        single.insert("k", "a");
        let mut list = Record::new();
        list.insert("k", vec!["a"]);

        assert_ne!(canonical_key(&single), canonical_key(&list));
    }

    #[test]
    fn test_canonical_key_escapes_separators() {
        let a: Record = [("k", "1\",\"j\":\"2")].into_iter().collect();
        let b: Record = [("k", "1"), ("j", "2")].into_iter().collect();

        assert_ne!(canonical_key(&a), canonical_key(&b));
    }

    #[test]
    fn test_canonical_key_empty_record() {
        assert_eq!(canonical_key(&Record::new()), "{}");
    }
}
