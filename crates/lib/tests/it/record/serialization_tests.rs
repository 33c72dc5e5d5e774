//! Serialization tests for Record
//!
//! Plain-form conversion, JSON text, `print_r`-style dumps and serde support.

use recordkit::{
    Record, array,
    record::{Key, RowSet, Value, is_list, list},
};

use super::helpers::*;
use crate::helpers::abc_record;

struct Connection;

// ===== PLAIN FORM =====

#[test]
fn test_to_array_recursive_flattens_nested_records() {
    let record = Record::from_mapping(&setup_user_record(), true);
    let plain = record.to_array(true);

    assert_eq!(
        plain.get(&Key::from("address")),
        Some(&Value::Array(array! { "city" => "NYC", "zip" => "10001" }))
    );
    assert_eq!(
        plain.get(&Key::from("tags")),
        Some(&Value::Array(list(["admin", "staff"])))
    );
}

#[test]
fn test_to_array_shallow_keeps_records() {
    let record = Record::from_mapping(&setup_user_record(), true);
    let shallow = record.to_array(false);
    assert!(matches!(shallow.get(&Key::from("address")), Some(Value::Record(_))));
}

#[test]
fn test_to_array_expands_row_sets() {
    let rows: RowSet = vec![
        Record::new().with("id", 1),
        Record::new().with("id", 2),
    ]
    .into();
    let record = Record::new().with("rows", rows);

    let plain = record.to_array(true);
    let expanded = plain
        .get(&Key::from("rows"))
        .and_then(Value::as_array)
        .expect("rows should expand to an array");
    assert!(is_list(expanded));
    assert_eq!(expanded.len(), 2);
    assert_eq!(
        expanded.get(&Key::Index(1)),
        Some(&Value::Array(array! { "id" => 2 }))
    );
}

#[test]
fn test_to_array_replaces_objects_with_placeholder() {
    let record = Record::new()
        .with("conn", Value::object(Connection))
        .with("nested", Record::new().with("conn", Value::object(Connection)));

    let plain = record.to_array(true);
    let placeholder = plain
        .get(&Key::from("conn"))
        .and_then(Value::as_text)
        .expect("object should become text");
    assert!(placeholder.starts_with("(OBJECT)"));
    assert!(placeholder.ends_with("Connection"));

    let nested = plain
        .get(&Key::from("nested"))
        .and_then(Value::as_array)
        .expect("nested record should flatten");
    assert_eq!(nested.get(&Key::from("conn")).and_then(Value::as_text), Some(placeholder));
}

// ===== JSON =====

#[test]
fn test_to_json_compact_with_insertion_order() {
    let record = Record::new()
        .with("name", "Alice")
        .with("tags", Value::Array(list(["a", "b"])))
        .with(0, "extra");
    assert_eq!(
        record.to_json().unwrap(),
        r#"{"name":"Alice","tags":["a","b"],"0":"extra"}"#
    );
}

#[test]
fn test_to_json_sequence_root() {
    let record = Record::from(list([1, 2, 3]));
    assert_eq!(record.to_json().unwrap(), "[1,2,3]");
}

#[test]
fn test_to_json_non_sequential_indices_are_objects() {
    let record = Record::from(array! { 1 => "a", 0 => "b" });
    assert_eq!(record.to_json().unwrap(), r#"{"1":"a","0":"b"}"#);
}

#[test]
fn test_to_json_empty_record() {
    assert_eq!(Record::new().to_json().unwrap(), "[]");
}

#[test]
fn test_to_json_scalars() {
    let record = Record::new()
        .with("null", Value::Null)
        .with("yes", true)
        .with("pi", 3.25)
        .with("text", "quote \" here");
    assert_eq!(
        record.to_json().unwrap(),
        r#"{"null":null,"yes":true,"pi":3.25,"text":"quote \" here"}"#
    );
}

#[test]
fn test_display_matches_to_json() {
    let record = Record::from_mapping(&setup_user_record(), true);
    assert_eq!(record.to_string(), record.to_json().unwrap());
}

// ===== DUMP =====

#[test]
fn test_to_dump_layout() {
    let record = Record::new()
        .with("name", "Alice")
        .with("tags", Value::Array(list(["a"])));

    let expected = "Array\n\
                    (\n    \
                    [name] => Alice\n    \
                    [tags] => Array\n        \
                    (\n            \
                    [0] => a\n        \
                    )\n\
                    \n\
                    )\n";
    assert_eq!(record.to_dump(true), expected);
}

#[test]
fn test_to_dump_shallow_marks_nested_records() {
    let record = Record::new().with("inner", Record::new().with("k", "v"));
    let dump = record.to_dump(false);
    assert!(dump.contains("[inner] => Record Object\n"));
    assert!(dump.contains("[k] => v\n"));

    let flat = record.to_dump(true);
    assert!(flat.contains("[inner] => Array\n"));
    assert!(!flat.contains("Record Object"));
}

#[test]
fn test_to_dump_empty_record() {
    assert_eq!(Record::new().to_dump(true), "Array\n(\n)\n");
}

// ===== SERDE =====

#[test]
fn test_deserialize_record_wraps_nested_mappings() {
    let record: Record = serde_json::from_str(r#"{"a":{"b":1},"c":[1,2],"3":"x"}"#).unwrap();

    let a = record.get_as::<&Record>("a").expect("a should be a record");
    assert_eq!(a["b"], 1);
    assert!(record.get_as::<&Record>("c").is_some());
    assert_eq!(record[3u64], "x");
}

#[test]
fn test_deserialize_record_rejects_scalars() {
    assert!(serde_json::from_str::<Record>("5").is_err());
}

#[test]
fn test_serde_round_trip_through_json() {
    let record = Record::from_mapping(&setup_user_record(), true);
    let json = serde_json::to_string(&record).unwrap();
    let decoded: Record = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn test_value_deserializes_numbers() {
    let value: Value = serde_json::from_str("[1, 2.5, -3, null]").unwrap();
    assert_eq!(
        value,
        Value::Array(list([
            Value::Int(1),
            Value::Float(2.5),
            Value::Int(-3),
            Value::Null,
        ]))
    );
}

#[test]
fn test_serialize_embeds_in_larger_document() {
    let record = abc_record();
    let document = serde_json::json!({ "payload": record });
    assert_eq!(document.to_string(), r#"{"payload":{"a":1,"b":2,"c":3}}"#);
}
