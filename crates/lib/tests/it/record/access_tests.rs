//! Access tests for Record
//!
//! Construction, get/set/exists/unset, indexing and the equivalence between
//! the explicit methods and `record[key]` syntax.

use recordkit::{
    Record, array,
    record::{Array, Key, Value},
};

use super::helpers::*;
use crate::helpers::abc_record;

// ===== CONSTRUCTION =====

#[test]
fn test_new_record_is_empty() {
    let record = Record::new();
    assert!(record.is_empty());
    assert_eq!(record.count(), 0);
    assert_eq!(record.to_array(false), Array::new());
}

#[test]
fn test_shallow_round_trip_through_to_array() {
    let source = array! { "a" => 1, "b" => array!["x", "y"], "c" => Value::Null };
    let record = Record::from_mapping(&source, false);
    assert_eq!(record.to_array(false), source);
}

#[test]
fn test_recursive_construction_wraps_nested_arrays() {
    let record = Record::from_mapping(&setup_user_record(), true);

    let address = record.get_as::<&Record>("address").expect("address should be a record");
    assert_record_contains(address, &[("city", "NYC"), ("zip", "10001")]);

    let tags = record.get_as::<&Record>("tags").expect("tags should be a record");
    assert_eq!(tags.get(0).unwrap(), "admin");
}

#[test]
fn test_try_from_value_rejects_scalars() {
    let err = Record::try_from_value("not a mapping", false).unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(err.module(), "record");
}

#[test]
fn test_collect_from_pairs() {
    let record: Record = vec![("x", 1), ("y", 2)].into_iter().collect();
    assert_keys(&record, &["x", "y"]);
    assert_eq!(record.get("y").unwrap(), &Value::Int(2));
}

// ===== GET / SET =====

#[test]
fn test_get_missing_returns_none_and_default() {
    let record = abc_record();
    assert_eq!(record.get("missing"), None);
    assert_eq!(record.get_or("missing", "fallback"), "fallback");
    assert_eq!(record.get_or("a", "fallback"), 1);
}

#[test]
fn test_get_or_keeps_present_null() {
    let record = Record::new().with("empty", Value::Null);
    assert_eq!(record.get_or("empty", "fallback"), Value::Null);
}

#[test]
fn test_set_overwrites_in_place() {
    let mut record = abc_record();
    record.set("a", "changed");
    assert_keys(&record, &["a", "b", "c"]);
    assert_eq!(record.get("a").unwrap(), "changed");
}

#[test]
fn test_set_appends_new_keys() {
    let mut record = abc_record();
    record.set("d", 4).set("e", 5);
    assert_keys(&record, &["a", "b", "c", "d", "e"]);
}

#[test]
fn test_numeric_string_keys_alias_integer_keys() {
    let mut record = Record::new();
    record.set("1", "one");
    assert!(record.exists(1));
    assert_eq!(record.get(1u64).unwrap(), "one");
    assert_eq!(record.keys(), vec![Key::Index(1)]);
}

#[test]
fn test_replace_clears_prior_keys() {
    let mut record = abc_record();
    record.replace(&array! { "a" => 1 });
    assert_eq!(record.to_array(false), array! { "a" => 1 });
}

#[test]
fn test_replace_with_record_is_recursive() {
    let mut record = abc_record();
    record.replace(&setup_user_record());
    assert_keys(&record, &["name", "age", "address", "tags"]);
    assert!(record.get_as::<&Record>("address").is_some());
}

#[test]
fn test_get_as_type_mismatch_is_none() {
    let record = setup_user_record();
    assert_eq!(record.get_as::<&str>("name"), Some("Alice"));
    assert_eq!(record.get_as::<i64>("age"), Some(30));
    assert_eq!(record.get_as::<i64>("name"), None);
    assert!(record.get_as::<&Array>("address").is_some());
}

// ===== EXISTS / UNSET =====

#[test]
fn test_exists_distinguishes_absent_from_falsy() {
    let record = Record::new()
        .with("null", Value::Null)
        .with("false", false)
        .with("zero", 0)
        .with("empty", "");
    for key in ["null", "false", "zero", "empty"] {
        assert!(record.exists(key), "{key} should exist");
    }
    assert!(!record.exists("absent"));
}

#[test]
fn test_unset_removes_and_ignores_absent() {
    let mut record = abc_record();
    record.unset("b").unset("absent");
    assert_keys(&record, &["a", "c"]);
    assert_eq!(record.count(), 2);
}

#[test]
fn test_keys_and_values_snapshots() {
    let mut record = abc_record();
    let keys = record.keys();
    let values = record.values();
    record.reset();

    assert_eq!(keys, ["a", "b", "c"]);
    assert_eq!(values, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    assert!(record.is_empty());
}

// ===== INDEXING =====

#[test]
fn test_index_reads_like_get() {
    let record = abc_record();
    assert_eq!(record["a"], 1);
    assert_eq!(record["missing"], Value::Null);
}

#[test]
fn test_index_mut_writes_like_set() {
    let mut via_index = abc_record();
    let mut via_set = abc_record();

    via_index["b"] = Value::from("two");
    via_index["z"] = Value::from(26);
    via_set.set("b", "two").set("z", 26);

    assert_eq!(via_index, via_set);
    assert_keys(&via_index, &["a", "b", "c", "z"]);
}

#[test]
fn test_index_mut_nested_update() {
    let mut record = Record::from_mapping(&setup_user_record(), true);
    if let Some(address) = record["address"].as_record_mut() {
        address.set("city", "Boston");
    }
    assert_eq!(record["address"].as_record().unwrap()["city"], "Boston");
}

// ===== VALUE EXISTS =====

#[test]
fn test_value_exists_uses_loose_equality() {
    let record = Record::new().with("n", 0).with("s", "abc");
    assert!(record.value_exists("0"));
    assert!(record.value_exists(0));
    assert!(record.value_exists("abc"));
    assert!(!record.value_exists("xyz"));
}

#[test]
fn test_value_exists_on_empty_record() {
    assert!(!Record::new().value_exists(Value::Null));
}

// ===== CLONE =====

#[test]
fn test_clone_is_independent() {
    let original = Record::from_mapping(&setup_user_record(), true);
    let mut copy = original.clone();

    copy.set("name", "Bob");
    if let Some(address) = copy.get_mut("address").and_then(Value::as_record_mut) {
        address.set("city", "LA");
    }

    assert_eq!(original.get("name").unwrap(), "Alice");
    assert_eq!(original["address"].as_record().unwrap()["city"], "NYC");
}

#[test]
fn test_clone_shares_opaque_objects() {
    let record = Record::new().with("handle", Value::object(String::from("conn")));
    let copy = record.clone();
    assert_eq!(record.get("handle"), copy.get("handle"));
}
