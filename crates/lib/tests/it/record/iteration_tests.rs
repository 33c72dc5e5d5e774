//! Iteration tests for Record
//!
//! Covers the lazy iterators and the single-position cursor protocol.

use recordkit::{
    Record,
    record::{Key, Value},
};

use crate::helpers::abc_record;

#[test]
fn test_cursor_walks_in_order() {
    let mut record = Record::new().with("a", 1).with("b", 2);
    record.rewind();

    assert!(record.valid());
    assert_eq!(record.key(), Some(&Key::from("a")));
    assert_eq!(record.current(), Some(&Value::Int(1)));

    assert_eq!(record.next(), Some(&Value::Int(2)));
    assert_eq!(record.key(), Some(&Key::from("b")));

    assert_eq!(record.next(), None);
    assert!(!record.valid());
    assert_eq!(record.key(), None);
    assert_eq!(record.current(), None);
}

#[test]
fn test_cursor_next_past_end_stays_invalid() {
    let mut record = Record::new().with("only", 1);
    record.next();
    record.next();
    assert!(!record.valid());

    record.rewind();
    assert_eq!(record.current(), Some(&Value::Int(1)));
}

#[test]
fn test_cursor_on_empty_record() {
    let mut record = Record::new();
    record.rewind();
    assert!(!record.valid());
    assert_eq!(record.next(), None);
}

#[test]
fn test_cursor_loop_visits_every_entry() {
    let mut record = abc_record();
    let mut visited = Vec::new();

    record.rewind();
    while record.valid() {
        if let (Some(key), Some(value)) = (record.key(), record.current()) {
            visited.push(format!("{key}={value}"));
        }
        record.next();
    }
    assert_eq!(visited, ["a=1", "b=2", "c=3"]);
}

#[test]
fn test_unset_before_cursor_keeps_position() {
    let mut record = abc_record();
    record.next();
    record.unset("a");
    assert_eq!(record.key(), Some(&Key::from("b")));

    // Removing entries after the cursor leaves it alone
    record.unset("c");
    assert_eq!(record.key(), Some(&Key::from("b")));
}

#[test]
fn test_unset_visited_keys_while_walking() {
    let mut record = Record::new().with("a", 1).with("b", 2).with("c", 3).with("d", 4);
    let mut visited = Vec::new();

    record.rewind();
    while record.valid() {
        let Some(key) = record.key().cloned() else {
            break;
        };
        visited.push(key.to_string());
        record.next();
        record.unset(key);
    }
    assert_eq!(visited, ["a", "b", "c", "d"]);
    assert!(record.is_empty());
}

#[test]
fn test_bulk_removal_keeps_cursor_on_entry() {
    let mut record = Record::new()
        .with("empty", "")
        .with("a", 1)
        .with("b", 2)
        .with("blank", Value::Null)
        .with("c", 3);
    record.next();
    record.next();
    assert_eq!(record.key(), Some(&Key::from("b")));

    record.remove_empty();
    assert_eq!(record.key(), Some(&Key::from("b")));

    record.filter_keys(["b", "c"]);
    assert_eq!(record.key(), Some(&Key::from("b")));
    assert_eq!(record.next(), Some(&Value::Int(3)));
}

#[test]
fn test_remove_returns_value_and_adjusts_cursor() {
    let mut record = abc_record();
    record.next();
    record.next();
    assert_eq!(record.remove("a"), Some(Value::Int(1)));
    assert_eq!(record.remove("missing"), None);
    assert_eq!(record.key(), Some(&Key::from("c")));
}

#[test]
fn test_sort_rewinds_cursor() {
    let mut record = Record::new().with("b", 2).with("a", 1);
    record.next();
    record.ksort();
    assert_eq!(record.key(), Some(&Key::from("a")));
}

#[test]
fn test_iter_is_restartable() {
    let record = abc_record();
    let first: Vec<_> = record.iter().map(|(key, _)| key.clone()).collect();
    let second: Vec<_> = record.iter().map(|(key, _)| key.clone()).collect();
    assert_eq!(first, second);
    assert_eq!(first, ["a", "b", "c"]);
}

#[test]
fn test_for_loop_over_reference() {
    let record = abc_record();
    let mut total = 0;
    for (_, value) in &record {
        total += value.as_int().unwrap_or_default();
    }
    assert_eq!(total, 6);
}

#[test]
fn test_iter_mut_updates_values() {
    let mut record = abc_record();
    for (_, value) in &mut record {
        if let Some(n) = value.as_int() {
            *value = Value::Int(n * 10);
        }
    }
    assert_eq!(record.values(), vec![Value::Int(10), Value::Int(20), Value::Int(30)]);
}

#[test]
fn test_into_iter_consumes_in_order() {
    let pairs: Vec<(Key, Value)> = abc_record().into_iter().collect();
    assert_eq!(pairs[0], (Key::from("a"), Value::Int(1)));
    assert_eq!(pairs[2], (Key::from("c"), Value::Int(3)));
}

#[test]
fn test_iteration_reflects_mutation_order() {
    let mut record = abc_record();
    record.unset("a").set("a", 9);
    let keys: Vec<_> = record.iter().map(|(key, _)| key.to_string()).collect();
    assert_eq!(keys, ["b", "c", "a"]);
}
