use recordkit::{
    Record, array,
    record::{Key, Value},
};

/// Create a test Record describing a user with nested raw data
pub fn setup_user_record() -> Record {
    Record::from(array! {
        "name" => "Alice",
        "age" => 30,
        "address" => array! { "city" => "NYC", "zip" => "10001" },
        "tags" => array!["admin", "staff"],
    })
}

/// Assert that a Record holds exactly the given keys, in order
pub fn assert_keys(record: &Record, expected: &[&str]) {
    let expected: Vec<Key> = expected.iter().map(|key| Key::from(*key)).collect();
    assert_eq!(record.keys(), expected, "Key order mismatch");
}

/// Assert that a Record contains expected text values
pub fn assert_record_contains(record: &Record, expected: &[(&str, &str)]) {
    for (key, expected_value) in expected {
        match record.get(*key) {
            Some(Value::Text(actual_value)) => {
                assert_eq!(actual_value, expected_value, "Value mismatch for key '{key}'");
            }
            Some(other) => panic!("Expected text value for key '{key}', got: {other:?}"),
            None => panic!("Key '{key}' not found in record"),
        }
    }
}
