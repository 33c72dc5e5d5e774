//! Conversion of records into plain data, JSON text and serde formats.
//!
//! The recursive plain form contains only scalars and raw arrays. It is built
//! by dispatching on the kind of each value:
//!
//! - scalars pass through unchanged
//! - nested records convert recursively
//! - raw arrays convert element by element
//! - row sets expand into a sequence of their rows, each converted recursively
//! - foreign objects become the placeholder text `"(OBJECT)<type name>"`
//!
//! The same rules drive the serde `Serialize` impls, so JSON and YAML output
//! always describe the plain form. Arrays whose keys are `0..n` in order
//! serialize as sequences, every other array as a map in insertion order.

use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, SeqAccess, Visitor},
    ser::{SerializeMap, SerializeSeq},
};

use super::{Array, Key, Record, RowSet, Value, is_list, list};

impl Record {
    /// Returns the contents as a raw array.
    ///
    /// The non-recursive form is a copy of the backing array with values left
    /// as they are. The recursive form converts every nested record, row set
    /// and foreign object into plain data.
    pub fn to_array(&self, recursive: bool) -> Array {
        if recursive {
            flatten_array(&self.data)
        } else {
            self.data.clone()
        }
    }

    /// Borrows the backing array
    pub fn as_array(&self) -> &Array {
        &self.data
    }

    /// Consumes the record, returning the backing array
    pub fn into_array(self) -> Array {
        self.data
    }

    /// Encodes the recursive plain form as compact JSON.
    ///
    /// ```
    /// # use recordkit::{array, record::Record};
    /// let record = Record::from_mapping(&array! { "a" => 1, "b" => array![true, "x"] }, true);
    /// assert_eq!(record.to_json().unwrap(), r#"{"a":1,"b":[true,"x"]}"#);
    /// ```
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Converts a single value into plain data.
pub fn flatten(value: &Value) -> Value {
    match value {
        Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Text(_) => {
            value.clone()
        }
        Value::Record(record) => Value::Array(record.to_array(true)),
        Value::Array(array) => Value::Array(flatten_array(array)),
        Value::Rows(rows) => Value::Array(flatten_rows(rows)),
        // Foreign objects are never serialized, only tagged
        Value::Object(object) => Value::Text(object.placeholder()),
    }
}

/// Converts every value of a raw array into plain data, keeping keys.
pub fn flatten_array(array: &Array) -> Array {
    array
        .iter()
        .map(|(key, value)| (key.clone(), flatten(value)))
        .collect()
}

fn flatten_rows(rows: &RowSet) -> Array {
    list(rows.iter().map(|row| Value::Array(row.to_array(true))))
}

/// Same as [`Record::to_json`].
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

fn serialize_array<S: Serializer>(array: &Array, serializer: S) -> Result<S::Ok, S::Error> {
    if is_list(array) {
        let mut seq = serializer.serialize_seq(Some(array.len()))?;
        for value in array.values() {
            seq.serialize_element(value)?;
        }
        seq.end()
    } else {
        let mut map = serializer.serialize_map(Some(array.len()))?;
        for (key, value) in array {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Array(array) => serialize_array(array, serializer),
            Value::Record(record) => serialize_array(record.as_array(), serializer),
            Value::Rows(rows) => {
                let mut seq = serializer.serialize_seq(Some(rows.len()))?;
                for row in rows.iter() {
                    seq.serialize_element(row)?;
                }
                seq.end()
            }
            Value::Object(object) => serializer.serialize_str(&object.placeholder()),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_array(&self.data, serializer)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar, sequence or map")
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::Text(v.to_string()))
    }

    fn visit_string<E: serde::de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::Text(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Value>()? {
            items.push(item);
        }
        Ok(Value::Array(list(items)))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut array = Array::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<Key, Value>()? {
            array.insert(key, value);
        }
        Ok(Value::Array(array))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Deserializes any map or sequence into a record, wrapping nested
/// mappings into nested records.
impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Record::try_from_value(value, true).map_err(serde::de::Error::custom)
    }
}
