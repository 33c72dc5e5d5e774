//! Ordered, array-like data records.
//!
//! [`Record`] is the primary container of this crate: an insertion-ordered
//! mapping from [`Key`] to [`Value`] with convenience semantics layered on top.
//!
//! # Core Operations
//!
//! - **Access**: [`Record::get`], [`Record::set`], [`Record::exists`], [`Record::unset`]
//!   and `record[key]` indexing, which forwards to the same operations
//! - **Bulk transforms**: [`Record::merge`], [`Record::replace`], [`Record::filter_keys`],
//!   [`Record::remove_empty`], [`Record::reset`]
//! - **Sequence operations**: see the `stack` submodule
//! - **Iteration**: see the `cursor` submodule
//! - **Serialization**: [`Record::to_array`], [`Record::to_json`], [`Record::to_dump`] and,
//!   with the "yaml" feature, YAML text and files
//!
//! # Examples
//!
//! ```
//! use recordkit::array;
//! use recordkit::record::{Record, Value};
//!
//! let mut record = Record::from_mapping(&array! {
//!     "name" => "Alice",
//!     "address" => array! { "city" => "NYC" },
//! }, true);
//!
//! // Nested arrays were wrapped into nested records
//! let address = record.get_as::<&Record>("address").unwrap();
//! assert_eq!(address.get("city").unwrap(), "NYC");
//!
//! record["age"] = Value::from(30);
//! assert!(record.exists("age"));
//! assert_eq!(record.keys(), ["name", "address", "age"]);
//! ```

use std::{
    collections::HashSet,
    ops::{Index, IndexMut},
};

mod cursor;
mod dump;
pub mod errors;
mod key;
pub mod serialize;
mod stack;
pub mod traits;
pub mod value;
#[cfg(feature = "yaml")]
pub mod yaml;

pub use errors::RecordError;
pub use key::Key;
pub use traits::Mapping;
pub use value::{Array, Opaque, RowSet, Value, is_list, list};
#[cfg(feature = "yaml")]
pub use yaml::{EmitOptions, LineBreak};

static NULL: Value = Value::Null;

/// Ordered, mutable key-value container.
///
/// Keys are unique. Setting an existing key overwrites its value in place,
/// setting a new key appends it at the end. Cloning produces an independent
/// copy of the backing array: nested records and raw arrays are duplicated,
/// foreign [`Opaque`] objects are shared.
///
/// Each record also carries a cursor for the `rewind`/`current`/`key`/`next`/`valid`
/// protocol. The cursor is not part of the record's value: it is ignored by
/// equality and reset on clone.
#[derive(Debug, Default)]
pub struct Record {
    data: Array,
    cursor: usize,
}

impl Record {
    /// Creates a new empty record
    pub fn new() -> Self {
        Self {
            data: Array::new(),
            cursor: 0,
        }
    }

    /// Creates a record from any mapping, optionally wrapping nested mappings
    /// into nested records.
    pub fn from_mapping<M: Mapping + ?Sized>(source: &M, recursive: bool) -> Self {
        let mut record = Self::new();
        record.merge_from(source, recursive);
        record
    }

    /// Creates a record from a dynamic value.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidArgument`] if `source` is not mapping-like.
    pub fn try_from_value(source: impl Into<Value>, recursive: bool) -> crate::Result<Self> {
        let mut record = Self::new();
        record.merge(source, recursive)?;
        Ok(record)
    }

    /// Builder method to set a value and return self
    pub fn with(mut self, key: impl Into<Key>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Gets the value stored under `key`.
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.data.get(&key.into())
    }

    /// Gets the value stored under `key`, or `default` if the key is absent.
    ///
    /// A key that is present with a null value returns that null, not the default.
    pub fn get_or(&self, key: impl Into<Key>, default: impl Into<Value>) -> Value {
        match self.get(key) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    /// Gets a value by key with automatic type conversion using TryFrom
    ///
    /// Returns None if the key doesn't exist or type conversion fails.
    ///
    /// ```
    /// # use recordkit::record::Record;
    /// let record = Record::new().with("name", "Alice").with("age", 30);
    ///
    /// assert_eq!(record.get_as::<&str>("name"), Some("Alice"));
    /// assert_eq!(record.get_as::<i64>("age"), Some(30));
    /// assert_eq!(record.get_as::<i64>("name"), None);
    /// ```
    pub fn get_as<'a, T>(&'a self, key: impl Into<Key>) -> Option<T>
    where
        T: TryFrom<&'a Value, Error = RecordError>,
    {
        let value = self.get(key)?;
        T::try_from(value).ok()
    }

    /// Gets a mutable reference to the value stored under `key`
    pub fn get_mut(&mut self, key: impl Into<Key>) -> Option<&mut Value> {
        self.data.get_mut(&key.into())
    }

    /// Sets a single key-value pair.
    ///
    /// An existing key keeps its position; a new key is appended.
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> &mut Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Replaces the entire contents with those of `source`.
    ///
    /// The record is cleared and then repopulated with a recursive merge, so
    /// nested mappings in `source` become nested records.
    pub fn replace<M: Mapping + ?Sized>(&mut self, source: &M) -> &mut Self {
        let entries: Vec<(Key, Value)> = source
            .entries()
            .map(|(key, value)| (key, value.clone()))
            .collect();
        self.reset();
        self.absorb(entries, true);
        self
    }

    /// Returns true if `key` is present, even when its value is null or falsy
    pub fn exists(&self, key: impl Into<Key>) -> bool {
        self.data.contains_key(&key.into())
    }

    /// Removes `key` if present. Absent keys are ignored.
    pub fn unset(&mut self, key: impl Into<Key>) -> &mut Self {
        self.remove(key);
        self
    }

    /// Removes `key` and returns its value, if present.
    ///
    /// The cursor stays on the entry it pointed at.
    pub fn remove(&mut self, key: impl Into<Key>) -> Option<Value> {
        let (index, _, value) = self.data.shift_remove_full(&key.into())?;
        if index < self.cursor {
            self.cursor -= 1;
        }
        Some(value)
    }

    /// Keeps the entries for which `keep` returns true, in order, and moves the
    /// cursor back by the number of entries dropped before it.
    fn retain_entries<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Key, &Value) -> bool,
    {
        let cursor = self.cursor;
        let mut index = 0;
        let mut dropped_before = 0;
        self.data.retain(|key, value| {
            let kept = keep(key, value);
            if !kept && index < cursor {
                dropped_before += 1;
            }
            index += 1;
            kept
        });
        self.cursor -= dropped_before;
    }

    /// Snapshot of the keys in their current order
    pub fn keys(&self) -> Vec<Key> {
        self.data.keys().cloned().collect()
    }

    /// Snapshot of the values in their current order
    pub fn values(&self) -> Vec<Value> {
        self.data.values().cloned().collect()
    }

    /// Number of key-value pairs
    pub fn count(&self) -> usize {
        self.data.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true if any stored value is loosely equal to `value`.
    ///
    /// See [`Value::loose_eq`] for the coercion rules, e.g. `0` matches `"0"`.
    pub fn value_exists(&self, value: impl Into<Value>) -> bool {
        let needle = value.into();
        self.data.values().any(|stored| stored.loose_eq(&needle))
    }

    /// Merges a mapping-like value into this record.
    ///
    /// Entries are set in source order. With `recursive`, every value that is
    /// itself mapping-like is first wrapped into a recursively built record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidArgument`] if `source` is neither a raw
    /// array nor a record.
    pub fn merge(&mut self, source: impl Into<Value>, recursive: bool) -> crate::Result<&mut Self> {
        match source.into() {
            Value::Array(array) => self.absorb(array, recursive),
            Value::Record(record) => self.absorb(record.data, recursive),
            other => {
                tracing::warn!(kind = other.type_name(), "Rejected merge source");
                return Err(RecordError::InvalidArgument {
                    reason: format!("merge source is not an array nor a record: {other:?}"),
                }
                .into());
            }
        }
        Ok(self)
    }

    /// Merges any [`Mapping`] into this record. Cannot fail.
    pub fn merge_from<M: Mapping + ?Sized>(&mut self, source: &M, recursive: bool) -> &mut Self {
        for (key, value) in source.entries() {
            self.merge_entry(key, value.clone(), recursive);
        }
        self
    }

    /// Merges the fields of any serializable value, such as a struct with
    /// named fields.
    pub fn merge_serialize<T: serde::Serialize + ?Sized>(
        &mut self,
        source: &T,
        recursive: bool,
    ) -> crate::Result<&mut Self> {
        self.merge(Value::from_serialize(source)?, recursive)
    }

    fn absorb(&mut self, entries: impl IntoIterator<Item = (Key, Value)>, recursive: bool) {
        for (key, value) in entries {
            self.merge_entry(key, value, recursive);
        }
    }

    fn merge_entry(&mut self, key: Key, value: Value, recursive: bool) {
        let value = if recursive { wrap_nested(value) } else { value };
        self.data.insert(key, value);
    }

    /// Keeps only the entries whose key appears in `keys`, preserving order.
    ///
    /// ```
    /// # use recordkit::{array, record::Record};
    /// let mut record = Record::from(array! { "a" => 1, "b" => 2, "c" => 3 });
    /// record.filter_keys(["b"]);
    /// assert_eq!(record.keys(), ["b"]);
    /// ```
    pub fn filter_keys<I, K>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        let allowed: HashSet<Key> = keys.into_iter().map(Into::into).collect();
        self.retain_entries(|key, _| allowed.contains(key));
        self
    }

    /// Keeps only the entries whose key appears among the values of `keys`,
    /// which must be a raw array or a record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidArgument`] for any other value.
    pub fn filter_keys_value(&mut self, keys: &Value) -> crate::Result<&mut Self> {
        let Some(mapping) = keys.as_mapping() else {
            return Err(RecordError::InvalidArgument {
                reason: format!("Invalid keys to filter: {}", keys.type_name()),
            }
            .into());
        };
        let allowed: Vec<Key> = mapping
            .entries()
            .filter_map(|(_, value)| Key::try_from(value).ok())
            .collect();
        Ok(self.filter_keys(allowed))
    }

    /// Removes every entry whose value is empty text.
    ///
    /// Scalars are judged by their string coercion, so `null` and `false` are
    /// removed as well. Arrays, records, row sets and objects are always kept.
    pub fn remove_empty(&mut self) -> &mut Self {
        self.retain_entries(|_, value| !value.is_blank());
        self
    }

    /// Removes all entries
    pub fn reset(&mut self) -> &mut Self {
        self.data.clear();
        self.cursor = 0;
        self
    }
}

/// Wraps mapping-like values into recursively built records.
fn wrap_nested(value: Value) -> Value {
    match value {
        Value::Array(array) => {
            let mut nested = Record::new();
            nested.absorb(array, true);
            Value::Record(nested)
        }
        Value::Record(record) => {
            let mut nested = Record::new();
            nested.absorb(record.data, true);
            Value::Record(nested)
        }
        other => other,
    }
}

impl Clone for Record {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            cursor: 0,
        }
    }
}

/// Records are equal when they hold the same entries in the same order.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.data.len() == other.data.len() && self.data.iter().eq(other.data.iter())
    }
}

impl Mapping for Record {
    fn entries(&self) -> Box<dyn Iterator<Item = (Key, &Value)> + '_> {
        Box::new(self.data.iter().map(|(key, value)| (key.clone(), value)))
    }

    fn lookup(&self, key: &Key) -> Option<&Value> {
        self.data.get(key)
    }

    fn entry_count(&self) -> usize {
        self.data.len()
    }

    fn to_array(&self, recursive: bool) -> Array {
        Record::to_array(self, recursive)
    }
}

impl From<Array> for Record {
    fn from(data: Array) -> Self {
        Self { data, cursor: 0 }
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut record = Record::new();
        record.extend(iter);
        record
    }
}

impl<K: Into<Key>, V: Into<Value>> Extend<(K, V)> for Record {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

/// `record[key]` reads like [`Record::get`]; missing keys read as [`Value::Null`].
impl<K: Into<Key>> Index<K> for Record {
    type Output = Value;

    fn index(&self, key: K) -> &Value {
        self.get(key).unwrap_or(&NULL)
    }
}

/// `record[key] = value` behaves like [`Record::set`]: an absent key is
/// appended, an existing key is overwritten in place.
impl<K: Into<Key>> IndexMut<K> for Record {
    fn index_mut(&mut self, key: K) -> &mut Value {
        self.data.entry(key.into()).or_insert(Value::Null)
    }
}
