//! Capability traits for mapping-like containers.
//!
//! Anything implementing [`Mapping`] can seed, merge into or replace a
//! [`Record`](super::Record). The check is structural: a mapping supports
//! conversion to a raw [`Array`], ordered iteration and keyed access. It is
//! implemented by `Record`, raw `Array`s and plain `Vec<Value>` sequences.

use super::{Array, Key, Value, serialize::flatten_array};

/// A mapping-like container with ordered entries and keyed access.
///
/// # Examples
///
/// ```
/// use recordkit::array;
/// use recordkit::record::{Key, Mapping, Record};
///
/// fn first_key(mapping: &dyn Mapping) -> Option<Key> {
///     mapping.entries().next().map(|(key, _)| key)
/// }
///
/// let record = Record::from(array! { "b" => 1, "a" => 2 });
/// assert_eq!(first_key(&record), Some(Key::from("b")));
/// ```
pub trait Mapping {
    /// Iterates over the entries in order.
    fn entries(&self) -> Box<dyn Iterator<Item = (Key, &Value)> + '_>;

    /// Looks up the value stored under `key`.
    fn lookup(&self, key: &Key) -> Option<&Value>;

    /// Number of entries.
    fn entry_count(&self) -> usize;

    /// Converts to a raw array. The recursive form converts nested records,
    /// row sets and foreign objects into plain data.
    fn to_array(&self, recursive: bool) -> Array;
}

impl Mapping for Array {
    fn entries(&self) -> Box<dyn Iterator<Item = (Key, &Value)> + '_> {
        Box::new(self.iter().map(|(key, value)| (key.clone(), value)))
    }

    fn lookup(&self, key: &Key) -> Option<&Value> {
        self.get(key)
    }

    fn entry_count(&self) -> usize {
        self.len()
    }

    fn to_array(&self, recursive: bool) -> Array {
        if recursive {
            flatten_array(self)
        } else {
            self.clone()
        }
    }
}

impl Mapping for Vec<Value> {
    fn entries(&self) -> Box<dyn Iterator<Item = (Key, &Value)> + '_> {
        Box::new(
            self.iter()
                .enumerate()
                .map(|(i, value)| (Key::from(i), value)),
        )
    }

    fn lookup(&self, key: &Key) -> Option<&Value> {
        let index = usize::try_from(key.as_index()?).ok()?;
        self.get(index)
    }

    fn entry_count(&self) -> usize {
        self.len()
    }

    fn to_array(&self, recursive: bool) -> Array {
        let array = super::list(self.iter().cloned());
        if recursive { flatten_array(&array) } else { array }
    }
}
