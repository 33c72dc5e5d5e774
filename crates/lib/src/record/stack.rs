//! Sequence and stack operations.
//!
//! These treat the record as an ordered sequence. Integer keys are renumbered
//! where array semantics call for it; string keys keep their names.

use tracing::warn;

use super::{Array, Key, Record, Value};

impl Record {
    /// Next free integer key: one past the largest integer key, or 0.
    ///
    /// None once `u64::MAX` is taken.
    fn next_index(&self) -> Option<u64> {
        match self.data.keys().filter_map(Key::as_index).max() {
            Some(max) => max.checked_add(1),
            None => Some(0),
        }
    }

    /// Renumbers integer keys from 0 in order, keeping string keys.
    fn renumber(&mut self) {
        let mut next = 0u64;
        let data = std::mem::take(&mut self.data);
        self.data = data
            .into_iter()
            .map(|(key, value)| match key {
                Key::Index(_) => {
                    let key = Key::Index(next);
                    next += 1;
                    (key, value)
                }
                name => (name, value),
            })
            .collect();
        self.cursor = 0;
    }

    /// Appends `value` under the next free integer key.
    ///
    /// If the largest integer key is already `u64::MAX` there is no free key
    /// left; the record is left unchanged.
    pub fn push(&mut self, value: impl Into<Value>) -> &mut Self {
        match self.next_index() {
            Some(index) => {
                self.data.insert(Key::Index(index), value.into());
            }
            None => warn!("Push ignored: no free integer key after u64::MAX"),
        }
        self
    }

    /// Removes and returns the last value, or null if empty.
    ///
    /// Same as [`Record::pop_or`] with a null default.
    pub fn pop(&mut self) -> Value {
        self.pop_or(Value::Null)
    }

    /// Removes and returns the last value.
    ///
    /// If the removed value is loosely equal to `""` (empty text, null, `false`,
    /// or nothing to pop at all) `default` is returned instead.
    pub fn pop_or(&mut self, default: impl Into<Value>) -> Value {
        let popped = self.data.pop().map_or(Value::Null, |(_, value)| value);
        self.cursor = 0;
        if popped.loose_eq(&Value::Text(String::new())) {
            default.into()
        } else {
            popped
        }
    }

    /// Removes and returns the first value, or null if empty.
    ///
    /// Integer keys of the remaining entries are renumbered from 0.
    pub fn shift(&mut self) -> Value {
        let shifted = self.data.shift_remove_index(0).map(|(_, value)| value);
        self.renumber();
        shifted.unwrap_or(Value::Null)
    }

    /// Prepends `value`, renumbering integer keys from 0.
    pub fn unshift(&mut self, value: impl Into<Value>) -> &mut Self {
        let rest = std::mem::take(&mut self.data);
        self.data.insert(Key::Index(0), value.into());
        let mut next = 1u64;
        for (key, value) in rest {
            let key = match key {
                Key::Index(_) => {
                    next += 1;
                    Key::Index(next - 1)
                }
                name => name,
            };
            self.data.insert(key, value);
        }
        self.cursor = 0;
        self
    }

    /// Returns a copy of a portion of the record.
    ///
    /// A negative `offset` counts from the end. `length` of `None` runs to the
    /// end, a negative `length` stops that many entries before the end. Integer
    /// keys in the result are renumbered from 0; string keys are preserved.
    pub fn slice(&self, offset: i64, length: Option<i64>) -> Array {
        let len = self.data.len() as i64;
        let start = if offset < 0 {
            (len + offset).max(0)
        } else {
            offset.min(len)
        };
        let end = match length {
            None => len,
            Some(length) if length < 0 => (len + length).max(start),
            Some(length) => start.saturating_add(length).min(len),
        };

        let mut next = 0u64;
        self.data
            .iter()
            .skip(start as usize)
            .take((end - start).max(0) as usize)
            .map(|(key, value)| match key {
                Key::Index(_) => {
                    let key = Key::Index(next);
                    next += 1;
                    (key, value.clone())
                }
                name => (name.clone(), value.clone()),
            })
            .collect()
    }

    /// Joins the string coercion of every value with `glue`
    pub fn implode(&self, glue: &str) -> String {
        self.data
            .values()
            .map(Value::coerce_string)
            .collect::<Vec<_>>()
            .join(glue)
    }

    /// Sorts entries by key, ascending
    pub fn ksort(&mut self) -> &mut Self {
        self.data.sort_keys();
        self.cursor = 0;
        self
    }

    /// Sorts entries by key, descending
    pub fn krsort(&mut self) -> &mut Self {
        self.data.sort_by(|k1, _, k2, _| k2.cmp(k1));
        self.cursor = 0;
        self
    }

    /// Sorts values ascending, discarding keys and reindexing from 0
    pub fn sort(&mut self) -> &mut Self {
        self.sort_values_by(Value::compare)
    }

    /// Sorts values descending, discarding keys and reindexing from 0
    pub fn rsort(&mut self) -> &mut Self {
        self.sort_values_by(|a, b| b.compare(a))
    }

    fn sort_values_by<F>(&mut self, compare: F) -> &mut Self
    where
        F: FnMut(&Value, &Value) -> std::cmp::Ordering,
    {
        let mut values: Vec<Value> = std::mem::take(&mut self.data).into_values().collect();
        values.sort_by(compare);
        self.data = super::list(values);
        self.cursor = 0;
        self
    }
}
