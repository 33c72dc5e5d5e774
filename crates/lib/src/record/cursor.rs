//! Iteration over records.
//!
//! Two styles are supported. [`Record::iter`] and the `IntoIterator` impls give
//! lazy, restartable `(key, value)` iterators. The cursor protocol
//! (`rewind`/`current`/`key`/`next`/`valid`) walks a single per-record position
//! and is therefore not reentrant: independent walks need separate records or
//! snapshots from [`Record::keys`]/[`Record::values`].
//!
//! ```
//! # use recordkit::{array, record::Record};
//! let mut record = Record::from(array! { "a" => 1, "b" => 2 });
//! let mut seen = Vec::new();
//!
//! record.rewind();
//! while record.valid() {
//!     seen.push((record.key().cloned().unwrap(), record.current().cloned().unwrap()));
//!     record.next();
//! }
//! assert_eq!(seen.len(), 2);
//! assert!(!record.valid());
//! ```

use super::{Key, Record, Value};

pub type Iter<'a> = indexmap::map::Iter<'a, Key, Value>;
pub type IterMut<'a> = indexmap::map::IterMut<'a, Key, Value>;
pub type IntoIter = indexmap::map::IntoIter<Key, Value>;

impl Record {
    /// Returns an iterator over `(key, value)` pairs in current order
    pub fn iter(&self) -> Iter<'_> {
        self.data.iter()
    }

    /// Returns an iterator over `(key, value)` pairs with mutable values
    pub fn iter_mut(&mut self) -> IterMut<'_> {
        self.data.iter_mut()
    }

    /// Moves the cursor back to the first entry
    pub fn rewind(&mut self) -> &mut Self {
        self.cursor = 0;
        self
    }

    /// Value at the cursor, without advancing
    pub fn current(&self) -> Option<&Value> {
        self.data.get_index(self.cursor).map(|(_, value)| value)
    }

    /// Key at the cursor, without advancing
    pub fn key(&self) -> Option<&Key> {
        self.data.get_index(self.cursor).map(|(key, _)| key)
    }

    /// Advances the cursor and returns the value it now points at.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&Value> {
        if self.cursor < self.data.len() {
            self.cursor += 1;
        }
        self.current()
    }

    /// Returns true while the cursor points at an entry
    pub fn valid(&self) -> bool {
        self.cursor < self.data.len()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a Key, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a> IntoIterator for &'a mut Record {
    type Item = (&'a Key, &'a mut Value);
    type IntoIter = IterMut<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter_mut()
    }
}

impl IntoIterator for Record {
    type Item = (Key, Value);
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}
