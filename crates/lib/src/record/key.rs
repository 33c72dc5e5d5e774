//! Keys for [`Record`](crate::record::Record) entries.
//!
//! A key is either a non-negative integer index or a string name. Strings that
//! spell a canonical non-negative integer (`"0"`, `"42"`, but not `"042"` or
//! `"-1"`) are normalised to indices on conversion, so `"3"` and `3` address
//! the same entry.

use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Key of a record or raw array entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Integer position-like key
    Index(u64),
    /// String key
    Name(String),
}

impl Key {
    /// Returns true if this is an integer key
    pub fn is_index(&self) -> bool {
        matches!(self, Key::Index(_))
    }

    /// Returns the integer value for index keys
    pub fn as_index(&self) -> Option<u64> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Name(_) => None,
        }
    }

    /// Returns the string value for name keys
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Index(_) => None,
            Key::Name(s) => Some(s),
        }
    }

    /// Parses `s` as a canonical non-negative decimal integer.
    fn canonical_index(s: &str) -> Option<u64> {
        let bytes = s.as_bytes();
        match bytes {
            [] => None,
            [b'0'] => Some(0),
            [b'0', ..] => None,
            _ if bytes.iter().all(u8::is_ascii_digit) => s.parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{i}"),
            Key::Name(s) => write!(f, "{s}"),
        }
    }
}

/// Indices sort numerically before all names; names sort bytewise.
impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Key::Index(a), Key::Index(b)) => a.cmp(b),
            (Key::Index(_), Key::Name(_)) => Ordering::Less,
            (Key::Name(_), Key::Index(_)) => Ordering::Greater,
            (Key::Name(a), Key::Name(b)) => a.as_bytes().cmp(b.as_bytes()),
        }
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        match Key::canonical_index(s) {
            Some(i) => Key::Index(i),
            None => Key::Name(s.to_string()),
        }
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        match Key::canonical_index(&s) {
            Some(i) => Key::Index(i),
            None => Key::Name(s),
        }
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::from(s.as_str())
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

impl From<u64> for Key {
    fn from(i: u64) -> Self {
        Key::Index(i)
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Index(i as u64)
    }
}

impl From<u32> for Key {
    fn from(i: u32) -> Self {
        Key::Index(i as u64)
    }
}

/// Negative integers cannot be indices and become names.
impl From<i64> for Key {
    fn from(i: i64) -> Self {
        if i >= 0 {
            Key::Index(i as u64)
        } else {
            Key::Name(i.to_string())
        }
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::from(i as i64)
    }
}

impl PartialEq<str> for Key {
    fn eq(&self, other: &str) -> bool {
        *self == Key::from(other)
    }
}

impl PartialEq<&str> for Key {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<u64> for Key {
    fn eq(&self, other: &u64) -> bool {
        matches!(self, Key::Index(i) if i == other)
    }
}

impl PartialEq<usize> for Key {
    fn eq(&self, other: &usize) -> bool {
        matches!(self, Key::Index(i) if *i == *other as u64)
    }
}

impl PartialEq<i32> for Key {
    fn eq(&self, other: &i32) -> bool {
        *self == Key::from(*other)
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Key::Index(i) => serializer.serialize_u64(*i),
            Key::Name(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl serde::de::Visitor<'_> for KeyVisitor {
            type Value = Key;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer key")
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Key, E> {
                Ok(Key::Index(v))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Key, E> {
                Ok(Key::from(v))
            }

            fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<Key, E> {
                Ok(Key::Index(u64::from(v)))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Key, E> {
                Ok(Key::from(v))
            }

            fn visit_string<E: serde::de::Error>(self, v: String) -> Result<Key, E> {
                Ok(Key::from(v))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}
