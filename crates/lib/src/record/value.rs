//! Values stored in records and raw arrays.
//!
//! [`Value`] covers everything a [`Record`] can hold: scalars, raw ordered
//! arrays, nested records, tabular row sets and opaque foreign objects.
//! Comparison helpers implement the loose (type-coercing) equality used by
//! [`Record::value_exists`] and [`Record::pop_or`], and a total order used by
//! [`Record::sort`].

use std::{any::Any, cmp::Ordering, fmt, sync::Arc};

use indexmap::IndexMap;

use super::{Key, Mapping, Record, RecordError};

/// Raw ordered array: an insertion-ordered mapping from [`Key`] to [`Value`].
///
/// A sequence is simply an array whose keys are `0..n` in order (see [`is_list`]).
pub type Array = IndexMap<Key, Value>;

/// Returns true if `array` is a sequence, i.e. its keys are exactly `0..n` in order.
pub fn is_list(array: &Array) -> bool {
    array
        .keys()
        .enumerate()
        .all(|(i, key)| key.as_index() == Some(i as u64))
}

/// Builds a sequence array from `items`, keyed `0..n`.
pub fn list<I, T>(items: I) -> Array
where
    I: IntoIterator<Item = T>,
    T: Into<Value>,
{
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| (Key::from(i), item.into()))
        .collect()
}

/// Builds an [`Array`] literal.
///
/// ```
/// use recordkit::array;
///
/// let pairs = array! { "a" => 1, "b" => "two" };
/// assert_eq!(pairs.len(), 2);
///
/// let items = array!["x", "y", "z"];
/// assert!(recordkit::record::is_list(&items));
/// ```
#[macro_export]
macro_rules! array {
    () => {
        $crate::record::Array::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut array = $crate::record::Array::new();
        $(
            array.insert(
                $crate::record::Key::from($key),
                $crate::record::Value::from($value),
            );
        )+
        array
    }};
    ($($value:expr),+ $(,)?) => {{
        let mut array = $crate::record::Array::new();
        $(
            let next = array.len();
            array.insert(
                $crate::record::Key::from(next),
                $crate::record::Value::from($value),
            );
        )+
        array
    }};
}

/// Reference to a foreign object stored inside a record.
///
/// Opaque objects are never serialized. Recursive conversion replaces them with
/// the placeholder `"(OBJECT)<type name>"`. Cloning shares the underlying object.
#[derive(Clone)]
pub struct Opaque {
    type_name: &'static str,
    inner: Arc<dyn Any + Send + Sync>,
}

impl Opaque {
    /// Wraps `object`, remembering its type name for placeholders.
    pub fn new<T: Any + Send + Sync>(object: T) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            inner: Arc::new(object),
        }
    }

    /// Fully qualified type name of the wrapped object
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrows the wrapped object as `T`, if that is its type
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Placeholder text used in place of the object when serializing
    pub fn placeholder(&self) -> String {
        format!("(OBJECT){}", self.type_name)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque({})", self.type_name)
    }
}

/// Two opaque values are equal only when they share the same object.
impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Tabular result set: an ordered list of row records.
///
/// Recursive conversion expands a row set into a sequence of its rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    rows: Vec<Record>,
}

impl RowSet {
    /// Creates an empty row set
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Appends a row
    pub fn push(&mut self, row: Record) -> &mut Self {
        self.rows.push(row);
        self
    }

    /// Returns the rows in order
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.rows.iter()
    }
}

impl FromIterator<Record> for RowSet {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Record>> for RowSet {
    fn from(rows: Vec<Record>) -> Self {
        Self { rows }
    }
}

/// Values that can be stored in a [`Record`].
///
/// # Value kinds
///
/// - Scalars: [`Value::Null`], [`Value::Bool`], [`Value::Int`], [`Value::Float`], [`Value::Text`]
/// - Raw containers: [`Value::Array`] (ordered mapping or sequence)
/// - Nested records: [`Value::Record`]
/// - Tabular results: [`Value::Rows`]
/// - Foreign objects: [`Value::Object`]
///
/// `Value` compares directly with primitives:
///
/// ```
/// # use recordkit::record::Value;
/// assert!(Value::Text("hello".to_string()) == "hello");
/// assert!(Value::Int(42) == 42);
/// assert!(!(Value::Int(42) == "42"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Array(Array),
    Record(Record),
    Rows(RowSet),
    Object(Opaque),
}

impl Value {
    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Array(_) => "array",
            Value::Record(_) => "record",
            Value::Rows(_) => "rows",
            Value::Object(_) => "object",
        }
    }

    /// Wraps a foreign object reference
    pub fn object<T: Any + Send + Sync>(object: T) -> Self {
        Value::Object(Opaque::new(object))
    }

    /// Converts any serializable value (including structs with named fields)
    /// into a `Value`, going through its JSON data model.
    pub fn from_serialize<T: serde::Serialize + ?Sized>(value: &T) -> crate::Result<Self> {
        Ok(serde_json::to_value(value)?.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for null, bool, number and text values
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Text(_)
        )
    }

    /// Returns true if this value supports keyed access and ordered iteration
    pub fn is_mapping(&self) -> bool {
        self.as_mapping().is_some()
    }

    /// Capability check: returns this value as a [`Mapping`] when it is one.
    pub fn as_mapping(&self) -> Option<&dyn Mapping> {
        match self {
            Value::Array(array) => Some(array),
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the numeric value of ints and floats
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Truthiness under the coercion rules used by loose comparison.
    pub fn to_bool(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Text(s) => !(s.is_empty() || s == "0"),
            Value::Array(array) => !array.is_empty(),
            Value::Record(_) | Value::Rows(_) | Value::Object(_) => true,
        }
    }

    /// String coercion: `null` and `false` become `""`, `true` becomes `"1"`,
    /// raw arrays become `"Array"`, records become their JSON text and foreign
    /// objects their placeholder.
    pub fn coerce_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(true) => "1".to_string(),
            Value::Bool(false) => String::new(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => format_float(*f),
            Value::Text(s) => s.clone(),
            Value::Array(_) => "Array".to_string(),
            Value::Record(record) => record.to_json().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to encode nested record as JSON");
                String::new()
            }),
            Value::Rows(_) => "(OBJECT)RowSet".to_string(),
            Value::Object(object) => object.placeholder(),
        }
    }

    /// Returns true if this value counts as empty text: scalars whose string
    /// coercion is `""`. Containers and objects are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Array(_) | Value::Record(_) | Value::Rows(_) | Value::Object(_) => false,
            scalar => scalar.coerce_string().is_empty(),
        }
    }

    /// Loose, type-coercing equality.
    ///
    /// - `bool` against anything compares truthiness
    /// - `null` equals `""` and any falsy value
    /// - numbers compare numerically with numbers and numeric strings;
    ///   against non-numeric strings the number is compared as text
    /// - two numeric strings compare numerically (`"1" == "01"`)
    /// - arrays (and records) are equal when they hold the same keys with
    ///   loosely equal values, in any order
    /// - row sets and objects compare by identity
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), _) => *a == other.to_bool(),
            (_, Value::Bool(b)) => self.to_bool() == *b,
            (Value::Null, Value::Text(s)) | (Value::Text(s), Value::Null) => s.is_empty(),
            (Value::Null, _) => !other.to_bool(),
            (_, Value::Null) => !self.to_bool(),
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                self.as_float() == other.as_float()
            }
            (number @ (Value::Int(_) | Value::Float(_)), Value::Text(s))
            | (Value::Text(s), number @ (Value::Int(_) | Value::Float(_))) => {
                match numeric_text(s) {
                    Some(n) => number.as_float() == Some(n),
                    None => number.coerce_string() == *s,
                }
            }
            (Value::Text(a), Value::Text(b)) => match (numeric_text(a), numeric_text(b)) {
                (Some(x), Some(y)) => x == y,
                _ => a == b,
            },
            (Value::Array(a), Value::Array(b)) => arrays_loose_eq(a, b),
            (Value::Record(a), Value::Record(b)) => arrays_loose_eq(a.as_array(), b.as_array()),
            (Value::Rows(a), Value::Rows(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::Text(_) => 3,
            Value::Array(_) => 4,
            Value::Record(_) => 5,
            Value::Rows(_) => 6,
            Value::Object(_) => 7,
        }
    }

    /// Total order used for value sorting.
    ///
    /// Values order by kind first (null, bool, number, text, array, record,
    /// rows, object). Numbers compare numerically across ints and floats, text
    /// compares bytewise, containers compare by size and then entry by entry.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                let a = self.as_float().unwrap_or_default();
                let b = other.as_float().unwrap_or_default();
                a.total_cmp(&b)
            }
            (Value::Text(a), Value::Text(b)) => a.as_bytes().cmp(b.as_bytes()),
            (Value::Array(a), Value::Array(b)) => compare_arrays(a, b),
            (Value::Record(a), Value::Record(b)) => compare_arrays(a.as_array(), b.as_array()),
            (Value::Rows(a), Value::Rows(b)) => a.len().cmp(&b.len()),
            (Value::Object(a), Value::Object(b)) => a.type_name().cmp(b.type_name()),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

fn arrays_loose_eq(a: &Array, b: &Array) -> bool {
    a.len() == b.len()
        && a.iter()
            .all(|(key, value)| b.get(key).is_some_and(|other| value.loose_eq(other)))
}

fn compare_arrays(a: &Array, b: &Array) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| {
        a.iter()
            .zip(b.iter())
            .map(|((ka, va), (kb, vb))| ka.cmp(kb).then_with(|| va.compare(vb)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

/// Parses a numeric string: optional surrounding whitespace, optional sign,
/// digits with an optional fraction and exponent. `inf`/`nan` spellings and
/// hex are not numeric.
pub(crate) fn numeric_text(s: &str) -> Option<f64> {
    let trimmed = s.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c'));
    let valid = !trimmed.is_empty()
        && trimmed.bytes().any(|b| b.is_ascii_digit())
        && trimmed
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if valid { trimmed.parse().ok() } else { None }
}

/// Formats a float with 14 significant digits, trimming trailing zeros
/// (`1.0` -> `"1"`, `0.1 + 0.2` -> `"0.3"`, `1e20` -> `"1.0E+20"`).
pub(crate) fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "NAN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    if f == 0.0 {
        return if f.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let scientific = format!("{f:.13e}");
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => return scientific,
    };

    if !(-5..14).contains(&exponent) {
        let mut mantissa = trim_fraction(mantissa);
        if !mantissa.contains('.') {
            mantissa.push_str(".0");
        }
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}E{sign}{}", exponent.abs())
    } else {
        let decimals = (13 - exponent).max(0) as usize;
        trim_fraction(&format!("{f:.decimals$}"))
    }
}

fn trim_fraction(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.coerce_string())
    }
}

// Convenient From implementations for common types
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

/// Values beyond `i64::MAX` are stored as floats.
impl From<u64> for Value {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Value::Float(value as f64), Value::Int)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::from(value as u64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Text(value.clone())
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}

impl From<RowSet> for Value {
    fn from(value: RowSet) -> Self {
        Value::Rows(value)
    }
}

impl From<Opaque> for Value {
    fn from(value: Opaque) -> Self {
        Value::Object(value)
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Vectors become sequences.
impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::Array(list(value))
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => Value::Array(list(items)),
            serde_json::Value::Object(fields) => Value::Array(
                fields
                    .into_iter()
                    .map(|(key, value)| (Key::from(key), Value::from(value)))
                    .collect(),
            ),
        }
    }
}

// TryFrom implementations for typed reads via `Record::get_as`
impl TryFrom<&Value> for String {
    type Error = RecordError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(s) => Ok(s.clone()),
            _ => Err(RecordError::type_mismatch("String", value)),
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = RecordError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(s) => Ok(s),
            _ => Err(RecordError::type_mismatch("&str", value)),
        }
    }
}

impl TryFrom<&Value> for i64 {
    type Error = RecordError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(n) => Ok(*n),
            _ => Err(RecordError::type_mismatch("i64", value)),
        }
    }
}

impl TryFrom<&Value> for f64 {
    type Error = RecordError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .as_float()
            .ok_or_else(|| RecordError::type_mismatch("f64", value))
    }
}

impl TryFrom<&Value> for bool {
    type Error = RecordError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(*b),
            _ => Err(RecordError::type_mismatch("bool", value)),
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a Record {
    type Error = RecordError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::Record(record) => Ok(record),
            _ => Err(RecordError::type_mismatch("Record", value)),
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a Array {
    type Error = RecordError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(array) => Ok(array),
            _ => Err(RecordError::type_mismatch("Array", value)),
        }
    }
}

/// Keys can be read back out of text and non-negative integer values.
impl TryFrom<&Value> for Key {
    type Error = RecordError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(s) => Ok(Key::from(s.as_str())),
            Value::Int(n) => Ok(Key::from(*n)),
            _ => Err(RecordError::type_mismatch("Key", value)),
        }
    }
}

// PartialEq implementations for comparing Value with primitives (strict)
impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Value::Text(s) if s == other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Value::Int(n) if n == other)
    }
}

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        matches!(self, Value::Int(n) if *n == *other as i64)
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Value::Float(f) if f == other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, Value::Bool(b) if b == other)
    }
}

impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        other == *self
    }
}

impl PartialEq<Value> for i64 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i32 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for bool {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}
