//! The dynamic JSON value model.
//!
//! [`Value`] is a closed sum type over the six JSON kinds. Containers own
//! their children; interior nodes are reached through borrows only.
//!
//! Two access paths are kept apart:
//!
//! - **Lookup** (`get`, `Index`) never mutates. A missing key or element reads
//!   as [`NULL`].
//! - **Slot access** (`get_or_insert`, `IndexMut`) promotes a `Null` receiver
//!   into an empty Array or Object, grows arrays with `Null` gaps and inserts
//!   missing keys. This is what makes `v["a"]["b"] = 1.into()` work on a fresh
//!   value.
//!
//! Objects are only ever built from an explicit marker ([`Object`] or the
//! [`object!`](crate::object) macro). A sequence of pairs built with
//! [`array!`](crate::array) stays an Array of Arrays.

use std::fmt;
use std::ops::{Index, IndexMut};

use indexmap::IndexMap;

use crate::convert::{Container, FromValue};
use crate::error::ConversionError;

/// Tag of the variant a [`Value`] currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl Type {
    /// Lowercase name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Type::Null => "null",
            Type::Boolean => "boolean",
            Type::Number => "number",
            Type::String => "string",
            Type::Array => "array",
            Type::Object => "object",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered sequence of values.
pub type Array = Vec<Value>;

/// Any JSON value.
///
/// Numbers are stored as `f64` regardless of whether the literal was integral.
/// Equality is structural; numbers follow IEEE comparison, so a `NaN` number
/// is not equal to itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Array),
    Object(Object),
}

/// The JSON `null` value.
pub const NULL: Value = Value::Null;

// Target of read-only lookups that miss.
static NULL_SLOT: Value = Value::Null;

impl Value {
    /// The tag of the active variant.
    pub fn get_type(&self) -> Type {
        match self {
            Value::Null => Type::Null,
            Value::Boolean(_) => Type::Boolean,
            Value::Number(_) => Type::Number,
            Value::String(_) => Type::String,
            Value::Array(_) => Type::Array,
            Value::Object(_) => Type::Object,
        }
    }

    /// True iff the active variant is `ty`.
    pub fn is(&self, ty: Type) -> bool {
        self.get_type() == ty
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// The boolean payload, without conversion.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The number payload, without conversion.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The string payload, without conversion.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Convert to `T` following the conversion table of [`FromValue`].
    ///
    /// ```
    /// use jsonkit_core::{Value, NULL};
    ///
    /// assert_eq!(Value::from("2.5").convert::<f64>().unwrap(), 2.5);
    /// assert!(Value::from(5).convert::<bool>().unwrap());
    /// assert!(NULL.convert::<i32>().is_err());
    /// ```
    pub fn convert<T: FromValue>(&self) -> Result<T, ConversionError> {
        T::from_value(self)
    }

    /// Borrow the underlying container storage.
    pub fn as_container<C: Container>(&self) -> Result<&C, ConversionError> {
        C::from_value_ref(self)
    }

    /// Mutably borrow the underlying container storage. Changes made through
    /// the returned reference are changes to this value.
    pub fn as_container_mut<C: Container>(&mut self) -> Result<&mut C, ConversionError> {
        C::from_value_mut(self)
    }

    pub fn as_array(&self) -> Result<&Array, ConversionError> {
        self.as_container::<Array>()
    }

    pub fn as_array_mut(&mut self) -> Result<&mut Array, ConversionError> {
        self.as_container_mut::<Array>()
    }

    pub fn as_object(&self) -> Result<&Object, ConversionError> {
        self.as_container::<Object>()
    }

    pub fn as_object_mut(&mut self) -> Result<&mut Object, ConversionError> {
        self.as_container_mut::<Object>()
    }

    /// Read-only lookup by array index or object key. Never promotes or
    /// inserts.
    pub fn get<I: ValueIndex>(&self, index: I) -> Option<&Value> {
        index.index_into(self)
    }

    /// Mutable lookup of an existing element or entry. Never promotes or
    /// inserts.
    pub fn get_mut<I: ValueIndex>(&mut self, index: I) -> Option<&mut Value> {
        index.index_into_mut(self)
    }

    /// Mutable slot access with promotion.
    ///
    /// A `Null` receiver becomes an empty Array (integer index) or Object (key).
    /// Arrays grow with `Null` up to and including `index`; a missing key is
    /// appended with a `Null` value. Any other variant fails and is left
    /// untouched, as does an index too large to allocate an array for.
    pub fn get_or_insert<I: ValueIndex>(&mut self, index: I) -> Result<&mut Value, ConversionError> {
        index.index_or_insert(self)
    }

    /// Append to an Array. `Null` is not promoted.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<(), ConversionError> {
        self.as_array_mut()?.push(value.into());
        Ok(())
    }

    /// Insert into an Object, returning the replaced value if the key existed.
    /// `Null` is not promoted.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, ConversionError> {
        Ok(self.as_object_mut()?.insert(key, value))
    }

    /// Element or entry count of a container; `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Array(items) => Some(items.len()),
            Value::Object(object) => Some(object.len()),
            _ => None,
        }
    }

    /// True for an empty Array or Object.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Replace with `Null`, returning the previous value.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    /// Iterate the elements of an Array in order.
    pub fn elements(&self) -> Result<std::slice::Iter<'_, Value>, ConversionError> {
        Ok(self.as_array()?.iter())
    }

    /// Iterate the entries of an Object in insertion order.
    pub fn entries(&self) -> Result<indexmap::map::Iter<'_, String, Value>, ConversionError> {
        Ok(self.as_object()?.iter())
    }
}

/// Insertion-ordered map from keys to values.
///
/// Inserting an existing key replaces its value and keeps its position;
/// inserting a new key appends. Two objects are equal when they hold the same
/// keys with equal values, regardless of order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    map: IndexMap<String, Value>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: IndexMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.map.get_mut(key)
    }

    /// Insert or replace in place, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.map.insert(key.into(), value.into())
    }

    /// Remove a key, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.map.shift_remove(key)
    }

    /// The entry for `key`, appending a `Null` entry if it is missing.
    pub fn get_or_insert_null(&mut self, key: &str) -> &mut Value {
        let index = match self.map.get_index_of(key) {
            Some(index) => index,
            None => self.map.insert_full(key.to_owned(), Value::Null).0,
        };
        &mut self.map[index]
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.map.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.map.values()
    }

    pub fn values_mut(&mut self) -> indexmap::map::ValuesMut<'_, String, Value> {
        self.map.values_mut()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.map.iter()
    }

    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, Value> {
        self.map.iter_mut()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut object = Object::new();
        object.extend(iter);
        object
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Object {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Object {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

impl<'a> IntoIterator for &'a mut Object {
    type Item = (&'a String, &'a mut Value);
    type IntoIter = indexmap::map::IterMut<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter_mut()
    }
}

// ---------------------------------------------------------------------------
// Indexing
// ---------------------------------------------------------------------------

mod private {
    pub trait Sealed {}
    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl<T: Sealed + ?Sized> Sealed for &T {}
}

/// Types that can index into a [`Value`]: `usize` for arrays, `str` and
/// `String` for objects.
pub trait ValueIndex: private::Sealed {
    /// The container variant this index addresses.
    #[doc(hidden)]
    fn container(&self) -> Type;

    #[doc(hidden)]
    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value>;

    #[doc(hidden)]
    fn index_into_mut<'v>(&self, value: &'v mut Value) -> Option<&'v mut Value>;

    #[doc(hidden)]
    fn index_or_insert<'v>(&self, value: &'v mut Value) -> Result<&'v mut Value, ConversionError>;
}

impl ValueIndex for usize {
    fn container(&self) -> Type {
        Type::Array
    }

    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        match value {
            Value::Array(items) => items.get(*self),
            _ => None,
        }
    }

    fn index_into_mut<'v>(&self, value: &'v mut Value) -> Option<&'v mut Value> {
        match value {
            Value::Array(items) => items.get_mut(*self),
            _ => None,
        }
    }

    fn index_or_insert<'v>(&self, value: &'v mut Value) -> Result<&'v mut Value, ConversionError> {
        let from = value.get_type();
        if !matches!(from, Type::Null | Type::Array) {
            return Err(ConversionError::new(from, "array"));
        }
        // The grown array must be allocatable before anything is modified.
        let too_large = || ConversionError::new(from, "array of that length");
        let needed = self.checked_add(1).ok_or_else(too_large)?;

        if value.is_null() {
            let mut items = Array::new();
            items.try_reserve_exact(needed).map_err(|_| too_large())?;
            *value = Value::Array(items);
        }
        match value {
            Value::Array(items) => {
                if needed > items.len() {
                    items
                        .try_reserve_exact(needed - items.len())
                        .map_err(|_| too_large())?;
                    items.resize(needed, Value::Null);
                }
                Ok(&mut items[*self])
            }
            other => Err(ConversionError::new(other.get_type(), "array")),
        }
    }
}

impl ValueIndex for str {
    fn container(&self) -> Type {
        Type::Object
    }

    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        match value {
            Value::Object(object) => object.get(self),
            _ => None,
        }
    }

    fn index_into_mut<'v>(&self, value: &'v mut Value) -> Option<&'v mut Value> {
        match value {
            Value::Object(object) => object.get_mut(self),
            _ => None,
        }
    }

    fn index_or_insert<'v>(&self, value: &'v mut Value) -> Result<&'v mut Value, ConversionError> {
        if value.is_null() {
            *value = Value::Object(Object::new());
        }
        match value {
            Value::Object(object) => Ok(object.get_or_insert_null(self)),
            other => Err(ConversionError::new(other.get_type(), "object")),
        }
    }
}

impl ValueIndex for String {
    fn container(&self) -> Type {
        Type::Object
    }

    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        self.as_str().index_into(value)
    }

    fn index_into_mut<'v>(&self, value: &'v mut Value) -> Option<&'v mut Value> {
        self.as_str().index_into_mut(value)
    }

    fn index_or_insert<'v>(&self, value: &'v mut Value) -> Result<&'v mut Value, ConversionError> {
        self.as_str().index_or_insert(value)
    }
}

impl<T: ValueIndex + ?Sized> ValueIndex for &T {
    fn container(&self) -> Type {
        (**self).container()
    }

    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        (**self).index_into(value)
    }

    fn index_into_mut<'v>(&self, value: &'v mut Value) -> Option<&'v mut Value> {
        (**self).index_into_mut(value)
    }

    fn index_or_insert<'v>(&self, value: &'v mut Value) -> Result<&'v mut Value, ConversionError> {
        (**self).index_or_insert(value)
    }
}

/// Read-only indexing.
///
/// Returns [`NULL`] for a missing element or key, and when the receiver is
/// itself `Null`, so lookups can be chained.
///
/// # Panics
///
/// When the receiver is a scalar or the wrong kind of container. Use
/// [`Value::get`] for a non-panicking lookup.
impl<I: ValueIndex> Index<I> for Value {
    type Output = Value;

    fn index(&self, index: I) -> &Value {
        if let Some(found) = index.index_into(self) {
            return found;
        }
        if self.is_null() || self.is(index.container()) {
            return &NULL_SLOT;
        }
        panic!(
            "cannot index {} as {}",
            self.get_type(),
            index.container()
        )
    }
}

/// Slot access with promotion, see [`Value::get_or_insert`].
///
/// # Panics
///
/// When the receiver is neither `Null` nor the matching container.
impl<I: ValueIndex> IndexMut<I> for Value {
    fn index_mut(&mut self, index: I) -> &mut Value {
        match index.index_or_insert(self) {
            Ok(slot) => slot,
            Err(err) => panic!("{err}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::String(c.to_string())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Value>> From<&[T]> for Value {
    fn from(items: &[T]) -> Self {
        Value::Array(items.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Array(iter.into_iter().map(Into::into).collect())
    }
}

/// Build an Array value from heterogeneous literals.
///
/// ```
/// use jsonkit_core::{array, Value, NULL};
///
/// let v = array![1, 2, 3, "4", false, NULL];
/// assert_eq!(v[3], "4");
///
/// // Pairs without the object marker stay arrays.
/// let pairs = array![array!["key", "value"]];
/// assert!(pairs[0].is_array());
/// ```
#[macro_export]
macro_rules! array {
    () => {
        $crate::Value::Array($crate::Array::new())
    };
    ($($item:expr),+ $(,)?) => {
        $crate::Value::Array(vec![$($crate::Value::from($item)),+])
    };
}

/// Build an Object value from `key => value` entries, in order.
///
/// ```
/// use jsonkit_core::{array, object};
///
/// let v = object! {
///     "name" => "json",
///     "properties" => object! {
///         "size" => 42,
///         "integers" => array![1, 2, "3"],
///     },
/// };
/// assert_eq!(v["properties"]["size"], 42);
/// ```
#[macro_export]
macro_rules! object {
    () => {
        $crate::Value::Object($crate::Object::new())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut object = $crate::Object::new();
        $(
            object.insert($key, $crate::Value::from($value));
        )+
        $crate::Value::Object(object)
    }};
}

// ---------------------------------------------------------------------------
// Comparison against primitives
// ---------------------------------------------------------------------------

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == Some(other.as_str())
    }
}

macro_rules! impl_eq_number {
    ($($ty:ty),*) => {
        $(
            impl PartialEq<$ty> for Value {
                fn eq(&self, other: &$ty) -> bool {
                    self.as_f64() == Some(*other as f64)
                }
            }
        )*
    };
}

impl_eq_number!(i32, i64, u32, u64, usize, f64);
