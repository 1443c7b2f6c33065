//! Dynamic value representation for JSON documents.
//!
//! This module provides the [`Document`] enum, a closed sum over the seven
//! JSON value kinds. Exactly one payload is live at a time and the compiler
//! keeps the discriminant and payload in agreement.
//!
//! ## Core Types
//!
//! - [`Document`]: null, bool, 64-bit integer, double, string, array or object
//! - [`Type`]: the discriminant on its own, as reported by [`Document::kind`]
//! - [`Array`]: an ordered sequence of documents
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use docjson::{document, Document};
//!
//! // From primitives
//! let null = Document::Null;
//! let boolean = Document::from(true);
//! let number = Document::from(42);
//! let text = Document::from("hello");
//!
//! // Using the document! macro
//! let obj = document!({
//!     "name": "Alice",
//!     "age": 30
//! });
//! assert!(obj.is_object());
//! ```
//!
//! ### Ownership
//!
//! A document owns its whole subtree. `clone()` is a deep copy, a move is a
//! transfer, and [`Document::take`] moves the value out and leaves `Null`
//! behind.
//!
//! ```rust
//! use docjson::Document;
//!
//! let mut source = Document::from(vec![Document::from(1), Document::from(2)]);
//! let copy = source.clone();
//! let moved = source.take();
//!
//! assert!(source.is_null());
//! assert_eq!(copy, moved);
//! ```
//!
//! Dropping, cloning and comparing walk the tree with an explicit work list,
//! so they are safe on documents of any depth the parser can produce.
//!
//! ### Extracting Values
//!
//! ```rust
//! use docjson::Document;
//! use std::convert::TryFrom;
//!
//! let value = Document::from(42);
//!
//! // Safe extraction with TryFrom
//! let num: i64 = i64::try_from(value).unwrap();
//! assert_eq!(num, 42);
//! ```

use crate::{JsonString, Object};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::mem;
use std::str::FromStr;

/// An ordered sequence of documents.
pub type Array = Vec<Document>;

/// The discriminant of a [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Null,
    Bool,
    Int,
    Float,
    String,
    Array,
    Object,
}

impl Type {
    /// Returns the lower-case name of the type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Type::Null => "null",
            Type::Bool => "bool",
            Type::Int => "int",
            Type::Float => "float",
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

/// A JSON value.
///
/// Equality compares the discriminant first and then the payload, so
/// `Int(1)` and `Float(1.0)` are different documents. Objects compare equal
/// regardless of member order.
///
/// # Examples
///
/// ```rust
/// use docjson::{Document, Type};
///
/// let null = Document::Null;
/// let num = Document::Int(42);
/// let text = Document::from("hello");
///
/// assert!(null.is_null());
/// assert_eq!(num.kind(), Type::Int);
/// assert!(text.is_string());
/// assert_ne!(Document::Int(1), Document::Float(1.0));
/// ```
#[derive(Debug, Default)]
pub enum Document {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(JsonString),
    Array(Array),
    Object(Object),
}

/// Returns `true` for a container with at least one child.
fn has_children(document: &Document) -> bool {
    match document {
        Document::Array(array) => !array.is_empty(),
        Document::Object(object) => !object.is_empty(),
        _ => false,
    }
}

impl Drop for Document {
    fn drop(&mut self) {
        let mut pending: Vec<Document> = match self {
            Document::Array(array) if array.iter().any(has_children) => mem::take(array),
            Document::Object(object) if object.values().any(has_children) => {
                mem::take(object).into_iter().map(|(_, value)| value).collect()
            }
            _ => return,
        };
        // Children are emptied before they go out of scope, so each drop
        // here is shallow.
        while let Some(mut document) = pending.pop() {
            match &mut document {
                Document::Array(array) => pending.append(array),
                Document::Object(object) => {
                    pending.extend(mem::take(object).into_iter().map(|(_, value)| value));
                }
                _ => {}
            }
        }
    }
}

/// A container being copied by [`Document::clone`].
enum CloneFrame<'a> {
    Array(std::slice::Iter<'a, Document>, Array),
    Object {
        source: indexmap::map::Iter<'a, JsonString, Document>,
        copy: Object,
        key: Option<JsonString>,
    },
}

impl<'a> CloneFrame<'a> {
    fn next_child(&mut self) -> Option<&'a Document> {
        match self {
            CloneFrame::Array(source, _) => source.next(),
            CloneFrame::Object { source, key, .. } => source.next().map(|(k, value)| {
                *key = Some(k.clone());
                value
            }),
        }
    }

    fn attach(&mut self, child: Document) {
        match self {
            CloneFrame::Array(_, copy) => copy.push(child),
            CloneFrame::Object { copy, key, .. } => {
                if let Some(key) = key.take() {
                    copy.insert(key, child);
                }
            }
        }
    }

    fn finish(self) -> Document {
        match self {
            CloneFrame::Array(_, copy) => Document::Array(copy),
            CloneFrame::Object { copy, .. } => Document::Object(copy),
        }
    }
}

impl Clone for Document {
    fn clone(&self) -> Self {
        let mut stack: Vec<CloneFrame<'_>> = Vec::new();
        let mut next = self;

        loop {
            let mut done = match next {
                Document::Array(array) if !array.is_empty() => {
                    stack.push(CloneFrame::Array(array.iter(), Array::with_capacity(array.len())));
                    None
                }
                Document::Object(object) if !object.is_empty() => {
                    stack.push(CloneFrame::Object {
                        source: object.iter(),
                        copy: Object::with_capacity(object.len()),
                        key: None,
                    });
                    None
                }
                Document::Null => Some(Document::Null),
                Document::Bool(b) => Some(Document::Bool(*b)),
                Document::Int(i) => Some(Document::Int(*i)),
                Document::Float(f) => Some(Document::Float(*f)),
                Document::String(s) => Some(Document::String(s.clone())),
                Document::Array(_) => Some(Document::Array(Array::new())),
                Document::Object(_) => Some(Document::Object(Object::new())),
            };

            loop {
                let Some(frame) = stack.last_mut() else {
                    return done.unwrap_or_default();
                };
                if let Some(child) = done.take() {
                    frame.attach(child);
                }
                if let Some(child) = frame.next_child() {
                    next = child;
                    break;
                }
                done = stack.pop().map(CloneFrame::finish);
            }
        }
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some(pair) = pending.pop() {
            match pair {
                (Document::Null, Document::Null) => {}
                (Document::Bool(a), Document::Bool(b)) if a == b => {}
                (Document::Int(a), Document::Int(b)) if a == b => {}
                (Document::Float(a), Document::Float(b)) if a == b => {}
                (Document::String(a), Document::String(b)) if a == b => {}
                (Document::Array(a), Document::Array(b)) if a.len() == b.len() => {
                    pending.extend(a.iter().zip(b));
                }
                (Document::Object(a), Document::Object(b)) if a.len() == b.len() => {
                    for (key, value) in a {
                        match b.get_bytes(key) {
                            Some(theirs) => pending.push((value, theirs)),
                            None => return false,
                        }
                    }
                }
                _ => return false,
            }
        }
        true
    }
}

macro_rules! contract_accessors {
    ($($get:ident, $get_mut:ident, $variant:ident => $ty:ty;)*) => {
        $(
            #[doc = concat!("Returns the `", stringify!($variant), "` payload.")]
            ///
            /// # Panics
            ///
            /// Panics if the document holds a different variant.
            #[track_caller]
            #[must_use]
            pub fn $get(&self) -> &$ty {
                match self {
                    Document::$variant(v) => v,
                    other => wrong_variant(Type::$variant, other.kind()),
                }
            }

            #[doc = concat!("Returns the `", stringify!($variant), "` payload mutably.")]
            ///
            /// # Panics
            ///
            /// Panics if the document holds a different variant.
            #[track_caller]
            pub fn $get_mut(&mut self) -> &mut $ty {
                match self {
                    Document::$variant(v) => v,
                    other => wrong_variant(Type::$variant, other.kind()),
                }
            }
        )*
    };
}

#[cold]
#[track_caller]
fn wrong_variant(expected: Type, found: Type) -> ! {
    panic!("document accessed as {expected} but holds {found}")
}

impl Document {
    /// Returns the discriminant.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> Type {
        match self {
            Document::Null => Type::Null,
            Document::Bool(_) => Type::Bool,
            Document::Int(_) => Type::Int,
            Document::Float(_) => Type::Float,
            Document::String(_) => Type::String,
            Document::Array(_) => Type::Array,
            Document::Object(_) => Type::Object,
        }
    }

    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Document::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Document::Bool(_))
    }

    /// Returns `true` if the value is an integer.
    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Document::Int(_))
    }

    /// Returns `true` if the value is a float.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Document::Float(_))
    }

    /// Returns `true` if the value is an integer or a float.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Document::Int(_) | Document::Float(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Document::String(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Document::Array(_))
    }

    /// Returns `true` if the value is an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Document::Object(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docjson::Document;
    ///
    /// assert_eq!(Document::Bool(true).as_bool(), Some(true));
    /// assert_eq!(Document::from(42).as_bool(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Document::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Document::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the numeric value as `f64`. Integers are widened.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docjson::Document;
    ///
    /// assert_eq!(Document::Float(3.5).as_f64(), Some(3.5));
    /// assert_eq!(Document::Int(42).as_f64(), Some(42.0));
    /// assert_eq!(Document::Null.as_f64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Document::Int(i) => Some(*i as f64),
            Document::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_string(&self) -> Option<&JsonString> {
        match self {
            Document::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a string holding valid UTF-8, returns it as `&str`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docjson::Document;
    ///
    /// assert_eq!(Document::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Document::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_string().and_then(JsonString::as_str)
    }

    /// If the value is an array, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Document::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is an object, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Document::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_bool_mut(&mut self) -> Option<&mut bool> {
        match self {
            Document::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_i64_mut(&mut self) -> Option<&mut i64> {
        match self {
            Document::Int(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_f64_mut(&mut self) -> Option<&mut f64> {
        match self {
            Document::Float(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_string_mut(&mut self) -> Option<&mut JsonString> {
        match self {
            Document::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Document::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Document::Object(obj) => Some(obj),
            _ => None,
        }
    }

    contract_accessors! {
        get_bool, get_bool_mut, Bool => bool;
        get_int, get_int_mut, Int => i64;
        get_float, get_float_mut, Float => f64;
        get_string, get_string_mut, String => JsonString;
        get_array, get_array_mut, Array => Array;
        get_object, get_object_mut, Object => Object;
    }

    /// Replaces the value.
    ///
    /// The new payload is converted before the old one is dropped, so a panic
    /// during conversion leaves the previous value in place.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docjson::{Document, Type};
    ///
    /// let mut doc = Document::from("text");
    /// doc.assign(vec![Document::Null]);
    /// assert_eq!(doc.kind(), Type::Array);
    /// ```
    pub fn assign(&mut self, value: impl Into<Document>) {
        let value = value.into();
        *self = value;
    }

    /// Makes this document a string and returns it.
    ///
    /// An existing string payload is kept. Any other payload is dropped and
    /// replaced with an empty string.
    pub fn emplace_string(&mut self) -> &mut JsonString {
        if !self.is_string() {
            *self = Document::String(JsonString::new());
        }
        match self {
            Document::String(s) => s,
            _ => unreachable!(),
        }
    }

    /// Makes this document an array and returns it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docjson::Document;
    ///
    /// let mut doc = Document::Null;
    /// doc.emplace_array().push(Document::from(1));
    /// doc.emplace_array().push(Document::from(2));
    /// assert_eq!(doc.get_array().len(), 2);
    /// ```
    pub fn emplace_array(&mut self) -> &mut Array {
        if !self.is_array() {
            *self = Document::Array(Array::new());
        }
        match self {
            Document::Array(arr) => arr,
            _ => unreachable!(),
        }
    }

    /// Makes this document an object and returns it.
    pub fn emplace_object(&mut self) -> &mut Object {
        if !self.is_object() {
            *self = Document::Object(Object::new());
        }
        match self {
            Document::Object(obj) => obj,
            _ => unreachable!(),
        }
    }

    /// Moves the value out, leaving `Null` in its place.
    #[must_use]
    pub fn take(&mut self) -> Document {
        std::mem::take(self)
    }

    pub fn swap(&mut self, other: &mut Document) {
        std::mem::swap(self, other);
    }
}

impl FromStr for Document {
    type Err = crate::Error;

    /// Parses the whole string with default options.
    fn from_str(s: &str) -> crate::Result<Self> {
        crate::Parser::new(crate::ParseOptions::default()).parse_complete(s.as_bytes())
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Document::Null => serializer.serialize_unit(),
            Document::Bool(b) => serializer.serialize_bool(*b),
            Document::Int(i) => serializer.serialize_i64(*i),
            Document::Float(f) => serializer.serialize_f64(*f),
            Document::String(s) => serializer.serialize_str(&s.to_string_lossy()),
            Document::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Document::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(&*k.to_string_lossy(), v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = Document;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid JSON value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Document::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Document::Int(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                match i64::try_from(value) {
                    Ok(i) => Ok(Document::Int(i)),
                    Err(_) => Ok(Document::Float(value as f64)),
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Document::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Document::from(value))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Document::from(value))
            }

            fn visit_bytes<E>(self, value: &[u8]) -> Result<Self::Value, E> {
                Ok(Document::String(JsonString::from(value)))
            }

            fn visit_byte_buf<E>(self, value: Vec<u8>) -> Result<Self::Value, E> {
                Ok(Document::String(JsonString::from_bytes(value)))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Document::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Document::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Array::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Document::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = Object::new();
                while let Some((key, value)) = map.next_entry::<String, Document>()? {
                    values.insert(key, value);
                }
                Ok(Document::Object(values))
            }
        }

        deserializer.deserialize_any(DocumentVisitor)
    }
}

// TryFrom implementations for extracting payloads from Document
macro_rules! try_from_document {
    ($($ty:ty => $variant:ident;)*) => {
        $(
            impl TryFrom<Document> for $ty {
                type Error = crate::Error;

                fn try_from(mut value: Document) -> crate::Result<Self> {
                    match &mut value {
                        Document::$variant(v) => Ok(mem::take(v)),
                        other => Err(crate::Error::type_mismatch(Type::$variant, other.kind())),
                    }
                }
            }
        )*
    };
}

try_from_document! {
    bool => Bool;
    i64 => Int;
    JsonString => String;
    Array => Array;
    Object => Object;
}

impl TryFrom<Document> for f64 {
    type Error = crate::Error;

    fn try_from(value: Document) -> crate::Result<Self> {
        match value {
            Document::Int(i) => Ok(i as f64),
            Document::Float(f) => Ok(f),
            other => Err(crate::Error::type_mismatch(Type::Float, other.kind())),
        }
    }
}

impl TryFrom<Document> for String {
    type Error = crate::Error;

    /// Extracts a string payload. Invalid UTF-8 is replaced with U+FFFD.
    fn try_from(value: Document) -> crate::Result<Self> {
        JsonString::try_from(value).map(JsonString::into_string_lossy)
    }
}

// From implementations for creating Document from primitives
macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Document {
                fn from(value: $ty) -> Self {
                    Document::Int(i64::from(value))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! try_from_wide_integer {
    ($($ty:ty),*) => {
        $(
            impl TryFrom<$ty> for Document {
                type Error = crate::Error;

                fn try_from(value: $ty) -> crate::Result<Self> {
                    i64::try_from(value).map(Document::Int).map_err(|_| {
                        crate::Error::custom(format!("number out of range: {value}"))
                    })
                }
            }
        )*
    };
}

try_from_wide_integer!(u64, usize, isize);

impl From<()> for Document {
    fn from(_: ()) -> Self {
        Document::Null
    }
}

impl From<bool> for Document {
    fn from(value: bool) -> Self {
        Document::Bool(value)
    }
}

impl From<f32> for Document {
    fn from(value: f32) -> Self {
        Document::Float(f64::from(value))
    }
}

impl From<f64> for Document {
    fn from(value: f64) -> Self {
        Document::Float(value)
    }
}

impl From<String> for Document {
    fn from(value: String) -> Self {
        Document::String(JsonString::from(value))
    }
}

impl From<&str> for Document {
    fn from(value: &str) -> Self {
        Document::String(JsonString::from(value))
    }
}

impl From<JsonString> for Document {
    fn from(value: JsonString) -> Self {
        Document::String(value)
    }
}

impl From<Array> for Document {
    fn from(value: Array) -> Self {
        Document::Array(value)
    }
}

impl From<Object> for Document {
    fn from(value: Object) -> Self {
        Document::Object(value)
    }
}

impl<T: Into<Document>> From<Option<T>> for Document {
    fn from(value: Option<T>) -> Self {
        value.map_or(Document::Null, Into::into)
    }
}

impl FromIterator<Document> for Document {
    fn from_iter<T: IntoIterator<Item = Document>>(iter: T) -> Self {
        Document::Array(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test_tryfrom_i64() {
        let result: i64 = TryFrom::try_from(Document::Int(42)).unwrap();
        assert_eq!(result, 42);

        assert_eq!(
            i64::try_from(Document::Float(42.0)),
            Err(crate::Error::type_mismatch(Type::Int, Type::Float))
        );
        assert!(i64::try_from(Document::from("test")).is_err());
    }

    #[test]
    fn test_tryfrom_f64() {
        let result: f64 = TryFrom::try_from(Document::Float(3.5)).unwrap();
        assert_eq!(result, 3.5);

        let result: f64 = TryFrom::try_from(Document::Int(42)).unwrap();
        assert_eq!(result, 42.0);

        assert!(f64::try_from(Document::Bool(false)).is_err());
    }

    #[test]
    fn test_tryfrom_containers() {
        let arr = Array::try_from(Document::from(vec![Document::Null])).unwrap();
        assert_eq!(arr, vec![Document::Null]);

        let err = Object::try_from(Document::from(vec![Document::Null])).unwrap_err();
        assert_eq!(err, crate::Error::type_mismatch(Type::Object, Type::Array));
    }

    #[test]
    fn test_tryfrom_string() {
        let result: String = TryFrom::try_from(Document::from("hello")).unwrap();
        assert_eq!(result, "hello");

        assert!(String::try_from(Document::Int(42)).is_err());
    }

    #[test]
    fn test_from_primitives() {
        assert_eq!(Document::from(()), Document::Null);
        assert_eq!(Document::from(true), Document::Bool(true));
        assert_eq!(Document::from(42i32), Document::Int(42));
        assert_eq!(Document::from(200u8), Document::Int(200));
        assert_eq!(Document::from(u32::MAX), Document::Int(4_294_967_295));
        assert_eq!(Document::from(3.5f64), Document::Float(3.5));
        assert_eq!(Document::from(None::<i32>), Document::Null);
        assert_eq!(Document::from(Some("x")), Document::from("x"));
    }

    #[test]
    fn test_wide_integers() {
        assert_eq!(Document::try_from(7u64).unwrap(), Document::Int(7));
        assert!(Document::try_from(u64::MAX).is_err());
        assert_eq!(Document::try_from(-1isize).unwrap(), Document::Int(-1));
    }

    #[test]
    fn test_kind_and_discriminant_equality() {
        assert_eq!(Document::Null.kind(), Type::Null);
        assert_eq!(Document::Float(0.0).kind(), Type::Float);
        assert_ne!(Document::Int(0), Document::Float(0.0));
        assert_ne!(Document::Null, Document::Bool(false));
        assert_eq!(Type::Object.to_string(), "object");
    }

    #[test]
    fn test_emplace_keeps_matching_payload() {
        let mut doc = Document::from("ab");
        doc.emplace_string().push('c');
        assert_eq!(doc, Document::from("abc"));

        doc.emplace_object().insert("k", Document::Int(1));
        assert_eq!(doc.get_object().len(), 1);
        doc.emplace_object().insert("j", Document::Int(2));
        assert_eq!(doc.get_object().len(), 2);
    }

    #[test]
    fn test_take_and_swap() {
        let mut a = Document::from(1);
        let mut b = Document::from("b");
        a.swap(&mut b);
        assert_eq!(a, Document::from("b"));
        assert_eq!(b.take(), Document::Int(1));
        assert!(b.is_null());
    }

    #[test]
    fn test_get_mut() {
        let mut doc = Document::Int(1);
        *doc.get_int_mut() += 1;
        assert_eq!(*doc.get_int(), 2);
    }

    #[test]
    #[should_panic(expected = "document accessed as string but holds int")]
    fn test_get_wrong_variant_panics() {
        let doc = Document::Int(1);
        let _ = doc.get_string();
    }

    #[test]
    fn test_const_is_methods() {
        const fn check_null(v: &Document) -> bool {
            v.is_null()
        }

        assert!(check_null(&Document::Null));
        assert!(Document::Int(1).is_number());
        assert!(Document::Float(1.0).is_number());
        assert!(!Document::from("1").is_number());
    }

    fn nested(depth: usize, leaf: Document) -> Document {
        let mut doc = leaf;
        for i in 0..depth {
            doc = if i % 2 == 0 {
                Document::Array(vec![Document::Int(i as i64), doc])
            } else {
                let mut object = Object::new();
                object.insert("child", doc);
                Document::Object(object)
            };
        }
        doc
    }

    #[test]
    fn test_deep_clone_compare_and_drop() {
        let depth = 500_000;
        let doc = nested(depth, Document::from("leaf"));
        let copy = doc.clone();
        assert!(copy == doc);
        assert!(nested(depth, Document::from("other")) != doc);
        assert!(nested(depth - 1, Document::from("leaf")) != doc);
    }

    #[test]
    fn test_clone_keeps_member_order() {
        let mut object = Object::new();
        object.insert("z", Document::Null);
        object.insert("a", Document::Array(vec![Document::Object(Object::new())]));
        let doc = Document::Object(object);
        let copy = doc.clone();
        let keys: Vec<_> = copy.get_object().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, [Some("z"), Some("a")]);
        assert_eq!(copy, doc);
    }

    #[test]
    fn test_try_from_takes_payload() {
        let doc = Document::Array(vec![Document::from("x")]);
        let array = Array::try_from(doc).unwrap();
        assert_eq!(array, vec![Document::from("x")]);
    }
}
