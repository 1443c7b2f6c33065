//! Deserialization from documents.
//!
//! [`Document`] implements [`serde::Deserializer`], so any `T: DeserializeOwned`
//! can be read back out of a parsed tree. The text entry points in the crate
//! root (`from_str`, `from_slice`, `from_reader`) parse first and then go
//! through this module.
//!
//! ## Usage
//!
//! ```rust
//! use docjson::{document, from_document, from_str};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data { x: i32, y: Vec<String> }
//!
//! let data: Data = from_str(r#"{"x": 1, "y": ["a"]}"#).unwrap();
//! assert_eq!(data, Data { x: 1, y: vec!["a".to_string()] });
//!
//! let data: Data = from_document(document!({"x": 2, "y": []})).unwrap();
//! assert_eq!(data.x, 2);
//! ```
//!
//! Enums use external tagging: a unit variant is a string, any other variant
//! is a single-entry object keyed by the variant name.

use crate::{Array, Document, Error, JsonString, Object, Result};
use serde::de::{self, DeserializeOwned, IntoDeserializer};
use serde::forward_to_deserialize_any;
use std::mem;

/// Deserializes a `T` from an owned document.
pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T> {
    T::deserialize(document)
}

fn visit_string<'de, V: de::Visitor<'de>>(s: JsonString, visitor: V) -> Result<V::Value> {
    match String::from_utf8(s.into_bytes()) {
        Ok(s) => visitor.visit_string(s),
        Err(err) => visitor.visit_byte_buf(err.into_bytes()),
    }
}

impl<'de> de::Deserializer<'de> for Document {
    type Error = Error;

    fn deserialize_any<V>(mut self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match &mut self {
            Document::Null => visitor.visit_unit(),
            Document::Bool(b) => visitor.visit_bool(*b),
            Document::Int(i) => visitor.visit_i64(*i),
            Document::Float(f) => visitor.visit_f64(*f),
            Document::String(s) => visit_string(mem::take(s), visitor),
            Document::Array(arr) => visitor.visit_seq(SeqDeserializer::new(mem::take(arr))),
            Document::Object(obj) => visitor.visit_map(MapDeserializer::new(mem::take(obj))),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Document::Null => visitor.visit_none(),
            other => visitor.visit_some(other),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        mut self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match &mut self {
            Document::String(s) => visitor.visit_enum(EnumDeserializer::new(mem::take(s), None)),
            Document::Object(obj) => {
                let found = obj.len();
                let mut entries = mem::take(obj).into_iter();
                match (entries.next(), entries.next()) {
                    (Some((variant, value)), None) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, Some(value)))
                    }
                    _ => Err(Error::custom(format!(
                        "expected an object with a single variant key, found {found} entries"
                    ))),
                }
            }
            other => Err(Error::custom(format!(
                "expected enum as string or object, found {}",
                other.kind()
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

impl<'de> IntoDeserializer<'de, Error> for Document {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self {
        self
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Document>,
}

impl SeqDeserializer {
    fn new(vec: Array) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(value).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: <Object as IntoIterator>::IntoIter,
    value: Option<Document>,
}

impl MapDeserializer {
    fn new(map: Object) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(Document::String(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(value),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: JsonString,
    value: Option<Document>,
}

impl EnumDeserializer {
    fn new(variant: JsonString, value: Option<Document>) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(Document::String(self.variant))?;
        let visitor = VariantDeserializer { value: self.value };
        Ok((variant, visitor))
    }
}

struct VariantDeserializer {
    value: Option<Document>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(Document::Null) | None => Ok(()),
            Some(other) => Err(Error::custom(format!(
                "expected unit variant, found {}",
                other.kind()
            ))),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(value),
            None => Err(Error::custom("expected newtype variant")),
        }
    }

    fn tuple_variant<V>(mut self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Document::Array(ref mut arr)) => {
                visitor.visit_seq(SeqDeserializer::new(mem::take(arr)))
            }
            _ => Err(Error::custom("expected tuple variant")),
        }
    }

    fn struct_variant<V>(mut self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Document::Object(ref mut obj)) => {
                visitor.visit_map(MapDeserializer::new(mem::take(obj)))
            }
            _ => Err(Error::custom("expected struct variant")),
        }
    }
}
