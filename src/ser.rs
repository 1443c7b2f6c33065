//! JSON serialization.
//!
//! This module provides the [`Serializer`] that writes documents as JSON text,
//! and [`DocumentSerializer`], a `serde` serializer that converts any
//! `T: Serialize` into a [`Document`].
//!
//! ## Overview
//!
//! Writing is non-recursive. Containers push a cursor onto an explicit stack
//! and the driving loop advances the top cursor one element at a time, so
//! serializing a deeply nested document cannot exhaust the call stack.
//!
//! Output goes to a [`Sink`]. `String`, `Vec<u8>` and `&mut S` are sinks, and
//! [`Serializer::serialize`] hands the sink back when it is done. Writing an
//! in-memory value cannot fail.
//!
//! ## Usage
//!
//! ```rust
//! use docjson::{document, SerializeOptions, Serializer};
//!
//! let value = document!({"a": [1, 2]});
//!
//! let mut serializer = Serializer::new(SerializeOptions::new());
//! let out = serializer.serialize(&value, String::new());
//! assert_eq!(out, r#"{"a":[1,2]}"#);
//!
//! let mut serializer = Serializer::new(SerializeOptions::pretty());
//! let out = serializer.serialize(&value, String::new());
//! assert_eq!(out, "{\n  \"a\": [\n    1,\n    2\n  ]\n}");
//! ```

use crate::options::SerializeOptions;
use crate::unicode::{self, HEX_LOWER};
use crate::{Array, Document, Error, JsonString, Object, Result};
use serde::{ser, Serialize};
use std::fmt;
use std::io;

/// Destination for serialized text.
pub trait Sink {
    /// Writes a contiguous run of text.
    fn write_str(&mut self, s: &str);

    /// Writes one character.
    fn write_char(&mut self, c: char) {
        let mut buf = [0; 4];
        self.write_str(c.encode_utf8(&mut buf));
    }
}

impl Sink for String {
    #[inline]
    fn write_str(&mut self, s: &str) {
        self.push_str(s);
    }

    #[inline]
    fn write_char(&mut self, c: char) {
        self.push(c);
    }
}

impl Sink for Vec<u8> {
    #[inline]
    fn write_str(&mut self, s: &str) {
        self.extend_from_slice(s.as_bytes());
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    #[inline]
    fn write_str(&mut self, s: &str) {
        (**self).write_str(s);
    }

    #[inline]
    fn write_char(&mut self, c: char) {
        (**self).write_char(c);
    }
}

/// Forwards to an [`io::Write`] and keeps the first error.
pub(crate) struct IoSink<W> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: io::Write> IoSink<W> {
    pub(crate) fn new(writer: W) -> Self {
        IoSink {
            writer,
            error: None,
        }
    }

    pub(crate) fn finish(mut self) -> Result<()> {
        if self.error.is_none() {
            if let Err(err) = self.writer.flush() {
                self.error = Some(err);
            }
        }
        match self.error {
            None => Ok(()),
            Some(err) => Err(Error::io(&err.to_string())),
        }
    }
}

impl<W: io::Write> Sink for IoSink<W> {
    fn write_str(&mut self, s: &str) {
        if self.error.is_none() {
            if let Err(err) = self.writer.write_all(s.as_bytes()) {
                self.error = Some(err);
            }
        }
    }
}

/// Adapts a [`fmt::Formatter`] to [`Sink`] for the `Display` impls.
struct FmtSink<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
    result: fmt::Result,
}

impl Sink for FmtSink<'_, '_> {
    fn write_str(&mut self, s: &str) {
        if self.result.is_ok() {
            self.result = self.f.write_str(s);
        }
    }
}

/// Values the [`Serializer`] can write.
pub trait ToJson {
    fn write_json<S: Sink + ?Sized>(&self, serializer: &mut Serializer, out: &mut S);
}

impl ToJson for Document {
    fn write_json<S: Sink + ?Sized>(&self, serializer: &mut Serializer, out: &mut S) {
        serializer.write_tree(Node::Document(self), out);
    }
}

impl ToJson for [Document] {
    fn write_json<S: Sink + ?Sized>(&self, serializer: &mut Serializer, out: &mut S) {
        serializer.write_tree(Node::Array(self), out);
    }
}

impl ToJson for Array {
    fn write_json<S: Sink + ?Sized>(&self, serializer: &mut Serializer, out: &mut S) {
        serializer.write_tree(Node::Array(self), out);
    }
}

impl ToJson for Object {
    fn write_json<S: Sink + ?Sized>(&self, serializer: &mut Serializer, out: &mut S) {
        serializer.write_tree(Node::Object(self), out);
    }
}

impl ToJson for JsonString {
    fn write_json<S: Sink + ?Sized>(&self, _: &mut Serializer, out: &mut S) {
        write_string(self.as_bytes(), out);
    }
}

impl ToJson for str {
    fn write_json<S: Sink + ?Sized>(&self, _: &mut Serializer, out: &mut S) {
        write_string(self.as_bytes(), out);
    }
}

impl ToJson for String {
    fn write_json<S: Sink + ?Sized>(&self, _: &mut Serializer, out: &mut S) {
        write_string(self.as_bytes(), out);
    }
}

impl ToJson for bool {
    fn write_json<S: Sink + ?Sized>(&self, _: &mut Serializer, out: &mut S) {
        out.write_str(if *self { "true" } else { "false" });
    }
}

impl ToJson for i64 {
    fn write_json<S: Sink + ?Sized>(&self, _: &mut Serializer, out: &mut S) {
        out.write_str(&self.to_string());
    }
}

impl ToJson for f64 {
    fn write_json<S: Sink + ?Sized>(&self, _: &mut Serializer, out: &mut S) {
        write_float(*self, out);
    }
}

impl ToJson for () {
    fn write_json<S: Sink + ?Sized>(&self, _: &mut Serializer, out: &mut S) {
        out.write_str("null");
    }
}

/// A value waiting to be written.
enum Node<'a> {
    Document(&'a Document),
    Array(&'a [Document]),
    Object(&'a Object),
}

/// Iteration position within an open container.
enum Cursor<'a> {
    Array(std::slice::Iter<'a, Document>),
    Object(indexmap::map::Iter<'a, JsonString, Document>),
}

struct Frame<'a> {
    cursor: Cursor<'a>,
    first: bool,
}

const SPACES: &str = "                                ";

/// The JSON text serializer.
///
/// Created via [`Serializer::new`]. Objects are written in their iteration
/// order, so repeated calls produce identical output.
#[derive(Clone, Debug, Default)]
pub struct Serializer {
    options: SerializeOptions,
}

impl Serializer {
    #[must_use]
    pub fn new(options: SerializeOptions) -> Self {
        Serializer { options }
    }

    #[must_use]
    pub fn options(&self) -> &SerializeOptions {
        &self.options
    }

    /// Writes `value` to `out` and returns the advanced sink.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docjson::{Document, SerializeOptions, Serializer};
    ///
    /// let mut serializer = Serializer::new(SerializeOptions::new());
    /// let out = serializer.serialize(&Document::Float(1.0), Vec::new());
    /// let out = serializer.serialize(" and ", out);
    /// let out = serializer.serialize(&true, out);
    /// assert_eq!(out, br#"1.0" and "true"#);
    /// ```
    pub fn serialize<T, S>(&mut self, value: &T, mut out: S) -> S
    where
        T: ToJson + ?Sized,
        S: Sink,
    {
        value.write_json(self, &mut out);
        out
    }

    fn write_tree<S: Sink + ?Sized>(&mut self, root: Node<'_>, out: &mut S) {
        let mut stack: Vec<Frame<'_>> = Vec::new();
        let mut next = Some(root);

        loop {
            if let Some(node) = next.take() {
                let frame = match node {
                    Node::Array(array) => open_array(array, out),
                    Node::Object(object) => open_object(object, out),
                    Node::Document(Document::Array(array)) => open_array(array, out),
                    Node::Document(Document::Object(object)) => open_object(object, out),
                    Node::Document(scalar) => {
                        write_scalar(scalar, out);
                        None
                    }
                };
                stack.extend(frame);
            }

            let depth = stack.len();
            let Some(frame) = stack.last_mut() else {
                return;
            };

            let (key, value) = match &mut frame.cursor {
                Cursor::Array(iter) => match iter.next() {
                    Some(value) => (None, value),
                    None => {
                        stack.pop();
                        self.newline(depth - 1, out);
                        out.write_char(']');
                        continue;
                    }
                },
                Cursor::Object(iter) => match iter.next() {
                    Some((key, value)) => (Some(key), value),
                    None => {
                        stack.pop();
                        self.newline(depth - 1, out);
                        out.write_char('}');
                        continue;
                    }
                },
            };

            if !frame.first {
                out.write_char(',');
            }
            frame.first = false;
            self.newline(depth, out);

            if let Some(key) = key {
                write_string(key.as_bytes(), out);
                out.write_str(if self.options.is_compact() { ":" } else { ": " });
            }
            next = Some(Node::Document(value));
        }
    }

    fn newline<S: Sink + ?Sized>(&self, depth: usize, out: &mut S) {
        if self.options.is_compact() {
            return;
        }
        out.write_char('\n');
        let mut remaining = depth * self.options.indent;
        while remaining > 0 {
            let n = remaining.min(SPACES.len());
            out.write_str(&SPACES[..n]);
            remaining -= n;
        }
    }
}

fn open_array<'a, S: Sink + ?Sized>(array: &'a [Document], out: &mut S) -> Option<Frame<'a>> {
    if array.is_empty() {
        out.write_str("[]");
        return None;
    }
    out.write_char('[');
    Some(Frame {
        cursor: Cursor::Array(array.iter()),
        first: true,
    })
}

fn open_object<'a, S: Sink + ?Sized>(object: &'a Object, out: &mut S) -> Option<Frame<'a>> {
    if object.is_empty() {
        out.write_str("{}");
        return None;
    }
    out.write_char('{');
    Some(Frame {
        cursor: Cursor::Object(object.iter()),
        first: true,
    })
}

fn write_scalar<S: Sink + ?Sized>(document: &Document, out: &mut S) {
    match document {
        Document::Null => out.write_str("null"),
        Document::Bool(b) => out.write_str(if *b { "true" } else { "false" }),
        Document::Int(i) => out.write_str(&i.to_string()),
        Document::Float(f) => write_float(*f, out),
        Document::String(s) => write_string(s.as_bytes(), out),
        Document::Array(_) | Document::Object(_) => {
            unreachable!("containers are opened by the write loop")
        }
    }
}

/// Shortest round-trip form; always has a `.` or an exponent.
fn write_float<S: Sink + ?Sized>(value: f64, out: &mut S) {
    if value.is_finite() {
        out.write_str(&format!("{value:?}"));
    } else {
        out.write_str("null");
    }
}

/// Writes a quoted, escaped string.
///
/// Stored surrogates are written as `\u` escapes and any other malformed
/// sequence as U+FFFD, so the output is always valid UTF-8.
fn write_string<S: Sink + ?Sized>(bytes: &[u8], out: &mut S) {
    out.write_char('"');
    let mut rest = bytes;
    loop {
        match std::str::from_utf8(rest) {
            Ok(text) => {
                write_escaped(text, out);
                break;
            }
            Err(err) => {
                let (valid, invalid) = rest.split_at(err.valid_up_to());
                write_escaped(std::str::from_utf8(valid).unwrap_or_default(), out);

                let skip = match unicode::decode_utf8(invalid) {
                    Some((code_point, len)) if unicode::is_surrogate(code_point) => {
                        write_unicode_escape(code_point, out);
                        len
                    }
                    _ => {
                        out.write_char(char::REPLACEMENT_CHARACTER);
                        err.error_len().unwrap_or(invalid.len())
                    }
                };
                rest = &invalid[skip..];
            }
        }
    }
    out.write_char('"');
}

fn write_escaped<S: Sink + ?Sized>(text: &str, out: &mut S) {
    let bytes = text.as_bytes();
    let mut start = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        let escape = match byte {
            b'"' => "\\\"",
            b'\\' => "\\\\",
            0x08 => "\\b",
            0x0C => "\\f",
            b'\n' => "\\n",
            b'\r' => "\\r",
            b'\t' => "\\t",
            0x00..=0x1F => "",
            _ => continue,
        };
        // Splitting before an ASCII byte always lands on a char boundary.
        out.write_str(&text[start..i]);
        if escape.is_empty() {
            write_unicode_escape(u32::from(byte), out);
        } else {
            out.write_str(escape);
        }
        start = i + 1;
    }
    out.write_str(&text[start..]);
}

fn write_unicode_escape<S: Sink + ?Sized>(unit: u32, out: &mut S) {
    let mut buf = *b"\\u0000";
    for (i, slot) in buf[2..].iter_mut().enumerate() {
        *slot = HEX_LOWER[((unit >> (12 - 4 * i)) & 0xF) as usize];
    }
    // `buf` is ASCII by construction.
    out.write_str(std::str::from_utf8(&buf).unwrap_or_default());
}

fn display<T: ToJson + ?Sized>(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let options = if f.alternate() {
        SerializeOptions::pretty()
    } else {
        SerializeOptions::new()
    };
    let sink = FmtSink { f, result: Ok(()) };
    Serializer::new(options).serialize(value, sink).result
}

/// Writes compact JSON; `{:#}` writes it with 2-space indentation.
///
/// ```rust
/// use docjson::document;
///
/// let value = document!({"list": [1, "two"]});
/// assert_eq!(value.to_string(), r#"{"list":[1,"two"]}"#);
/// assert_eq!(format!("{value:#}"), "{\n  \"list\": [\n    1,\n    \"two\"\n  ]\n}");
/// ```
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display(self, f)
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display(self, f)
    }
}

/// Writes the string quoted and escaped.
impl fmt::Display for JsonString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display(self, f)
    }
}

/// A `serde` serializer that produces a [`Document`].
///
/// Enum variants with data use the external tagging convention:
/// `{"Variant": value}`.
pub struct DocumentSerializer;

pub struct SerializeVec {
    vec: Array,
}

pub struct SerializeTupleVariant {
    variant: &'static str,
    vec: Array,
}

pub struct SerializeMap {
    map: Object,
    current_key: Option<JsonString>,
}

pub struct SerializeStructVariant {
    variant: &'static str,
    map: Object,
}

fn tagged(variant: &'static str, value: Document) -> Document {
    let mut object = Object::with_capacity(1);
    object.insert(variant, value);
    Document::Object(object)
}

impl ser::Serializer for DocumentSerializer {
    type Ok = Document;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Document> {
        Ok(Document::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Document> {
        Ok(Document::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Document> {
        Ok(Document::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Document> {
        Ok(Document::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Document> {
        Ok(Document::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Document> {
        Ok(Document::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Document> {
        Ok(Document::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Document> {
        Ok(Document::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Document> {
        match i64::try_from(v) {
            Ok(i) => Ok(Document::Int(i)),
            Err(_) => Ok(Document::Float(v as f64)),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Document> {
        Ok(Document::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Document> {
        Ok(Document::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Document> {
        Ok(Document::String(JsonString::from(v)))
    }

    fn serialize_str(self, v: &str) -> Result<Document> {
        Ok(Document::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Document> {
        Ok(Document::Array(v.iter().map(|&b| Document::from(b)).collect()))
    }

    fn serialize_none(self) -> Result<Document> {
        Ok(Document::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Document>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Document> {
        Ok(Document::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Document> {
        Ok(Document::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Document> {
        Ok(Document::from(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Document>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Document>
    where
        T: ?Sized + Serialize,
    {
        Ok(tagged(variant, to_document(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            variant,
            vec: Array::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            variant,
            map: Object::with_capacity(len),
        })
    }
}

impl SerializeVec {
    fn new(capacity: usize) -> Self {
        SerializeVec {
            vec: Array::with_capacity(capacity),
        }
    }
}

impl SerializeMap {
    fn new(capacity: usize) -> Self {
        SerializeMap {
            map: Object::with_capacity(capacity),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Document;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_document(value)?);
        Ok(())
    }

    fn end(self) -> Result<Document> {
        Ok(Document::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Document;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Document> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Document;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Document> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Document;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_document(value)?);
        Ok(())
    }

    fn end(self) -> Result<Document> {
        Ok(tagged(self.variant, Document::Array(self.vec)))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Document;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let mut key = to_document(key)?;
        let key = match &mut key {
            Document::String(s) => std::mem::take(s),
            Document::Int(i) => JsonString::from(i.to_string()),
            Document::Bool(b) => JsonString::from(b.to_string()),
            other => {
                return Err(Error::unsupported_type(&format!(
                    "map key must be a string, found {}",
                    other.kind()
                )))
            }
        };
        self.current_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_document(value)?);
        Ok(())
    }

    fn end(self) -> Result<Document> {
        Ok(Document::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Document;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key, to_document(value)?);
        Ok(())
    }

    fn end(self) -> Result<Document> {
        Ok(Document::Object(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Document;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key, to_document(value)?);
        Ok(())
    }

    fn end(self) -> Result<Document> {
        Ok(tagged(self.variant, Document::Object(self.map)))
    }
}

/// Converts any `T: Serialize` into a [`Document`].
pub fn to_document<T: Serialize + ?Sized>(value: &T) -> Result<Document> {
    value.serialize(DocumentSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document;
    use std::collections::BTreeMap;

    fn compact<T: ToJson + ?Sized>(value: &T) -> String {
        Serializer::new(SerializeOptions::new()).serialize(value, String::new())
    }

    fn indented<T: ToJson + ?Sized>(value: &T, indent: usize) -> String {
        Serializer::new(SerializeOptions::new().with_indent(indent)).serialize(value, String::new())
    }

    #[test]
    fn test_scalars() {
        assert_eq!(compact(&Document::Null), "null");
        assert_eq!(compact(&Document::Bool(false)), "false");
        assert_eq!(compact(&Document::Int(i64::MIN)), "-9223372036854775808");
        assert_eq!(compact(&Document::Float(1.0)), "1.0");
        assert_eq!(compact(&Document::Float(-0.0)), "-0.0");
        assert_eq!(compact(&Document::Float(1e300)), "1e300");
        assert_eq!(compact(&Document::Float(0.1)), "0.1");
        assert_eq!(compact(&Document::Float(f64::NAN)), "null");
        assert_eq!(compact(&Document::Float(f64::NEG_INFINITY)), "null");
    }

    #[test]
    fn test_bare_overloads() {
        assert_eq!(compact(&()), "null");
        assert_eq!(compact(&42i64), "42");
        assert_eq!(compact(&2.5f64), "2.5");
        assert_eq!(compact("tab\t"), r#""tab\t""#);
        assert_eq!(compact(&vec![Document::Int(1)]), "[1]");
        assert_eq!(compact(&[Document::Null][..]), "[null]");
        assert_eq!(compact(&Object::new()), "{}");
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(compact(&document!([])), "[]");
        assert_eq!(indented(&document!([]), 2), "[]");
        assert_eq!(indented(&document!({"a": {}, "b": []}), 2), "{\n  \"a\": {},\n  \"b\": []\n}");
    }

    #[test]
    fn test_compact_and_indented() {
        let value = document!({"a": 1});
        assert_eq!(compact(&value), r#"{"a":1}"#);
        assert_eq!(indented(&value, 2), "{\n  \"a\": 1\n}");
        assert_eq!(indented(&document!([1, [2]]), 3), "[\n   1,\n   [\n      2\n   ]\n]");
    }

    #[test]
    fn test_wide_indent() {
        let out = indented(&document!([null]), 40);
        assert_eq!(out, format!("[\n{}null\n]", " ".repeat(40)));
    }

    #[test]
    fn test_string_escapes() {
        let s = "\"\\/\u{8}\u{c}\n\r\t\u{0}\u{1f}é😀";
        assert_eq!(
            compact(s),
            "\"\\\"\\\\/\\b\\f\\n\\r\\t\\u0000\\u001fé😀\""
        );
    }

    #[test]
    fn test_surrogates_and_malformed_bytes() {
        let mut s = JsonString::from("a");
        s.push_code_point(0xDABC);
        s.push_bytes(&[0xFF, b'b', 0xE2, 0x82]);
        assert_eq!(compact(&s), "\"a\\udabc\u{FFFD}b\u{FFFD}\"");
    }

    #[test]
    fn test_object_keys_escaped() {
        let mut object = Object::new();
        object.insert("q\"", Document::Null);
        assert_eq!(compact(&object), r#"{"q\"":null}"#);
    }

    #[test]
    fn test_deep_nesting_does_not_recurse() {
        let depth = 100_000;
        let mut value = Document::Null;
        for _ in 0..depth {
            value = Document::Array(vec![value]);
        }
        let out = compact(&value);
        assert_eq!(out.len(), depth * 2 + 4);
        assert!(out.starts_with("[[[") && out.ends_with("null]]]"));
    }

    #[test]
    fn test_vec_sink_and_reuse() {
        let mut serializer = Serializer::new(SerializeOptions::new());
        let mut buf = Vec::new();
        serializer.serialize(&document!([1]), &mut buf);
        serializer.serialize(&document!([2]), &mut buf);
        assert_eq!(buf, b"[1][2]");
    }

    #[test]
    fn test_display() {
        let value = document!({"k": [true]});
        assert_eq!(value.to_string(), r#"{"k":[true]}"#);
        assert_eq!(format!("{value:#}"), "{\n  \"k\": [\n    true\n  ]\n}");
        assert_eq!(JsonString::from("x\ny").to_string(), r#""x\ny""#);
        assert_eq!(value.get_object().to_string(), r#"{"k":[true]}"#);
    }

    #[test]
    fn test_to_document_struct() {
        #[derive(Serialize)]
        struct Point {
            x: i32,
            y: Option<f64>,
            tags: Vec<&'static str>,
        }

        let value = to_document(&Point {
            x: 1,
            y: None,
            tags: vec!["a"],
        })
        .unwrap();
        assert_eq!(value, document!({"x": 1, "y": null, "tags": ["a"]}));
    }

    #[test]
    fn test_to_document_enums() {
        #[derive(Serialize)]
        enum Shape {
            Empty,
            Circle(f64),
            Pair(i32, i32),
            Rect { w: i32, h: i32 },
        }

        assert_eq!(to_document(&Shape::Empty).unwrap(), document!("Empty"));
        assert_eq!(to_document(&Shape::Circle(1.5)).unwrap(), document!({"Circle": 1.5}));
        assert_eq!(to_document(&Shape::Pair(1, 2)).unwrap(), document!({"Pair": [1, 2]}));
        assert_eq!(
            to_document(&Shape::Rect { w: 3, h: 4 }).unwrap(),
            document!({"Rect": {"w": 3, "h": 4}})
        );
    }

    #[test]
    fn test_to_document_map_keys() {
        let mut map = BTreeMap::new();
        map.insert(1, "one");
        assert_eq!(to_document(&map).unwrap(), document!({"1": "one"}));

        let mut bad = BTreeMap::new();
        bad.insert(vec![1], 1);
        assert!(matches!(to_document(&bad), Err(Error::UnsupportedType(_))));
    }

    #[test]
    fn test_to_document_large_u64() {
        assert_eq!(to_document(&u64::MAX).unwrap(), Document::Float(u64::MAX as f64));
        assert_eq!(to_document(&7u64).unwrap(), Document::Int(7));
    }
}
