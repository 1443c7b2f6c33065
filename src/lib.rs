//! # docjson
//!
//! A JSON document model with a non-recursive parser and serializer.
//!
//! ## What is in the box?
//!
//! - **[`Document`]**: a closed sum over `null`, booleans, 64-bit integers,
//!   doubles, strings, arrays and objects. Every subtree is owned by its parent.
//! - **[`Parser`]**: an explicit-stack state machine. Nesting depth costs heap,
//!   not call stack, and is bounded by [`ParseOptions::max_depth`]. Errors carry
//!   a [`ParseErrorCode`] plus the 0-based line and column of the offending byte.
//! - **[`Serializer`]**: the mirrored machine for output, compact or indented.
//! - **Leniency switches**: comments, trailing commas, duplicate keys and invalid
//!   code points are each opt-in through [`ParseOptions`].
//! - **Serde bridge**: [`to_document`] and [`from_document`] convert between any
//!   serde type and a [`Document`].
//!
//! ## Quick Start
//!
//! ```rust
//! use docjson::{parse, to_string, Document};
//!
//! let out = parse(r#"{"name": "Alice", "tags": ["a", "b"]} trailing"#);
//! assert!(out.is_ok());
//! assert_eq!(out.rest, b" trailing");
//!
//! let name = out.document.as_object().and_then(|o| o.get("name"));
//! assert_eq!(name.and_then(Document::as_str), Some("Alice"));
//!
//! assert_eq!(to_string(&out.document), r#"{"name":"Alice","tags":["a","b"]}"#);
//! ```
//!
//! ### Errors are data
//!
//! ```rust
//! use docjson::{parse, ParseErrorCode};
//!
//! let out = parse("[1,\n 2,]");
//! let err = out.error.unwrap();
//! assert_eq!(err.code, ParseErrorCode::UnexpectedToken);
//! assert_eq!((err.line, err.column), (1, 3));
//! ```
//!
//! ### Lenient input
//!
//! ```rust
//! use docjson::{parse_with_options, Document, ParseOptions};
//!
//! let options = ParseOptions::new()
//!     .with_comments(true)
//!     .with_trailing_commas(true)
//!     .with_duplicate_keys(true);
//! let out = parse_with_options(r#"{"a": 1, /* again */ "a": 2,}"#, &options);
//! assert_eq!(out.document.as_object().and_then(|o| o.get("a")), Some(&Document::Int(2)));
//! ```
//!
//! ### Serde types
//!
//! ```rust
//! use docjson::{from_str, to_document, to_string};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User { id: u32, name: String }
//!
//! let user = User { id: 7, name: "Bo".to_string() };
//! let text = to_string(&to_document(&user).unwrap());
//! assert_eq!(text, r#"{"id":7,"name":"Bo"}"#);
//! assert_eq!(from_str::<User>(&text).unwrap(), user);
//! ```
//!
//! ## Object order
//!
//! JSON leaves member order open and [`Object`] equality ignores it. Iteration
//! and output follow insertion order, so serializing is deterministic.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Neither parsing nor serializing recurses on document depth
//! - Serializing an in-memory document cannot fail

pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod parser;
pub mod ser;
pub mod string;
pub mod unicode;
pub mod value;

pub use de::from_document;
pub use error::{Error, ParseError, ParseErrorCode, Result};
pub use map::{DuplicatePolicy, Object};
pub use options::{ParseOptions, SerializeOptions};
pub use parser::{IterRest, IterSource, ParseOutput, Parser, SliceSource, Source};
pub use ser::{to_document, DocumentSerializer, Serializer, Sink, ToJson};
pub use string::JsonString;
pub use value::{Array, Document, Type};

use serde::de::DeserializeOwned;
use std::io;

/// Parses one JSON value from the front of `input` with default options.
///
/// Whatever follows the value is returned untouched in
/// [`ParseOutput::rest`]; it is not an error.
///
/// # Examples
///
/// ```rust
/// use docjson::{parse, Document};
///
/// let out = parse("[1] x");
/// assert!(out.is_ok());
/// assert_eq!(out.document, Document::Array(vec![Document::Int(1)]));
/// assert_eq!(out.rest, b" x");
/// ```
pub fn parse<I>(input: &I) -> ParseOutput<&[u8]>
where
    I: AsRef<[u8]> + ?Sized,
{
    parse_with_options(input, &ParseOptions::default())
}

/// Parses one JSON value from the front of `input` with custom options.
///
/// # Examples
///
/// ```rust
/// use docjson::{parse_with_options, ParseErrorCode, ParseOptions};
///
/// let options = ParseOptions::new().with_max_depth(2);
/// assert!(parse_with_options("[[1]]", &options).is_ok());
///
/// let out = parse_with_options("[[[1]]]", &options);
/// assert_eq!(out.error.map(|e| e.code), Some(ParseErrorCode::MaxDepth));
/// ```
pub fn parse_with_options<'a, I>(input: &'a I, options: &ParseOptions) -> ParseOutput<&'a [u8]>
where
    I: AsRef<[u8]> + ?Sized,
{
    Parser::new(options.clone()).parse(input.as_ref())
}

/// Parses one JSON value from a byte iterator.
///
/// The iterator is consumed only as far as the value reaches (plus a single
/// look-ahead byte held in the returned [`IterRest`]). Ending the iterator
/// early is how a caller abandons a parse.
///
/// # Examples
///
/// ```rust
/// use docjson::{parse_iter, Document, ParseOptions};
///
/// let mut out = parse_iter(b"true false".iter().copied(), &ParseOptions::default());
/// assert_eq!(out.document, Document::Bool(true));
/// assert_eq!(out.rest.next(), Some(b' '));
/// ```
pub fn parse_iter<I>(iter: I, options: &ParseOptions) -> ParseOutput<IterRest<I::IntoIter>>
where
    I: IntoIterator<Item = u8>,
{
    Parser::new(options.clone()).parse_iter(iter)
}

/// Serializes a value to a compact JSON string.
///
/// # Examples
///
/// ```rust
/// use docjson::{document, to_string};
///
/// assert_eq!(to_string(&document!({"a": [1, 2.5, null]})), r#"{"a":[1,2.5,null]}"#);
/// ```
#[must_use]
pub fn to_string<T>(value: &T) -> String
where
    T: ToJson + ?Sized,
{
    to_string_with_options(value, SerializeOptions::default())
}

/// Serializes a value to a JSON string with 2-space indentation.
///
/// # Examples
///
/// ```rust
/// use docjson::{document, to_string_pretty};
///
/// assert_eq!(to_string_pretty(&document!({"a": 1})), "{\n  \"a\": 1\n}");
/// ```
#[must_use]
pub fn to_string_pretty<T>(value: &T) -> String
where
    T: ToJson + ?Sized,
{
    to_string_with_options(value, SerializeOptions::pretty())
}

/// Serializes a value to a JSON string with custom options.
#[must_use]
pub fn to_string_with_options<T>(value: &T, options: SerializeOptions) -> String
where
    T: ToJson + ?Sized,
{
    Serializer::new(options).serialize(value, String::new())
}

/// Serializes a value to compact JSON bytes.
#[must_use]
pub fn to_vec<T>(value: &T) -> Vec<u8>
where
    T: ToJson + ?Sized,
{
    Serializer::new(SerializeOptions::default()).serialize(value, Vec::new())
}

/// Serializes a value as compact JSON to a writer.
///
/// # Examples
///
/// ```rust
/// use docjson::{to_writer, Document};
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Document::from("hi")).unwrap();
/// assert_eq!(buffer, b"\"hi\"");
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if writing to the writer fails.
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ToJson + ?Sized,
{
    to_writer_with_options(writer, value, SerializeOptions::default())
}

/// Serializes a value as JSON to a writer with custom options.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing to the writer fails.
pub fn to_writer_with_options<W, T>(writer: W, value: &T, options: SerializeOptions) -> Result<()>
where
    W: io::Write,
    T: ToJson + ?Sized,
{
    Serializer::new(options)
        .serialize(value, ser::IoSink::new(writer))
        .finish()
}

/// Deserializes an instance of type `T` from a string of JSON text.
///
/// The whole input must be one value, optionally surrounded by whitespace.
///
/// # Examples
///
/// ```rust
/// use docjson::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str(r#"{"x": 1, "y": 2}"#).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] with line and column if the input is not valid
/// JSON, [`Error::TrailingCharacters`] if anything but whitespace follows the
/// value, or a custom error if the document does not fit `T`.
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_slice(s.as_bytes())
}

/// Deserializes an instance of type `T` from bytes of JSON text.
///
/// # Errors
///
/// See [`from_str`].
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let document = Parser::new(ParseOptions::default()).parse_complete(v)?;
    from_document(document)
}

/// Deserializes an instance of type `T` from an I/O stream of JSON.
///
/// The reader is drained into memory before parsing.
///
/// # Examples
///
/// ```rust
/// use docjson::from_reader;
/// use std::io::Cursor;
///
/// let values: Vec<u8> = from_reader(Cursor::new(b"[1, 2, 3]")).unwrap();
/// assert_eq!(values, vec![1, 2, 3]);
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, otherwise as [`from_str`].
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_slice(&buffer)
}
