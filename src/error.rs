//! Error types for JSON parsing and the serde bridge.
//!
//! Parsing never unwinds: the parser reports the first problem it finds as a
//! [`ParseError`] value carrying a [`ParseErrorCode`] and the 0-based line and
//! column of the offending byte. Serializing an in-memory [`Document`] cannot
//! fail, so there is no serializer error type.
//!
//! The crate-wide [`Error`] wraps parse failures together with the errors that
//! the convenience layer can produce (trailing characters, type mismatches,
//! I/O, serde).
//!
//! ## Examples
//!
//! ```rust
//! use docjson::{parse, ParseErrorCode};
//!
//! let output = parse("[1,\n 2,, 3]");
//! let err = output.error.unwrap();
//!
//! assert_eq!(err.code, ParseErrorCode::UnexpectedToken);
//! assert_eq!((err.line, err.column), (1, 3));
//! assert_eq!(err.to_string(), "unexpected token at line 1, column 3");
//! ```
//!
//! [`Document`]: crate::Document

use crate::value::Type;
use std::fmt;
use thiserror::Error;

/// The kind of failure that halted a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorCode {
    /// The input does not match the grammar at the current position.
    UnexpectedToken,
    /// A `\` escape is malformed, or an invalid code point was rejected.
    InvalidEscape,
    /// The raw input is not valid UTF-8 where a code point had to be decoded.
    InvalidEncoding,
    /// A well-formed number literal does not fit `i64` or `f64`.
    NumberOutOfRange,
    /// Nesting exceeded [`ParseOptions::max_depth`](crate::ParseOptions::max_depth).
    MaxDepth,
    /// An object key repeated while duplicates were rejected.
    DuplicateKey,
}

impl ParseErrorCode {
    /// Returns a short, lower-case description of the code.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docjson::ParseErrorCode;
    ///
    /// assert_eq!(ParseErrorCode::MaxDepth.message(), "max depth reached");
    /// ```
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            ParseErrorCode::UnexpectedToken => "unexpected token",
            ParseErrorCode::InvalidEscape => "invalid escape",
            ParseErrorCode::InvalidEncoding => "invalid encoding",
            ParseErrorCode::NumberOutOfRange => "number out of range",
            ParseErrorCode::MaxDepth => "max depth reached",
            ParseErrorCode::DuplicateKey => "duplicate key",
        }
    }
}

impl fmt::Display for ParseErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A parse failure and where it happened.
///
/// `line` and `column` are 0-based. `column` counts bytes from the start of the
/// line; `\n`, `\r` and `\r\n` each end a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("{code} at line {line}, column {column}")]
pub struct ParseError {
    pub code: ParseErrorCode,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    #[must_use]
    pub const fn new(code: ParseErrorCode, line: usize, column: usize) -> Self {
        ParseError { code, line, column }
    }
}

/// Represents all errors surfaced by the convenience layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The input was not a valid JSON document.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A complete value was followed by something other than whitespace.
    #[error("trailing characters at line {line}, column {column}")]
    TrailingCharacters { line: usize, column: usize },

    /// A conversion out of a [`Document`](crate::Document) hit the wrong variant.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Type, found: Type },

    /// A Rust type has no JSON document representation.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docjson::{Error, Type};
    ///
    /// let err = Error::type_mismatch(Type::Int, Type::String);
    /// assert_eq!(err.to_string(), "type mismatch: expected int, found string");
    /// ```
    #[must_use]
    pub fn type_mismatch(expected: Type, found: Type) -> Self {
        Error::TypeMismatch { expected, found }
    }

    /// Creates an unsupported type error for values the document model cannot hold.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the underlying parse error, if this is one.
    #[must_use]
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            Error::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
