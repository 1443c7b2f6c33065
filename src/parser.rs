//! Non-recursive JSON parser.
//!
//! The parser is a state machine driven by an explicit stack of open
//! containers, so the depth of the input never translates into depth of the
//! native call stack. Each [`Frame`] owns the array or object under
//! construction; when a child completes it is attached to the frame below it.
//!
//! Input is pulled one byte at a time through the [`Source`] trait. A
//! [`SliceSource`] reads a borrowed buffer and an [`IterSource`] reads any
//! byte iterator, which lets callers cancel a parse by ending the iterator
//! early.
//!
//! ## Examples
//!
//! ```rust
//! use docjson::{Document, ParseOptions, Parser};
//!
//! let mut parser = Parser::new(ParseOptions::default());
//! let output = parser.parse(b"[1] x");
//!
//! assert!(output.is_ok());
//! assert_eq!(output.document, Document::from(vec![Document::from(1)]));
//! assert_eq!(output.rest, b" x");
//! ```

use crate::error::{Error, ParseError, ParseErrorCode};
use crate::options::ParseOptions;
use crate::unicode;
use crate::{Array, Document, JsonString, Object};
use std::iter::Peekable;

/// A byte source for the parser.
pub trait Source {
    /// What is left of the input once parsing stops.
    type Rest;

    /// Returns the next byte without consuming it, or `None` at end of input.
    fn peek(&mut self) -> Option<u8>;

    /// Consumes the byte last returned by [`peek`](Source::peek).
    fn bump(&mut self);

    /// Moves a run of printable ASCII string content into `out` and returns
    /// its length. The run stops before `"`, `\`, control bytes and
    /// non-ASCII bytes.
    fn copy_ascii_run(&mut self, out: &mut Vec<u8>) -> usize {
        let mut count = 0;
        while let Some(byte) = self.peek() {
            if !is_plain_ascii(byte) {
                break;
            }
            out.push(byte);
            self.bump();
            count += 1;
        }
        count
    }

    fn into_rest(self) -> Self::Rest;
}

#[inline]
const fn is_plain_ascii(byte: u8) -> bool {
    byte >= 0x20 && byte < 0x80 && byte != b'"' && byte != b'\\'
}

/// A [`Source`] over a borrowed byte slice. The rest is the unread sub-slice.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    #[must_use]
    pub fn new(input: &'a [u8]) -> Self {
        SliceSource { input, pos: 0 }
    }
}

impl<'a> Source for SliceSource<'a> {
    type Rest = &'a [u8];

    #[inline]
    fn peek(&mut self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline]
    fn bump(&mut self) {
        self.pos += 1;
    }

    fn copy_ascii_run(&mut self, out: &mut Vec<u8>) -> usize {
        let tail = &self.input[self.pos..];
        let count = tail
            .iter()
            .position(|&b| !is_plain_ascii(b))
            .unwrap_or(tail.len());
        out.extend_from_slice(&tail[..count]);
        self.pos += count;
        count
    }

    fn into_rest(self) -> &'a [u8] {
        &self.input[self.pos..]
    }
}

/// What is left of an iterator after parsing: the look-ahead byte, if any,
/// followed by the unread remainder.
pub type IterRest<I> = Peekable<I>;

/// A [`Source`] over any byte iterator.
///
/// # Examples
///
/// ```rust
/// use docjson::{Document, ParseOptions, Parser};
///
/// let mut parser = Parser::new(ParseOptions::default());
/// let output = parser.parse_iter(b"true false".iter().copied());
///
/// assert_eq!(output.document, Document::Bool(true));
/// assert_eq!(output.rest.collect::<Vec<_>>(), b" false");
/// ```
#[derive(Debug)]
pub struct IterSource<I: Iterator<Item = u8>> {
    iter: Peekable<I>,
}

impl<I: Iterator<Item = u8>> IterSource<I> {
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        IterSource {
            iter: iter.into_iter().peekable(),
        }
    }
}

impl<I: Iterator<Item = u8>> Source for IterSource<I> {
    type Rest = IterRest<I>;

    #[inline]
    fn peek(&mut self) -> Option<u8> {
        self.iter.peek().copied()
    }

    #[inline]
    fn bump(&mut self) {
        self.iter.next();
    }

    fn into_rest(self) -> IterRest<I> {
        self.iter
    }
}

/// Wraps a [`Source`] and tracks the 0-based position of the next byte.
struct Reader<S> {
    source: S,
    line: usize,
    column: usize,
    after_cr: bool,
}

impl<S: Source> Reader<S> {
    fn new(source: S) -> Self {
        Reader {
            source,
            line: 0,
            column: 0,
            after_cr: false,
        }
    }

    #[inline]
    fn peek(&mut self) -> Option<u8> {
        self.source.peek()
    }

    fn bump(&mut self) {
        match self.source.peek() {
            Some(b'\n') => {
                // The `\n` of a `\r\n` pair was already counted by the `\r`.
                if !self.after_cr {
                    self.line += 1;
                    self.column = 0;
                }
                self.after_cr = false;
            }
            Some(b'\r') => {
                self.line += 1;
                self.column = 0;
                self.after_cr = true;
            }
            Some(_) => {
                self.column += 1;
                self.after_cr = false;
            }
            None => return,
        }
        self.source.bump();
    }

    fn copy_ascii_run(&mut self, out: &mut Vec<u8>) {
        let count = self.source.copy_ascii_run(out);
        if count > 0 {
            self.column += count;
            self.after_cr = false;
        }
    }

    #[inline]
    fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    #[inline]
    fn error(&self, code: ParseErrorCode) -> ParseError {
        ParseError::new(code, self.line, self.column)
    }
}

#[inline]
fn error_at(code: ParseErrorCode, (line, column): (usize, usize)) -> ParseError {
    ParseError::new(code, line, column)
}

/// The result of one parse.
///
/// `document` is complete when `error` is `None`. After a failure it holds
/// whatever was built before the error and is normally discarded. `line` and
/// `column` are where parsing stopped.
#[derive(Debug, Clone)]
pub struct ParseOutput<R> {
    pub rest: R,
    pub document: Document,
    pub error: Option<ParseError>,
    pub line: usize,
    pub column: usize,
}

impl<R> ParseOutput<R> {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Converts into a `Result`, dropping the partial document on failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docjson::{parse, Document, ParseErrorCode};
    ///
    /// let (document, rest) = parse("null,").into_result().unwrap();
    /// assert_eq!(document, Document::Null);
    /// assert_eq!(rest, b",");
    ///
    /// let err = parse("nul").into_result().unwrap_err();
    /// assert_eq!(err.code, ParseErrorCode::UnexpectedToken);
    /// ```
    pub fn into_result(self) -> Result<(Document, R), ParseError> {
        match self.error {
            None => Ok((self.document, self.rest)),
            Some(err) => Err(err),
        }
    }
}

/// One open container on the parse stack.
#[derive(Debug)]
enum Frame {
    Array(Array),
    Object {
        object: Object,
        /// Key whose value is being parsed.
        key: Option<JsonString>,
    },
}

impl Frame {
    fn attach(&mut self, child: Document) {
        match self {
            Frame::Array(array) => array.push(child),
            Frame::Object { object, key } => {
                debug_assert!(key.is_some(), "object member attached without a key");
                if let Some(key) = key.take() {
                    object.insert(key, child);
                }
            }
        }
    }

    fn into_document(self) -> Document {
        match self {
            Frame::Array(array) => Document::Array(array),
            Frame::Object { object, .. } => Document::Object(object),
        }
    }
}

/// Where the driving loop resumes.
enum State {
    /// A value is expected.
    Value,
    /// The top frame expects a member or its closing bracket.
    Member { first: bool },
    /// A value is finished and must be attached to its parent.
    Complete(Document),
}

/// A reusable JSON parser.
///
/// The parse stack keeps its capacity between calls.
#[derive(Debug, Default)]
pub struct Parser {
    options: ParseOptions,
    stack: Vec<Frame>,
    scratch: String,
}

impl Parser {
    #[must_use]
    pub fn new(options: ParseOptions) -> Self {
        Parser {
            options,
            stack: Vec::new(),
            scratch: String::new(),
        }
    }

    #[must_use]
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parses one value from the front of `input`.
    ///
    /// Bytes after the value are returned untouched as `rest`.
    pub fn parse<'a>(&mut self, input: &'a [u8]) -> ParseOutput<&'a [u8]> {
        self.parse_source(SliceSource::new(input))
    }

    /// Parses one value from a byte iterator.
    pub fn parse_iter<I>(&mut self, iter: I) -> ParseOutput<IterRest<I::IntoIter>>
    where
        I: IntoIterator<Item = u8>,
    {
        self.parse_source(IterSource::new(iter))
    }

    pub fn parse_source<S: Source>(&mut self, source: S) -> ParseOutput<S::Rest> {
        let mut reader = Reader::new(source);
        let (document, error) = match self.read_document(&mut reader) {
            Ok(document) => (document, None),
            Err(err) => (self.unwind(), Some(err)),
        };
        let (line, column) = match error {
            Some(err) => (err.line, err.column),
            None => reader.position(),
        };
        ParseOutput {
            rest: reader.source.into_rest(),
            document,
            error,
            line,
            column,
        }
    }

    /// Parses `input` as exactly one document.
    ///
    /// Whitespace (and comments, if enabled) may follow the value; anything
    /// else is [`Error::TrailingCharacters`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docjson::{Error, ParseOptions, Parser};
    ///
    /// let mut parser = Parser::new(ParseOptions::default());
    /// assert!(parser.parse_complete(b" {} \n").is_ok());
    /// assert_eq!(
    ///     parser.parse_complete(b"{} {}"),
    ///     Err(Error::TrailingCharacters { line: 0, column: 3 })
    /// );
    /// ```
    pub fn parse_complete(&mut self, input: &[u8]) -> crate::Result<Document> {
        self.parse_complete_source(SliceSource::new(input))
    }

    pub fn parse_complete_source<S: Source>(&mut self, source: S) -> crate::Result<Document> {
        let mut reader = Reader::new(source);
        let document = match self.read_document(&mut reader) {
            Ok(document) => document,
            Err(err) => {
                self.stack.clear();
                return Err(err.into());
            }
        };
        self.skip_whitespace(&mut reader)?;
        if reader.peek().is_some() {
            let (line, column) = reader.position();
            return Err(Error::TrailingCharacters { line, column });
        }
        Ok(document)
    }

    fn read_document<S: Source>(&mut self, r: &mut Reader<S>) -> Result<Document, ParseError> {
        self.stack.clear();
        let mut state = State::Value;
        loop {
            state = match state {
                State::Value => self.start_value(r)?,
                State::Member { first } => self.continue_container(r, first)?,
                State::Complete(document) => match self.stack.last_mut() {
                    None => return Ok(document),
                    Some(frame) => {
                        frame.attach(document);
                        State::Member { first: false }
                    }
                },
            };
        }
    }

    /// Folds the open frames back into a single partial document.
    fn unwind(&mut self) -> Document {
        let mut child = None;
        while let Some(mut frame) = self.stack.pop() {
            if let Some(document) = child.take() {
                frame.attach(document);
            }
            child = Some(frame.into_document());
        }
        child.unwrap_or_default()
    }

    fn start_value<S: Source>(&mut self, r: &mut Reader<S>) -> Result<State, ParseError> {
        self.skip_whitespace(r)?;
        match r.peek() {
            Some(open @ (b'[' | b'{')) => {
                if self.stack.len() >= self.options.max_depth {
                    return Err(r.error(ParseErrorCode::MaxDepth));
                }
                r.bump();
                self.stack.push(if open == b'[' {
                    Frame::Array(Array::new())
                } else {
                    Frame::Object {
                        object: Object::new(),
                        key: None,
                    }
                });
                Ok(State::Member { first: true })
            }
            Some(b'"') => {
                let mut s = JsonString::new();
                self.read_string(r, &mut s)?;
                Ok(State::Complete(Document::String(s)))
            }
            Some(b'-' | b'0'..=b'9') => self.read_number(r).map(State::Complete),
            Some(b't') => read_literal(r, b"true", Document::Bool(true)),
            Some(b'f') => read_literal(r, b"false", Document::Bool(false)),
            Some(b'n') => read_literal(r, b"null", Document::Null),
            _ => Err(r.error(ParseErrorCode::UnexpectedToken)),
        }
    }

    fn continue_container<S: Source>(
        &mut self,
        r: &mut Reader<S>,
        first: bool,
    ) -> Result<State, ParseError> {
        let is_object = matches!(self.stack.last(), Some(Frame::Object { .. }));
        let close = if is_object { b'}' } else { b']' };

        self.skip_whitespace(r)?;
        if !first {
            match r.peek() {
                Some(b',') => {
                    r.bump();
                    self.skip_whitespace(r)?;
                    if r.peek() != Some(close) {
                        return self.next_member(r, is_object);
                    }
                    if !self.options.accept_trailing_commas {
                        return Err(r.error(ParseErrorCode::UnexpectedToken));
                    }
                }
                Some(byte) if byte == close => {}
                _ => return Err(r.error(ParseErrorCode::UnexpectedToken)),
            }
        } else if r.peek() != Some(close) {
            return self.next_member(r, is_object);
        }

        r.bump();
        let document = self
            .stack
            .pop()
            .map(Frame::into_document)
            .unwrap_or_default();
        Ok(State::Complete(document))
    }

    fn next_member<S: Source>(
        &mut self,
        r: &mut Reader<S>,
        is_object: bool,
    ) -> Result<State, ParseError> {
        if !is_object {
            return Ok(State::Value);
        }

        if r.peek() != Some(b'"') {
            return Err(r.error(ParseErrorCode::UnexpectedToken));
        }
        let key_position = r.position();
        let mut key = JsonString::new();
        self.read_string(r, &mut key)?;

        self.skip_whitespace(r)?;
        if r.peek() != Some(b':') {
            return Err(r.error(ParseErrorCode::UnexpectedToken));
        }
        r.bump();

        if let Some(Frame::Object { object, key: slot }) = self.stack.last_mut() {
            if !self.options.accept_duplicate_keys && object.get_bytes(&key).is_some() {
                return Err(error_at(ParseErrorCode::DuplicateKey, key_position));
            }
            *slot = Some(key);
        }
        Ok(State::Value)
    }

    fn skip_whitespace<S: Source>(&self, r: &mut Reader<S>) -> Result<(), ParseError> {
        loop {
            match r.peek() {
                Some(b' ' | b'\t' | b'\n' | b'\r') => r.bump(),
                Some(b'/') if self.options.accept_comments => {
                    r.bump();
                    match r.peek() {
                        Some(b'/') => {
                            while !matches!(r.peek(), None | Some(b'\n' | b'\r')) {
                                r.bump();
                            }
                        }
                        Some(b'*') => {
                            r.bump();
                            loop {
                                match r.peek() {
                                    None => return Err(r.error(ParseErrorCode::UnexpectedToken)),
                                    Some(b'*') => {
                                        r.bump();
                                        if r.peek() == Some(b'/') {
                                            r.bump();
                                            break;
                                        }
                                    }
                                    Some(_) => r.bump(),
                                }
                            }
                        }
                        _ => return Err(r.error(ParseErrorCode::UnexpectedToken)),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn read_number<S: Source>(&mut self, r: &mut Reader<S>) -> Result<Document, ParseError> {
        let start = r.position();
        let lexeme = &mut self.scratch;
        lexeme.clear();

        if r.peek() == Some(b'-') {
            lexeme.push('-');
            r.bump();
        }
        match r.peek() {
            Some(b'0') => {
                lexeme.push('0');
                r.bump();
                if matches!(r.peek(), Some(b'0'..=b'9')) {
                    return Err(r.error(ParseErrorCode::UnexpectedToken));
                }
            }
            Some(b'1'..=b'9') => read_digits(r, lexeme),
            _ => return Err(r.error(ParseErrorCode::UnexpectedToken)),
        }

        let mut is_float = false;
        if r.peek() == Some(b'.') {
            is_float = true;
            lexeme.push('.');
            r.bump();
            if !matches!(r.peek(), Some(b'0'..=b'9')) {
                return Err(r.error(ParseErrorCode::UnexpectedToken));
            }
            read_digits(r, lexeme);
        }
        if let Some(e @ (b'e' | b'E')) = r.peek() {
            is_float = true;
            lexeme.push(char::from(e));
            r.bump();
            if let Some(sign @ (b'+' | b'-')) = r.peek() {
                lexeme.push(char::from(sign));
                r.bump();
            }
            if !matches!(r.peek(), Some(b'0'..=b'9')) {
                return Err(r.error(ParseErrorCode::UnexpectedToken));
            }
            read_digits(r, lexeme);
        }

        if is_float {
            match lexeme.parse::<f64>() {
                Ok(value) if value.is_infinite() => {
                    Err(error_at(ParseErrorCode::NumberOutOfRange, start))
                }
                // A nonzero mantissa that rounds to zero has underflowed.
                Ok(value) if value == 0.0 && has_nonzero_mantissa(lexeme.as_str()) => {
                    Err(error_at(ParseErrorCode::NumberOutOfRange, start))
                }
                Ok(value) => Ok(Document::Float(value)),
                Err(_) => Err(error_at(ParseErrorCode::UnexpectedToken, start)),
            }
        } else {
            lexeme
                .parse::<i64>()
                .map(Document::Int)
                .map_err(|_| error_at(ParseErrorCode::NumberOutOfRange, start))
        }
    }

    /// Reads a quoted string. The reader is positioned on the opening quote.
    fn read_string<S: Source>(
        &self,
        r: &mut Reader<S>,
        out: &mut JsonString,
    ) -> Result<(), ParseError> {
        r.bump();
        loop {
            match r.peek() {
                None => return Err(r.error(ParseErrorCode::UnexpectedToken)),
                Some(b'"') => {
                    r.bump();
                    return Ok(());
                }
                Some(b'\\') => self.read_escape(r, out)?,
                Some(byte) if byte < 0x20 => {
                    return Err(r.error(ParseErrorCode::UnexpectedToken));
                }
                Some(byte) if byte < 0x80 => r.copy_ascii_run(out.as_mut_vec()),
                Some(_) => self.read_encoded(r, out)?,
            }
        }
    }

    /// Decodes one raw multi-byte UTF-8 sequence.
    fn read_encoded<S: Source>(
        &self,
        r: &mut Reader<S>,
        out: &mut JsonString,
    ) -> Result<(), ParseError> {
        let start = r.position();
        let mut buf = [0u8; 4];
        let len = r
            .peek()
            .and_then(unicode::sequence_len)
            .ok_or_else(|| r.error(ParseErrorCode::InvalidEncoding))?;

        for (i, slot) in buf.iter_mut().enumerate().take(len) {
            let byte = r
                .peek()
                .ok_or_else(|| r.error(ParseErrorCode::UnexpectedToken))?;
            if i > 0 && byte & 0xC0 != 0x80 {
                return Err(r.error(ParseErrorCode::InvalidEncoding));
            }
            *slot = byte;
            r.bump();
        }

        let (code_point, _) = unicode::decode_utf8(&buf[..len])
            .ok_or_else(|| error_at(ParseErrorCode::InvalidEncoding, start))?;

        if unicode::is_invalid(code_point) {
            self.push_checked(code_point, start, out)
        } else {
            out.push_bytes(&buf[..len]);
            Ok(())
        }
    }

    /// Reads one escape. The reader is positioned on the backslash.
    fn read_escape<S: Source>(
        &self,
        r: &mut Reader<S>,
        out: &mut JsonString,
    ) -> Result<(), ParseError> {
        let mut start = r.position();
        r.bump();
        let mut code_point = match read_escape_body(r, out)? {
            Some(code_point) => code_point,
            None => return Ok(()),
        };

        loop {
            if !unicode::is_high_surrogate(code_point) || r.peek() != Some(b'\\') {
                return self.push_checked(code_point, start, out);
            }

            let next_start = r.position();
            r.bump();
            if r.peek() != Some(b'u') {
                self.push_checked(code_point, start, out)?;
                return read_escape_body(r, out).map(|_| ());
            }

            let next = match read_escape_body(r, out)? {
                Some(next) => next,
                None => return Ok(()),
            };
            if unicode::is_low_surrogate(next) {
                let combined = unicode::surrogate_code_point(code_point, next);
                return self.push_checked(combined, start, out);
            }

            self.push_checked(code_point, start, out)?;
            code_point = next;
            start = next_start;
        }
    }

    /// Appends `code_point`, routing surrogates and noncharacters through the
    /// invalid-code-point policy.
    fn push_checked(
        &self,
        code_point: u32,
        position: (usize, usize),
        out: &mut JsonString,
    ) -> Result<(), ParseError> {
        if !unicode::is_invalid(code_point) {
            out.push_code_point(code_point);
        } else if self.options.replace_invalid_code_points {
            out.push_code_point(unicode::REPLACEMENT_CHARACTER);
        } else if self.options.accept_invalid_code_points {
            out.push_code_point(code_point);
        } else {
            return Err(error_at(ParseErrorCode::InvalidEscape, position));
        }
        Ok(())
    }
}

fn read_literal<S: Source>(
    r: &mut Reader<S>,
    word: &[u8],
    document: Document,
) -> Result<State, ParseError> {
    for &expected in word {
        if r.peek() != Some(expected) {
            return Err(r.error(ParseErrorCode::UnexpectedToken));
        }
        r.bump();
    }
    Ok(State::Complete(document))
}

fn read_digits<S: Source>(r: &mut Reader<S>, lexeme: &mut String) {
    while let Some(digit @ b'0'..=b'9') = r.peek() {
        lexeme.push(char::from(digit));
        r.bump();
    }
}

/// Returns `true` if any digit before the exponent is nonzero.
fn has_nonzero_mantissa(lexeme: &str) -> bool {
    lexeme
        .bytes()
        .take_while(|b| !matches!(b, b'e' | b'E'))
        .any(|b| matches!(b, b'1'..=b'9'))
}

/// Reads the part of an escape after the backslash.
///
/// Single-character escapes are appended to `out` directly and yield `None`.
/// `\uXXXX` yields the UTF-16 code unit without appending anything.
fn read_escape_body<S: Source>(
    r: &mut Reader<S>,
    out: &mut JsonString,
) -> Result<Option<u32>, ParseError> {
    let simple = match r.peek() {
        None => return Err(r.error(ParseErrorCode::UnexpectedToken)),
        Some(b'u') => {
            r.bump();
            let mut unit = 0;
            for _ in 0..4 {
                let byte = r
                    .peek()
                    .ok_or_else(|| r.error(ParseErrorCode::UnexpectedToken))?;
                let digit =
                    unicode::hex_value(byte).ok_or_else(|| r.error(ParseErrorCode::InvalidEscape))?;
                unit = (unit << 4) | digit;
                r.bump();
            }
            return Ok(Some(unit));
        }
        Some(b'"') => b'"',
        Some(b'\\') => b'\\',
        Some(b'/') => b'/',
        Some(b'b') => 0x08,
        Some(b'f') => 0x0C,
        Some(b'n') => b'\n',
        Some(b'r') => b'\r',
        Some(b't') => b'\t',
        Some(_) => return Err(r.error(ParseErrorCode::InvalidEscape)),
    };
    r.bump();
    out.push_bytes(&[simple]);
    Ok(None)
}
