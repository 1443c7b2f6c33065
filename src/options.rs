//! Configuration options for parsing and serialization.
//!
//! - [`ParseOptions`]: nesting limit and the independently toggleable grammar
//!   extensions (comments, trailing commas, duplicate keys, invalid code points)
//! - [`SerializeOptions`]: compact or fixed-width indented output
//!
//! None of the extensions are ever emitted by the serializer.
//!
//! ## Examples
//!
//! ```rust
//! use docjson::{parse_with_options, to_string_with_options, ParseOptions, SerializeOptions};
//!
//! let options = ParseOptions::new()
//!     .with_comments(true)
//!     .with_trailing_commas(true);
//! let document = parse_with_options("[1, 2, /* three */ 3,]", &options)
//!     .into_result()
//!     .unwrap()
//!     .0;
//!
//! let text = to_string_with_options(&document, SerializeOptions::new());
//! assert_eq!(text, "[1,2,3]");
//! ```

/// Options controlling what the parser accepts.
///
/// Every extension is off by default, which gives strict RFC 8259 parsing with
/// no nesting limit.
///
/// # Examples
///
/// ```rust
/// use docjson::ParseOptions;
///
/// let strict = ParseOptions::new();
/// assert!(!strict.accept_comments);
///
/// let bounded = ParseOptions::new().with_max_depth(64);
/// assert_eq!(bounded.max_depth, 64);
///
/// let lenient = ParseOptions::lenient();
/// assert!(lenient.accept_trailing_commas);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of simultaneously open arrays/objects.
    pub max_depth: usize,
    /// Treat `// ...` and `/* ... */` as whitespace.
    pub accept_comments: bool,
    /// Allow one `,` before a closing `]` or `}` of a nonempty container.
    pub accept_trailing_commas: bool,
    /// Let a repeated object key overwrite the earlier value instead of failing.
    pub accept_duplicate_keys: bool,
    /// Store surrogates and noncharacters as-is instead of failing.
    pub accept_invalid_code_points: bool,
    /// Substitute U+FFFD for surrogates and noncharacters. Takes precedence over
    /// `accept_invalid_code_points`.
    pub replace_invalid_code_points: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: usize::MAX,
            accept_comments: false,
            accept_trailing_commas: false,
            accept_duplicate_keys: false,
            accept_invalid_code_points: false,
            replace_invalid_code_points: false,
        }
    }
}

impl ParseOptions {
    /// Creates strict options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options with every extension enabled and invalid code points
    /// replaced by U+FFFD.
    #[must_use]
    pub fn lenient() -> Self {
        ParseOptions {
            accept_comments: true,
            accept_trailing_commas: true,
            accept_duplicate_keys: true,
            accept_invalid_code_points: true,
            replace_invalid_code_points: true,
            ..Default::default()
        }
    }

    /// Sets the nesting ceiling. A document nested exactly `max_depth` deep
    /// parses; one level deeper fails with `MaxDepth`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docjson::{parse_with_options, ParseErrorCode, ParseOptions};
    ///
    /// let options = ParseOptions::new().with_max_depth(2);
    /// assert!(parse_with_options("[[]]", &options).is_ok());
    ///
    /// let err = parse_with_options("[[[]]]", &options).error.unwrap();
    /// assert_eq!(err.code, ParseErrorCode::MaxDepth);
    /// ```
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_comments(mut self, accept: bool) -> Self {
        self.accept_comments = accept;
        self
    }

    #[must_use]
    pub fn with_trailing_commas(mut self, accept: bool) -> Self {
        self.accept_trailing_commas = accept;
        self
    }

    #[must_use]
    pub fn with_duplicate_keys(mut self, accept: bool) -> Self {
        self.accept_duplicate_keys = accept;
        self
    }

    #[must_use]
    pub fn with_invalid_code_points(mut self, accept: bool) -> Self {
        self.accept_invalid_code_points = accept;
        self
    }

    /// Sets whether surrogates and noncharacters become U+FFFD.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docjson::{parse_with_options, Document, ParseOptions};
    ///
    /// let options = ParseOptions::new().with_replace_invalid_code_points(true);
    /// let (document, _) = parse_with_options(r#""\uD800""#, &options)
    ///     .into_result()
    ///     .unwrap();
    /// assert_eq!(document, Document::from("\u{FFFD}"));
    /// ```
    #[must_use]
    pub fn with_replace_invalid_code_points(mut self, replace: bool) -> Self {
        self.replace_invalid_code_points = replace;
        self
    }
}

/// Options controlling serializer output.
///
/// # Examples
///
/// ```rust
/// use docjson::SerializeOptions;
///
/// assert_eq!(SerializeOptions::new().indent, 0);
/// assert_eq!(SerializeOptions::pretty().indent, 2);
/// assert_eq!(SerializeOptions::new().with_indent(4).indent, 4);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Spaces per nesting level. `0` writes compact single-line output.
    pub indent: usize,
}

impl SerializeOptions {
    /// Creates compact options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for newline-separated output with 2-space indentation.
    #[must_use]
    pub fn pretty() -> Self {
        SerializeOptions { indent: 2 }
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub const fn is_compact(&self) -> bool {
        self.indent == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_strict() {
        let options = ParseOptions::default();
        assert_eq!(options.max_depth, usize::MAX);
        assert!(!options.accept_comments);
        assert!(!options.accept_trailing_commas);
        assert!(!options.accept_duplicate_keys);
        assert!(!options.accept_invalid_code_points);
        assert!(!options.replace_invalid_code_points);
    }

    #[test]
    fn test_builders_chain() {
        let options = ParseOptions::new()
            .with_max_depth(3)
            .with_duplicate_keys(true)
            .with_invalid_code_points(true);
        assert_eq!(options.max_depth, 3);
        assert!(options.accept_duplicate_keys);
        assert!(options.accept_invalid_code_points);
        assert!(!options.replace_invalid_code_points);
    }

    #[test]
    fn test_lenient_keeps_unbounded_depth() {
        assert_eq!(ParseOptions::lenient().max_depth, usize::MAX);
    }

    #[test]
    fn test_compact() {
        assert!(SerializeOptions::new().is_compact());
        assert!(!SerializeOptions::pretty().is_compact());
    }
}
