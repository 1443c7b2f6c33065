//! Owned JSON string payload.
//!
//! [`JsonString`] stores bytes rather than a Rust [`String`]. Its contents are
//! normally UTF-8, but a parser configured to accept invalid code points
//! stores unpaired surrogates in generalized UTF-8, which `str` cannot
//! hold. Equality, ordering and hashing are byte-wise.
//!
//! ```rust
//! use docjson::JsonString;
//!
//! let mut s = JsonString::from("caf");
//! s.push('é');
//! assert_eq!(s, "café");
//! assert_eq!(s.len(), 5);
//! assert_eq!(s.to_string(), r#""café""#);
//! ```

use crate::unicode;
use std::borrow::{Borrow, Cow};
use std::fmt;
use std::ops::Deref;

/// An owned, growable byte string interpreted as UTF-8 text.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JsonString(Vec<u8>);

impl JsonString {
    #[must_use]
    pub fn new() -> Self {
        JsonString(Vec::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        JsonString(Vec::with_capacity(capacity))
    }

    /// Wraps raw bytes without validation.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        JsonString(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Returns the contents as `str` if they are valid UTF-8.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docjson::JsonString;
    ///
    /// let mut s = JsonString::from("ok");
    /// assert_eq!(s.as_str(), Some("ok"));
    ///
    /// s.push_code_point(0xD800);
    /// assert_eq!(s.as_str(), None);
    /// ```
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// Returns the contents as text, replacing malformed sequences with U+FFFD.
    #[must_use]
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    /// Converts into a `String`, replacing malformed sequences with U+FFFD.
    #[must_use]
    pub fn into_string_lossy(self) -> String {
        match String::from_utf8(self.0) {
            Ok(s) => s,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, ch: char) {
        let mut buf = [0; 4];
        self.0.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
    }

    pub fn push_str(&mut self, s: &str) {
        self.0.extend_from_slice(s.as_bytes());
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.0.extend_from_slice(bytes);
    }

    /// Appends any code point up to U+10FFFF, surrogates included. Returns
    /// `false` and leaves the string unchanged for larger values.
    pub fn push_code_point(&mut self, code_point: u32) -> bool {
        unicode::encode_utf8(code_point, &mut self.0) != 0
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub(crate) fn as_mut_vec(&mut self) -> &mut Vec<u8> {
        &mut self.0
    }
}

impl Deref for JsonString {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for JsonString {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Borrow<[u8]> for JsonString {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for JsonString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(s) => fmt::Debug::fmt(s, f),
            None => write!(f, "JsonString({:?})", self.0),
        }
    }
}

impl From<&str> for JsonString {
    fn from(value: &str) -> Self {
        JsonString(value.as_bytes().to_vec())
    }
}

impl From<String> for JsonString {
    fn from(value: String) -> Self {
        JsonString(value.into_bytes())
    }
}

impl From<char> for JsonString {
    fn from(value: char) -> Self {
        let mut s = JsonString::new();
        s.push(value);
        s
    }
}

impl From<Vec<u8>> for JsonString {
    fn from(value: Vec<u8>) -> Self {
        JsonString(value)
    }
}

impl From<&[u8]> for JsonString {
    fn from(value: &[u8]) -> Self {
        JsonString(value.to_vec())
    }
}

impl PartialEq<str> for JsonString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for JsonString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<JsonString> for str {
    fn eq(&self, other: &JsonString) -> bool {
        self.as_bytes() == other.0
    }
}

impl PartialEq<JsonString> for &str {
    fn eq(&self, other: &JsonString) -> bool {
        self.as_bytes() == other.0
    }
}

impl Extend<char> for JsonString {
    fn extend<T: IntoIterator<Item = char>>(&mut self, iter: T) {
        for ch in iter {
            self.push(ch);
        }
    }
}

impl FromIterator<char> for JsonString {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        let mut s = JsonString::new();
        s.extend(iter);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_wise_ordering() {
        let mut keys = vec![
            JsonString::from("b"),
            JsonString::from("B"),
            JsonString::from("a\u{0}"),
            JsonString::from("a"),
        ];
        keys.sort();
        let sorted: Vec<_> = keys.iter().map(|k| k.as_bytes().to_vec()).collect();
        assert_eq!(
            sorted,
            vec![b"B".to_vec(), b"a".to_vec(), b"a\0".to_vec(), b"b".to_vec()]
        );
    }

    #[test]
    fn test_embedded_nul_is_kept() {
        let s = JsonString::from("a\0b");
        assert_eq!(s.len(), 3);
        assert_eq!(s.as_str(), Some("a\0b"));
    }

    #[test]
    fn test_lossy_conversion() {
        let mut s = JsonString::from("x");
        s.push_code_point(0xDFFF);
        assert_eq!(s.len(), 4);
        assert_eq!(s.to_string_lossy().chars().next(), Some('x'));
        assert!(s.clone().into_string_lossy().contains('\u{FFFD}'));
    }

    #[test]
    fn test_push_code_point_rejects_out_of_range() {
        let mut s = JsonString::new();
        assert!(!s.push_code_point(0x110000));
        assert!(s.is_empty());
        assert!(s.push_code_point(0x1F600));
        assert_eq!(s, "😀");
    }

    #[test]
    fn test_collect_chars() {
        let s: JsonString = "héllo".chars().rev().collect();
        assert_eq!(s, "olléh");
    }
}
