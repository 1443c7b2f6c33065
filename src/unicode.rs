//! Code point classification and UTF-8 transcoding.
//!
//! The decoder is strict about structure (no overlong forms, nothing above
//! U+10FFFF, no stray continuation bytes) but still decodes the
//! three-byte encodings of surrogates. The parser needs to see those code
//! points so its invalid-code-point policy can accept, replace or reject them.
//! The encoder is the matching generalized encoder.

/// Largest Unicode code point.
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

/// U+FFFD REPLACEMENT CHARACTER.
pub const REPLACEMENT_CHARACTER: u32 = 0xFFFD;

// https://www.unicode.org/versions/Unicode15.0.0/ch03.pdf#page=49
#[inline]
#[must_use]
pub const fn is_noncharacter(code_point: u32) -> bool {
    (code_point >= 0xFDD0 && code_point <= 0xFDEF)
        || (code_point <= MAX_CODE_POINT && (code_point & 0xFFFE) == 0xFFFE)
}

#[inline]
#[must_use]
pub const fn is_surrogate(code_point: u32) -> bool {
    code_point >= 0xD800 && code_point <= 0xDFFF
}

#[inline]
#[must_use]
pub const fn is_high_surrogate(code_point: u32) -> bool {
    code_point >= 0xD800 && code_point <= 0xDBFF
}

#[inline]
#[must_use]
pub const fn is_low_surrogate(code_point: u32) -> bool {
    code_point >= 0xDC00 && code_point <= 0xDFFF
}

/// Returns `true` for code points the parser routes through its
/// invalid-code-point policy.
#[inline]
#[must_use]
pub const fn is_invalid(code_point: u32) -> bool {
    is_surrogate(code_point) || is_noncharacter(code_point)
}

/// Combines a high and a low surrogate into one code point.
///
/// The caller guarantees both halves are in range.
#[inline]
#[must_use]
pub const fn surrogate_code_point(high: u32, low: u32) -> u32 {
    ((high - 0xD800) << 10) + (low - 0xDC00) + 0x10000
}

/// Length of the sequence introduced by `lead`, or `None` if `lead` cannot
/// start one.
#[inline]
#[must_use]
pub const fn sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

#[inline]
const fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Decodes the code point at the start of `bytes`.
///
/// Returns the code point and the number of bytes it occupied, or `None` if
/// `bytes` is empty or does not start with a well-formed sequence.
///
/// # Examples
///
/// ```rust
/// use docjson::unicode::decode_utf8;
///
/// assert_eq!(decode_utf8(b"A"), Some((0x41, 1)));
/// assert_eq!(decode_utf8("\u{10437}".as_bytes()), Some((0x10437, 4)));
/// assert_eq!(decode_utf8(&[0xC0, 0x80]), None); // overlong NUL
/// assert_eq!(decode_utf8(&[0xED, 0xA0, 0x80]), Some((0xD800, 3)));
/// ```
#[must_use]
pub fn decode_utf8(bytes: &[u8]) -> Option<(u32, usize)> {
    let lead = *bytes.first()?;
    let len = sequence_len(lead)?;
    let tail = bytes.get(1..len)?;

    if !tail.iter().all(|&b| is_continuation(b)) {
        return None;
    }

    let code_point = match len {
        1 => u32::from(lead),
        2 => (u32::from(lead & 0x1F) << 6) | u32::from(tail[0] & 0x3F),
        3 => {
            let cp = (u32::from(lead & 0x0F) << 12)
                | (u32::from(tail[0] & 0x3F) << 6)
                | u32::from(tail[1] & 0x3F);
            if cp < 0x800 {
                return None;
            }
            cp
        }
        _ => {
            let cp = (u32::from(lead & 0x07) << 18)
                | (u32::from(tail[0] & 0x3F) << 12)
                | (u32::from(tail[1] & 0x3F) << 6)
                | u32::from(tail[2] & 0x3F);
            if !(0x10000..=MAX_CODE_POINT).contains(&cp) {
                return None;
            }
            cp
        }
    };

    Some((code_point, len))
}

/// Appends the UTF-8 encoding of `code_point` to `out`, surrogates included.
///
/// Returns the number of bytes written; `0` if `code_point` is above U+10FFFF.
pub fn encode_utf8(code_point: u32, out: &mut Vec<u8>) -> usize {
    // Truncating casts below keep only the payload bits of each byte.
    if code_point > MAX_CODE_POINT {
        0
    } else if code_point < 0x80 {
        out.push(code_point as u8);
        1
    } else if code_point < 0x800 {
        out.extend_from_slice(&[
            0xC0 | (code_point >> 6) as u8,
            0x80 | (code_point & 0x3F) as u8,
        ]);
        2
    } else if code_point < 0x10000 {
        out.extend_from_slice(&[
            0xE0 | (code_point >> 12) as u8,
            0x80 | ((code_point >> 6) & 0x3F) as u8,
            0x80 | (code_point & 0x3F) as u8,
        ]);
        3
    } else {
        out.extend_from_slice(&[
            0xF0 | (code_point >> 18) as u8,
            0x80 | ((code_point >> 12) & 0x3F) as u8,
            0x80 | ((code_point >> 6) & 0x3F) as u8,
            0x80 | (code_point & 0x3F) as u8,
        ]);
        4
    }
}

/// Value of an ASCII hex digit.
#[inline]
#[must_use]
pub const fn hex_value(byte: u8) -> Option<u32> {
    match byte {
        b'0'..=b'9' => Some((byte - b'0') as u32),
        b'a'..=b'f' => Some((byte - b'a' + 10) as u32),
        b'A'..=b'F' => Some((byte - b'A' + 10) as u32),
        _ => None,
    }
}

pub(crate) const HEX_LOWER: &[u8; 16] = b"0123456789abcdef";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(is_high_surrogate(0xD801));
        assert!(is_low_surrogate(0xDC37));
        assert!(!is_low_surrogate(0xD801));
        assert!(is_noncharacter(0xFFFE));
        assert!(is_noncharacter(0x10FFFF));
        assert!(is_noncharacter(0xFDD0));
        assert!(!is_noncharacter(0xFFFD));
        assert!(is_invalid(0xDFFF));
        assert!(!is_invalid(0x1F600));
    }

    #[test]
    fn test_surrogate_pair() {
        assert_eq!(surrogate_code_point(0xD801, 0xDC37), 0x10437);
        assert_eq!(surrogate_code_point(0xD834, 0xDD1E), 0x1D11E);
    }

    #[test]
    fn test_decode_matches_std() {
        for ch in ['a', '\u{7FF}', '\u{800}', '\u{FFFD}', '\u{10000}', '\u{10FFFF}'] {
            let mut buf = [0; 4];
            let encoded = ch.encode_utf8(&mut buf);
            assert_eq!(
                decode_utf8(encoded.as_bytes()),
                Some((ch as u32, encoded.len()))
            );
        }
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert_eq!(decode_utf8(&[]), None);
        assert_eq!(decode_utf8(&[0x80]), None);
        assert_eq!(decode_utf8(&[0xE5]), None);
        assert_eq!(decode_utf8(&[0xE0, 0x80, 0x80]), None);
        assert_eq!(decode_utf8(&[0xF4, 0x90, 0x80, 0x80]), None);
        assert_eq!(decode_utf8(&[0xF8, 0x88, 0x80, 0x80, 0x80]), None);
        assert_eq!(decode_utf8(&[0xC3, 0x28]), None);
    }

    #[test]
    fn test_encode_round_trips_surrogates() {
        let mut out = Vec::new();
        assert_eq!(encode_utf8(0xDC00, &mut out), 3);
        assert_eq!(decode_utf8(&out), Some((0xDC00, 3)));
        assert_eq!(encode_utf8(0x110000, &mut out), 0);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_hex_value() {
        assert_eq!(hex_value(b'7'), Some(7));
        assert_eq!(hex_value(b'c'), Some(12));
        assert_eq!(hex_value(b'F'), Some(15));
        assert_eq!(hex_value(b'g'), None);
    }
}
