//! Escape codes used inside symbol groups
//!
//! A group's text may carry `..` (decoded to `::`) and dollar-delimited
//! codes. The codes form a closed set: a fixed punctuation table plus a
//! `u<hex>` code-point payload.

/// Dollar-delimited punctuation codes
///
/// Adding or removing a code is an edit to this table only.
pub const PUNCTUATION_CODES: &[(&str, char)] = &[
    ("SP", '@'),
    ("BP", '*'),
    ("RF", '&'),
    ("LT", '<'),
    ("GT", '>'),
    ("LP", '('),
    ("RP", ')'),
    ("C", ','),
];

/// Delimiter around escape codes
pub const ESCAPE_DELIMITER: char = '$';

/// In-group spelling of the path separator
pub const DOTTED_SEPARATOR: &str = "..";

/// Maximum hex digits in a code-point payload
const MAX_CODE_POINT_DIGITS: usize = 4;

/// A recognized escape code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeCode {
    /// Entry of [`PUNCTUATION_CODES`]
    Punctuation(char),
    /// `u<hex>` payload naming a Unicode scalar value
    CodePoint(char),
}

impl EscapeCode {
    /// Look up the code found between two delimiters
    ///
    /// Returns `None` for text that is not a recognized code, which the
    /// caller leaves untouched.
    #[must_use]
    pub fn lookup(code: &str) -> Option<Self> {
        if let Some(&(_, c)) = PUNCTUATION_CODES.iter().find(|(name, _)| *name == code) {
            return Some(Self::Punctuation(c));
        }
        let digits = code.strip_prefix('u')?;
        if digits.is_empty()
            || digits.len() > MAX_CODE_POINT_DIGITS
            || !digits.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        char::from_u32(value).map(Self::CodePoint)
    }

    /// The character this code stands for
    #[inline]
    #[must_use]
    pub fn decoded(self) -> char {
        match self {
            Self::Punctuation(c) | Self::CodePoint(c) => c,
        }
    }
}

/// Punctuation code name for `c`, if it has one
#[must_use]
pub(crate) fn punctuation_code(c: char) -> Option<&'static str> {
    PUNCTUATION_CODES
        .iter()
        .find(|(_, decoded)| *decoded == c)
        .map(|(name, _)| *name)
}

/// Replace every escape sequence in a group's text
///
/// Scans left to right; at each position `..` wins, then a delimited code.
/// Unrecognized codes are copied through literally.
#[must_use]
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if let Some(tail) = rest.strip_prefix(DOTTED_SEPARATOR) {
            out.push_str(crate::path::PATH_SEPARATOR);
            rest = tail;
            continue;
        }
        if c == ESCAPE_DELIMITER {
            if let Some((code, tail)) = split_code(&rest[1..]) {
                out.push(code.decoded());
                rest = tail;
                continue;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}

/// Split a delimited code off the text following an opening delimiter
fn split_code(after_open: &str) -> Option<(EscapeCode, &str)> {
    let close = after_open.find(ESCAPE_DELIMITER)?;
    let code = EscapeCode::lookup(&after_open[..close])?;
    Some((code, &after_open[close + 1..]))
}
