//! Symbol encoding
//!
//! Inverse of [`decode`](crate::decode::decode): builds the structured
//! spelling of a path plus hash. Used to produce fixtures and to check that
//! decoding reproduces the original segments.

use crate::decode::{ENVELOPE_PREFIX, ENVELOPE_TERMINATOR, HASH_MARKER};
use crate::escape::{punctuation_code, DOTTED_SEPARATOR, ESCAPE_DELIMITER};
use crate::hash::SymbolHash;
use crate::path::SymbolPath;

/// Largest code point a `u<hex>` payload can carry
const MAX_ENCODABLE: u32 = 0xFFFF;

/// Encode `path` and `hash` into a structured symbol
///
/// # Errors
/// Returns error for an empty path, an empty segment, or a character above
/// the basic multilingual plane.
pub fn encode(path: &SymbolPath, hash: &SymbolHash) -> Result<String, EncodeError> {
    if path.is_empty() {
        return Err(EncodeError::EmptyPath);
    }

    let mut out = String::from(ENVELOPE_PREFIX);
    for (index, segment) in path.iter().enumerate() {
        if segment.is_empty() {
            return Err(EncodeError::EmptySegment { index });
        }
        let mut text = escape_segment(segment)
            .map_err(|character| EncodeError::Unencodable { index, character })?;
        if text.starts_with(|c: char| c == '_' || c.is_ascii_digit()) {
            text.insert(0, '_');
        }
        // escaped text is ASCII, so byte length is character length
        out.push_str(&text.len().to_string());
        out.push_str(&text);
    }

    out.push_str(HASH_MARKER);
    out.push_str(hash.as_str());
    out.push(ENVELOPE_TERMINATOR);
    Ok(out)
}

/// Escape one segment; returns the first character that cannot be encoded
fn escape_segment(segment: &str) -> Result<String, char> {
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            out.push_str(DOTTED_SEPARATOR);
        } else if c.is_ascii_alphanumeric() || c == '_' || c == ':' {
            out.push(c);
        } else if let Some(code) = punctuation_code(c) {
            out.push(ESCAPE_DELIMITER);
            out.push_str(code);
            out.push(ESCAPE_DELIMITER);
        } else if u32::from(c) <= MAX_ENCODABLE {
            out.push(ESCAPE_DELIMITER);
            out.push_str(&format!("u{:x}", u32::from(c)));
            out.push(ESCAPE_DELIMITER);
        } else {
            return Err(c);
        }
    }

    Ok(out)
}

/// Errors raised while encoding
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// Path has no segments
    #[error("cannot encode an empty path")]
    EmptyPath,

    /// A segment is the empty string
    #[error("segment {index} is empty")]
    EmptySegment {
        /// Position of the segment
        index: usize,
    },

    /// Character has no escape spelling
    #[error("segment {index} contains unencodable character {character:?}")]
    Unencodable {
        /// Position of the segment
        index: usize,
        /// Offending character
        character: char,
    },
}
