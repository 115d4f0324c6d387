//! Symbol decoding
//!
//! Turns an encoded symbol into a [`DecodedSymbol`]. A symbol uses the
//! structured encoding when it is wrapped in the envelope
//!
//! ```text
//! _ZN <group>+ [E] 17h <16 lowercase hex digits> E
//! ```
//!
//! where every group is a decimal length followed by that many characters of
//! segment text. Anything else decodes to [`DecodedSymbol::Opaque`].

use crate::escape::unescape;
use crate::hash::{is_hash_digits, SymbolHash};
use crate::path::SymbolPath;
use std::fmt::{self, Display, Formatter};

/// Prefix marking a structured symbol
pub const ENVELOPE_PREFIX: &str = "_ZN";

/// Marker introducing the hash disambiguator
pub const HASH_MARKER: &str = "17h";

/// Final character of a structured symbol
pub const ENVELOPE_TERMINATOR: char = 'E';

/// Closes the nested name when written before the hash marker
const NESTED_NAME_END: &str = "E";

/// Length of `17h<hash>E`
const SUFFIX_LEN: usize = HASH_MARKER.len() + crate::hash::HASH_LEN + 1;

/// Stripped from the front of a group's text
const GROUP_DISAMBIGUATOR: char = '_';

/// Result of decoding one symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DecodedSymbol {
    /// Envelope matched: ordered path plus hash disambiguator
    Mangled {
        /// Decoded path segments
        path: SymbolPath,
        /// Hash disambiguator, verbatim
        hash: SymbolHash,
    },
    /// Envelope did not match; the symbol is kept as-is
    Opaque {
        /// The symbol exactly as supplied
        raw: String,
    },
}

impl DecodedSymbol {
    /// Decoded path, if the envelope matched
    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&SymbolPath> {
        match self {
            Self::Mangled { path, .. } => Some(path),
            Self::Opaque { .. } => None,
        }
    }

    /// Hash disambiguator, if the envelope matched
    #[inline]
    #[must_use]
    pub fn hash(&self) -> Option<&SymbolHash> {
        match self {
            Self::Mangled { hash, .. } => Some(hash),
            Self::Opaque { .. } => None,
        }
    }

    /// Whether the structured envelope matched
    #[inline]
    #[must_use]
    pub fn is_mangled(&self) -> bool {
        matches!(self, Self::Mangled { .. })
    }

    /// Split into the lookup key and the hash (`None` for opaque symbols)
    #[must_use]
    pub fn into_key(self) -> (DecodeKey, Option<SymbolHash>) {
        match self {
            Self::Mangled { path, hash } => (DecodeKey::Path(path), Some(hash)),
            Self::Opaque { raw } => (DecodeKey::Raw(raw), None),
        }
    }
}

/// Key under which a decoded symbol is indexed and reported
///
/// Decoded paths sort before raw strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DecodeKey {
    /// Decoded path of a structured symbol
    Path(SymbolPath),
    /// Raw string of an opaque symbol
    Raw(String),
}

impl Display for DecodeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => Display::fmt(path, f),
            Self::Raw(raw) => f.write_str(raw),
        }
    }
}

/// Check whether `symbol` carries the structured prefix
///
/// Only the prefix is inspected; the rest of the envelope may still fail to
/// match.
#[inline]
#[must_use]
pub fn has_envelope_prefix(symbol: &str) -> bool {
    symbol.starts_with(ENVELOPE_PREFIX)
}

/// Decode one symbol
///
/// # Errors
/// Returns [`DecodeError::MalformedSymbol`] when the envelope matches but the
/// body is not an exact sequence of length-prefixed groups.
pub fn decode(symbol: &str) -> Result<DecodedSymbol, DecodeError> {
    let Some((body, digits)) = split_envelope(symbol) else {
        return Ok(DecodedSymbol::Opaque {
            raw: symbol.to_string(),
        });
    };

    let segments = decode_body(body).map_err(|reason| DecodeError::MalformedSymbol {
        symbol: symbol.to_string(),
        reason,
    })?;

    Ok(DecodedSymbol::Mangled {
        path: SymbolPath::new(segments),
        hash: SymbolHash::from_validated(digits.to_string()),
    })
}

/// Split off prefix and suffix, returning body and hash digits
fn split_envelope(symbol: &str) -> Option<(&str, &str)> {
    let rest = symbol.strip_prefix(ENVELOPE_PREFIX)?;
    let split = rest.len().checked_sub(SUFFIX_LEN)?;
    if !rest.is_char_boundary(split) {
        return None;
    }
    let (body, suffix) = rest.split_at(split);
    let digits = suffix
        .strip_prefix(HASH_MARKER)?
        .strip_suffix(ENVELOPE_TERMINATOR)?;
    is_hash_digits(digits).then_some((body, digits))
}

/// Consume the body group by group
fn decode_body(body: &str) -> Result<Vec<String>, MalformedReason> {
    if body.is_empty() || body == NESTED_NAME_END {
        return Err(MalformedReason::EmptyBody);
    }

    let mut segments = Vec::new();
    let mut offset = 0;

    while offset < body.len() {
        let rest = &body[offset..];
        if rest == NESTED_NAME_END {
            break;
        }

        let digit_count = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digit_count == 0 || rest.starts_with('0') {
            return Err(MalformedReason::MissingLength { offset });
        }
        let declared: usize = rest[..digit_count]
            .parse()
            .map_err(|_| MalformedReason::LengthOverflow { offset })?;

        // group lengths count characters, not bytes
        let group = &rest[digit_count..];
        let end = match group.char_indices().nth(declared) {
            Some((end, _)) => end,
            None => {
                let remaining = group.chars().count();
                if declared > remaining {
                    return Err(MalformedReason::GroupOverrun {
                        offset,
                        declared,
                        remaining,
                    });
                }
                group.len()
            }
        };
        let text = &group[..end];

        let text = text.strip_prefix(GROUP_DISAMBIGUATOR).unwrap_or(text);
        segments.push(unescape(text));
        offset += digit_count + end;
    }

    Ok(segments)
}

/// Errors raised while decoding
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Envelope matched but the body did not decode exactly
    #[error("malformed symbol '{symbol}': {reason}")]
    MalformedSymbol {
        /// Symbol as supplied
        symbol: String,
        /// What went wrong inside the body
        reason: MalformedReason,
    },
}

/// Why a body failed to decode
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedReason {
    /// No groups between prefix and hash marker
    #[error("symbol body is empty")]
    EmptyBody,

    /// A group did not start with a length (or started with `0`)
    #[error("expected a group length at body offset {offset}")]
    MissingLength {
        /// Byte offset within the body
        offset: usize,
    },

    /// Group length does not fit the platform word
    #[error("group length at body offset {offset} is too large")]
    LengthOverflow {
        /// Byte offset within the body
        offset: usize,
    },

    /// Group declares more characters than the body holds
    #[error("group at body offset {offset} declares {declared} characters but only {remaining} remain")]
    GroupOverrun {
        /// Byte offset within the body
        offset: usize,
        /// Declared group length
        declared: usize,
        /// Characters left after the length prefix
        remaining: usize,
    },
}
