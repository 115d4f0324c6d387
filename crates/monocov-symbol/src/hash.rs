//! Hash disambiguators
//!
//! Provides [`SymbolHash`], the 16-hex-digit token that tells apart
//! instantiations sharing the same decoded path.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Number of hex digits in a hash disambiguator
pub const HASH_LEN: usize = 16;

/// A hash disambiguator captured verbatim from an encoded symbol
///
/// Treated as an opaque identity token: it is validated for shape on
/// construction but never parsed as a number or re-derived.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolHash(String);

impl SymbolHash {
    /// Create a hash from its textual form
    ///
    /// # Errors
    /// Returns error unless `digits` is exactly 16 lowercase hex digits
    pub fn new(digits: impl Into<String>) -> Result<Self, HashError> {
        let digits = digits.into();
        if !is_hash_digits(&digits) {
            return Err(HashError::InvalidShape(digits));
        }
        Ok(Self(digits))
    }

    /// Wrap digits already checked by [`is_hash_digits`]
    #[inline]
    pub(crate) fn from_validated(digits: String) -> Self {
        debug_assert!(is_hash_digits(&digits));
        Self(digits)
    }

    /// The hash digits as written in the symbol
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Check for exactly [`HASH_LEN`] lowercase hex digits
#[must_use]
pub(crate) fn is_hash_digits(s: &str) -> bool {
    s.len() == HASH_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

impl Display for SymbolHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SymbolHash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for SymbolHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for SymbolHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for SymbolHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

/// Errors related to hash disambiguators
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashError {
    /// Not 16 lowercase hex digits
    #[error("invalid hash disambiguator '{0}' (expected 16 lowercase hex digits)")]
    InvalidShape(String),
}
