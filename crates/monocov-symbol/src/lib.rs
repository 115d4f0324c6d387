//! monocov Symbol Decoding
//!
//! Length-prefixed, escape-coded symbol names decoded into an ordered path
//! plus a hash disambiguator.
//!
//! # Overview
//!
//! - **decode**: encoded symbol → [`DecodedSymbol`] (structured or opaque)
//! - **encode**: path + hash → encoded symbol (inverse of `decode`)
//! - **SymbolPath** / **SymbolHash**: the two halves of a decoded symbol
//!
//! # Example
//!
//! ```rust
//! use monocov_symbol::{decode, DecodedSymbol};
//!
//! let decoded = decode("_ZN4core3ptr13drop_in_place17h0123456789abcdefE").unwrap();
//! assert_eq!(decoded.path().unwrap().to_string(), "core::ptr::drop_in_place");
//! assert_eq!(decoded.hash().unwrap().as_str(), "0123456789abcdef");
//!
//! // Symbols outside the structured convention are kept verbatim
//! let foreign = decode("memcpy").unwrap();
//! assert_eq!(foreign, DecodedSymbol::Opaque { raw: "memcpy".into() });
//! ```

#![warn(missing_docs)]

pub mod decode;
pub mod encode;
pub mod escape;
pub mod hash;
pub mod path;

// Re-exports
pub use decode::{
    decode, has_envelope_prefix, DecodeError, DecodeKey, DecodedSymbol, MalformedReason,
    ENVELOPE_PREFIX,
};
pub use encode::{encode, EncodeError};
pub use escape::EscapeCode;
pub use hash::{HashError, SymbolHash};
pub use path::SymbolPath;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for symbol decoding
    pub use crate::{decode, encode, DecodeKey, DecodedSymbol, SymbolHash, SymbolPath};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
