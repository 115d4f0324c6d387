//! monocov Metadata
//!
//! Typed view over compiler-emitted crate metadata documents (`*.smir.json`)
//! and the discovery step that picks which documents a run analyses.
//!
//! # Example
//!
//! ```rust
//! use monocov_metadata::{CrateDocument, CrateMetadata};
//!
//! let json = r#"{
//!     "items": [{"symbol_name": "_ZN3foo3bar17h0123456789abcdefE"}],
//!     "functions": [[0, {"NormalSym": "memcpy"}]]
//! }"#;
//! let doc = CrateDocument::new("foo.smir.json", CrateMetadata::from_json_str(json).unwrap());
//!
//! assert_eq!(doc.short_name(), "foo");
//! let linked: Vec<_> = doc.metadata().linked_symbols().collect::<Result<_, _>>().unwrap();
//! assert_eq!(linked, vec!["memcpy"]);
//! ```

#![allow(missing_docs)]

pub mod discovery;
pub mod error;
pub mod model;

// Re-exports
pub use discovery::{discover, load, DiscoveryRequest, NamePattern, METADATA_EXTENSION};
pub use error::{DescriptorShape, DiscoveryError, SchemaError};
pub use model::{short_name, CrateDocument, CrateId, CrateMetadata, FunctionEntry, MonoItem, LINKED_SYMBOL_KEY};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
