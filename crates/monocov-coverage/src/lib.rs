//! monocov Coverage
//!
//! Builds an index of present mono-items across crates and classifies every
//! referenced function symbol as foreign, covered, or missing.
//!
//! # Pipeline
//!
//! ```text
//! documents -> build_index -> classify_crate (per crate) -> Report -> text / JSON
//! ```
//!
//! # Example
//!
//! ```rust
//! use monocov_coverage::{check, CheckConfig};
//! use monocov_metadata::{CrateDocument, CrateMetadata, FunctionEntry, MonoItem};
//!
//! let doc = CrateDocument::new(
//!     "mycrate.smir.json",
//!     CrateMetadata::new(
//!         vec![MonoItem::new("_ZN3foo3barE17h0123456789abcdefE")],
//!         vec![FunctionEntry::linked(0.into(), "_ZN3foo3barE17hffffffffffffffffE")],
//!     ),
//! );
//! let report = check(&[doc], &CheckConfig::new()).unwrap();
//! assert_eq!(report.render_text(), "mycrate::foo::bar->['ffffffffffffffff']\n");
//! ```

#![warn(missing_docs)]

pub mod classify;
pub mod config;
pub mod error;
pub mod index;
pub mod report;
pub mod run;

// Re-exports
pub use classify::{classify, classify_crate, ClassifiedReference};
pub use config::{CheckConfig, DiagnosticMode, OutputFormat};
pub use error::{CoverageError, CoverageResult};
pub use index::{build_index, Bucket, IndexBuilder, PresentIndex};
pub use report::{CrateHashes, MissingLine, Report};
pub use run::{check, render_failure, run};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for coverage checking
    pub use crate::{check, run, CheckConfig, CoverageError, CoverageResult, Report};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
