//! Error types for coverage checking
//!
//! Every variant is fatal: a run either produces a complete report or one
//! of these, never a partial report.

use monocov_metadata::{DiscoveryError, SchemaError};
use monocov_symbol::DecodeError;

/// Main coverage error type
#[derive(Debug, thiserror::Error)]
pub enum CoverageError {
    /// A structured symbol did not decode exactly
    #[error("malformed symbol in crate '{crate_name}'")]
    MalformedSymbol {
        /// Short name of the crate the symbol came from
        crate_name: String,
        #[source]
        source: DecodeError,
    },

    /// A function-table entry is ill-formed
    #[error("ill-formed functions table in crate '{crate_name}'")]
    SchemaViolation {
        /// Short name of the offending crate
        crate_name: String,
        #[source]
        source: SchemaError,
    },

    /// Distinct present symbols collapsed onto the same index entry
    #[error(
        "present-item index lost entries: {distinct_symbols} distinct symbols \
         but {indexed_entries} index entries"
    )]
    IntegrityViolation {
        /// Distinct raw present symbols
        distinct_symbols: usize,
        /// Entries across all index buckets
        indexed_entries: usize,
    },

    /// Metadata documents could not be settled on or loaded
    #[error("metadata discovery failed")]
    Discovery(#[from] DiscoveryError),
}

impl CoverageError {
    /// Create malformed-symbol error for a crate
    pub fn malformed(crate_name: impl Into<String>, source: DecodeError) -> Self {
        Self::MalformedSymbol {
            crate_name: crate_name.into(),
            source,
        }
    }

    /// Create schema-violation error for a crate
    pub fn schema(crate_name: impl Into<String>, source: SchemaError) -> Self {
        Self::SchemaViolation {
            crate_name: crate_name.into(),
            source,
        }
    }

    /// Short name of the taxonomy entry
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedSymbol { .. } => "MalformedSymbol",
            Self::SchemaViolation { .. } => "SchemaViolation",
            Self::IntegrityViolation { .. } => "IntegrityViolation",
            Self::Discovery(_) => "DiscoveryError",
        }
    }
}

/// Result type alias for coverage operations
pub type CoverageResult<T> = Result<T, CoverageError>;
