//! Reference classification
//!
//! Every linked function symbol is either foreign (outside the structured
//! convention, resolved by external linkage), covered by a present item, or
//! missing.

use crate::error::{CoverageError, CoverageResult};
use crate::index::PresentIndex;
use monocov_metadata::{CrateDocument, CrateId};
use monocov_symbol::{decode, has_envelope_prefix, DecodeError, DecodeKey, SymbolHash};

/// Outcome of checking one referenced symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedReference {
    /// Not a structured symbol; never looked up
    Foreign(String),
    /// Structured symbol with no present item of that key and hash
    Missing {
        /// Decoded path (or raw name for an unmatched envelope)
        key: DecodeKey,
        /// Decoded hash; `None` when the envelope did not match
        hash: Option<SymbolHash>,
        /// Crate whose function table referenced it
        source: CrateId,
    },
    /// Present item found
    Covered,
}

/// Classify one referenced symbol from `source`
///
/// # Errors
/// Returns error if the symbol has the structured envelope but a malformed
/// body
pub fn classify(
    reference: &str,
    source: &CrateId,
    index: &PresentIndex,
) -> Result<ClassifiedReference, DecodeError> {
    if !has_envelope_prefix(reference) {
        return Ok(ClassifiedReference::Foreign(reference.to_string()));
    }

    let (key, hash) = decode(reference)?.into_key();
    if index.contains(&key, hash.as_ref()) {
        return Ok(ClassifiedReference::Covered);
    }

    tracing::debug!("{}: missing body for {}", source.short_name(), reference);
    Ok(ClassifiedReference::Missing {
        key,
        hash,
        source: source.clone(),
    })
}

/// Classify every linked symbol in one crate's function table
///
/// Covered references are dropped; the rest keep function-table order.
///
/// # Errors
/// Returns [`CoverageError::SchemaViolation`] for an ill-formed entry and
/// [`CoverageError::MalformedSymbol`] for an undecodable reference.
pub fn classify_crate(
    document: &CrateDocument,
    index: &PresentIndex,
) -> CoverageResult<Vec<ClassifiedReference>> {
    let crate_name = document.short_name();
    let mut classified = Vec::new();
    let mut covered = 0usize;

    for reference in document.metadata().linked_symbols() {
        let reference = reference.map_err(|e| CoverageError::schema(crate_name, e))?;
        match classify(reference, document.id(), index)
            .map_err(|e| CoverageError::malformed(crate_name, e))?
        {
            ClassifiedReference::Covered => covered += 1,
            other => classified.push(other),
        }
    }

    tracing::debug!(
        "{}: {} covered, {} foreign or missing",
        crate_name,
        covered,
        classified.len()
    );
    Ok(classified)
}
