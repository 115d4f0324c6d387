//! Present-item index
//!
//! Maps every decode key seen among present items to the set of hashes
//! observed for it. Opaque symbols are keyed by their raw string and carry a
//! `None` membership marker instead of a hash.

use crate::error::{CoverageError, CoverageResult};
use monocov_metadata::CrateDocument;
use monocov_symbol::{decode, DecodeError, DecodeKey, SymbolHash};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Hashes (or the opaque marker) observed under one key
pub type Bucket = BTreeSet<Option<SymbolHash>>;

/// Immutable index of present items, built once per run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentIndex {
    buckets: BTreeMap<DecodeKey, Bucket>,
}

impl PresentIndex {
    /// Check whether `key` was seen with `hash`
    ///
    /// Opaque keys are looked up with `hash == None`.
    #[must_use]
    pub fn contains(&self, key: &DecodeKey, hash: Option<&SymbolHash>) -> bool {
        self.buckets
            .get(key)
            .is_some_and(|bucket| bucket.contains(&hash.cloned()))
    }

    /// Bucket for `key`, if any item decoded to it
    #[inline]
    #[must_use]
    pub fn bucket(&self, key: &DecodeKey) -> Option<&Bucket> {
        self.buckets.get(key)
    }

    /// Number of distinct keys
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Check if index has no keys
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total entries across all buckets
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.buckets.values().map(BTreeSet::len).sum()
    }

    /// Keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &DecodeKey> {
        self.buckets.keys()
    }
}

/// Accumulates a [`PresentIndex`] and the raw symbols that went into it
///
/// Partial builders for different crates can be merged in any order.
#[derive(Debug, Clone, Default)]
pub struct IndexBuilder {
    buckets: BTreeMap<DecodeKey, Bucket>,
    raw_symbols: HashSet<String>,
}

impl IndexBuilder {
    /// Create empty builder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode and record one present symbol
    ///
    /// # Errors
    /// Returns error if the symbol has the structured envelope but a
    /// malformed body
    pub fn insert(&mut self, symbol: &str) -> Result<(), DecodeError> {
        if self.raw_symbols.contains(symbol) {
            return Ok(());
        }
        let (key, hash) = decode(symbol)?.into_key();
        self.buckets.entry(key).or_default().insert(hash);
        self.raw_symbols.insert(symbol.to_string());
        Ok(())
    }

    /// Record every present item of one crate
    ///
    /// # Errors
    /// Returns [`CoverageError::MalformedSymbol`] naming the crate
    pub fn extend_from(&mut self, document: &CrateDocument) -> CoverageResult<()> {
        for symbol in document.metadata().item_symbols() {
            self.insert(symbol)
                .map_err(|e| CoverageError::malformed(document.short_name(), e))?;
        }
        Ok(())
    }

    /// Union of two partial builders
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        for (key, bucket) in other.buckets {
            self.buckets.entry(key).or_default().extend(bucket);
        }
        self.raw_symbols.extend(other.raw_symbols);
        self
    }

    /// Check the accounting invariant and freeze the index
    ///
    /// # Errors
    /// Returns [`CoverageError::IntegrityViolation`] when two distinct raw
    /// symbols decoded to the same key and hash.
    pub fn finish(self) -> CoverageResult<PresentIndex> {
        let index = PresentIndex {
            buckets: self.buckets,
        };
        let distinct_symbols = self.raw_symbols.len();
        let indexed_entries = index.entry_count();
        if distinct_symbols != indexed_entries {
            return Err(CoverageError::IntegrityViolation {
                distinct_symbols,
                indexed_entries,
            });
        }
        Ok(index)
    }
}

/// Build the index over every document's present items
///
/// With `parallel`, each crate is indexed on the rayon pool; partial indexes
/// are merged in supply order so the first failing crate is reported.
///
/// # Errors
/// Returns the first malformed symbol, or an integrity violation
pub fn build_index(documents: &[CrateDocument], parallel: bool) -> CoverageResult<PresentIndex> {
    let index_one = |document: &CrateDocument| -> CoverageResult<IndexBuilder> {
        let mut builder = IndexBuilder::new();
        builder.extend_from(document)?;
        Ok(builder)
    };

    let partials: Vec<CoverageResult<IndexBuilder>> = if parallel {
        documents.par_iter().map(index_one).collect()
    } else {
        documents.iter().map(index_one).collect()
    };

    let merged = partials
        .into_iter()
        .try_fold(IndexBuilder::new(), |acc, partial| partial.map(|p| acc.merge(p)))?;
    let index = merged.finish()?;

    tracing::info!(
        "Indexed {} present entries under {} keys",
        index.entry_count(),
        index.len()
    );
    Ok(index)
}
