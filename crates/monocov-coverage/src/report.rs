//! Deterministic coverage report
//!
//! Foreign names are kept sorted and deduplicated. Missing references are
//! grouped by decode key (sorted), then by source crate in the order crates
//! were recorded.

use crate::classify::ClassifiedReference;
use crate::config::OutputFormat;
use indexmap::IndexMap;
use monocov_metadata::CrateId;
use monocov_symbol::{DecodeKey, SymbolHash};
use serde_json::{json, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Missing hashes per source crate, in supply order
pub type CrateHashes = IndexMap<CrateId, BTreeSet<SymbolHash>>;

/// Aggregated outcome of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    foreign: BTreeSet<String>,
    missing: BTreeMap<DecodeKey, CrateHashes>,
}

/// One rendered missing-reference line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingLine<'a> {
    /// Crate whose function table referenced the key
    pub source: &'a CrateId,
    /// Decoded path or raw name
    pub key: &'a DecodeKey,
    /// Missing hashes, sorted
    pub hashes: &'a BTreeSet<SymbolHash>,
}

impl Report {
    /// Create empty report
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one classification into the report
    ///
    /// Covered references leave the report unchanged.
    pub fn record(&mut self, reference: ClassifiedReference) {
        match reference {
            ClassifiedReference::Foreign(name) => {
                self.foreign.insert(name);
            }
            ClassifiedReference::Missing { key, hash, source } => {
                let hashes = self
                    .missing
                    .entry(key)
                    .or_default()
                    .entry(source)
                    .or_default();
                if let Some(hash) = hash {
                    hashes.insert(hash);
                }
            }
            ClassifiedReference::Covered => {}
        }
    }

    /// Check if nothing was recorded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.foreign.is_empty() && self.missing.is_empty()
    }

    /// Foreign names in sorted order
    pub fn foreign(&self) -> impl Iterator<Item = &str> {
        self.foreign.iter().map(String::as_str)
    }

    /// Missing-reference lines in report order
    pub fn missing(&self) -> impl Iterator<Item = MissingLine<'_>> {
        self.missing.iter().flat_map(|(key, crates)| {
            crates
                .iter()
                .map(move |(source, hashes)| MissingLine { source, key, hashes })
        })
    }

    /// Render in the requested format
    #[must_use]
    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => self.render_text(),
            OutputFormat::Json => format!("{:#}\n", self.to_json()),
        }
    }

    /// Foreign names, then one line per (key, crate) pair
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for name in self.foreign() {
            out.push_str(name);
            out.push('\n');
        }
        for line in self.missing() {
            out.push_str(&line.to_string());
            out.push('\n');
        }
        out
    }

    /// JSON value with the same content and ordering as the text form
    #[must_use]
    pub fn to_json(&self) -> Value {
        let missing: Vec<Value> = self
            .missing()
            .map(|line| {
                json!({
                    "crate": line.source.short_name(),
                    "path": line.key.to_string(),
                    "hashes": line.hashes,
                })
            })
            .collect();
        json!({
            "foreign": self.foreign,
            "missing": missing,
        })
    }
}

impl std::fmt::Display for MissingLine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}->[", self.source.short_name(), self.key)?;
        for (i, hash) in self.hashes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{hash}'")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monocov_symbol::SymbolPath;
    use pretty_assertions::assert_eq;

    fn missing(segments: &[&str], hash: &str, source: &str) -> ClassifiedReference {
        ClassifiedReference::Missing {
            key: DecodeKey::Path(SymbolPath::from(segments)),
            hash: Some(SymbolHash::new(hash).unwrap()),
            source: CrateId::new(source),
        }
    }

    #[test]
    fn empty_report_renders_nothing() {
        let report = Report::new();
        assert!(report.is_empty());
        assert_eq!(report.render_text(), "");
    }

    #[test]
    fn covered_leaves_report_empty() {
        let mut report = Report::new();
        report.record(ClassifiedReference::Covered);
        assert!(report.is_empty());
    }

    #[test]
    fn missing_line_format() {
        let mut report = Report::new();
        report.record(missing(&["foo", "bar"], "ffffffffffffffff", "mycrate.smir.json"));
        assert_eq!(
            report.render_text(),
            "mycrate::foo::bar->['ffffffffffffffff']\n"
        );
    }

    #[test]
    fn foreign_sorted_and_deduplicated_before_missing() {
        let mut report = Report::new();
        report.record(missing(&["foo"], "0000000000000001", "a.smir.json"));
        report.record(ClassifiedReference::Foreign("memset".to_string()));
        report.record(ClassifiedReference::Foreign("memcpy".to_string()));
        report.record(ClassifiedReference::Foreign("memset".to_string()));
        assert_eq!(
            report.render_text(),
            "memcpy\nmemset\na::foo->['0000000000000001']\n"
        );
    }

    #[test]
    fn hashes_sorted_within_one_line() {
        let mut report = Report::new();
        report.record(missing(&["foo"], "ffffffffffffffff", "a.smir.json"));
        report.record(missing(&["foo"], "0123456789abcdef", "a.smir.json"));
        report.record(missing(&["foo"], "ffffffffffffffff", "a.smir.json"));
        assert_eq!(
            report.render_text(),
            "a::foo->['0123456789abcdef', 'ffffffffffffffff']\n"
        );
    }

    #[test]
    fn paths_sorted_and_crates_in_record_order() {
        let mut report = Report::new();
        report.record(missing(&["zed"], "0000000000000001", "b.smir.json"));
        report.record(missing(&["alpha", "beta"], "0000000000000002", "b.smir.json"));
        report.record(missing(&["alpha", "beta"], "0000000000000003", "a.smir.json"));
        report.record(missing(&["alpha"], "0000000000000004", "a.smir.json"));
        assert_eq!(
            report.render_text(),
            "a::alpha->['0000000000000004']\n\
             b::alpha::beta->['0000000000000002']\n\
             a::alpha::beta->['0000000000000003']\n\
             b::zed->['0000000000000001']\n"
        );
    }

    #[test]
    fn raw_keys_render_without_hashes_after_paths() {
        let mut report = Report::new();
        report.record(ClassifiedReference::Missing {
            key: DecodeKey::Raw("_ZNweird".to_string()),
            hash: None,
            source: CrateId::new("a.smir.json"),
        });
        report.record(missing(&["zed"], "0000000000000001", "a.smir.json"));
        assert_eq!(
            report.render_text(),
            "a::zed->['0000000000000001']\na::_ZNweird->[]\n"
        );
    }

    #[test]
    fn json_rendering_keeps_order() {
        let mut report = Report::new();
        report.record(ClassifiedReference::Foreign("memcpy".to_string()));
        report.record(missing(&["foo", "bar"], "ffffffffffffffff", "mycrate.smir.json"));
        assert_eq!(
            report.to_json(),
            json!({
                "foreign": ["memcpy"],
                "missing": [{
                    "crate": "mycrate",
                    "path": "foo::bar",
                    "hashes": ["ffffffffffffffff"],
                }],
            })
        );
        assert!(report.render(OutputFormat::Json).ends_with("}\n"));
    }
}
