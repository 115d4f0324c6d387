//! Locating and loading metadata documents
//!
//! A file names crate `foo` when it is called `foo.smir.json` (rustc output)
//! or `foo-<hash>.smir.json` (cargo output). Discovery must settle on exactly
//! one such file before anything is decoded.

use crate::error::DiscoveryError;
use crate::model::{CrateDocument, CrateMetadata};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// File extension of metadata documents
pub const METADATA_EXTENSION: &str = ".smir.json";

/// What to load for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryRequest {
    /// Crate whose document must be unambiguous
    pub crate_name: String,
    /// Explicit documents; empty means search `search_dir`
    pub files: Vec<PathBuf>,
    /// Directory searched when no files are given
    pub search_dir: PathBuf,
}

impl DiscoveryRequest {
    /// Search the current directory for `crate_name`
    #[must_use]
    pub fn new(crate_name: impl Into<String>) -> Self {
        Self {
            crate_name: crate_name.into(),
            files: Vec::new(),
            search_dir: PathBuf::from("."),
        }
    }

    /// With explicit document list
    #[inline]
    #[must_use]
    pub fn with_files(mut self, files: Vec<PathBuf>) -> Self {
        self.files = files;
        self
    }

    /// With search directory
    #[inline]
    #[must_use]
    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dir = dir.into();
        self
    }
}

/// File-name matcher for one crate
#[derive(Debug, Clone)]
pub struct NamePattern {
    name: String,
    pattern: Regex,
}

impl NamePattern {
    /// Build the matcher for `name`
    ///
    /// # Errors
    /// Returns error if the escaped name exceeds the regex size limits
    pub fn new(name: &str) -> Result<Self, DiscoveryError> {
        let source = format!(
            r"^{}(?:-[a-z0-9]+)?{}$",
            regex::escape(name),
            regex::escape(METADATA_EXTENSION)
        );
        let pattern = Regex::new(&source).map_err(|source| DiscoveryError::InvalidName {
            name: name.to_string(),
            source,
        })?;
        Ok(Self {
            name: name.to_string(),
            pattern,
        })
    }

    /// Whether `path`'s file name names this crate
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.pattern.is_match(name))
    }

    /// Whether `file_name` could belong to this crate at all
    ///
    /// Looser than [`matches`](Self::matches): any document whose name starts
    /// with the crate name is a candidate.
    #[must_use]
    pub fn is_candidate(&self, file_name: &str) -> bool {
        file_name.starts_with(&self.name) && file_name.ends_with(METADATA_EXTENSION)
    }
}

/// Resolve a request to the ordered list of documents to analyse
///
/// # Errors
/// Returns error when zero or several documents name the crate, or when a
/// document cannot be read or parsed.
pub fn discover(request: &DiscoveryRequest) -> Result<Vec<CrateDocument>, DiscoveryError> {
    let pattern = NamePattern::new(&request.crate_name)?;

    let paths = if request.files.is_empty() {
        vec![search_directory(&pattern, &request.search_dir)?]
    } else {
        check_explicit_files(&pattern, &request.files)?;
        request.files.clone()
    };

    let documents = paths.iter().map(|path| load(path)).collect::<Result<Vec<_>, _>>()?;
    tracing::info!(
        "Loaded {} metadata document(s) for crate '{}'",
        documents.len(),
        request.crate_name
    );
    Ok(documents)
}

/// Exactly one of the supplied files must name the crate
fn check_explicit_files(pattern: &NamePattern, files: &[PathBuf]) -> Result<(), DiscoveryError> {
    let matching: Vec<PathBuf> = files.iter().filter(|p| pattern.matches(p)).cloned().collect();
    match matching.len() {
        0 => Err(DiscoveryError::NoCandidates {
            name: pattern.name.clone(),
            searched: format!("{} supplied file(s)", files.len()),
        }),
        1 => Ok(()),
        _ => Err(DiscoveryError::Ambiguous {
            name: pattern.name.clone(),
            candidates: matching,
        }),
    }
}

/// Exactly one candidate in `dir`, and it must name the crate
fn search_directory(pattern: &NamePattern, dir: &Path) -> Result<PathBuf, DiscoveryError> {
    let entries = fs::read_dir(dir).map_err(|e| DiscoveryError::io_error(dir, e))?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DiscoveryError::io_error(dir, e))?;
        let file_name = entry.file_name();
        if file_name.to_str().is_some_and(|name| pattern.is_candidate(name)) {
            tracing::debug!("Discovery candidate: {}", entry.path().display());
            candidates.push(entry.path());
        }
    }
    candidates.sort();

    let no_candidates = || DiscoveryError::NoCandidates {
        name: pattern.name.clone(),
        searched: dir.display().to_string(),
    };
    match candidates.len() {
        0 => Err(no_candidates()),
        1 => {
            let path = candidates.remove(0);
            if pattern.matches(&path) {
                Ok(path)
            } else {
                Err(no_candidates())
            }
        }
        _ => Err(DiscoveryError::Ambiguous {
            name: pattern.name.clone(),
            candidates,
        }),
    }
}

/// Read and parse one document
///
/// # Errors
/// Returns error if the file cannot be read or is not metadata JSON
pub fn load(path: &Path) -> Result<CrateDocument, DiscoveryError> {
    let text = fs::read_to_string(path).map_err(|e| DiscoveryError::io_error(path, e))?;
    let metadata =
        CrateMetadata::from_json_str(&text).map_err(|e| DiscoveryError::json_error(path, e))?;
    tracing::debug!(
        "Loaded {}: {} items, {} functions",
        path.display(),
        metadata.items.len(),
        metadata.functions.len()
    );
    Ok(CrateDocument::new(path.display().to_string(), metadata))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const EMPTY_DOC: &str = r#"{"items": [], "functions": []}"#;

    fn write_doc(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, EMPTY_DOC).unwrap();
        path
    }

    #[test]
    fn pattern_matches_rustc_and_cargo_names() {
        let pattern = NamePattern::new("foo").unwrap();
        assert!(pattern.matches(Path::new("foo.smir.json")));
        assert!(pattern.matches(Path::new("out/foo-1a2b3c.smir.json")));
        assert!(!pattern.matches(Path::new("foobar.smir.json")));
        assert!(!pattern.matches(Path::new("foo-ABC.smir.json")));
        assert!(!pattern.matches(Path::new("foo.smir.json.bak")));
    }

    #[test]
    fn pattern_escapes_crate_name() {
        let pattern = NamePattern::new("a.b").unwrap();
        assert!(pattern.matches(Path::new("a.b.smir.json")));
        assert!(!pattern.matches(Path::new("axb.smir.json")));
    }

    #[test]
    fn discover_single_file_in_directory() {
        let tmp = TempDir::new().unwrap();
        write_doc(tmp.path(), "foo-0a1b.smir.json");
        write_doc(tmp.path(), "other.smir.json");

        let request = DiscoveryRequest::new("foo").with_search_dir(tmp.path());
        let docs = discover(&request).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].short_name(), "foo-0a1b");
    }

    #[test]
    fn discover_rejects_empty_directory() {
        let tmp = TempDir::new().unwrap();
        let request = DiscoveryRequest::new("foo").with_search_dir(tmp.path());
        assert!(matches!(
            discover(&request),
            Err(DiscoveryError::NoCandidates { .. })
        ));
    }

    #[test]
    fn discover_rejects_multiple_candidates() {
        let tmp = TempDir::new().unwrap();
        write_doc(tmp.path(), "foo.smir.json");
        write_doc(tmp.path(), "foo-1a.smir.json");

        let request = DiscoveryRequest::new("foo").with_search_dir(tmp.path());
        match discover(&request) {
            Err(DiscoveryError::Ambiguous { candidates, .. }) => assert_eq!(candidates.len(), 2),
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn discover_rejects_candidate_that_does_not_name_crate() {
        let tmp = TempDir::new().unwrap();
        write_doc(tmp.path(), "foobar.smir.json");

        let request = DiscoveryRequest::new("foo").with_search_dir(tmp.path());
        assert!(matches!(
            discover(&request),
            Err(DiscoveryError::NoCandidates { .. })
        ));
    }

    #[test]
    fn discover_explicit_files_keeps_supply_order() {
        let tmp = TempDir::new().unwrap();
        let dep = write_doc(tmp.path(), "dep.smir.json");
        let main = write_doc(tmp.path(), "main.smir.json");

        let request = DiscoveryRequest::new("main").with_files(vec![dep, main]);
        let docs = discover(&request).unwrap();
        let names: Vec<_> = docs.iter().map(CrateDocument::short_name).collect();
        assert_eq!(names, vec!["dep", "main"]);
    }

    #[test]
    fn discover_explicit_files_require_unique_match() {
        let tmp = TempDir::new().unwrap();
        let a = write_doc(tmp.path(), "main.smir.json");
        let b = write_doc(tmp.path(), "main-77.smir.json");

        let request = DiscoveryRequest::new("main").with_files(vec![a.clone(), b]);
        assert!(matches!(
            discover(&request),
            Err(DiscoveryError::Ambiguous { .. })
        ));

        let request = DiscoveryRequest::new("absent").with_files(vec![a]);
        assert!(matches!(
            discover(&request),
            Err(DiscoveryError::NoCandidates { .. })
        ));
    }

    #[test]
    fn load_reports_invalid_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.smir.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(load(&path), Err(DiscoveryError::Json { .. })));
    }

    #[test]
    fn load_reports_missing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("gone.smir.json");
        assert!(matches!(load(&path), Err(DiscoveryError::Io { .. })));
    }
}
