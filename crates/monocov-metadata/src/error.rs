//! Error types for metadata discovery and the document model

use std::path::PathBuf;

/// Errors while locating or loading metadata documents
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// No document names the requested crate
    #[error("no metadata file for crate '{name}' found in {searched}")]
    NoCandidates { name: String, searched: String },

    /// More than one document names the requested crate
    #[error("non-unique metadata files for crate '{name}': {}", display_paths(.candidates))]
    Ambiguous {
        name: String,
        candidates: Vec<PathBuf>,
    },

    /// Crate name cannot be turned into a file-name pattern
    #[error("invalid crate name '{name}': {source}")]
    InvalidName {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// IO error while reading a document or listing a directory
    #[error("io error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid metadata JSON
    #[error("invalid metadata in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl DiscoveryError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create JSON error for path
    pub fn json_error(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("'{}'", p.display()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A function-table entry with an ill-formed descriptor
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("function table entry {entry}: {shape}")]
pub struct SchemaError {
    /// Position in the function table
    pub entry: usize,
    /// What was wrong with it
    pub shape: DescriptorShape,
}

/// Ill-formed function descriptor shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorShape {
    /// Descriptor is not a JSON object
    #[error("descriptor is a {0}, expected an object")]
    NotAnObject(&'static str),

    /// Linked name present but not a string
    #[error("linked symbol name is a {0}, expected a string")]
    LinkNameNotString(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_error_lists_candidates() {
        let err = DiscoveryError::Ambiguous {
            name: "foo".to_string(),
            candidates: vec![PathBuf::from("foo.smir.json"), PathBuf::from("foo-1a.smir.json")],
        };
        assert_eq!(
            err.to_string(),
            "non-unique metadata files for crate 'foo': 'foo.smir.json', 'foo-1a.smir.json'"
        );
    }

    #[test]
    fn schema_error_display() {
        let err = SchemaError {
            entry: 3,
            shape: DescriptorShape::LinkNameNotString("number"),
        };
        assert_eq!(
            err.to_string(),
            "function table entry 3: linked symbol name is a number, expected a string"
        );
    }

    #[test]
    fn io_error_keeps_path() {
        let err = DiscoveryError::io_error(
            "missing.smir.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("missing.smir.json"));
    }
}
