//! Metadata document model
//!
//! Only the two tables the coverage check reads are modelled; every other
//! field of a document is ignored during deserialization.

use crate::error::{DescriptorShape, SchemaError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Key of the linked symbol name inside a function descriptor
pub const LINKED_SYMBOL_KEY: &str = "NormalSym";

/// File-stem suffix dropped when deriving a crate's short name
pub const METADATA_STEM_SUFFIX: &str = ".smir";

/// Parsed metadata of one crate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrateMetadata {
    /// Mono-items whose bodies are present in this crate
    pub items: Vec<MonoItem>,

    /// Function table: `(type descriptor, function descriptor)` pairs
    pub functions: Vec<FunctionEntry>,
}

impl CrateMetadata {
    /// Create from tables
    #[inline]
    #[must_use]
    pub fn new(items: Vec<MonoItem>, functions: Vec<FunctionEntry>) -> Self {
        Self { items, functions }
    }

    /// Parse a document from JSON text
    ///
    /// # Errors
    /// Returns error if the text is not JSON or lacks either table
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Symbol names of every present item, in document order
    pub fn item_symbols(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.symbol_name.as_str())
    }

    /// Linked symbol names of the function table, in document order
    ///
    /// Entries without a linked name are skipped. An entry whose descriptor
    /// has the wrong shape yields an error carrying its table position.
    pub fn linked_symbols(&self) -> impl Iterator<Item = Result<&str, SchemaError>> {
        self.functions
            .iter()
            .enumerate()
            .filter_map(|(entry, function)| match function.linked_symbol_name() {
                Ok(name) => name.map(Ok),
                Err(shape) => Some(Err(SchemaError { entry, shape })),
            })
    }
}

/// One present mono-item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonoItem {
    /// Encoded symbol of the item
    pub symbol_name: String,
}

impl MonoItem {
    /// Create item with the given symbol
    #[inline]
    #[must_use]
    pub fn new(symbol_name: impl Into<String>) -> Self {
        Self {
            symbol_name: symbol_name.into(),
        }
    }
}

/// One function-table entry, a two-element JSON array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionEntry(pub Value, pub Value);

impl FunctionEntry {
    /// Entry whose descriptor carries `symbol` as its linked name
    #[must_use]
    pub fn linked(ty: Value, symbol: impl Into<String>) -> Self {
        let mut descriptor = serde_json::Map::new();
        descriptor.insert(LINKED_SYMBOL_KEY.to_string(), Value::String(symbol.into()));
        Self(ty, Value::Object(descriptor))
    }

    /// Type descriptor
    #[inline]
    #[must_use]
    pub fn type_descriptor(&self) -> &Value {
        &self.0
    }

    /// Function descriptor
    #[inline]
    #[must_use]
    pub fn function_descriptor(&self) -> &Value {
        &self.1
    }

    /// Linked symbol name, if the descriptor carries one
    ///
    /// A null or empty link name counts as absent.
    ///
    /// # Errors
    /// Returns the offending shape if the descriptor is not an object or the
    /// linked name is present but not a string.
    pub fn linked_symbol_name(&self) -> Result<Option<&str>, DescriptorShape> {
        let Value::Object(descriptor) = &self.1 else {
            return Err(DescriptorShape::NotAnObject(json_kind(&self.1)));
        };
        match descriptor.get(LINKED_SYMBOL_KEY) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(name)) if name.is_empty() => Ok(None),
            Some(Value::String(name)) => Ok(Some(name.as_str())),
            Some(other) => Err(DescriptorShape::LinkNameNotString(json_kind(other))),
        }
    }
}

/// Name of a JSON value's kind, for diagnostics
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Identity of one crate within a run
///
/// Two documents with the same file stem in different directories are
/// distinct crates that share a short name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CrateId {
    source: String,
    short_name: String,
}

impl CrateId {
    /// Create from a source identifier (usually the file path as supplied)
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let short_name = short_name(&source);
        Self { source, short_name }
    }

    /// Source identifier as supplied
    #[inline]
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Short crate name used in report lines
    #[inline]
    #[must_use]
    pub fn short_name(&self) -> &str {
        &self.short_name
    }
}

/// A loaded document plus where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct CrateDocument {
    id: CrateId,
    metadata: CrateMetadata,
}

impl CrateDocument {
    /// Create from a source identifier and parsed tables
    #[must_use]
    pub fn new(source: impl Into<String>, metadata: CrateMetadata) -> Self {
        Self {
            id: CrateId::new(source),
            metadata,
        }
    }

    /// Crate identity
    #[inline]
    #[must_use]
    pub fn id(&self) -> &CrateId {
        &self.id
    }

    /// Source identifier as supplied
    #[inline]
    #[must_use]
    pub fn source(&self) -> &str {
        self.id.source()
    }

    /// Short crate name used in report lines
    #[inline]
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.id.short_name()
    }

    /// Parsed tables
    #[inline]
    #[must_use]
    pub fn metadata(&self) -> &CrateMetadata {
        &self.metadata
    }
}

/// Short name of a source: file stem with a trailing `.smir` removed
///
/// # Examples
/// - `out/foo-1a2b.smir.json` → `foo-1a2b`
/// - `mycrate` → `mycrate`
#[must_use]
pub fn short_name(source: &str) -> String {
    let stem = Path::new(source)
        .file_stem()
        .map_or_else(|| source.into(), |stem| stem.to_string_lossy());
    match stem.strip_suffix(METADATA_STEM_SUFFIX) {
        Some(short) => short.to_string(),
        None => stem.into_owned(),
    }
}
