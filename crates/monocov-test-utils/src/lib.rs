//! Testing utilities for monocov workspace
//!
//! Fixture builders for encoded symbols and crate metadata documents.

#![allow(missing_docs)]

use monocov_metadata::{CrateDocument, CrateMetadata, FunctionEntry, MonoItem};
use monocov_symbol::{encode, SymbolHash, SymbolPath};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

pub const HASH_A: &str = "0123456789abcdef";
pub const HASH_B: &str = "ffffffffffffffff";

/// Encoded symbol for `segments` with `hash`
pub fn mangled(segments: &[&str], hash: &str) -> String {
    let path = SymbolPath::from(segments);
    let hash = SymbolHash::new(hash).unwrap();
    encode(&path, &hash).unwrap()
}

/// Metadata whose function table links each of `links`
pub fn metadata(items: &[&str], links: &[&str]) -> CrateMetadata {
    CrateMetadata::new(
        items.iter().map(|symbol| MonoItem::new(*symbol)).collect(),
        links
            .iter()
            .enumerate()
            .map(|(ty, symbol)| FunctionEntry::linked(json!(ty), *symbol))
            .collect(),
    )
}

pub fn document(source: &str, items: &[&str], links: &[&str]) -> CrateDocument {
    CrateDocument::new(source, metadata(items, links))
}

/// JSON text of a metadata document, with the extra fields real documents carry
pub fn document_json(items: &[&str], links: &[&str]) -> String {
    let items: Vec<Value> = items
        .iter()
        .map(|symbol| json!({"symbol_name": symbol, "mono_item_kind": {"MonoItemFn": {}}}))
        .collect();
    let functions: Vec<Value> = links
        .iter()
        .enumerate()
        .map(|(ty, symbol)| json!([ty, {"NormalSym": symbol}]))
        .collect();
    json!({
        "name": "fixture",
        "items": items,
        "functions": functions,
        "types": [],
    })
    .to_string()
}

/// Write a metadata document into `dir` and return its path
pub fn write_document(dir: &Path, file_name: &str, items: &[&str], links: &[&str]) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, document_json(items, links)).unwrap();
    path
}
