//! Run entry points
//!
//! `run` settles the input set through discovery and then hands the loaded
//! documents to `check`. Nothing is decoded until discovery succeeded.

use crate::classify::{classify_crate, ClassifiedReference};
use crate::config::{CheckConfig, DiagnosticMode};
use crate::error::{CoverageError, CoverageResult};
use crate::index::build_index;
use crate::report::Report;
use monocov_metadata::{discover, CrateDocument, DiscoveryRequest};
use rayon::prelude::*;
use std::error::Error;

/// Check already-loaded documents
///
/// Crates are indexed and classified independently (on the rayon pool when
/// `config.parallel` is set); results are folded into the report in supply
/// order, so the first failing crate wins and the report is identical either
/// way.
///
/// # Errors
/// Returns the first fatal error; no partial report is produced.
pub fn check(documents: &[CrateDocument], config: &CheckConfig) -> CoverageResult<Report> {
    let index = build_index(documents, config.parallel)?;

    let classify_one = |document: &CrateDocument| classify_crate(document, &index);
    let per_crate: Vec<CoverageResult<Vec<ClassifiedReference>>> = if config.parallel {
        documents.par_iter().map(classify_one).collect()
    } else {
        documents.iter().map(classify_one).collect()
    };

    let mut report = Report::new();
    for classified in per_crate {
        for reference in classified? {
            report.record(reference);
        }
    }

    tracing::info!(
        "Checked {} crates: {} foreign, {} missing lines",
        documents.len(),
        report.foreign().count(),
        report.missing().count()
    );
    Ok(report)
}

/// Discover, load and check the documents named by `request`
///
/// # Errors
/// Returns [`CoverageError::Discovery`] before any decoding when the input
/// set cannot be settled, otherwise whatever [`check`] returns.
pub fn run(request: &DiscoveryRequest, config: &CheckConfig) -> CoverageResult<Report> {
    let documents = discover(request)?;
    check(&documents, config)
}

/// Render a fatal error for the failure surface
///
/// Brief mode yields one `Error: ...` line with the cause chain joined by
/// `: `. Verbose mode lists every cause on its own line followed by the
/// error's debug form.
#[must_use]
pub fn render_failure(error: &CoverageError, mode: DiagnosticMode) -> String {
    let chain = error_chain(error);
    match mode {
        DiagnosticMode::Brief => format!("Error: {}", chain.join(": ")),
        DiagnosticMode::Verbose => {
            let mut out = format!("Error [{}]: {}", error.kind(), chain[0]);
            for cause in &chain[1..] {
                out.push_str("\n  caused by: ");
                out.push_str(cause);
            }
            out.push_str(&format!("\n\n{error:#?}"));
            out
        }
    }
}

fn error_chain(error: &CoverageError) -> Vec<String> {
    let mut chain = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }
    chain
}
