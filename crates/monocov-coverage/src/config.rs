//! Run configuration
//!
//! Everything that would otherwise be read from the process environment is
//! carried here and handed to [`check`](crate::check) explicitly.

use serde::{Deserialize, Serialize};

/// How much detail a failure is rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticMode {
    /// One `Error: ...` line
    #[default]
    Brief,
    /// Full error chain and internal detail
    Verbose,
}

/// Report rendering format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Foreign names, then missing-reference lines
    #[default]
    Text,
    /// Single JSON object with the same content and ordering
    Json,
}

/// Configuration for one coverage check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Index and classify crates on the rayon pool
    pub parallel: bool,
    /// Failure rendering detail
    pub diagnostics: DiagnosticMode,
    /// Report rendering format
    pub output: OutputFormat,
}

impl CheckConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With parallel per-crate processing on or off
    #[inline]
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// With failure rendering detail
    #[inline]
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: DiagnosticMode) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// With report format
    #[inline]
    #[must_use]
    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            diagnostics: DiagnosticMode::Brief,
            output: OutputFormat::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = CheckConfig::new();
        assert!(config.parallel);
        assert_eq!(config.diagnostics, DiagnosticMode::Brief);
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn config_builders() {
        let config = CheckConfig::new()
            .with_parallel(false)
            .with_diagnostics(DiagnosticMode::Verbose)
            .with_output(OutputFormat::Json);
        assert!(!config.parallel);
        assert_eq!(config.diagnostics, DiagnosticMode::Verbose);
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn config_serializes_lowercase_modes() {
        let json = serde_json::to_string(&CheckConfig::new().with_output(OutputFormat::Json)).unwrap();
        assert_eq!(
            json,
            r#"{"parallel":true,"diagnostics":"brief","output":"json"}"#
        );
    }
}
