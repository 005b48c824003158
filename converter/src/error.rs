//! Error types for the FSH conversion pipeline.
//!
//! The transformation core itself never fails on data; every error here
//! belongs either to caller configuration or to the file adapters around it:
//!
//! - [`InputError`] - Reading the source table (CSV/TSV/spreadsheet)
//! - [`ConfigError`] - Column bindings and mapping profiles
//! - [`OutputError`] - Writing the generated FSH document
//! - [`PipelineError`] - Top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Input Errors
// =============================================================================

/// Errors while loading the source table.
#[derive(Debug, Error)]
pub enum InputError {
    /// Input path does not exist.
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// File exists but could not be read or decoded.
    #[error("Failed to read input '{}': {message}", path.display())]
    Unreadable { path: PathBuf, message: String },

    /// Extension is not one of the supported table formats.
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// Requested worksheet is not in the workbook.
    #[error("Sheet '{0}' not found in workbook")]
    SheetNotFound(String),

    /// No header row could be read.
    #[error("Input table is empty")]
    Empty,
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors in caller-supplied column bindings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A mandatory binding names a column the dataset does not have.
    #[error("Required column \"{column}\" not found in data")]
    MissingColumn { column: String },

    /// A language tag is not two alphabetic characters.
    #[error("Invalid language tag '{0}': expected two letters")]
    InvalidLanguageTag(String),

    /// Mapping profile could not be loaded.
    #[error("Invalid mapping profile: {0}")]
    InvalidMapping(String),

    /// JSON error in a mapping profile.
    #[error("Mapping JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

// =============================================================================
// Output Errors
// =============================================================================

/// Errors while persisting the generated document.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Writing the output file failed.
    #[error("Failed to write output '{}': {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the error type returned by [`crate::transform::pipeline::convert_file`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input error.
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Output error.
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for input adapters.
pub type InputResult<T> = Result<T, InputError>;

/// Result type for configuration checks.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let input_err = InputError::Empty;
        let pipeline_err: PipelineError = input_err.into();
        assert!(pipeline_err.to_string().contains("empty"));

        let config_err = ConfigError::MissingColumn { column: "code".into() };
        let pipeline_err: PipelineError = config_err.into();
        assert!(pipeline_err.to_string().contains("\"code\""));
    }

    #[test]
    fn test_output_error_format() {
        let err = OutputError::WriteFailed {
            path: PathBuf::from("/nowhere/out.fsh"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/nowhere/out.fsh"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_unsupported_format_names_extension() {
        let err = InputError::UnsupportedFormat(".json".into());
        assert_eq!(err.to_string(), "Unsupported file type: .json");
    }
}
