use thiserror::Error;

use crate::observability::Severity;

/// Convenience result type for extraction operations.
pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// Error type returned by discovery, extraction and table serialization.
///
/// A single error enum shared across the whole pipeline. None of these are recovered locally: the
/// first failing file aborts the run.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory walk error (missing root, unreadable directory, symlink loop).
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// A result file did not contain valid JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A path pattern could not be compiled (e.g. an oversized root directory).
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// The path cannot be matched against text patterns (not valid UTF-8).
    #[error("path is not valid utf-8: {path}")]
    InvalidPath { path: String },

    /// A path-derived field's pattern is absent from the path.
    #[error("no '{field}' pattern found in path '{path}'")]
    PatternNotFound { field: &'static str, path: String },

    /// A matched path segment could not be converted to an integer.
    #[error("failed to parse '{field}' from path '{path}': {message} (raw='{raw}')")]
    ParseError {
        field: &'static str,
        path: String,
        raw: String,
        message: String,
    },

    /// The file content does not have the expected shape (not an object, missing genotype, ...).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },
}

impl ExtractionError {
    /// Severity used for observer callbacks and alerting.
    ///
    /// Infrastructure failures are [`Severity::Critical`]; problems with the data itself are
    /// [`Severity::Error`].
    pub fn severity(&self) -> Severity {
        match self {
            ExtractionError::Io(_) | ExtractionError::Walk(_) => Severity::Critical,
            ExtractionError::Csv(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                Severity::Critical
            }
            _ => Severity::Error,
        }
    }
}
