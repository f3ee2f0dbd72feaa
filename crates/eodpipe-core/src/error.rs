use std::path::PathBuf;

use thiserror::Error;

/// Validation errors for values derived from file names.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("path has no file name: '{}'", path.display())]
    MissingFileName { path: PathBuf },
}

/// Failures while discovering, inflating or parsing EOD files.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}' is not a valid zlib stream: {source}", path.display())]
    Decompress {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error in '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("{path}:{line}: expected {expected} columns, found {found}")]
    MalformedRow {
        path: String,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("{path}:{line}: invalid {field} value '{value}'")]
    InvalidField {
        path: String,
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
