//! Error handling for county trend processing.
//!
//! Parse-level and file-level failures abort the whole run. Join misses and
//! out-of-range brackets are not errors; they are defaulted or logged where
//! they occur.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrendsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input not found at path: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Parse error at line {line}: {reason}")]
    Parse { line: u64, reason: String },

    #[error("Invalid geographic document: {reason}")]
    InvalidDocument { reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl TrendsError {
    /// Create a parse error for a record at the given line
    pub fn parse(line: u64, reason: impl Into<String>) -> Self {
        Self::Parse {
            line,
            reason: reason.into(),
        }
    }

    /// Create an invalid document error
    pub fn invalid_document(reason: impl Into<String>) -> Self {
        Self::InvalidDocument {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrendsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let err = TrendsError::parse(7, "invalid case count 'abc'");
        assert_eq!(
            err.to_string(),
            "Parse error at line 7: invalid case count 'abc'"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: TrendsError = io.into();
        assert!(matches!(err, TrendsError::Io(_)));
    }
}
