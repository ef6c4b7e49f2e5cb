//! Error types for docrank library.

use std::io;
use thiserror::Error;

/// Result type alias for docrank operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while ranking a document collection.
///
/// Per-document and per-section problems (empty pages, empty personas,
/// sections without body text) never surface here; they degrade to
/// minimal outputs and are logged instead.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The run received no input documents at all.
    #[error("No input documents to analyze")]
    NoDocuments,

    /// An element dump could not be decoded.
    #[error("Invalid text elements in {0}: {1}")]
    InvalidElements(String, String),

    /// The collection configuration is malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No element source is registered for the given extension.
    #[error("No element source for extension: {0}")]
    UnsupportedSource(String),

    /// The worker pool could not be created.
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    /// Error during rendering (JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Error::ThreadPool(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoDocuments;
        assert_eq!(err.to_string(), "No input documents to analyze");

        let err = Error::InvalidElements("a.json".to_string(), "missing text".to_string());
        assert_eq!(err.to_string(), "Invalid text elements in a.json: missing text");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
