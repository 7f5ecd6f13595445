//! Error types for XML reading and writing.

use thiserror::Error;

/// Errors that can occur when reading or writing XML documents.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Malformed markup.
    #[error("XML syntax error: {0}")]
    Syntax(String),

    /// The document contained no root element.
    #[error("no root element found in XML")]
    NoRoot,

    /// Serialization error while writing.
    #[error("XML write error: {0}")]
    Write(String),
}

/// Result type for XML operations.
pub type Result<T> = std::result::Result<T, Error>;
