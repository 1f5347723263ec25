//! Unified error types for beach-kml.
//!
//! Every fallible operation in the crate, from reading the input file to
//! rendering the report, reports through this one error type.
use thiserror::Error;

/// Main error type for beach-kml operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not well-formed markup
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The input bytes are not UTF-8 text
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Rendering extracted records failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for beach-kml operations.
pub type Result<T> = std::result::Result<T, Error>;
