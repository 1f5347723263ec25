//! Reading KML documents from disk.
//!
//! The extractor works on text; this module turns a file into that text.
//! Input must be UTF-8. A UTF-8 byte order mark is stripped, any other BOM
//! is rejected up front instead of surfacing later as a confusing parse
//! error.

use crate::common::bom::{BomKind, detect_bom};
use crate::common::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Read a document from `path` and decode it as UTF-8.
///
/// # Errors
///
/// [`Error::Io`] if the file cannot be read, [`Error::InvalidEncoding`] if
/// its contents are not UTF-8.
pub fn read_document(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "read input document");
    decode_document(bytes)
}

/// Decode raw document bytes as UTF-8, dropping a leading UTF-8 BOM.
pub fn decode_document(mut bytes: Vec<u8>) -> Result<String> {
    match detect_bom(&bytes) {
        Some(BomKind::Utf8) => {
            bytes.drain(..BomKind::Utf8.len());
        },
        Some(other) => {
            return Err(Error::InvalidEncoding(format!(
                "document starts with a {} byte order mark; only UTF-8 is supported",
                other.encoding_name()
            )));
        },
        None => {},
    }
    Ok(String::from_utf8(bytes)?)
}
