//! beach-kml - extract beach records from KML placemark documents
//!
//! Reads a KML export (for example a Google My Maps layer of dog-friendly
//! beaches), walks every placemark at any depth and turns it into a
//! [`BeachRecord`]. Placemarks without usable coordinates are skipped.
//!
//! # Features
//!
//! - **Well-formedness checked**: malformed markup is a [`Error::ParseError`],
//!   never a partial result
//! - **Namespace tolerant**: prefixed and default-namespace KML read the same
//! - **Order preserving**: records come out in document order
//! - **Clean serialization**: unset optional fields are omitted, not `null`
//!
//! # Example
//!
//! ```
//! let kml = r#"<?xml version="1.0" encoding="UTF-8"?>
//! <kml xmlns="http://www.opengis.net/kml/2.2"><Document><Folder>
//!   <Placemark>
//!     <name>Playa del Sol</name>
//!     <ExtendedData>
//!       <Data name="pic"><value>http://x/img.jpg</value></Data>
//!     </ExtendedData>
//!     <Point><coordinates>-58.1234,-34.5678,0</coordinates></Point>
//!   </Placemark>
//! </Folder></Document></kml>"#;
//!
//! let beaches = beach_kml::extract_beaches(kml)?;
//! assert_eq!(beaches[0].image_url(), Some("http://x/img.jpg"));
//! assert_eq!(beaches[0].longitude(), -58.1234);
//! # Ok::<(), beach_kml::Error>(())
//! ```

/// Beach records and the placemark extractor
pub mod beach;

/// Error types and byte order mark handling
pub mod common;

/// Command line configuration for the binary
pub mod config;

/// KML element tree and coordinate parsing
pub mod kml;

/// Count and sample output
pub mod report;

/// Reading documents from disk
pub mod source;

pub use beach::{BeachRecord, Extraction, extract_beaches, extract_beaches_with_stats};
pub use common::{Error, Result};
pub use config::Config;

use report::Report;
use std::io::Write;

/// Read, extract and report, writing the report to `out`.
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<Extraction> {
    let document = source::read_document(&config.input)?;
    let extraction = extract_beaches_with_stats(&document)?;
    Report::new(extraction.records(), config.sample, config.format).write_to(out)?;
    Ok(extraction)
}
