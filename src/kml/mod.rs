//! KML document model.
//!
//! This module provides the markup side of extraction: a well-formedness
//! checked element tree with descendant queries, the element names used by
//! KML placemarks, and coordinate tuple parsing.

pub mod coordinates;
pub mod tree;

pub use coordinates::Coordinates;
pub use tree::{Descendants, Document, Element};

/// Local names of the KML elements read during extraction.
pub mod names {
    pub const PLACEMARK: &str = "Placemark";
    pub const NAME: &str = "name";
    pub const ADDRESS: &str = "address";
    pub const COORDINATES: &str = "coordinates";
    pub const EXTENDED_DATA: &str = "ExtendedData";
    pub const DATA: &str = "Data";
    pub const VALUE: &str = "value";
    /// Attribute on `<Data>` carrying the annotation key
    pub const DATA_KEY_ATTR: &str = "name";
}
