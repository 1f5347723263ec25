//! Beach records and their extraction from KML placemarks.

pub mod extractor;
pub mod fields;
pub mod record;

pub use extractor::{Extraction, extract_beaches, extract_beaches_with_stats};
pub use fields::{ExtendedField, extended_field};
pub use record::{BeachRecord, BeachRecordBuilder};
