//! Extended-data key lookup.
//!
//! Placemarks exported from Google My Maps carry their custom columns as
//! `<Data name="...">` entries. The keys below are the column names of the
//! dog-friendly beaches map; everything else is ignored.

use phf::phf_map;

/// Optional record field filled from an extended-data entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtendedField {
    Description,
    ImageUrl,
    MoreInfoUrl,
    GoogleImageUrl,
}

/// Extended-data key to record field. Keys match exactly and are
/// case-sensitive.
static EXTENDED_FIELDS: phf::Map<&'static str, ExtendedField> = phf_map! {
    "Descripción" => ExtendedField::Description,
    "pic" => ExtendedField::ImageUrl,
    "Más Información:" => ExtendedField::MoreInfoUrl,
    "gx_media_links" => ExtendedField::GoogleImageUrl,
};

/// Look up the record field for an extended-data key.
///
/// # Examples
///
/// ```
/// use beach_kml::beach::{ExtendedField, extended_field};
///
/// assert_eq!(extended_field("pic"), Some(ExtendedField::ImageUrl));
/// assert_eq!(extended_field("Telefono"), None);
/// ```
#[inline]
pub fn extended_field(key: &str) -> Option<ExtendedField> {
    EXTENDED_FIELDS.get(key).copied()
}
