//! Placemark to beach record extraction.
//!
//! Extraction is a pure function of the document text: parse, visit every
//! placemark in document order, read its fields, keep it only if it has
//! usable coordinates.

use super::fields::extended_field;
use super::record::{BeachRecord, BeachRecordBuilder};
use crate::common::Result;
use crate::kml::names::{
    ADDRESS, COORDINATES, DATA, DATA_KEY_ATTR, EXTENDED_DATA, NAME, PLACEMARK, VALUE,
};
use crate::kml::{Coordinates, Document, Element};
use tracing::{debug, info, warn};

/// Records extracted from one document, with the number of placemarks seen.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    records: Vec<BeachRecord>,
    placemarks: usize,
}

impl Extraction {
    /// Kept records in document order.
    pub fn records(&self) -> &[BeachRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<BeachRecord> {
        self.records
    }

    /// Placemarks visited, kept or not.
    pub fn placemarks(&self) -> usize {
        self.placemarks
    }

    /// Placemarks dropped for lack of valid coordinates.
    pub fn discarded(&self) -> usize {
        self.placemarks - self.records.len()
    }
}

/// Extract beach records from KML document text.
///
/// # Errors
///
/// Returns [`crate::Error::ParseError`] if the document is not well-formed.
/// Placemarks without valid coordinates are not errors; they are skipped.
///
/// # Examples
///
/// ```
/// let kml = r#"<kml><Document>
///   <Placemark>
///     <name>Playa del Sol</name>
///     <Point><coordinates>-58.1234,-34.5678,0</coordinates></Point>
///   </Placemark>
///   <Placemark><name>Sin coordenadas</name></Placemark>
/// </Document></kml>"#;
///
/// let beaches = beach_kml::extract_beaches(kml)?;
/// assert_eq!(beaches.len(), 1);
/// assert_eq!(beaches[0].name(), Some("Playa del Sol"));
/// assert_eq!(beaches[0].latitude(), -34.5678);
/// # Ok::<(), beach_kml::Error>(())
/// ```
pub fn extract_beaches(document: &str) -> Result<Vec<BeachRecord>> {
    extract_beaches_with_stats(document).map(Extraction::into_records)
}

/// Like [`extract_beaches`], also reporting how many placemarks were seen.
pub fn extract_beaches_with_stats(document: &str) -> Result<Extraction> {
    let document = Document::parse(document)?;

    let mut records = Vec::new();
    let mut placemarks = 0usize;

    for placemark in document.root().find_all(PLACEMARK) {
        placemarks += 1;
        let builder = read_placemark(placemark);

        if !builder.has_coordinates() {
            debug!(
                index = placemarks - 1,
                name = builder.name_ref().unwrap_or("<unnamed>"),
                "skipping placemark without valid coordinates"
            );
        }
        if let Some(record) = builder.build() {
            records.push(record);
        }
    }

    if placemarks == 0 {
        warn!("document contains no placemarks");
    }
    info!(placemarks, kept = records.len(), "extracted beach records");

    Ok(Extraction { records, placemarks })
}

fn read_placemark(placemark: Element<'_>) -> BeachRecordBuilder {
    let mut builder = BeachRecordBuilder::new();

    if let Some(name) = placemark.child(NAME).and_then(Element::non_empty_text) {
        builder = builder.name(name);
    }

    // Geometry may be wrapped (MultiGeometry, gx:Track...), so search at any depth
    if let Some(coordinates) = placemark
        .find_first(COORDINATES)
        .and_then(Element::non_empty_text)
        .and_then(Coordinates::parse)
    {
        builder = builder.coordinates(coordinates);
    }

    if let Some(address) = placemark.child(ADDRESS).and_then(Element::non_empty_text) {
        builder = builder.address(address);
    }

    if let Some(extended) = placemark.child(EXTENDED_DATA) {
        for data in extended.children_named(DATA) {
            let Some(field) = data.attribute(DATA_KEY_ATTR).and_then(extended_field) else {
                continue;
            };
            if let Some(value) = data.child(VALUE).and_then(Element::non_empty_text) {
                builder = builder.extended(field, value);
            }
        }
    }

    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;

    fn kml(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2"><Document>{}</Document></kml>"#,
            body
        )
    }

    #[test]
    fn test_full_placemark() {
        let doc = kml(
            r#"<Placemark>
                <name>Playa del Sol</name>
                <address>Av. Costanera 1</address>
                <ExtendedData>
                  <Data name="Descripción"><value>Arena fina</value></Data>
                  <Data name="pic"><value>http://x/img.jpg</value></Data>
                  <Data name="Más Información:"><value>http://x/info</value></Data>
                  <Data name="gx_media_links"><value>http://y/alt.jpg</value></Data>
                  <Data name="Telefono"><value>555-1234</value></Data>
                </ExtendedData>
                <Point><coordinates>-58.1234,-34.5678,0</coordinates></Point>
              </Placemark>"#,
        );
        let records = extract_beaches(&doc).unwrap();
        assert_eq!(records.len(), 1);

        let r = &records[0];
        assert_eq!(r.name(), Some("Playa del Sol"));
        assert_eq!(r.longitude(), -58.1234);
        assert_eq!(r.latitude(), -34.5678);
        assert_eq!(r.address(), Some("Av. Costanera 1"));
        assert_eq!(r.description(), Some("Arena fina"));
        assert_eq!(r.image_url(), Some("http://x/img.jpg"));
        assert_eq!(r.more_info_url(), Some("http://x/info"));
        assert_eq!(r.google_image_url(), Some("http://y/alt.jpg"));
    }

    #[test]
    fn test_unknown_keys_contribute_nothing() {
        let doc = kml(
            r#"<Placemark>
                <ExtendedData><Data name="Telefono"><value>555</value></Data></ExtendedData>
                <Point><coordinates>1,2</coordinates></Point>
              </Placemark>"#,
        );
        let records = extract_beaches(&doc).unwrap();
        let json = serde_json::to_value(&records[0]).unwrap();
        assert_eq!(json, serde_json::json!({ "longitude": 1.0, "latitude": 2.0 }));
    }

    #[test]
    fn test_discards_incomplete_placemarks() {
        let doc = kml(
            r#"<Placemark><name>No coords</name><address>Somewhere</address></Placemark>
               <Placemark><name>Empty</name><Point><coordinates>  </coordinates></Point></Placemark>
               <Placemark><name>One token</name><Point><coordinates>-58.0,</coordinates></Point></Placemark>
               <Placemark><name>Garbage</name><Point><coordinates>east,north</coordinates></Point></Placemark>
               <Placemark><name>Kept</name><Point><coordinates>3.0,41.0</coordinates></Point></Placemark>"#,
        );
        let extraction = extract_beaches_with_stats(&doc).unwrap();
        assert_eq!(extraction.placemarks(), 5);
        assert_eq!(extraction.discarded(), 4);
        assert_eq!(extraction.records().len(), 1);
        assert_eq!(extraction.records()[0].name(), Some("Kept"));
    }

    #[test]
    fn test_placemarks_at_any_depth_in_document_order() {
        let doc = kml(
            r#"<Placemark><name>first</name><Point><coordinates>1,1</coordinates></Point></Placemark>
               <Folder>
                 <Folder>
                   <Placemark><name>second</name><Point><coordinates>2,2</coordinates></Point></Placemark>
                 </Folder>
                 <Placemark><name>third</name><Point><coordinates>3,3</coordinates></Point></Placemark>
               </Folder>
               <Placemark><name>fourth</name><Point><coordinates>4,4</coordinates></Point></Placemark>"#,
        );
        let names: Vec<_> = extract_beaches(&doc)
            .unwrap()
            .iter()
            .map(|r| r.name().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["first", "second", "third", "fourth"]);
    }

    #[test]
    fn test_coordinates_inside_nested_geometry() {
        let doc = kml(
            r#"<Placemark>
                <MultiGeometry><Point><coordinates>-0.5,38.3,0</coordinates></Point></MultiGeometry>
              </Placemark>"#,
        );
        let records = extract_beaches(&doc).unwrap();
        assert_eq!(records[0].coordinates(), Coordinates::new(-0.5, 38.3));
    }

    #[test]
    fn test_name_and_address_are_direct_children_only() {
        let doc = kml(
            r#"<Placemark>
                <Point><name>nested</name><address>nested</address><coordinates>1,2</coordinates></Point>
              </Placemark>"#,
        );
        let r = &extract_beaches(&doc).unwrap()[0];
        assert_eq!(r.name(), None);
        assert_eq!(r.address(), None);
    }

    #[test]
    fn test_empty_values_are_not_written() {
        let doc = kml(
            r#"<Placemark>
                <name></name>
                <address>   </address>
                <ExtendedData>
                  <Data name="pic"><value></value></Data>
                  <Data name="Descripción"/>
                </ExtendedData>
                <Point><coordinates>1,2</coordinates></Point>
              </Placemark>"#,
        );
        let r = &extract_beaches(&doc).unwrap()[0];
        assert_eq!(r.name(), None);
        assert_eq!(r.address(), None);
        assert_eq!(r.image_url(), None);
        assert_eq!(r.description(), None);
    }

    #[test]
    fn test_repeated_key_last_value_wins() {
        let doc = kml(
            r#"<Placemark>
                <ExtendedData>
                  <Data name="pic"><value>http://x/first.jpg</value></Data>
                  <Data name="pic"><value>http://x/second.jpg</value></Data>
                  <Data name="pic"><value></value></Data>
                </ExtendedData>
                <Point><coordinates>1,2</coordinates></Point>
              </Placemark>"#,
        );
        let r = &extract_beaches(&doc).unwrap()[0];
        assert_eq!(r.image_url(), Some("http://x/second.jpg"));
    }

    #[test]
    fn test_cdata_description() {
        let doc = kml(
            r#"<Placemark>
                <ExtendedData>
                  <Data name="Descripción"><value><![CDATA[Perros <b>sueltos</b> permitidos]]></value></Data>
                </ExtendedData>
                <Point><coordinates>1,2</coordinates></Point>
              </Placemark>"#,
        );
        let r = &extract_beaches(&doc).unwrap()[0];
        assert_eq!(r.description(), Some("Perros <b>sueltos</b> permitidos"));
    }

    #[test]
    fn test_prefixed_kml() {
        let doc = r#"<kml:kml xmlns:kml="http://www.opengis.net/kml/2.2">
            <kml:Placemark>
              <kml:name>Prefixed</kml:name>
              <kml:Point><kml:coordinates>5,6</kml:coordinates></kml:Point>
            </kml:Placemark>
          </kml:kml>"#;
        let r = &extract_beaches(doc).unwrap()[0];
        assert_eq!(r.name(), Some("Prefixed"));
        assert_eq!(r.coordinates(), Coordinates::new(5.0, 6.0));
    }

    #[test]
    fn test_malformed_document_is_fatal() {
        let err = extract_beaches("<kml><Placemark><name>x</name></kml>").unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));
    }

    #[test]
    fn test_document_without_placemarks() {
        let extraction = extract_beaches_with_stats(&kml("")).unwrap();
        assert_eq!(extraction.placemarks(), 0);
        assert!(extraction.records().is_empty());
    }

    #[test]
    fn test_name_ignores_text_after_child_element() {
        let doc = kml(
            "<Placemark><name>A<b/>B</name><Point><coordinates>1,2</coordinates></Point></Placemark>",
        );
        let r = &extract_beaches(&doc).unwrap()[0];
        assert_eq!(r.name(), Some("A"));
    }

    #[test]
    fn test_deeply_nested_placemark() {
        let depth = 200_000;
        let mut doc = String::with_capacity(depth * 8 + 128);
        doc.push_str("<kml>");
        for _ in 0..depth {
            doc.push_str("<g>");
        }
        doc.push_str("<Placemark><name>Hondo</name><Point><coordinates>1.5,2.5</coordinates></Point></Placemark>");
        for _ in 0..depth {
            doc.push_str("</g>");
        }
        doc.push_str("</kml>");

        let records = extract_beaches(&doc).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), Some("Hondo"));
        assert_eq!(records[0].coordinates(), Coordinates::new(1.5, 2.5));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        /// A generated placemark: its name and coordinates text, plus what
        /// the extractor should make of it.
        #[derive(Debug, Clone)]
        struct Entry {
            name: String,
            coordinates: Option<String>,
            expected: Option<(f64, f64)>,
            nested: bool,
        }

        fn entry_strategy() -> impl Strategy<Value = Entry> {
            let valid = (-180.0f64..180.0, -90.0f64..90.0).prop_map(|(lon, lat)| {
                (Some(format!("{},{},0", lon, lat)), Some((lon, lat)))
            });
            let invalid = prop_oneof![
                Just((None::<String>, None::<(f64, f64)>)),
                Just((Some(String::new()), None::<(f64, f64)>)),
                (-180.0f64..180.0).prop_map(|lon| (Some(format!("{},", lon)), None::<(f64, f64)>)),
                "[a-z]{1,8}".prop_map(|s| (Some(format!("{},{}", s, s)), None::<(f64, f64)>)),
            ];
            (
                "[A-Za-z][A-Za-z ]{0,15}",
                prop_oneof![3 => valid, 1 => invalid],
                any::<bool>(),
            )
                .prop_map(|(name, (coordinates, expected), nested)| Entry {
                    name: name.trim().to_string(),
                    coordinates,
                    expected,
                    nested,
                })
        }

        fn render(entries: &[Entry]) -> String {
            let body: String = entries
                .iter()
                .map(|e| {
                    let geometry = e
                        .coordinates
                        .as_ref()
                        .map(|c| format!("<Point><coordinates>{}</coordinates></Point>", c))
                        .unwrap_or_default();
                    let placemark = format!("<Placemark><name>{}</name>{}</Placemark>", e.name, geometry);
                    if e.nested {
                        format!("<Folder>{}</Folder>", placemark)
                    } else {
                        placemark
                    }
                })
                .collect();
            kml(&body)
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            #[test]
            fn prop_kept_records_match_valid_entries_in_order(
                entries in prop::collection::vec(entry_strategy(), 0..20)
            ) {
                let records = extract_beaches(&render(&entries)).unwrap();
                let expected: Vec<(f64, f64)> = entries.iter().filter_map(|e| e.expected).collect();

                prop_assert_eq!(records.len(), expected.len());
                for (record, (lon, lat)) in records.iter().zip(expected) {
                    // Display output of f64 round-trips exactly
                    prop_assert_eq!(record.longitude(), lon);
                    prop_assert_eq!(record.latitude(), lat);
                }
            }

            #[test]
            fn prop_extraction_is_deterministic(
                entries in prop::collection::vec(entry_strategy(), 0..10)
            ) {
                let doc = render(&entries);
                prop_assert_eq!(extract_beaches(&doc).unwrap(), extract_beaches(&doc).unwrap());
            }
        }
    }
}
