//! Beach records.

use super::fields::ExtendedField;
use crate::kml::Coordinates;
use serde::Serialize;

/// One beach extracted from a placemark.
///
/// A record always has coordinates; everything else is optional and left
/// out of serialized output when unset. Records are only produced through
/// [`BeachRecordBuilder::build`], which enforces the coordinates rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeachRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    longitude: f64,
    latitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    more_info_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    google_image_url: Option<String>,
}

impl BeachRecord {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.longitude, self.latitude)
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn more_info_url(&self) -> Option<&str> {
        self.more_info_url.as_deref()
    }

    pub fn google_image_url(&self) -> Option<&str> {
        self.google_image_url.as_deref()
    }

    /// Storage-safe identifier derived from the beach name.
    ///
    /// Lowercases the name, turns each run of whitespace into a single `-`
    /// and drops every character outside `[a-z0-9-]`. Returns `None` for
    /// unnamed records or names with nothing left after filtering.
    ///
    /// # Examples
    ///
    /// ```
    /// use beach_kml::beach::BeachRecordBuilder;
    /// use beach_kml::kml::Coordinates;
    ///
    /// let record = BeachRecordBuilder::new()
    ///     .name("Playa de la Rubina")
    ///     .coordinates(Coordinates::new(3.17, 42.25))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(record.slug().as_deref(), Some("playa-de-la-rubina"));
    /// ```
    pub fn slug(&self) -> Option<String> {
        let name = self.name.as_deref()?;
        let mut slug = String::with_capacity(name.len());
        let mut in_whitespace = false;

        for ch in name.chars().flat_map(char::to_lowercase) {
            if ch.is_whitespace() {
                if !in_whitespace {
                    slug.push('-');
                }
                in_whitespace = true;
                continue;
            }
            in_whitespace = false;
            if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' {
                slug.push(ch);
            }
        }

        Some(slug).filter(|s| !s.is_empty())
    }

    /// Object-storage key for the beach's re-hosted image, `beaches/<slug>.jpg`.
    ///
    /// Only records with a name and an image source (`image_url` or
    /// `google_image_url`) have one.
    pub fn image_object_key(&self) -> Option<String> {
        if self.image_url.is_none() && self.google_image_url.is_none() {
            return None;
        }
        self.slug().map(|slug| format!("beaches/{}.jpg", slug))
    }
}

/// Accumulates the fields read from one placemark.
#[derive(Debug, Clone, Default)]
pub struct BeachRecordBuilder {
    name: Option<String>,
    coordinates: Option<Coordinates>,
    address: Option<String>,
    description: Option<String>,
    image_url: Option<String>,
    more_info_url: Option<String>,
    google_image_url: Option<String>,
}

impl BeachRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Set the field selected by an extended-data key.
    pub fn extended(mut self, field: ExtendedField, value: impl Into<String>) -> Self {
        let slot = match field {
            ExtendedField::Description => &mut self.description,
            ExtendedField::ImageUrl => &mut self.image_url,
            ExtendedField::MoreInfoUrl => &mut self.more_info_url,
            ExtendedField::GoogleImageUrl => &mut self.google_image_url,
        };
        *slot = Some(value.into());
        self
    }

    pub fn has_coordinates(&self) -> bool {
        self.coordinates.is_some()
    }

    pub fn name_ref(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Finish the record. Returns `None` without coordinates.
    pub fn build(self) -> Option<BeachRecord> {
        let coordinates = self.coordinates?;
        Some(BeachRecord {
            name: self.name,
            longitude: coordinates.longitude(),
            latitude: coordinates.latitude(),
            address: self.address,
            description: self.description,
            image_url: self.image_url,
            more_info_url: self.more_info_url,
            google_image_url: self.google_image_url,
        })
    }
}
