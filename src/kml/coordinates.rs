//! KML coordinate tuples.
//!
//! A `<coordinates>` element holds `longitude,latitude[,altitude]` tuples.
//! Only the first longitude/latitude pair is read; altitude and any further
//! tuples are ignored.

/// A longitude/latitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    longitude: f64,
    latitude: f64,
}

impl Coordinates {
    #[inline]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude }
    }

    #[inline]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    #[inline]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Parse the text of a `<coordinates>` element.
    ///
    /// The text is split on commas; token 0 is the longitude and token 1 the
    /// latitude. Returns `None` when there are fewer than two tokens or
    /// either token is not a number. Non-finite values (`nan`, `inf`) count
    /// as not a number.
    ///
    /// # Examples
    ///
    /// ```
    /// use beach_kml::kml::Coordinates;
    ///
    /// let c = Coordinates::parse("-58.1234,-34.5678,0").unwrap();
    /// assert_eq!(c.longitude(), -58.1234);
    /// assert_eq!(c.latitude(), -34.5678);
    ///
    /// assert!(Coordinates::parse("-58.0,").is_none());
    /// assert!(Coordinates::parse("-58.0").is_none());
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        let mut tokens = text.trim().split(',');
        let longitude = parse_degrees(tokens.next()?)?;
        let latitude = parse_degrees(tokens.next()?)?;
        Some(Self::new(longitude, latitude))
    }
}

fn parse_degrees(token: &str) -> Option<f64> {
    let token = token.trim();
    // fast-float2 accepts "inf"/"nan" spellings; a coordinate must be finite.
    fast_float2::parse::<f64, _>(token).ok().filter(|v| v.is_finite())
}
