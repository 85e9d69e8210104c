//! Geographical coordinate type shared by the geocoder and the forecast request.

use std::fmt;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Both values are represented as `f64`.
///
/// Note that GeoJSON (and therefore the geocoding service) orders coordinates as
/// `[longitude, latitude]`; use [`LatLon::from_lon_lat`] when reading such pairs.
///
/// # Examples
///
/// ```
/// use meteodash::LatLon;
///
/// let moscow = LatLon(55.75, 37.61);
/// assert_eq!(moscow.0, 55.75); // Latitude
/// assert_eq!(moscow.1, 37.61); // Longitude
///
/// let from_geojson = LatLon::from_lon_lat([37.61, 55.75]);
/// assert_eq!(from_geojson, moscow);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    /// Builds a coordinate from a GeoJSON-ordered `[lon, lat]` pair.
    pub fn from_lon_lat(pair: [f64; 2]) -> Self {
        LatLon(pair[1], pair[0])
    }

    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.0, self.1)
    }
}
