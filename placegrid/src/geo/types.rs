//! Geographic primitive types

use std::fmt;

/// Valid latitude range for search regions
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Axis-aligned geographic rectangle.
///
/// Bounds are decimal degrees. The south-west corner must be numerically
/// less than or equal to the north-east corner on both axes; callers are
/// responsible for upholding this, the library does not validate it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    /// South-west corner latitude
    pub sw_lat: f64,
    /// South-west corner longitude
    pub sw_lon: f64,
    /// North-east corner latitude
    pub ne_lat: f64,
    /// North-east corner longitude
    pub ne_lon: f64,
}

impl Rectangle {
    /// Creates a rectangle from its south-west and north-east corners.
    pub fn new(sw_lat: f64, sw_lon: f64, ne_lat: f64, ne_lon: f64) -> Self {
        Self {
            sw_lat,
            sw_lon,
            ne_lat,
            ne_lon,
        }
    }

    /// Returns the arithmetic midpoint of the bounds as (latitude, longitude).
    ///
    /// This is not geodesically correct but matches what the search API
    /// expects as a circle center for rectangles of query size.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (
            (self.sw_lat + self.ne_lat) / 2.0,
            (self.sw_lon + self.ne_lon) / 2.0,
        )
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.6}, {:.6})..({:.6}, {:.6})",
            self.sw_lat, self.sw_lon, self.ne_lat, self.ne_lon
        )
    }
}
