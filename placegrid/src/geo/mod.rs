//! Geodesic math and rectangle subdivision
//!
//! Provides the great-circle distance and rectangle geometry used to decide
//! whether a region fits inside the provider's maximum search radius, and the
//! N×N grid subdivision the area search descends through.

mod types;

pub use types::{Rectangle, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

/// Earth radius in kilometers used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculates the great-circle distance between two points in kilometers.
///
/// Uses the haversine formula with a fixed Earth radius of 6371 km.
///
/// # Arguments
///
/// * `lat1`, `lon1` - First point in decimal degrees
/// * `lat2`, `lon2` - Second point in decimal degrees
#[inline]
pub fn haversine_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    // Haversine formula
    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Calculates a rectangle's center and approximate radius.
///
/// The center is the arithmetic midpoint of the bounds and the radius is half
/// the haversine distance between the diagonal corners. The radius therefore
/// describes the smallest circle that roughly covers the rectangle when
/// centered on the midpoint.
///
/// # Returns
///
/// `(center_lat, center_lon, approx_radius_km)`
pub fn center_and_radius_km(rect: &Rectangle) -> (f64, f64, f64) {
    let (center_lat, center_lon) = rect.center();
    let diagonal = haversine_distance_km(rect.sw_lat, rect.sw_lon, rect.ne_lat, rect.ne_lon);
    (center_lat, center_lon, diagonal / 2.0)
}

/// Divides a rectangle into a `divisions` × `divisions` grid.
///
/// Latitude and longitude ranges are split into equal-width steps. Cells are
/// returned in row-major order: the outer loop walks latitude bands from
/// south to north, the inner loop walks longitude bands from west to east.
/// The cells tile the original rectangle exactly up to floating-point
/// tolerance.
///
/// # Arguments
///
/// * `rect` - Rectangle to partition
/// * `divisions` - Number of steps per axis (must be at least 1)
pub fn subdivide(rect: &Rectangle, divisions: u32) -> Vec<Rectangle> {
    let lat_step = (rect.ne_lat - rect.sw_lat) / divisions as f64;
    let lon_step = (rect.ne_lon - rect.sw_lon) / divisions as f64;
    let mut cells = Vec::with_capacity((divisions * divisions) as usize);

    for i in 0..divisions {
        for j in 0..divisions {
            cells.push(Rectangle {
                sw_lat: rect.sw_lat + i as f64 * lat_step,
                sw_lon: rect.sw_lon + j as f64 * lon_step,
                ne_lat: rect.sw_lat + (i + 1) as f64 * lat_step,
                ne_lon: rect.sw_lon + (j + 1) as f64 * lon_step,
            });
        }
    }

    cells
}
