//! Great-circle distances for coordinate input.

use geo::Coord;

const EARTH_RADIUS_METRES: f64 = 6_371_000.0;

/// Great-circle distance in metres between two `(lon, lat)` coordinates.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use sojourn_core::haversine_metres;
///
/// let a = Coord { x: 0.0, y: 0.0 };
/// let b = Coord { x: 0.0, y: 1.0 };
/// let metres = haversine_metres(a, b);
/// assert!((metres - 111_195.0).abs() < 1.0);
/// ```
#[must_use]
pub fn haversine_metres(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();
    let d_lat = (b.y - a.y).to_radians();
    let d_lon = (b.x - a.x).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METRES * h.sqrt().min(1.0).asin()
}
